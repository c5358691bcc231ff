use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{RepoError, Repository};
use crate::models::{NewUser, Task, TaskInput, User};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    tasks: BTreeMap<i32, Task>,
    last_user_id: i32,
    last_task_id: i32,
}

/// `Repository` that keeps everything in process memory.
///
/// Used when no database is configured and by the test suite. Ids start at 1 and are
/// never reused.
#[derive(Default)]
pub struct InMemoryRepository {
    store: RwLock<Store>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::DuplicateEmail);
        }
        store.last_user_id += 1;
        let created = User {
            id: store.last_user_id,
            username: user.username,
            email: user.email,
            password: user.password,
        };
        store.users.push(created.clone());
        Ok(created)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_task(&self, owner_id: i32, input: TaskInput) -> Result<Task, RepoError> {
        let mut store = self.store.write().await;
        store.last_task_id += 1;
        let task = Task {
            id: store.last_task_id,
            owner_id,
            title: input.title,
            description: input.description,
            done: input.done,
            created_at: Utc::now(),
        };
        store.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list_tasks(&self, owner_id: i32) -> Result<Vec<Task>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .tasks
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get_task(&self, task_id: i32, owner_id: i32) -> Result<Task, RepoError> {
        let store = self.store.read().await;
        store
            .tasks
            .get(&task_id)
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn delete_task(&self, task_id: i32, owner_id: i32) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let owned = store
            .tasks
            .get(&task_id)
            .map_or(false, |t| t.owner_id == owner_id);
        if !owned {
            return Err(RepoError::NotFound);
        }
        store.tasks.remove(&task_id);
        Ok(())
    }

    async fn set_task_done(
        &self,
        task_id: i32,
        owner_id: i32,
        done: bool,
    ) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        match store.tasks.get_mut(&task_id) {
            Some(t) if t.owner_id == owner_id => {
                t.done = done;
                Ok(())
            }
            _ => Err(RepoError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            username: "someone".to_string(),
            email: email.to_string(),
            password: "p".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_keeps_existing_user() {
        let repo = InMemoryRepository::new();
        let first = repo.create_user(new_user("a@x.com")).await.unwrap();

        let mut again = new_user("a@x.com");
        again.password = "other".to_string();
        assert!(matches!(
            repo.create_user(again).await,
            Err(RepoError::DuplicateEmail)
        ));

        let stored = repo.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored, first);
    }

    #[actix_rt::test]
    async fn test_task_queries_are_scoped_to_owner() {
        let repo = InMemoryRepository::new();
        let task = repo
            .create_task(1, TaskInput::default())
            .await
            .unwrap();
        repo.create_task(2, TaskInput::default()).await.unwrap();

        assert_eq!(repo.list_tasks(1).await.unwrap(), vec![task.clone()]);
        assert!(matches!(
            repo.get_task(task.id, 2).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.set_task_done(task.id, 2, true).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            repo.delete_task(task.id, 2).await,
            Err(RepoError::NotFound)
        ));

        // Untouched by the failed attempts above.
        assert_eq!(repo.get_task(task.id, 1).await.unwrap(), task);
    }

    #[actix_rt::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryRepository::new();
        let first = repo.create_task(1, TaskInput::default()).await.unwrap();
        repo.delete_task(first.id, 1).await.unwrap();
        let second = repo.create_task(1, TaskInput::default()).await.unwrap();
        assert!(second.id > first.id);
    }
}
