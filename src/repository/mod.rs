//! Storage for users and tasks.
//!
//! The `Repository` trait is the only way the rest of the crate touches persistent
//! state. Every task method takes the owner's id and implementations must apply it
//! inside the query itself, so a task owned by someone else is never loaded.
//! Implementations are safe to share across concurrent requests and each call either
//! fully succeeds or fully fails.

mod memory;
mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewUser, Task, TaskInput, User};

#[derive(Debug, Error)]
pub enum RepoError {
    /// No row matched, either because it does not exist or because it belongs to
    /// another user. The two cases are deliberately not told apart.
    #[error("record not found")]
    NotFound,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            other => RepoError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
pub trait Repository: Send + Sync {
    /// Short name of the storage backend, for diagnostics.
    fn backend(&self) -> &'static str;

    /// Inserts a user. Fails with `DuplicateEmail` if the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, RepoError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn create_task(&self, owner_id: i32, input: TaskInput) -> Result<Task, RepoError>;

    /// All tasks of `owner_id`, ordered by id.
    async fn list_tasks(&self, owner_id: i32) -> Result<Vec<Task>, RepoError>;

    async fn get_task(&self, task_id: i32, owner_id: i32) -> Result<Task, RepoError>;

    async fn delete_task(&self, task_id: i32, owner_id: i32) -> Result<(), RepoError>;

    async fn set_task_done(&self, task_id: i32, owner_id: i32, done: bool)
        -> Result<(), RepoError>;
}
