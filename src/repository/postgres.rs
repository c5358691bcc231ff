use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{RepoError, Repository};
use crate::models::{NewUser, Task, TaskInput, User};

const TASK_COLUMNS: &str = "id, owner_id, title, description, done, created_at";

/// `Repository` backed by Postgres through a sqlx connection pool.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn not_found_if_untouched(rows_affected: u64) -> Result<(), RepoError> {
    if rows_affected == 0 {
        Err(RepoError::NotFound)
    } else {
        Ok(())
    }
}

#[async_trait]
impl Repository for PgRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_user(&self, user: NewUser) -> Result<User, RepoError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password) VALUES ($1, $2, $3)
             RETURNING id, username, email, password",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepoError::DuplicateEmail
            }
            other => other.into(),
        })
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_task(&self, owner_id: i32, input: TaskInput) -> Result<Task, RepoError> {
        let sql = format!(
            "INSERT INTO tasks (owner_id, title, description, done) VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(input.title)
            .bind(input.description)
            .bind(input.done)
            .fetch_one(&self.pool)
            .await?;
        Ok(task)
    }

    async fn list_tasks(&self, owner_id: i32) -> Result<Vec<Task>, RepoError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY id",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn get_task(&self, task_id: i32, owner_id: i32) -> Result<Task, RepoError> {
        let sql = format!(
            "SELECT {} FROM tasks WHERE id = $1 AND owner_id = $2",
            TASK_COLUMNS
        );
        sqlx::query_as::<_, Task>(&sql)
            .bind(task_id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn delete_task(&self, task_id: i32, owner_id: i32) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        not_found_if_untouched(result.rows_affected())
    }

    async fn set_task_done(
        &self,
        task_id: i32,
        owner_id: i32,
        done: bool,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE tasks SET done = $3 WHERE id = $1 AND owner_id = $2")
            .bind(task_id)
            .bind(owner_id)
            .bind(done)
            .execute(&self.pool)
            .await?;
        not_found_if_untouched(result.rows_affected())
    }
}
