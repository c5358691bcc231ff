//! Task operations, always scoped to the authenticated owner.
//!
//! Every function takes the caller's user id and hands it to the repository, which
//! filters on it in the query. A task belonging to another user therefore produces
//! exactly the same `RepoError::NotFound` as an id that was never allocated.

use serde::Serialize;

use crate::models::{Task, TaskInput};
use crate::repository::{RepoError, Repository};

/// The operations addressed at a single task id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOp {
    Get,
    Delete,
    MarkDone,
    MarkUndone,
}

impl TaskOp {
    pub fn name(&self) -> &'static str {
        match self {
            TaskOp::Get => "get",
            TaskOp::Delete => "delete",
            TaskOp::MarkDone => "mark-done",
            TaskOp::MarkUndone => "mark-undone",
        }
    }
}

/// What an id-addressed operation returns: the task for `Get`, the id otherwise.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TaskOutcome {
    Task(Task),
    Id(i32),
}

/// Creates a task owned by `owner_id`, whatever the input says.
pub async fn create(
    repo: &dyn Repository,
    owner_id: i32,
    input: TaskInput,
) -> Result<Task, RepoError> {
    repo.create_task(owner_id, input).await
}

pub async fn list(repo: &dyn Repository, owner_id: i32) -> Result<Vec<Task>, RepoError> {
    repo.list_tasks(owner_id).await
}

pub async fn run(
    repo: &dyn Repository,
    owner_id: i32,
    op: TaskOp,
    task_id: i32,
) -> Result<TaskOutcome, RepoError> {
    match op {
        TaskOp::Get => repo.get_task(task_id, owner_id).await.map(TaskOutcome::Task),
        TaskOp::Delete => repo
            .delete_task(task_id, owner_id)
            .await
            .map(|_| TaskOutcome::Id(task_id)),
        TaskOp::MarkDone => repo
            .set_task_done(task_id, owner_id, true)
            .await
            .map(|_| TaskOutcome::Id(task_id)),
        TaskOp::MarkUndone => repo
            .set_task_done(task_id, owner_id, false)
            .await
            .map(|_| TaskOutcome::Id(task_id)),
    }
}
