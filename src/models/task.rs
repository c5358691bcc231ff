use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Input structure for creating a task.
///
/// Unknown fields, including any owner id the client sends, are ignored: the owner is
/// always the authenticated caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,

    /// Initial completion flag, `is_done` on the wire. `done` is accepted too.
    #[serde(default, rename = "is_done", alias = "done")]
    pub done: bool,
}

/// Represents a task as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    /// Id of the user who created the task. Never changes.
    pub owner_id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "is_done", alias = "done")]
    pub done: bool,
    pub created_at: DateTime<Utc>,
}
