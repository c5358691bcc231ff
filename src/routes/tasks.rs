use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::TaskInput,
    state::AppState,
    tasks::{self, TaskOp},
};
use actix_web::{web, HttpResponse, Route};

/// Creates a task owned by the caller and returns it.
///
/// ## Responses:
/// - `200 OK`: the created `Task`, with `is_done` as supplied (default `false`).
/// - `400 Bad Request`: unreadable body.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `500 Internal Server Error`: storage failure.
pub async fn create_task(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<HttpResponse, AppError> {
    let input = task_data.into_inner();
    let task = tasks::create(state.repo.as_ref(), user.user_id(), input).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Lists the caller's tasks, oldest first.
pub async fn list_tasks(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let tasks = tasks::list(state.repo.as_ref(), user.user_id()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Binds `op` to a route whose path carries an `{id}` segment.
pub fn by_id(route: Route, op: TaskOp) -> Route {
    route.to(
        move |state: web::Data<AppState>, user: AuthenticatedUser, id: web::Path<String>| {
            task_by_id(op, state, user, id)
        },
    )
}

/// Shared body of every id-addressed task endpoint.
///
/// A non-numeric id is a 400. Any repository failure, including a task that does not
/// exist or belongs to someone else, is a 500.
async fn task_by_id(
    op: TaskOp,
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    raw_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task_id: i32 = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid task ID".into()))?;

    let outcome = tasks::run(state.repo.as_ref(), user.user_id(), op, task_id).await?;
    log::debug!(
        "{} task {} for user {} <{}>",
        op.name(),
        task_id,
        user.user_id(),
        user.email()
    );

    Ok(HttpResponse::Ok().json(outcome))
}
