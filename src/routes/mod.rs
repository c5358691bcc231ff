pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;
use crate::tasks::TaskOp;

/// Registers every `/api` route. The app must also carry `web::Data<AppState>`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(auth::register)
            .service(auth::login)
            .route("/task/create", web::post().to(tasks::create_task))
            .route("/tasks", web::get().to(tasks::list_tasks))
            .route("/task/delete/{id}", tasks::by_id(web::delete(), TaskOp::Delete))
            .route("/task/done/{id}", tasks::by_id(web::post(), TaskOp::MarkDone))
            .route("/task/undone/{id}", tasks::by_id(web::post(), TaskOp::MarkUndone))
            .route("/task/{id}", tasks::by_id(web::get(), TaskOp::Get)),
    );
}

/// Unreadable or missing JSON bodies become a plain 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, req: &HttpRequest| {
        log::debug!("rejecting body for {}: {}", req.path(), err);
        AppError::BadRequest("Invalid request body".into()).into()
    })
}
