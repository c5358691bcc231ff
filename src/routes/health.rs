use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// Liveness probe. Reports which storage backend the process runs on.
#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "storage": state.repo.backend(),
        "timestamp": Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{PasswordScheme, TokenCodec};
    use crate::repository::InMemoryRepository;
    use actix_web::test;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_endpoint() {
        let state = AppState::new(
            Arc::new(InMemoryRepository::new()),
            TokenCodec::new(b"health", chrono::Duration::hours(1)),
            PasswordScheme::Plaintext,
        );
        let app = test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new(state))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let json: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["storage"], "memory");
        assert!(json["timestamp"].is_string());
    }
}
