#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{test, web};
use serde_json::json;
use taskvault::auth::{AuthResponse, PasswordScheme, TokenCodec};
use taskvault::repository::InMemoryRepository;
use taskvault::AppState;

pub const SECRET: &[u8] = b"integration-test-secret";

pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(InMemoryRepository::new()),
        TokenCodec::new(SECRET, chrono::Duration::hours(1)),
        PasswordScheme::Plaintext,
    ))
}

/// Builds the full application around an in-memory repository, wired the same way
/// as `main`.
macro_rules! spawn_app {
    () => {
        spawn_app!(common::state())
    };
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .wrap(taskvault::middleware::CorsFilter)
                .wrap(actix_web::middleware::Logger::default())
                .service(taskvault::routes::health::health)
                .configure(taskvault::routes::config),
        )
        .await
    };
}

pub struct TestUser {
    pub id: i32,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

pub async fn register_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    email: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "registration of {} failed with {}",
        email,
        resp.status()
    );

    let auth: AuthResponse = test::read_body_json(resp).await;
    TestUser {
        id: auth.user_id,
        token: auth.token,
    }
}
