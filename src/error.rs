//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the single error type every HTTP handler returns.
//! Lower layers (token codec, repository, authentication service) carry their own
//! `thiserror` enums; each of them converts into `AppError` here, which is where the
//! status code for a failure is decided.
//!
//! Responses are short plain-text messages. Storage failures are rendered as a generic
//! "Internal Server Error" and their detail only goes to the log.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

use crate::auth::service::AuthError;
use crate::auth::token::TokenError;
use crate::repository::RepoError;

/// Represents all possible errors that can reach an HTTP client.
#[derive(Debug)]
pub enum AppError {
    /// Authentication is missing or failed (HTTP 401).
    Unauthorized(String),
    /// The request body or path could not be understood (HTTP 400).
    BadRequest(String),
    /// The requested resource was not found (HTTP 404).
    /// Only used for unknown emails at login; task lookups never produce it.
    NotFound(String),
    /// The request conflicts with existing state, e.g. a duplicate email (HTTP 409).
    Conflict(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// A repository failure (HTTP 500). The message is logged, never sent.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl AppError {
    /// The text sent to the client.
    fn public_message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg) => msg,
            AppError::DatabaseError(_) => "Internal Server Error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.public_message().to_owned())
    }
}

/// Every repository failure, including "task not found" and "not owned",
/// surfaces as an opaque 500.
impl From<RepoError> for AppError {
    fn from(error: RepoError) -> AppError {
        log::error!("repository failure: {}", error);
        AppError::DatabaseError(error.to_string())
    }
}

/// Verification failures all collapse into one generic message so callers cannot
/// tell an expired token from a forged one.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Issue(msg) => {
                log::error!("token issuance failed: {}", msg);
                AppError::InternalServerError("Error generating token".into())
            }
            _ => AppError::Unauthorized("Invalid token".into()),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        log::error!("password hashing failed: {}", error);
        AppError::InternalServerError("Internal Server Error".into())
    }
}

impl From<AuthError> for AppError {
    fn from(error: AuthError) -> AppError {
        match error {
            AuthError::DuplicateEmail => AppError::Conflict("User already exists".into()),
            AuthError::NotFound => AppError::NotFound("User not found".into()),
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid password".into()),
            AuthError::Token(e) => e.into(),
            AuthError::Password(e) => e.into(),
            AuthError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("User not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::Conflict("User already exists".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_database_error_detail_is_not_sent() {
        let error = AppError::DatabaseError("relation \"tasks\" does not exist".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);

        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }

    #[test]
    fn test_repo_not_found_is_a_server_error() {
        let error: AppError = RepoError::NotFound.into();
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_token_errors_are_indistinguishable() {
        for err in [
            TokenError::Malformed,
            TokenError::SignatureInvalid,
            TokenError::Expired,
        ] {
            let app_err: AppError = err.into();
            assert_eq!(app_err.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(app_err.public_message(), "Invalid token");
        }
    }

    #[test]
    fn test_auth_error_mapping() {
        let cases = [
            (AuthError::DuplicateEmail, StatusCode::CONFLICT),
            (AuthError::NotFound, StatusCode::NOT_FOUND),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                AuthError::Storage(RepoError::Backend("pool timed out".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let app_err: AppError = err.into();
            assert_eq!(app_err.status_code(), status);
        }
    }
}
