use actix_web::dev::Payload;
use actix_web::http::header::{HeaderValue, AUTHORIZATION};
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use super::token::{TokenCodec, TokenError};
use crate::error::AppError;
use crate::state::AppState;

/// Why a request was turned away before reaching its handler.
#[derive(Debug)]
pub enum Rejection {
    MissingHeader,
    NotBearer,
    InvalidToken(TokenError),
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::MissingHeader => "Authorization header required",
            Rejection::NotBearer => "Bearer token required",
            Rejection::InvalidToken(_) => "Invalid token",
        }
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::Unauthorized(rejection.message().to_string())
    }
}

/// The caller's identity, recovered from a verified bearer token.
///
/// Protected handlers take this as a parameter. Its only constructor is
/// [`authenticate`], so holding one means the token was checked; nothing the client
/// sends in a body or path can stand in for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    user_id: i32,
    email: String,
}

impl AuthenticatedUser {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Resolves an `Authorization` header into an identity.
///
/// An empty header is treated the same as an absent one.
/// Expired, forged and malformed tokens are all reported as `InvalidToken`; the
/// precise cause is only logged.
pub fn authenticate(
    header: Option<&HeaderValue>,
    tokens: &TokenCodec,
) -> Result<AuthenticatedUser, Rejection> {
    let header = header
        .filter(|value| !value.is_empty())
        .ok_or(Rejection::MissingHeader)?;
    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(Rejection::NotBearer)?;

    match tokens.verify(token) {
        Ok(identity) => Ok(AuthenticatedUser {
            user_id: identity.user_id,
            email: identity.email,
        }),
        Err(e) => {
            log::debug!("rejecting bearer token: {}", e);
            Err(Rejection::InvalidToken(e))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            log::error!("AppState is not registered; cannot authenticate {}", req.path());
            let err = AppError::InternalServerError("Internal Server Error".into());
            return ready(Err(err.into()));
        };

        let result: Result<Self, ActixError> =
            authenticate(req.headers().get(AUTHORIZATION), &state.tokens)
                .map_err(|rejection| AppError::from(rejection).into());
        ready(result)
    }
}
