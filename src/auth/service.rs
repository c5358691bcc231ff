use std::sync::Arc;

use bcrypt::BcryptError;
use thiserror::Error;

use super::password::PasswordScheme;
use super::token::{TokenCodec, TokenError};
use crate::models::{NewUser, PublicUser};
use crate::repository::{RepoError, Repository};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("no user with that email")]
    NotFound,
    #[error("password does not match")]
    InvalidCredentials,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Password(#[from] BcryptError),
    #[error(transparent)]
    Storage(RepoError),
}

impl From<RepoError> for AuthError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::DuplicateEmail => AuthError::DuplicateEmail,
            other => AuthError::Storage(other),
        }
    }
}

/// A freshly authenticated user and the token minted for them.
#[derive(Debug)]
pub struct AuthOutcome {
    pub user: PublicUser,
    pub token: String,
}

/// Registration and login on top of a `Repository` and a `TokenCodec`.
///
/// Neither operation keeps any state of its own: login is a lookup plus a token mint,
/// registration adds one repository insert.
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn Repository>,
    tokens: TokenCodec,
    passwords: PasswordScheme,
}

impl AuthService {
    pub fn new(repo: Arc<dyn Repository>, tokens: TokenCodec, passwords: PasswordScheme) -> Self {
        Self {
            repo,
            tokens,
            passwords,
        }
    }

    /// Creates the user and returns it with a token bound to its new id.
    ///
    /// Email uniqueness is left to the repository; there is no lookup beforehand.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        let user = self
            .repo
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password: self.passwords.prepare(password)?,
            })
            .await?;

        let token = self.tokens.issue(user.id, &user.email)?;
        log::info!("registered user {}", user.id);

        Ok(AuthOutcome {
            user: user.into(),
            token,
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, AuthError> {
        let user = self
            .repo
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::NotFound)?;

        if !self.passwords.matches(password, &user.password)? {
            log::debug!("login rejected for user {}: password mismatch", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.email)?;
        log::info!("user {} logged in", user.id);

        Ok(AuthOutcome {
            user: user.into(),
            token,
        })
    }
}
