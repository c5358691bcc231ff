use std::sync::Arc;

use crate::auth::{AuthService, PasswordScheme, TokenCodec};
use crate::repository::Repository;

/// Shared application state, registered once as `web::Data<AppState>`.
///
/// Nothing in here is mutable: per-request state lives in the repository.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub tokens: TokenCodec,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, tokens: TokenCodec, passwords: PasswordScheme) -> Self {
        let auth = AuthService::new(repo.clone(), tokens.clone(), passwords);
        Self { repo, tokens, auth }
    }
}
