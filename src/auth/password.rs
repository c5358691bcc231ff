use bcrypt::{hash, verify, BcryptError};

/// How passwords are stored and compared.
///
/// `Plaintext` stores the password as given and compares it verbatim at login, which
/// keeps existing user rows usable. `Bcrypt` hashes at registration instead; switching
/// schemes does not migrate rows created under the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    #[default]
    Plaintext,
    Bcrypt { cost: u32 },
}

impl PasswordScheme {
    /// Turns a submitted password into the value persisted in the user row.
    pub fn prepare(&self, password: &str) -> Result<String, BcryptError> {
        match self {
            PasswordScheme::Plaintext => Ok(password.to_string()),
            PasswordScheme::Bcrypt { cost } => hash(password, *cost),
        }
    }

    /// Checks a submitted password against the stored value.
    pub fn matches(&self, password: &str, stored: &str) -> Result<bool, BcryptError> {
        match self {
            PasswordScheme::Plaintext => Ok(password == stored),
            PasswordScheme::Bcrypt { .. } => verify(password, stored),
        }
    }
}
