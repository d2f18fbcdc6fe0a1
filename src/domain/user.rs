use crate::error::{LoanError, Result};
use uuid::Uuid;

/// The signed-in user. Lives for the session only and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    username: String,
}

impl User {
    /// Simulated login: any non-empty username is accepted.
    pub fn sign_in(username: &str) -> Result<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoanError::ValidationError(
                "Username is required".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}
