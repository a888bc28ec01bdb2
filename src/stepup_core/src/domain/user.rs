use thiserror::Error;

use crate::domain::{email::Email, password::Password};

/// Errors from constructing domain values out of untrusted input.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}

/// A user record as handed to a `UserStore` for registration.
#[derive(Debug, Clone)]
pub struct User {
    email: Email,
    password: Password,
}

impl User {
    pub fn new(email: Email, password: Password) -> Self {
        Self { email, password }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}
