use secrecy::{ExposeSecret, Secret};

use crate::domain::user::UserError;

/// A password as submitted by the user, kept secret end to end.
///
/// Only presence is validated here - whether the password is *correct* is the
/// `UserStore`'s call.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().is_empty() {
            return Err(UserError::InvalidPassword(
                "Password must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty_passwords() {
        assert!(Password::try_from(Secret::from("hunter2!".to_string())).is_ok());
    }

    #[test]
    fn rejects_the_empty_password() {
        assert!(Password::try_from(Secret::from(String::new())).is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let password = Password::try_from(Secret::from("hunter2!".to_string())).unwrap();
        assert!(!format!("{password:?}").contains("hunter2"));
    }
}
