use std::hash::{Hash, Hasher};

use secrecy::{ExposeSecret, Secret};

use crate::domain::user::UserError;

/// Email address identifying the session user.
///
/// Wrapped in `Secret` so it never ends up in debug output or traces.
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let raw = value.expose_secret();
        if raw.is_empty() || !raw.contains('@') {
            return Err(UserError::InvalidEmail(
                "Not a valid email address".to_string(),
            ));
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_plain_address() {
        let email = Email::try_from(Secret::from("user@example.com".to_string())).unwrap();
        assert_eq!(email.as_str(), "user@example.com");
    }

    #[test]
    fn rejects_empty_and_missing_at_sign() {
        assert!(Email::try_from(Secret::from(String::new())).is_err());
        assert!(Email::try_from(Secret::from("userexample.com".to_string())).is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let email = Email::try_from(Secret::from("user@example.com".to_string())).unwrap();
        assert!(!format!("{email:?}").contains("user@example.com"));
    }
}
