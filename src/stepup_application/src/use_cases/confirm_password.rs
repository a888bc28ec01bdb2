use stepup_core::{Email, Password, UserStore, UserStoreError};

/// Error types specific to the password-confirmation use case
#[derive(Debug, thiserror::Error)]
pub enum ConfirmPasswordError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

impl ConfirmPasswordError {
    /// Whether the failure is the user getting their password wrong, as
    /// opposed to the backend falling over.
    pub fn is_bad_credentials(&self) -> bool {
        matches!(
            self,
            Self::UserStoreError(UserStoreError::IncorrectPassword)
                | Self::UserStoreError(UserStoreError::UserNotFound)
        )
    }
}

/// Password-confirmation use case - re-authenticates an already signed-in
/// user before their session is granted sudo privileges
pub struct ConfirmPasswordUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> ConfirmPasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    /// Execute the password-confirmation use case
    ///
    /// # Arguments
    /// * `email` - User's email address (from the existing session)
    /// * `password` - User's password, re-entered for confirmation
    ///
    /// # Returns
    /// Ok(Email) on successful re-authentication, or ConfirmPasswordError
    #[tracing::instrument(name = "ConfirmPasswordUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<Email, ConfirmPasswordError> {
        // Re-authenticate the user
        let email = self.user_store.authenticate_user(&email, &password).await?;

        Ok(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::{ExposeSecret, Secret};
    use stepup_core::User;

    #[derive(Clone)]
    struct MockUserStore {
        email: String,
        password: String,
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn add_user(&self, _user: User) -> Result<(), UserStoreError> {
            unimplemented!()
        }

        async fn authenticate_user(
            &self,
            email: &Email,
            password: &Password,
        ) -> Result<Email, UserStoreError> {
            if email.as_ref().expose_secret() == &self.email
                && password.as_ref().expose_secret() == &self.password
            {
                Ok(email.clone())
            } else {
                Err(UserStoreError::IncorrectPassword)
            }
        }
    }

    #[tokio::test]
    async fn test_confirm_password_success() {
        let user_store = MockUserStore {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        let use_case = ConfirmPasswordUseCase::new(user_store);

        let email = Email::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let password = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let result = use_case.execute(email.clone(), password).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), email);
    }

    #[tokio::test]
    async fn test_confirm_password_wrong_password() {
        let user_store = MockUserStore {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };

        let use_case = ConfirmPasswordUseCase::new(user_store);

        let email = Email::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let password = Password::try_from(Secret::from("wrong_password".to_string())).unwrap();

        let result = use_case.execute(email, password).await;
        assert!(result.as_ref().is_err_and(ConfirmPasswordError::is_bad_credentials));
    }
}
