use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use stepup_core::{Email, Password, User, UserStore, UserStoreError};
use tokio::sync::RwLock;

/// In-memory `UserStore` holding argon2 password hashes.
///
/// Clones share the same map via `Arc<RwLock<..>>`, so the store can be
/// handed to every route that needs it.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, Secret<String>>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    #[tracing::instrument(name = "Adding user to in-memory store", skip_all)]
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(user.password().clone()).await?;

        let mut users = self.users.write().await;
        if users.contains_key(user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), password_hash);
        Ok(())
    }

    #[tracing::instrument(name = "Validating user credentials", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Email, UserStoreError> {
        let stored_hash = {
            let users = self.users.read().await;
            users
                .get(email)
                .cloned()
                .ok_or(UserStoreError::UserNotFound)?
        };

        verify_password_hash(stored_hash, password.clone()).await?;

        Ok(email.clone())
    }
}

// Hashing is CPU-bound, so both helpers run on the blocking pool.

async fn compute_password_hash(password: Password) -> Result<Secret<String>, UserStoreError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let params = Params::new(15_000, 2, 1, None)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
            .to_string();
        Ok(Secret::from(hash))
    })
    .await
    .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
}

async fn verify_password_hash(
    expected_hash: Secret<String>,
    candidate: Password,
) -> Result<(), UserStoreError> {
    tokio::task::spawn_blocking(move || {
        let hash = PasswordHash::new(expected_hash.expose_secret())
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Argon2::default()
            .verify_password(candidate.as_ref().expose_secret().as_bytes(), &hash)
            .map_err(|_| UserStoreError::IncorrectPassword)
    })
    .await
    .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, password: &str) -> User {
        User::new(
            Email::try_from(Secret::from(email.to_string())).unwrap(),
            Password::try_from(Secret::from(password.to_string())).unwrap(),
        )
    }

    #[tokio::test]
    async fn authenticates_a_registered_user() {
        let store = HashMapUserStore::new();
        store.add_user(user("test@example.com", "password123")).await.unwrap();

        let email = Email::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let password = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let result = store.authenticate_user(&email, &password).await;
        assert_eq!(result.unwrap(), email);
    }

    #[tokio::test]
    async fn rejects_a_wrong_password() {
        let store = HashMapUserStore::new();
        store.add_user(user("test@example.com", "password123")).await.unwrap();

        let email = Email::try_from(Secret::from("test@example.com".to_string())).unwrap();
        let wrong = Password::try_from(Secret::from("wrong_password".to_string())).unwrap();

        let result = store.authenticate_user(&email, &wrong).await;
        assert_eq!(result.unwrap_err(), UserStoreError::IncorrectPassword);
    }

    #[tokio::test]
    async fn rejects_an_unknown_user() {
        let store = HashMapUserStore::new();

        let email = Email::try_from(Secret::from("missing@example.com".to_string())).unwrap();
        let password = Password::try_from(Secret::from("password123".to_string())).unwrap();

        let result = store.authenticate_user(&email, &password).await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserNotFound);
    }

    #[tokio::test]
    async fn rejects_duplicate_registration() {
        let store = HashMapUserStore::new();
        store.add_user(user("test@example.com", "password123")).await.unwrap();

        let result = store.add_user(user("test@example.com", "other_password")).await;
        assert_eq!(result.unwrap_err(), UserStoreError::UserAlreadyExists);
    }
}
