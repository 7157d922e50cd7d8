//! Credential Storage
//!
//! Process-lifetime account storage behind the [`CredentialStore`] trait, so a
//! persistent backend can replace the in-memory one without touching handlers.

use argon2::password_hash::rand_core::OsRng;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::models::Account;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("username and password are required")]
    InvalidInput,
    #[error("account '{0}' already exists")]
    DuplicateAccount(String),
    #[error("failed to hash secret: {0}")]
    Hashing(String),
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Register a new account. Fails if either field is empty or the
    /// username is already taken.
    async fn register(&self, username: &str, secret: &str) -> Result<(), AccountError>;

    /// Look up an account whose username matches exactly and whose stored
    /// hash verifies against `secret`.
    async fn find(&self, username: &str, secret: &str) -> Option<Account>;

    /// Number of registered accounts
    async fn len(&self) -> usize;
}

/// In-memory store; all accounts are lost when the process exits.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Verified against when the username is unknown, so a miss on the
/// username costs the same argon2 work as a miss on the secret.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| hash_secret("no-such-account").unwrap_or_default());

fn hash_secret(secret: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::Hashing(e.to_string()))
}

fn verify_secret(secret: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored secret hash could not be parsed: {}", e);
            false
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn register(&self, username: &str, secret: &str) -> Result<(), AccountError> {
        if username.is_empty() || secret.is_empty() {
            return Err(AccountError::InvalidInput);
        }

        // Hash before taking the lock; only check-then-insert is serialized.
        let secret_hash = hash_secret(secret)?;

        let mut accounts = self.accounts.write();
        match accounts.entry(username.to_string()) {
            Entry::Occupied(_) => Err(AccountError::DuplicateAccount(username.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Account {
                    username: username.to_string(),
                    secret_hash,
                    created_at: Utc::now(),
                });
                info!("Registered account: {}", username);
                Ok(())
            }
        }
    }

    async fn find(&self, username: &str, secret: &str) -> Option<Account> {
        let account = self.accounts.read().get(username).cloned();
        let Some(account) = account else {
            verify_secret(secret, &DUMMY_HASH);
            return None;
        };

        verify_secret(secret, &account.secret_hash).then_some(account)
    }

    async fn len(&self) -> usize {
        self.accounts.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_and_find() {
        let store = InMemoryCredentialStore::new();

        store.register("alice", "hunter2").await.unwrap();

        let account = store.find("alice", "hunter2").await.unwrap();
        assert_eq!(account.username, "alice");
        assert_ne!(account.secret_hash, "hunter2");
        assert!(account.secret_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_find_is_exact() {
        let store = InMemoryCredentialStore::new();
        store.register("alice", "hunter2").await.unwrap();

        assert!(store.find("alice", "wrong").await.is_none());
        assert!(store.find("Alice", "hunter2").await.is_none());
        assert!(store.find("alice", "HUNTER2").await.is_none());
        assert!(store.find("nobody", "hunter2").await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_username_is_checked_against_dummy_hash() {
        assert!(PasswordHash::new(&DUMMY_HASH).is_ok());
        assert!(verify_secret("no-such-account", &DUMMY_HASH));

        // Even the dummy secret never yields an account
        let store = InMemoryCredentialStore::new();
        assert!(store.find("ghost", "no-such-account").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let store = InMemoryCredentialStore::new();

        assert_eq!(store.register("", "x").await, Err(AccountError::InvalidInput));
        assert_eq!(store.register("alice", "").await, Err(AccountError::InvalidInput));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_rejected_and_original_kept() {
        let store = InMemoryCredentialStore::new();
        store.register("alice", "first").await.unwrap();

        assert_eq!(
            store.register("alice", "second").await,
            Err(AccountError::DuplicateAccount("alice".to_string()))
        );
        assert_eq!(store.len().await, 1);
        assert!(store.find("alice", "first").await.is_some());
        assert!(store.find("alice", "second").await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicate_registration() {
        let store = Arc::new(InMemoryCredentialStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.register("alice", &format!("pw{i}")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(store.len().await, 1);
    }
}
