//! In-memory user repository implementation
//!
//! Backs the `memory` storage backend and doubles as the zero-I/O test
//! double for the service layer.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository.
///
/// Soft-deleted users stay in the map with their deletion marker set, but
/// leave the email index so the address becomes reusable.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    /// Index for email -> user id lookup, non-deleted users only
    email_index: Arc<RwLock<HashMap<String, i64>>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            email_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        let email = user.email().to_string();

        if email_index.contains_key(&email) {
            return Err(DomainError::already_exists(format!(
                "User with email '{}' already exists",
                email
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let stored = User::from_parts(
            UserId::new(id),
            user.name(),
            user.email(),
            user.phone().map(String::from),
            user.is_active(),
            now,
            now,
            None,
        );

        email_index.insert(email, id);
        users.insert(id, stored.clone());

        Ok(stored)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;

        Ok(users
            .get(&id.as_i64())
            .filter(|u| !u.is_deleted())
            .cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let email_index = self.email_index.read().await;

        if let Some(user_id) = email_index.get(email) {
            let users = self.users.read().await;
            return Ok(users.get(user_id).cloned());
        }

        Ok(None)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| !u.is_deleted())
            .cloned()
            .collect();

        // Newest first; ids break creation-time ties deterministically
        result.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });

        let offset = offset.max(0) as usize;
        let limit = limit.max(0) as usize;

        Ok(result.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        let id = user.id().as_i64();

        let old_email = match users.get(&id).filter(|u| !u.is_deleted()) {
            Some(existing) => existing.email().to_string(),
            None => {
                return Err(DomainError::not_found(format!(
                    "User '{}' not found",
                    user.id()
                )));
            }
        };

        let new_email = user.email().to_string();

        if old_email != new_email {
            if email_index.contains_key(&new_email) {
                return Err(DomainError::already_exists(format!(
                    "User with email '{}' already exists",
                    new_email
                )));
            }

            email_index.remove(&old_email);
            email_index.insert(new_email, id);
        }

        users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let mut email_index = self.email_index.write().await;

        match users.get_mut(&id.as_i64()) {
            Some(user) if !user.is_deleted() => {
                email_index.remove(user.email());
                user.mark_deleted();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let users = self.users.read().await;

        Ok(users.values().filter(|u| !u.is_deleted()).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(name: &str, email: &str) -> User {
        User::new(name, email, None)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let repo = InMemoryUserRepository::new();

        let first = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();
        let second = repo
            .create(create_test_user("Bob", "bob@x.com"))
            .await
            .unwrap();

        assert!(!first.id().is_unset());
        assert!(second.id() > first.id());
        assert_eq!(first.created_at(), first.updated_at());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        let retrieved = repo.get(user.id()).await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().email(), "ann@x.com");

        let missing = repo.get(UserId::new(999)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        let retrieved = repo.get_by_email("ann@x.com").await.unwrap();
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().id(), user.id());

        let not_found = repo.get_by_email("nobody@x.com").await.unwrap();
        assert!(not_found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        let result = repo.create(create_test_user("Ann B", "ann@x.com")).await;
        assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = InMemoryUserRepository::new();
        let mut user = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        user.set_email("annb@x.com");
        repo.update(&user).await.unwrap();

        let retrieved = repo.get(user.id()).await.unwrap().unwrap();
        assert_eq!(retrieved.email(), "annb@x.com");

        // Old email should not be found
        let old = repo.get_by_email("ann@x.com").await.unwrap();
        assert!(old.is_none());

        // New email should be found
        let new = repo.get_by_email("annb@x.com").await.unwrap();
        assert!(new.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let user = User::from_parts(
            UserId::new(42),
            "Ann",
            "ann@x.com",
            None,
            true,
            Utc::now(),
            Utc::now(),
            None,
        );

        let result = repo.update(&user).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_email_conflict() {
        let repo = InMemoryUserRepository::new();

        repo.create(create_test_user("A", "a@x.com")).await.unwrap();
        let mut b = repo.create(create_test_user("B", "b@x.com")).await.unwrap();

        b.set_email("a@x.com");

        let result = repo.update(&b).await;
        assert!(matches!(result, Err(DomainError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_user() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);

        let deleted = repo.delete(user.id()).await.unwrap();
        assert!(deleted);

        assert!(repo.get(user.id()).await.unwrap().is_none());
        assert!(repo.get_by_email("ann@x.com").await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), 0);

        // A second delete finds nothing
        let again = repo.delete(user.id()).await.unwrap();
        assert!(!again);
    }

    #[tokio::test]
    async fn test_email_reusable_after_delete() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        repo.delete(user.id()).await.unwrap();

        let replacement = repo
            .create(create_test_user("Ann Again", "ann@x.com"))
            .await
            .unwrap();
        assert_ne!(replacement.id(), user.id());
    }

    #[tokio::test]
    async fn test_update_deleted_user_not_found() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(create_test_user("Ann", "ann@x.com"))
            .await
            .unwrap();

        repo.delete(user.id()).await.unwrap();

        let result = repo.update(&user).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_ordering_and_pagination() {
        let repo = InMemoryUserRepository::new();

        for i in 1..=5 {
            repo.create(create_test_user(&format!("U{}", i), &format!("u{}@x.com", i)))
                .await
                .unwrap();
        }

        let all = repo.list(10, 0).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].email(), "u5@x.com");
        assert_eq!(all[4].email(), "u1@x.com");

        let page = repo.list(2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email(), "u3@x.com");
        assert_eq!(page[1].email(), "u2@x.com");

        let past_end = repo.list(10, 100).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryUserRepository::new();

        let users = repo.list(10, 0).await.unwrap();
        assert!(users.is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
