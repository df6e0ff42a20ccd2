//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user persistence.
///
/// Soft-deleted records are invisible to every method: lookups return `None`,
/// listings and counts skip them, and updates treat them as missing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user, assigning its id and timestamps.
    ///
    /// Fails with `AlreadyExists` when the storage-level email uniqueness
    /// constraint fires. That constraint, not any pre-check, is the source
    /// of truth under concurrent creates.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Get a non-deleted user by id
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a non-deleted user by email
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// List non-deleted users ordered by creation time descending.
    ///
    /// Returns at most `limit` records after skipping `offset`. An empty
    /// result is not an error.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, DomainError>;

    /// Update an existing user.
    ///
    /// Fails with `NotFound` when the id matches no non-deleted record and
    /// with `AlreadyExists` when the email collides with a different record.
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Soft-delete a user. Returns `false` when nothing matched.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Count non-deleted users
    async fn count(&self) -> Result<i64, DomainError>;
}
