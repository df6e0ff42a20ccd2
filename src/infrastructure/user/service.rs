//! User service - business operations over the repository contract

use std::sync::Arc;

use crate::domain::user::{validate_email, validate_name, User, UserId, UserRepository};
use crate::domain::DomainError;

/// Default page size when the caller supplies none or an out-of-range value
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Hard upper bound on page size to prevent unbounded result sets
pub const MAX_PAGE_SIZE: i64 = 100;

/// Coerce a page number into range: anything below 1 becomes 1
pub fn normalize_page(page: i64) -> i64 {
    if page < 1 { 1 } else { page }
}

/// Coerce a page size into range: anything below 1 or above the hard bound
/// falls back to the default
pub fn normalize_page_size(page_size: i64) -> i64 {
    if page_size < 1 || page_size > MAX_PAGE_SIZE {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    }
}

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Request for updating an existing user
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// User service implementing the business rules for user operations
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user.
    ///
    /// Field validity is checked before any I/O. The email lookup is a
    /// best-effort pre-check only: two concurrent creates with the same email
    /// may both pass it, and the loser is rejected by the repository's
    /// uniqueness constraint with the same `AlreadyExists` kind.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::invalid_name(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::invalid_email(e.to_string()))?;

        if self.repository.get_by_email(&request.email).await?.is_some() {
            return Err(DomainError::already_exists(format!(
                "User with email '{}' already exists",
                request.email
            )));
        }

        let user = User::new(request.name, request.email, request.phone);

        self.repository.create(user).await
    }

    /// Get a user by id
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        if id.is_unset() {
            return Err(DomainError::invalid_id("User id must be a positive integer"));
        }

        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// Get a user by email
    pub async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        if email.is_empty() {
            return Err(DomainError::invalid_email("User email cannot be empty"));
        }

        self.repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", email)))
    }

    /// List users with pagination.
    ///
    /// Returns the page of users together with the total count of non-deleted
    /// records. Deriving a total-page count from the pair is the caller's
    /// concern.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<User>, i64), DomainError> {
        let page = normalize_page(page);
        let page_size = normalize_page_size(page_size);
        let offset = (page - 1) * page_size;

        let users = self.repository.list(page_size, offset).await?;
        let total = self.repository.count().await?;

        Ok((users, total))
    }

    /// Update an existing user.
    ///
    /// The existence check runs before the validity gate. The id always comes
    /// from the caller's argument, never from the payload, and the existing
    /// record's activation flag and creation timestamp are preserved.
    pub async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, DomainError> {
        if id.is_unset() {
            return Err(DomainError::invalid_id("User id must be a positive integer"));
        }

        let existing = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        validate_name(&request.name).map_err(|e| DomainError::invalid_name(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::invalid_email(e.to_string()))?;

        // The collision check only runs when the email actually changes
        if request.email != existing.email() {
            if let Some(other) = self.repository.get_by_email(&request.email).await? {
                if other.id() != id {
                    return Err(DomainError::email_taken(format!(
                        "Email '{}' is already taken by another user",
                        request.email
                    )));
                }
            }
        }

        let mut user = existing;
        user.set_name(request.name);
        user.set_email(request.email);
        user.set_phone(request.phone);

        self.repository.update(&user).await
    }

    /// Soft-delete a user.
    ///
    /// Keeps both the existence pre-check and the repository's own missing-row
    /// detection; either one surfaces as `NotFound`.
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        if id.is_unset() {
            return Err(DomainError::invalid_id("User id must be a positive integer"));
        }

        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    /// Activate a user. Activating an already-active user succeeds.
    pub async fn activate(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        user.activate();

        self.repository.update(&user).await
    }

    /// Deactivate a user. Deactivating an already-inactive user succeeds.
    pub async fn deactivate(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        user.deactivate();

        self.repository.update(&user).await
    }
}
