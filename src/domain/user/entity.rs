//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_email, validate_name};

/// User identifier - a positive integer assigned by the persistence layer.
///
/// Zero is the sentinel for "not yet persisted" and is never a valid lookup
/// key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// The sentinel for a record that has not been persisted yet
    pub const UNSET: UserId = UserId(0);

    /// Wrap a raw identifier
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw integer value
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Check whether this is the "not yet persisted" sentinel
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Identifier assigned by the persistence layer; `UserId::UNSET` before
    id: UserId,
    /// Display name, required
    name: String,
    /// Email address, required, unique among non-deleted users
    email: String,
    /// Optional phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    /// Whether the account is active
    active: bool,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
    /// Soft-delete marker - never exposed in serialization
    #[serde(skip_serializing)]
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new, not-yet-persisted user
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::UNSET,
            name: name.into(),
            email: email.into(),
            phone,
            active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Reconstruct a persisted user from storage
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone,
            active,
            created_at,
            updated_at,
            deleted_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Check whether the record carries a soft-delete marker
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the user entity is valid: name and email are non-empty
    pub fn is_valid(&self) -> bool {
        validate_name(&self.name).is_ok() && validate_email(&self.email).is_ok()
    }

    // Mutators

    /// Update the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Update the email
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    /// Update the phone number
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone;
        self.touch();
    }

    /// Mark the user as active. Idempotent.
    pub fn activate(&mut self) {
        self.active = true;
        self.touch();
    }

    /// Mark the user as inactive. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.touch();
    }

    /// Stamp the soft-delete marker
    pub fn mark_deleted(&mut self) {
        self.deleted_at = Some(Utc::now());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
