//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, name, email, phone, active, created_at, updated_at, deleted_at";

/// PostgreSQL implementation of UserRepository.
///
/// Deletion is a soft delete: every read filters on `deleted_at IS NULL`,
/// and the email uniqueness constraint is a partial index over non-deleted
/// rows so a deleted user's address becomes reusable.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (name, email, phone, active)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(user.name())
        .bind(user.email())
        .bind(user.phone())
        .bind(user.is_active())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::already_exists(format!(
                    "User with email '{}' already exists",
                    user.email()
                ))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        row_to_user(&row)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let mut users = Vec::with_capacity(rows.len());

        for row in rows {
            users.push(row_to_user(&row)?);
        }

        Ok(users)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET name = $2, email = $3, phone = $4, active = $5, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(user.id().as_i64())
        .bind(user.name())
        .bind(user.email())
        .bind(user.phone())
        .bind(user.is_active())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::already_exists(format!(
                    "User with email '{}' already exists",
                    user.email()
                ))
            } else {
                DomainError::storage(format!("Failed to update user: {}", e))
            }
        })?;

        match row {
            Some(row) => row_to_user(&row),
            None => Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            ))),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let phone: Option<String> = row
        .try_get("phone")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let active: bool = row
        .try_get("active")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;
    let deleted_at: Option<chrono::DateTime<chrono::Utc>> = row
        .try_get("deleted_at")
        .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?;

    Ok(User::from_parts(
        UserId::new(id),
        name,
        email,
        phone,
        active,
        created_at,
        updated_at,
        deleted_at,
    ))
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.is_unique_violation(),
        _ => false,
    }
}
