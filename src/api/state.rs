//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, User, UserId};
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get(&self, id: UserId) -> Result<User, DomainError>;
    async fn get_by_email(&self, email: &str) -> Result<User, DomainError>;
    async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<User>, i64), DomainError>;
    async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: UserId) -> Result<(), DomainError>;
    async fn activate(&self, id: UserId) -> Result<User, DomainError>;
    async fn deactivate(&self, id: UserId) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn get(&self, id: UserId) -> Result<User, DomainError> {
        UserService::get(self, id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        UserService::get_by_email(self, email).await
    }

    async fn list(&self, page: i64, page_size: i64) -> Result<(Vec<User>, i64), DomainError> {
        UserService::list(self, page, page_size).await
    }

    async fn update(&self, id: UserId, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }

    async fn activate(&self, id: UserId) -> Result<User, DomainError> {
        UserService::activate(self, id).await
    }

    async fn deactivate(&self, id: UserId) -> Result<User, DomainError> {
        UserService::deactivate(self, id).await
    }
}

impl AppState {
    /// Create new application state with the provided service
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}
