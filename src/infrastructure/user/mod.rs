//! User infrastructure module
//!
//! This module provides the user service together with the repository
//! implementations backing it: an in-memory map for tests and the `memory`
//! backend, and PostgreSQL for real deployments.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{
    normalize_page, normalize_page_size, CreateUserRequest, UpdateUserRequest, UserService,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
