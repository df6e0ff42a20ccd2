//! User management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, ApiResponse, Json, PaginatedResponse};
use crate::domain::{User, UserId};
use crate::infrastructure::user::{
    normalize_page, normalize_page_size, CreateUserRequest, UpdateUserRequest,
};

/// Request to create a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request to update a user.
///
/// Carries no identifier on purpose: the path parameter is the only id a
/// client can address, so a stray `id` field in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserApiRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// User representation returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            phone: user.phone().map(String::from),
            active: user.is_active(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Pagination query parameters for listing users
#[derive(Debug, Clone, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Create the users API router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", put(update_user))
        .route("/users/{id}", delete(delete_user))
        .route("/users/{id}/activate", put(activate_user))
        .route("/users/{id}/deactivate", put(deactivate_user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    debug!(email = %request.email, "Creating user");

    let service_request = CreateUserRequest {
        name: request.name,
        email: request.email,
        phone: request.phone,
    };

    let user = state
        .user_service
        .create(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "User created successfully",
            UserResponse::from(&user),
        )),
    ))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<UserResponse>>>, ApiError> {
    debug!(page = query.page, page_size = query.page_size, "Listing users");

    let (users, total) = state
        .user_service
        .list(query.page, query.page_size)
        .await
        .map_err(ApiError::from)?;

    // Page metadata reflects the same normalization the service applied
    let page = normalize_page(query.page);
    let page_size = normalize_page_size(query.page_size);
    let items: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();

    Ok(Json(ApiResponse::success(
        "Users retrieved successfully",
        PaginatedResponse::new(items, total, page, page_size),
    )))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    debug!(id = %id, "Getting user");

    let id = parse_user_id(&id)?;
    let user = state.user_service.get(id).await.map_err(ApiError::from)?;

    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        UserResponse::from(&user),
    )))
}

/// PUT /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    debug!(id = %id, "Updating user");

    let id = parse_user_id(&id)?;

    let service_request = UpdateUserRequest {
        name: request.name,
        email: request.email,
        phone: request.phone,
    };

    let user = state
        .user_service
        .update(id, service_request)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::success(
        "User updated successfully",
        UserResponse::from(&user),
    )))
}

/// DELETE /users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    debug!(id = %id, "Deleting user");

    let id = parse_user_id(&id)?;
    state.user_service.delete(id).await.map_err(ApiError::from)?;

    Ok(Json(ApiResponse::message("User deleted successfully")))
}

/// PUT /users/:id/activate
pub async fn activate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    debug!(id = %id, "Activating user");

    let id = parse_user_id(&id)?;
    let user = state
        .user_service
        .activate(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::success(
        "User activated successfully",
        UserResponse::from(&user),
    )))
}

/// PUT /users/:id/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    debug!(id = %id, "Deactivating user");

    let id = parse_user_id(&id)?;
    let user = state
        .user_service
        .deactivate(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::success(
        "User deactivated successfully",
        UserResponse::from(&user),
    )))
}

/// Parse a path segment into a user id.
///
/// Rejects anything that is not a non-negative integer; the zero sentinel is
/// let through so the service reports it as an invalid id.
fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 0)
        .map(UserId::new)
        .ok_or_else(|| {
            ApiError::bad_request("Invalid user ID")
                .with_detail(format!("'{}' is not a valid user id", raw))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_create_user_request_deserialization() {
        let json = r#"{
            "name": "Ann",
            "email": "ann@x.com"
        }"#;

        let request: CreateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Ann");
        assert_eq!(request.email, "ann@x.com");
        assert!(request.phone.is_none());
    }

    #[test]
    fn test_create_user_request_with_phone() {
        let json = r#"{
            "name": "Ann",
            "email": "ann@x.com",
            "phone": "555-0100"
        }"#;

        let request: CreateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.phone, Some("555-0100".to_string()));
    }

    #[test]
    fn test_update_user_request_ignores_id_field() {
        // A payload that smuggles an id deserializes fine and carries none:
        // only the path id ever reaches the service.
        let json = r#"{
            "id": 999,
            "name": "Ann",
            "email": "ann@x.com"
        }"#;

        let request: UpdateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Ann");
        assert_eq!(request.email, "ann@x.com");
    }

    #[test]
    fn test_list_users_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
    }

    #[test]
    fn test_user_response_from_entity() {
        let user = User::new("Ann", "ann@x.com", Some("555-0100".to_string()));
        let response = UserResponse::from(&user);

        assert_eq!(response.id, 0);
        assert_eq!(response.name, "Ann");
        assert_eq!(response.email, "ann@x.com");
        assert_eq!(response.phone, Some("555-0100".to_string()));
        assert!(response.active);
    }

    #[test]
    fn test_user_response_serialization() {
        let user = User::new("Ann", "ann@x.com", None);
        let response = UserResponse::from(&user);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"name\":\"Ann\""));
        assert!(json.contains("\"active\":true"));
        assert!(json.contains("\"created_at\":"));
        assert!(!json.contains("phone"));
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("7").unwrap(), UserId::new(7));
        assert_eq!(parse_user_id("0").unwrap(), UserId::UNSET);
    }

    #[test]
    fn test_parse_user_id_rejects_garbage() {
        for raw in ["abc", "-5", "1.5", ""] {
            let err = parse_user_id(raw).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "input: {:?}", raw);
        }
    }
}
