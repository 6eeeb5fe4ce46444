//! API service routes

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use common::error::DatabaseError;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    models::{MessageResponse, User, UserPayload, user::unix_now},
    password::hash_password,
    repositories::UserChanges,
    state::AppState,
    validation::{validate_new_user, validate_required},
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "library-api"
    }))
}

fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        warn!(id = %raw, "invalid user id");
        ApiError::MalformedRequest("Invalid ID".to_string())
    })
}

fn hash(plain: &str) -> ApiResult<String> {
    hash_password(plain).map_err(|e| {
        error!(error = %e, "Failed to hash password");
        ApiError::InternalServerError
    })
}

/// Map a failed write, reporting a taken email as a conflict
fn write_error(context: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |e| match e {
        DatabaseError::Conflict(detail) => {
            warn!(%detail, "email already registered");
            ApiError::Conflict("Email already registered".to_string())
        }
        other => ApiError::store(context)(other),
    }
}

/// Create a new user
#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;

    if let Err(e) = validate_new_user(&payload) {
        warn!(email = %payload.email, reason = %e, "rejected new user");
        return Err(e.into());
    }

    let password_hash = hash(&payload.password_hash)?;
    let user = User::new(payload.name, payload.email, password_hash);

    let created = state
        .user_repository
        .insert(&user)
        .await
        .map_err(write_error("Failed to create user"))?;

    info!(user_id = created.id, email = %created.email, "user created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get all users
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .user_repository
        .find_all()
        .await
        .map_err(ApiError::store("Failed to list users"))?;

    info!("Listed {} users", users.len());
    Ok(Json(users))
}

/// Get a user by ID
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let id = parse_id(&id)?;

    let user = state
        .user_repository
        .find_by_id(id)
        .await
        .map_err(ApiError::store("Failed to fetch user"))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update a user, or soft-delete it when the body sets `is_deleted`
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;

    validate_required(&payload)?;

    if payload.is_deleted {
        return soft_delete_user(&state, id).await;
    }

    let now = unix_now();
    let changes = UserChanges {
        name: payload.name.clone(),
        email: payload.email.clone(),
        password_hash: hash(&payload.password_hash)?,
    };

    let rows_affected = state
        .user_repository
        .update(id, &changes, now)
        .await
        .map_err(write_error("Failed to update user"))?;

    if rows_affected == 0 {
        warn!(user_id = id, "update matched no user");
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    let mut user = payload.into_user(id);
    user.update_timestamps_at(now, false);

    info!(user_id = id, "user updated");
    Ok(Json(user).into_response())
}

async fn soft_delete_user(state: &AppState, id: i64) -> ApiResult<Response> {
    let mut user = User {
        id,
        ..Default::default()
    };
    user.update_timestamps(true);

    let Some(deleted_at) = user.deleted_at else {
        return Err(ApiError::InternalServerError);
    };

    state
        .user_repository
        .soft_delete(id, deleted_at)
        .await
        .map_err(ApiError::store("Failed to delete user"))?;

    info!(user_id = id, deleted_at, "user soft-deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")).into_response())
}

/// Delete a user permanently
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    state
        .user_repository
        .hard_delete(id)
        .await
        .map_err(ApiError::store("Failed to delete user"))?;

    info!(user_id = id, "user removed");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
