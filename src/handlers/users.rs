//! Users CRUD handlers. Input is validated by the extractors before these run.

use crate::error::AppError;
use crate::extractors::{UserId, ValidJson};
use crate::model::{NewUser, User, UserPatch};
use crate::state::AppState;
use crate::validation::ValidationError;
use axum::{extract::State, http::StatusCode, Json};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list_all().await?;
    tracing::info!(count = users.len(), "listed users");
    Ok(Json(users))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(new_user): ValidJson<NewUser>,
) -> Result<Json<User>, AppError> {
    let user = state.store.insert(&new_user).await?;
    tracing::info!(user_id = user.id, "created user");
    Ok(Json(user))
}

pub async fn get_by_id(State(state): State<AppState>, UserId(id): UserId) -> Result<Json<User>, AppError> {
    let user = state.store.find_by_id(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

/// An update naming none of the updatable fields is rejected before storage is touched.
pub async fn update(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidJson(patch): ValidJson<UserPatch>,
) -> Result<Json<User>, AppError> {
    if patch.is_empty() {
        return Err(ValidationError::no_updates().into());
    }
    let user = state.store.update(id, &patch).await?.ok_or(AppError::NotFound)?;
    tracing::info!(user_id = user.id, "updated user");
    Ok(Json(user))
}

pub async fn delete(State(state): State<AppState>, UserId(id): UserId) -> Result<StatusCode, AppError> {
    if state.store.delete(id).await? == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = id, "deleted user");
    Ok(StatusCode::NO_CONTENT)
}
