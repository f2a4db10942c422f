use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{error::AppError, state::AppState};

use super::dto::{UpsertUserRequest, UserResponse};
use super::repo::User;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(upsert_user))
        .route("/users/firebase/:firebase_uid", get(get_user_by_firebase_uid))
        .route("/users/email/:email", get(get_user_by_email))
}

#[instrument(skip(state, payload))]
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(payload): Json<UpsertUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    if payload.firebase_uid.trim().is_empty() {
        return Err(AppError::validation("firebaseUid must not be empty"));
    }

    let user = User::upsert(
        &state.db,
        &payload.firebase_uid,
        &payload.email,
        &payload.display_name,
    )
    .await?;

    info!(user_id = %user.id, firebase_uid = %user.firebase_uid, "user upserted");
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_user_by_firebase_uid(
    State(state): State<AppState>,
    Path(firebase_uid): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_firebase_uid(&state.db, &firebase_uid)
        .await?
        .ok_or_else(|| AppError::not_found("user", &firebase_uid))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::not_found("user", &email))?;
    Ok(Json(user.into()))
}
