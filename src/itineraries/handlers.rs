use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{error::AppError, state::AppState, users::repo::User};

use super::dto::{ItineraryRequest, ItineraryResponse, ListItinerariesParams};
use super::repo::{Itinerary, ItineraryFields};

pub fn itinerary_routes() -> Router<AppState> {
    Router::new()
        .route("/itineraries", get(list_itineraries).post(create_itinerary))
        .route(
            "/itineraries/:id",
            get(get_itinerary)
                .put(update_itinerary)
                .delete(delete_itinerary),
        )
}

#[instrument(skip(state))]
pub async fn list_itineraries(
    State(state): State<AppState>,
    Query(params): Query<ListItinerariesParams>,
) -> Result<Json<Vec<ItineraryResponse>>, AppError> {
    let Some(user_id) = params.user_id else {
        return Ok(Json(Vec::new()));
    };
    let itineraries = Itinerary::list_by_user(&state.db, user_id).await?;
    Ok(Json(itineraries.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let itinerary = Itinerary::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("itinerary", id))?;
    Ok(Json(itinerary.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_itinerary(
    State(state): State<AppState>,
    Json(payload): Json<ItineraryRequest>,
) -> Result<(StatusCode, Json<ItineraryResponse>), AppError> {
    // The store is not trusted to reject orphaned references, so the
    // owner is resolved before anything is written.
    let owner = User::find_by_id(&state.db, payload.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user", payload.user_id))?;

    let itinerary = Itinerary::create(
        &state.db,
        owner.id,
        ItineraryFields {
            name: &payload.name,
            location: &payload.location,
            start_date: payload.start_date,
            end_date: payload.end_date,
            notes: payload.notes.as_deref(),
        },
    )
    .await?;

    info!(itinerary_id = %itinerary.id, user_id = %owner.id, "itinerary created");
    Ok((StatusCode::CREATED, Json(itinerary.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItineraryRequest>,
) -> Result<Json<ItineraryResponse>, AppError> {
    let itinerary = Itinerary::update(
        &state.db,
        id,
        ItineraryFields {
            name: &payload.name,
            location: &payload.location,
            start_date: payload.start_date,
            end_date: payload.end_date,
            notes: payload.notes.as_deref(),
        },
    )
    .await?
    .ok_or_else(|| AppError::not_found("itinerary", id))?;

    info!(itinerary_id = %id, "itinerary updated");
    Ok(Json(itinerary.into()))
}

#[instrument(skip(state))]
pub async fn delete_itinerary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    Itinerary::delete_cascade(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
