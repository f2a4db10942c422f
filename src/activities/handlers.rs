use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{error::AppError, itineraries::repo::Itinerary, state::AppState};

use super::dto::{ActivityRequest, ActivityResponse, CostTotal, DateParam, ListActivitiesParams};
use super::repo::{Activity, ActivityFields};
use super::services;

pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route(
            "/activities/:id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/activities/budget/total/:itinerary_id", get(total_cost))
        .route("/activities/budget/date/:itinerary_id", get(activities_on_date))
}

#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
    Query(params): Query<ListActivitiesParams>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    let activities = Activity::list_by_itinerary(&state.db, params.itinerary_id).await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ActivityResponse>, AppError> {
    let activity = Activity::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("activity", id))?;
    Ok(Json(activity.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<ActivityRequest>,
) -> Result<(StatusCode, Json<ActivityResponse>), AppError> {
    services::check_cost(payload.cost)?;

    // The store is not trusted to reject orphaned references, so the
    // parent is resolved before anything is written.
    let parent = Itinerary::find_by_id(&state.db, payload.itinerary_id)
        .await?
        .ok_or_else(|| AppError::not_found("itinerary", payload.itinerary_id))?;

    let activity = Activity::create(&state.db, parent.id, fields_of(&payload)).await?;

    info!(activity_id = %activity.id, itinerary_id = %parent.id, "activity created");
    Ok((StatusCode::CREATED, Json(activity.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    services::check_cost(payload.cost)?;

    let activity = Activity::update(&state.db, id, fields_of(&payload))
        .await?
        .ok_or_else(|| AppError::not_found("activity", id))?;

    info!(activity_id = %id, "activity updated");
    Ok(Json(activity.into()))
}

#[instrument(skip(state))]
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !Activity::delete(&state.db, id).await? {
        return Err(AppError::not_found("activity", id));
    }
    info!(activity_id = %id, "activity deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Budget total for an itinerary. An unknown itinerary id yields zero
/// rather than 404; existence is not re-checked on the read side.
#[instrument(skip(state))]
pub async fn total_cost(
    State(state): State<AppState>,
    Path(itinerary_id): Path<Uuid>,
) -> Result<Json<CostTotal>, AppError> {
    let activities = Activity::list_by_itinerary(&state.db, itinerary_id).await?;
    Ok(Json(CostTotal(services::total_cost(&activities))))
}

#[instrument(skip(state))]
pub async fn activities_on_date(
    State(state): State<AppState>,
    Path(itinerary_id): Path<Uuid>,
    Query(param): Query<DateParam>,
) -> Result<Json<Vec<ActivityResponse>>, AppError> {
    let activities =
        Activity::list_by_itinerary_and_date(&state.db, itinerary_id, param.date).await?;
    Ok(Json(activities.into_iter().map(Into::into).collect()))
}

fn fields_of(payload: &ActivityRequest) -> ActivityFields<'_> {
    ActivityFields {
        name: &payload.name,
        location: &payload.location,
        start_time: payload.start_time,
        duration_minutes: payload.duration_minutes,
        cost: payload.cost,
        date: payload.date,
        latitude: payload.latitude,
        longitude: payload.longitude,
        notes: payload.notes.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use std::sync::Arc;
    use time::macros::{date, time};

    fn test_state(db: PgPool) -> AppState {
        AppState {
            db,
            config: Arc::new(AppConfig {
                database_url: String::new(),
                host: "127.0.0.1".into(),
                port: 0,
            }),
        }
    }

    fn request(itinerary_id: Uuid, cost: Decimal) -> ActivityRequest {
        ActivityRequest {
            name: "Tram 28 ride".into(),
            location: "Lisbon".into(),
            start_time: time!(09:30),
            duration_minutes: 45,
            cost,
            date: date!(2026 - 09 - 02),
            latitude: None,
            longitude: None,
            notes: None,
            itinerary_id,
        }
    }

    async fn activity_count(db: &PgPool) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activities")
            .fetch_one(db)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn create_with_missing_parent_persists_nothing(db: PgPool) {
        let payload = request(Uuid::new_v4(), Decimal::new(1250, 2));
        let err = create_activity(State(test_state(db.clone())), Json(payload))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(activity_count(&db).await, 0);
    }

    #[sqlx::test]
    async fn negative_cost_is_rejected_before_any_write(db: PgPool) {
        let payload = request(Uuid::new_v4(), Decimal::new(-500, 2));
        let err = create_activity(State(test_state(db.clone())), Json(payload))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(activity_count(&db).await, 0);
    }
}
