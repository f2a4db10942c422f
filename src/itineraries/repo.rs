use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::Date;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Itinerary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start_date: Date,
    pub end_date: Date,
    pub notes: Option<String>,
    pub user_id: Uuid,
}

pub struct ItineraryFields<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub start_date: Date,
    pub end_date: Date,
    pub notes: Option<&'a str>,
}

impl Itinerary {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Itinerary>, sqlx::Error> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT id, name, location, start_date, end_date, notes, user_id
            FROM itineraries
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Itinerary>, sqlx::Error> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT id, name, location, start_date, end_date, notes, user_id
            FROM itineraries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        fields: ItineraryFields<'_>,
    ) -> Result<Itinerary, sqlx::Error> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            INSERT INTO itineraries (name, location, start_date, end_date, notes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, location, start_date, end_date, notes, user_id
            "#,
        )
        .bind(fields.name)
        .bind(fields.location)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.notes)
        .bind(user_id)
        .fetch_one(db)
        .await
    }

    /// Full replace of the mutable fields. `user_id` is deliberately
    /// absent from the SET list: the owner link is immutable.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        fields: ItineraryFields<'_>,
    ) -> Result<Option<Itinerary>, sqlx::Error> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            UPDATE itineraries
            SET name = $2, location = $3, start_date = $4, end_date = $5, notes = $6
            WHERE id = $1
            RETURNING id, name, location, start_date, end_date, notes, user_id
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.location)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.notes)
        .fetch_optional(db)
        .await
    }

    /// Removes the itinerary and all of its activities in one transaction.
    /// Children go first so an interrupted run can only ever leave an
    /// activity-less itinerary behind, which a retry finishes off.
    pub async fn delete_cascade(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let mut tx = db.begin().await.map_err(AppError::Transaction)?;

        // Checked inside the transaction so a concurrent delete cannot
        // slip between the check and the writes.
        let found = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM itineraries WHERE id = $1)"#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if !found {
            return Err(AppError::not_found("itinerary", id));
        }

        info!(itinerary_id = %id, "cascade delete started");
        match Self::delete_cascade_steps(&mut tx, id).await {
            Ok(activities_deleted) => {
                tx.commit().await.map_err(AppError::Transaction)?;
                info!(itinerary_id = %id, activities_deleted, "cascade delete committed");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(itinerary_id = %id, error = %rollback_err, "rollback failed");
                }
                warn!(itinerary_id = %id, error = %e, "cascade delete rolled back");
                Err(AppError::Transaction(e))
            }
        }
    }

    async fn delete_cascade_steps(
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let activities_deleted = sqlx::query("DELETE FROM activities WHERE itinerary_id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM itineraries WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(activities_deleted)
    }
}
