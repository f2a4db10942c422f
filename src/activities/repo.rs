use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, Time};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start_time: Time,
    pub duration_minutes: i32,
    pub cost: Decimal,
    pub date: Date,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub itinerary_id: Uuid,
}

pub struct ActivityFields<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub start_time: Time,
    pub duration_minutes: i32,
    pub cost: Decimal,
    pub date: Date,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<&'a str>,
}

impl Activity {
    /// Order is the storage's natural return order; nothing is promised.
    pub async fn list_by_itinerary(
        db: &PgPool,
        itinerary_id: Uuid,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, location, start_time, duration_minutes, cost, date,
                   latitude, longitude, notes, itinerary_id
            FROM activities
            WHERE itinerary_id = $1
            "#,
        )
        .bind(itinerary_id)
        .fetch_all(db)
        .await
    }

    /// Exact date match, earliest start first. Ties keep the storage's
    /// return order; no secondary sort key.
    pub async fn list_by_itinerary_and_date(
        db: &PgPool,
        itinerary_id: Uuid,
        date: Date,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, location, start_time, duration_minutes, cost, date,
                   latitude, longitude, notes, itinerary_id
            FROM activities
            WHERE itinerary_id = $1 AND date = $2
            ORDER BY start_time
            "#,
        )
        .bind(itinerary_id)
        .bind(date)
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, name, location, start_time, duration_minutes, cost, date,
                   latitude, longitude, notes, itinerary_id
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create(
        db: &PgPool,
        itinerary_id: Uuid,
        fields: ActivityFields<'_>,
    ) -> Result<Activity, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities
                (name, location, start_time, duration_minutes, cost, date,
                 latitude, longitude, notes, itinerary_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, name, location, start_time, duration_minutes, cost, date,
                      latitude, longitude, notes, itinerary_id
            "#,
        )
        .bind(fields.name)
        .bind(fields.location)
        .bind(fields.start_time)
        .bind(fields.duration_minutes)
        .bind(fields.cost)
        .bind(fields.date)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.notes)
        .bind(itinerary_id)
        .fetch_one(db)
        .await
    }

    /// Full replace of the mutable fields. `itinerary_id` is deliberately
    /// absent from the SET list: the parent link is immutable.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        fields: ActivityFields<'_>,
    ) -> Result<Option<Activity>, sqlx::Error> {
        sqlx::query_as::<_, Activity>(
            r#"
            UPDATE activities
            SET name = $2, location = $3, start_time = $4, duration_minutes = $5,
                cost = $6, date = $7, latitude = $8, longitude = $9, notes = $10
            WHERE id = $1
            RETURNING id, name, location, start_time, duration_minutes, cost, date,
                      latitude, longitude, notes, itinerary_id
            "#,
        )
        .bind(id)
        .bind(fields.name)
        .bind(fields.location)
        .bind(fields.start_time)
        .bind(fields.duration_minutes)
        .bind(fields.cost)
        .bind(fields.date)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(fields.notes)
        .fetch_optional(db)
        .await
    }

    /// Single-row delete, no cascade. Returns whether a row was removed.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itineraries::repo::{Itinerary, ItineraryFields};
    use crate::users::repo::User;
    use time::macros::{date, time};

    async fn seed_itinerary(db: &PgPool) -> Itinerary {
        let user = User::upsert(db, "uid-1", "ada@example.com", "Ada")
            .await
            .unwrap();
        Itinerary::create(
            db,
            user.id,
            ItineraryFields {
                name: "Lisbon week",
                location: "Lisbon",
                start_date: date!(2026 - 09 - 01),
                end_date: date!(2026 - 09 - 07),
                notes: None,
            },
        )
        .await
        .unwrap()
    }

    fn fields<'a>(name: &'a str, start_time: Time, date: Date) -> ActivityFields<'a> {
        ActivityFields {
            name,
            location: "Lisbon",
            start_time,
            duration_minutes: 45,
            cost: Decimal::new(1250, 2),
            date,
            latitude: None,
            longitude: None,
            notes: None,
        }
    }

    #[sqlx::test]
    async fn date_listing_filters_and_sorts_by_start_time(db: PgPool) {
        let itinerary = seed_itinerary(&db).await;
        let day = date!(2026 - 09 - 02);

        // Inserted latest-first so storage order alone cannot pass.
        let evening = Activity::create(&db, itinerary.id, fields("Fado show", time!(20:00), day))
            .await
            .unwrap();
        let morning = Activity::create(&db, itinerary.id, fields("Tram 28 ride", time!(09:30), day))
            .await
            .unwrap();
        Activity::create(
            &db,
            itinerary.id,
            fields("Sintra day trip", time!(08:00), date!(2026 - 09 - 03)),
        )
        .await
        .unwrap();

        let on_day = Activity::list_by_itinerary_and_date(&db, itinerary.id, day)
            .await
            .unwrap();
        let ids: Vec<Uuid> = on_day.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![morning.id, evening.id]);
    }

    #[sqlx::test]
    async fn update_keeps_the_parent_link(db: PgPool) {
        let itinerary = seed_itinerary(&db).await;
        let day = date!(2026 - 09 - 02);
        let activity = Activity::create(&db, itinerary.id, fields("Tram 28 ride", time!(09:30), day))
            .await
            .unwrap();

        let updated = Activity::update(&db, activity.id, fields("Tram 28 sunset ride", time!(18:00), day))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Tram 28 sunset ride");
        assert_eq!(updated.itinerary_id, itinerary.id);
    }
}
