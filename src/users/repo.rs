use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub firebase_uid: String,
    pub email: String,
    pub display_name: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Insert-or-update keyed on the external identity. Calling this twice
    /// with the same UID never creates a second row.
    pub async fn upsert(
        db: &PgPool,
        firebase_uid: &str,
        email: &str,
        display_name: &str,
    ) -> Result<User, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (firebase_uid, email, display_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (firebase_uid)
            DO UPDATE SET email = EXCLUDED.email, display_name = EXCLUDED.display_name
            RETURNING id, firebase_uid, email, display_name, created_at
            "#,
        )
        .bind(firebase_uid)
        .bind(email)
        .bind(display_name)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, firebase_uid, email, display_name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_firebase_uid(
        db: &PgPool,
        firebase_uid: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, firebase_uid, email, display_name, created_at
            FROM users
            WHERE firebase_uid = $1
            "#,
        )
        .bind(firebase_uid)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, firebase_uid, email, display_name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }
}
