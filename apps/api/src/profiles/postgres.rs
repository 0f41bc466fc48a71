use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use crate::models::profile::Profile;
use crate::profiles::store::{stamp_for_upsert, ProfileStore, StoreError};

/// A row of the `profiles` table. The profile body is kept as JSONB;
/// timestamps live in their own columns and win over the body on read.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn into_profile(self) -> Result<Profile, serde_json::Error> {
        let mut profile: Profile = serde_json::from_value(self.data)?;
        profile.id = self.id;
        profile.created_at = Some(self.created_at);
        profile.updated_at = Some(self.updated_at);
        Ok(profile)
    }
}

/// PostgreSQL-backed profile store.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, data, created_at, updated_at FROM profiles ORDER BY created_at, id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_profile().map_err(StoreError::from))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, data, created_at, updated_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile().map_err(StoreError::from))
            .transpose()
    }

    async fn upsert(&self, profile: Profile) -> Result<Profile, StoreError> {
        // created_at is preserved by the ON CONFLICT clause, not by the stamp
        let stamped = stamp_for_upsert(profile, None, Utc::now());
        let data = serde_json::to_value(&stamped)?;

        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, data, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
                SET data = EXCLUDED.data,
                    updated_at = EXCLUDED.updated_at
            RETURNING id, data, created_at, updated_at
            "#,
        )
        .bind(&stamped.id)
        .bind(&data)
        .bind(stamped.created_at)
        .bind(stamped.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_profile()?)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM profiles")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_columns_override_body() {
        let created = Utc::now();
        let row = ProfileRow {
            id: "p1".to_string(),
            data: serde_json::json!({
                "id": "stale",
                "fullName": "Jane Doe",
                "createdAt": "2001-01-01T00:00:00Z"
            }),
            created_at: created,
            updated_at: created,
        };

        let profile = row.into_profile().unwrap();
        assert_eq!(profile.id, "p1");
        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(profile.created_at, Some(created));
    }

    #[test]
    fn test_corrupt_body_is_an_error() {
        let row = ProfileRow {
            id: "p1".to_string(),
            data: serde_json::json!({ "experience": "not a list" }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(row.into_profile().is_err());
    }
}
