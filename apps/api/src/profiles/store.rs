//! Profile Store: pluggable, trait-based persistence for career profiles.
//!
//! Default without a database: `MemoryProfileStore` (process-local, ordered).
//! With `DATABASE_URL`: `PgProfileStore` (see `postgres.rs`).
//!
//! `AppState` holds an `Arc<dyn ProfileStore>`, chosen at startup via config.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::profile::Profile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile {0} not found")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value persistence of profiles keyed by a generated identifier.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Profile>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Profile>, StoreError>;

    /// Inserts or replaces. Returns the record as stored, with id and timestamps set.
    async fn upsert(&self, profile: Profile) -> Result<Profile, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

/// Stamps a profile for storage: assigns an id if it has none, sets
/// `updated_at`, and keeps `created_at` from the existing record when there is one.
pub fn stamp_for_upsert(
    mut profile: Profile,
    existing_created_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Profile {
    if profile.id.trim().is_empty() {
        profile.id = Uuid::new_v4().to_string();
    }
    profile.created_at = Some(existing_created_at.unwrap_or(now));
    profile.updated_at = Some(now);
    profile
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryProfileStore
// ────────────────────────────────────────────────────────────────────────────

/// Process-local store. Keeps insertion order, like the browser store it replaces.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn list(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(self.profiles.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .profiles
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn upsert(&self, profile: Profile) -> Result<Profile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let position = profiles.iter().position(|p| p.id == profile.id && !p.id.is_empty());
        let existing_created_at = position.and_then(|i| profiles[i].created_at);

        let stamped = stamp_for_upsert(profile, existing_created_at, Utc::now());
        match position {
            Some(i) => profiles[i] = stamped.clone(),
            None => profiles.push(stamped.clone()),
        }
        Ok(stamped)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut profiles = self.profiles.write().await;
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.profiles.write().await.clear();
        Ok(())
    }
}
