use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use sqlx::Row;
use std::sync::Arc;

use crate::domain::access_policy::{AccessDenied, AccessPolicy, Principal};
use crate::domain::models::profile::Profile;
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::ProfileStorage;

/// Repository for the profile table.
///
/// The access policy is evaluated here, on every operation, so a row a
/// principal may not read is indistinguishable from a missing row and a
/// disallowed write fails before touching the database.
#[derive(Clone)]
pub struct ProfileRepository {
    db: DbConnection,
    policy: Arc<dyn AccessPolicy>,
}

impl ProfileRepository {
    pub fn new(db: DbConnection, policy: Arc<dyn AccessPolicy>) -> Self {
        Self { db, policy }
    }

    fn check_write(&self, principal: &Principal, profile_id: &str) -> Result<()> {
        if !self.policy.can_write(principal, profile_id) {
            warn!(
                "Denied write by {} on profile {}",
                principal.subject, profile_id
            );
            return Err(AccessDenied {
                subject: principal.subject.clone(),
                profile_id: profile_id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> Profile {
        Profile {
            id: row.get("id"),
            name: row.get("name"),
            email: row.get("email"),
            created_at: row.get::<DateTime<Utc>, _>("created_at"),
            updated_at: row.get::<DateTime<Utc>, _>("updated_at"),
        }
    }
}

#[async_trait]
impl ProfileStorage for ProfileRepository {
    /// Store a newly registered profile
    async fn store_profile(&self, principal: &Principal, profile: &Profile) -> Result<()> {
        self.check_write(principal, &profile.id)?;

        sqlx::query(
            r#"
            INSERT INTO profile (id, name, email, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Retrieve a profile by id, if visible to the principal
    async fn get_profile(
        &self,
        principal: &Principal,
        profile_id: &str,
    ) -> Result<Option<Profile>> {
        if !self.policy.can_read(principal, profile_id) {
            debug!(
                "Profile {} not visible to {}",
                profile_id, principal.subject
            );
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM profile
            WHERE id = ?
            "#,
        )
        .bind(profile_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_profile))
    }

    /// List the profiles visible to the principal, ordered by name
    async fn list_profiles(&self, principal: &Principal) -> Result<Vec<Profile>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM profile
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        let profiles = rows
            .iter()
            .map(Self::row_to_profile)
            .filter(|p| self.policy.can_read(principal, &p.id))
            .collect();

        Ok(profiles)
    }

    /// Update an existing profile
    async fn update_profile(&self, principal: &Principal, profile: &Profile) -> Result<()> {
        self.check_write(principal, &profile.id)?;

        let result = sqlx::query(
            r#"
            UPDATE profile
            SET name = ?, email = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(profile.updated_at)
        .bind(&profile.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            warn!("Attempted to update a non-existent profile: {}", profile.id);
            return Err(anyhow::anyhow!("Profile not found: {}", profile.id));
        }
        Ok(())
    }

    /// Delete a profile by id
    async fn delete_profile(&self, principal: &Principal, profile_id: &str) -> Result<()> {
        self.check_write(principal, profile_id)?;

        let result = sqlx::query(
            r#"
            DELETE FROM profile WHERE id = ?
            "#,
        )
        .bind(profile_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            warn!("Attempted to delete a non-existent profile: {}", profile_id);
        }
        Ok(())
    }
}
