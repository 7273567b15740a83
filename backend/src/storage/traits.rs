//! # Storage Traits
//!
//! Abstractions over the concrete storage backends so the domain layer can
//! swap implementations without modification.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::access_policy::Principal;
use crate::domain::models::profile::Profile;
use shared::FamilyData;

/// Interface for profile row storage.
///
/// Every operation takes the requesting [`Principal`]; implementations must
/// evaluate the access policy per call. Reads a principal is not allowed to
/// make behave as if the row did not exist; disallowed writes fail with
/// [`crate::domain::access_policy::AccessDenied`].
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Store a newly registered profile.
    async fn store_profile(&self, principal: &Principal, profile: &Profile) -> Result<()>;

    /// Retrieve a profile by id, if it exists and is visible.
    async fn get_profile(&self, principal: &Principal, profile_id: &str)
        -> Result<Option<Profile>>;

    /// List the profiles visible to the principal, ordered by name.
    async fn list_profiles(&self, principal: &Principal) -> Result<Vec<Profile>>;

    /// Update an existing profile.
    async fn update_profile(&self, principal: &Principal, profile: &Profile) -> Result<()>;

    /// Delete a profile by id.
    async fn delete_profile(&self, principal: &Principal, profile_id: &str) -> Result<()>;
}

/// Interface for the family dataset store. The dataset is a single document,
/// always persisted in the current shape.
pub trait FamilyStorage: Send + Sync {
    /// Load the stored dataset; an absent store reads as an empty dataset.
    fn load_family(&self) -> Result<FamilyData>;

    /// Persist the dataset, replacing whatever was stored before.
    fn save_family(&self, family: &FamilyData) -> Result<()>;
}
