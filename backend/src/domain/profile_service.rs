use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::access_policy::{AccessPolicy, Principal};
use crate::domain::commands::profiles::{
    DeleteProfileCommand, DeleteProfileResult, GetProfileCommand, GetProfileResult,
    ListProfilesResult, RegisterProfileCommand, RegisterProfileResult, UpdateProfileCommand,
    UpdateProfileResult,
};
use crate::domain::models::profile::Profile;
use crate::storage::sqlite::{DbConnection, ProfileRepository};
use crate::storage::traits::ProfileStorage;

/// Service for managing profile accounts.
///
/// Every repository call carries the requesting [`Principal`]; the
/// policy-checked repository decides what that principal may see or touch.
#[derive(Clone)]
pub struct ProfileService {
    profile_repository: ProfileRepository,
}

impl ProfileService {
    /// Create a new ProfileService
    pub fn new(db: DbConnection, policy: Arc<dyn AccessPolicy>) -> Self {
        let profile_repository = ProfileRepository::new(db, policy);
        Self { profile_repository }
    }

    /// Register a profile for the requesting principal.
    ///
    /// The profile id is the principal's subject. Both timestamps are set to
    /// the registration instant.
    pub async fn register_profile(
        &self,
        principal: &Principal,
        command: RegisterProfileCommand,
    ) -> Result<RegisterProfileResult> {
        info!(
            "Registering profile for {}: name={}",
            principal.subject, command.name
        );

        self.validate_register_command(&command)?;

        if self
            .profile_repository
            .get_profile(principal, &principal.subject)
            .await?
            .is_some()
        {
            return Err(anyhow::anyhow!(
                "Profile already registered for {}",
                principal.subject
            ));
        }

        let now = Utc::now();
        let profile = Profile {
            id: principal.subject.clone(),
            name: command.name.trim().to_string(),
            email: command.email.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.profile_repository
            .store_profile(principal, &profile)
            .await?;

        info!("Registered profile {} ({})", profile.name, profile.id);

        Ok(RegisterProfileResult { profile })
    }

    /// Get a profile by ID
    pub async fn get_profile(
        &self,
        principal: &Principal,
        command: GetProfileCommand,
    ) -> Result<GetProfileResult> {
        info!("Getting profile: {}", command.profile_id);

        let profile = self
            .profile_repository
            .get_profile(principal, &command.profile_id)
            .await?;

        if profile.is_none() {
            warn!("Profile not found or not visible: {}", command.profile_id);
        }

        Ok(GetProfileResult { profile })
    }

    /// List the profiles visible to the principal
    pub async fn list_profiles(&self, principal: &Principal) -> Result<ListProfilesResult> {
        info!("Listing profiles for {}", principal.subject);

        let profiles = self.profile_repository.list_profiles(principal).await?;

        info!("Found {} profiles", profiles.len());

        Ok(ListProfilesResult { profiles })
    }

    /// Update an existing profile, refreshing `updated_at`.
    pub async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateProfileCommand,
    ) -> Result<UpdateProfileResult> {
        info!("Updating profile: {}", command.profile_id);

        let mut profile = self
            .profile_repository
            .get_profile(principal, &command.profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", command.profile_id))?;

        self.validate_update_command(&command)?;

        if let Some(name) = command.name {
            profile.name = name.trim().to_string();
        }
        if let Some(email) = command.email {
            profile.email = email.trim().to_string();
        }

        profile.updated_at = Utc::now();

        self.profile_repository
            .update_profile(principal, &profile)
            .await?;

        info!("Updated profile {} ({})", profile.name, profile.id);

        Ok(UpdateProfileResult { profile })
    }

    /// Delete a profile
    pub async fn delete_profile(
        &self,
        principal: &Principal,
        command: DeleteProfileCommand,
    ) -> Result<DeleteProfileResult> {
        info!("Deleting profile: {}", command.profile_id);

        let profile = self
            .profile_repository
            .get_profile(principal, &command.profile_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found: {}", command.profile_id))?;

        self.profile_repository
            .delete_profile(principal, &command.profile_id)
            .await?;

        info!("Deleted profile {} ({})", profile.name, profile.id);

        Ok(DeleteProfileResult {
            success_message: format!("Profile '{}' deleted successfully", profile.name),
        })
    }

    /// Validate register profile command
    fn validate_register_command(&self, command: &RegisterProfileCommand) -> Result<()> {
        Self::validate_name(&command.name)?;
        Self::validate_email(&command.email)?;
        Ok(())
    }

    /// Validate update profile command
    fn validate_update_command(&self, command: &UpdateProfileCommand) -> Result<()> {
        if let Some(ref name) = command.name {
            Self::validate_name(name)?;
        }
        if let Some(ref email) = command.email {
            Self::validate_email(email)?;
        }
        Ok(())
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Profile name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Profile name cannot exceed 100 characters"));
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(anyhow::anyhow!("Email cannot be empty"));
        }
        if !email.contains('@') {
            return Err(anyhow::anyhow!("Email must contain '@'"));
        }
        Ok(())
    }
}
