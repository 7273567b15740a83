//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer; whatever
//! outer surface drives the backend is responsible for mapping its own DTOs
//! onto these internal types.

pub mod profiles {
    use crate::domain::models::profile::Profile;

    /// Input for registering a new profile. The profile id is taken from the
    /// requesting principal's subject.
    #[derive(Debug, Clone)]
    pub struct RegisterProfileCommand {
        pub name: String,
        pub email: String,
    }

    /// Input for updating an existing profile.
    #[derive(Debug, Clone)]
    pub struct UpdateProfileCommand {
        pub profile_id: String,
        pub name: Option<String>,
        pub email: Option<String>,
    }

    /// Input for fetching a single profile.
    #[derive(Debug, Clone)]
    pub struct GetProfileCommand {
        pub profile_id: String,
    }

    /// Input for deleting a profile.
    #[derive(Debug, Clone)]
    pub struct DeleteProfileCommand {
        pub profile_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterProfileResult {
        pub profile: Profile,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateProfileResult {
        pub profile: Profile,
    }

    #[derive(Debug, Clone)]
    pub struct GetProfileResult {
        pub profile: Option<Profile>,
    }

    #[derive(Debug, Clone)]
    pub struct ListProfilesResult {
        pub profiles: Vec<Profile>,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteProfileResult {
        pub success_message: String,
    }
}

pub mod family {
    use shared::{FamilyData, FamilyMember};

    /// Input for importing a serialized family dataset, in any revision.
    #[derive(Debug, Clone)]
    pub struct ImportFamilyDataCommand {
        pub payload: String,
    }

    /// Input for inserting or replacing a single member.
    #[derive(Debug, Clone)]
    pub struct UpsertMemberCommand {
        pub member: FamilyMember,
    }

    /// Input for removing a member.
    #[derive(Debug, Clone)]
    pub struct RemoveMemberCommand {
        pub member_id: String,
    }

    #[derive(Debug, Clone)]
    pub struct ImportFamilyDataResult {
        pub family: FamilyData,
        /// `schemaVersion` label the payload arrived in.
        pub migrated_from: String,
    }

    #[derive(Debug, Clone)]
    pub struct GetFamilyDataResult {
        pub family: FamilyData,
    }

    #[derive(Debug, Clone)]
    pub struct ExportFamilyDataResult {
        pub json: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpsertMemberResult {
        pub family: FamilyData,
    }

    #[derive(Debug, Clone)]
    pub struct RemoveMemberResult {
        pub success_message: String,
    }
}
