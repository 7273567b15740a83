use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a registered account holder.
///
/// `created_at` and `updated_at` are both set to the creation instant when
/// the profile is registered; `updated_at` is refreshed by the service on
/// every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Mint a fresh opaque profile id.
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
