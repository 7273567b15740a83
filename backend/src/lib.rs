//! # kintree backend
//!
//! Domain and storage layers for the family-tree application:
//! - profile accounts persisted in sqlite, with row-level isolation enforced
//!   by an explicit access policy on every read and write
//! - the family dataset persisted as a YAML file, imported from any wire
//!   revision and migrated to the current shape
//!
//! There is no IO/REST layer here; callers drive the services directly.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

pub mod domain;
pub mod storage;

pub use domain::access_policy::{AccessPolicy, OwnerOnlyPolicy, Principal};
pub use storage::file::FileConnection;
pub use storage::sqlite::DbConnection;

/// Runtime configuration for the backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// sqlx connection string for the profile database.
    pub database_url: String,
    /// Directory holding the family dataset file.
    pub data_directory: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:kintree.db".to_string(),
            data_directory: std::env::temp_dir().join("kintree_dev"),
        }
    }
}

/// Main backend struct that orchestrates all services.
pub struct Backend {
    pub profile_service: domain::ProfileService,
    pub family_service: domain::FamilyService,
}

impl Backend {
    /// Create a backend with the default owner-only access policy.
    pub async fn new(config: BackendConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_directory)?;

        let db = DbConnection::new(&config.database_url).await?;
        let file_conn = Arc::new(FileConnection::new(config.data_directory)?);
        let policy: Arc<dyn AccessPolicy> = Arc::new(OwnerOnlyPolicy);

        Ok(Self {
            profile_service: domain::ProfileService::new(db, policy),
            family_service: domain::FamilyService::new(file_conn),
        })
    }
}
