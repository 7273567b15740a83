use anyhow::Result;
use log::{debug, info};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use shared::FamilyData;

use super::connection::FileConnection;
use crate::storage::traits::FamilyStorage;

/// File-backed family dataset store.
///
/// The whole dataset lives in one `family.yaml` under the base directory,
/// always in the current shape. Writes go through a temp file and a rename
/// so a crash never leaves a half-written dataset behind.
#[derive(Clone)]
pub struct FamilyFileStore {
    connection: Arc<FileConnection>,
}

impl FamilyFileStore {
    pub fn new(connection: Arc<FileConnection>) -> Self {
        Self { connection }
    }

    fn family_file_path(&self) -> PathBuf {
        self.connection.base_directory().join("family.yaml")
    }
}

impl FamilyStorage for FamilyFileStore {
    /// Load the stored dataset; an absent file reads as an empty dataset
    fn load_family(&self) -> Result<FamilyData> {
        let path = self.family_file_path();
        if !path.exists() {
            debug!("No family file at {:?}, returning empty dataset", path);
            return Ok(FamilyData::default());
        }

        let content = fs::read_to_string(&path)?;
        let family: FamilyData = serde_yaml::from_str(&content)?;
        debug!("Loaded {} members from {:?}", family.len(), path);
        Ok(family)
    }

    /// Persist the dataset, replacing whatever was stored before
    fn save_family(&self, family: &FamilyData) -> Result<()> {
        let path = self.family_file_path();
        let content = serde_yaml::to_string(family)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path)?;

        info!("Saved {} members to {:?}", family.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FamilyMember;
    use tempfile::TempDir;

    fn setup_test_store() -> (FamilyFileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = FileConnection::new(temp_dir.path()).unwrap();
        (FamilyFileStore::new(Arc::new(connection)), temp_dir)
    }

    fn member(id: &str) -> FamilyMember {
        FamilyMember {
            id: id.to_string(),
            name: format!("Member {}", id),
            birth_year: 1970,
            is_living: true,
            children: None,
            spouses: None,
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let (store, _temp_dir) = setup_test_store();
        let family = store.load_family().expect("Failed to load family");
        assert!(family.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (store, _temp_dir) = setup_test_store();

        let family = FamilyData {
            members: vec![member("m1"), member("m2")],
        };
        store.save_family(&family).expect("Failed to save family");

        let loaded = store.load_family().expect("Failed to load family");
        assert_eq!(loaded, family);
    }

    #[test]
    fn test_save_replaces_previous_dataset() {
        let (store, _temp_dir) = setup_test_store();

        store
            .save_family(&FamilyData {
                members: vec![member("m1")],
            })
            .unwrap();
        store
            .save_family(&FamilyData {
                members: vec![member("m2")],
            })
            .unwrap();

        let loaded = store.load_family().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.member("m2").is_some());
    }
}
