use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use shared::legacy::VersionedFamilyData;
use shared::FamilyData;

use crate::domain::commands::family::{
    ExportFamilyDataResult, GetFamilyDataResult, ImportFamilyDataCommand, ImportFamilyDataResult,
    RemoveMemberCommand, RemoveMemberResult, UpsertMemberCommand, UpsertMemberResult,
};
use crate::domain::family_validator;
use crate::storage::file::{FamilyFileStore, FileConnection};
use crate::storage::traits::FamilyStorage;

/// Service for managing the family dataset.
///
/// Imports accept any wire revision and migrate it to the current shape;
/// nothing invalid is ever persisted.
#[derive(Clone)]
pub struct FamilyService {
    family_store: FamilyFileStore,
}

impl FamilyService {
    /// Create a new FamilyService
    pub fn new(file_conn: Arc<FileConnection>) -> Self {
        let family_store = FamilyFileStore::new(file_conn);
        Self { family_store }
    }

    /// Import a serialized dataset, migrating it to the current shape.
    pub fn import_family_data(
        &self,
        command: ImportFamilyDataCommand,
    ) -> Result<ImportFamilyDataResult> {
        let versioned = VersionedFamilyData::from_json(&command.payload)
            .map_err(|e| anyhow::anyhow!("Unreadable family data payload: {}", e))?;
        let migrated_from = versioned.schema_version().to_string();

        info!(
            "Importing family data (schema version {})",
            migrated_from
        );

        let family = versioned.into_current();
        family_validator::ensure_valid(&family)?;

        self.family_store.save_family(&family)?;

        info!("Imported {} members", family.len());

        Ok(ImportFamilyDataResult {
            family,
            migrated_from,
        })
    }

    /// Load the stored dataset.
    pub fn get_family_data(&self) -> Result<GetFamilyDataResult> {
        let family = self.family_store.load_family()?;
        Ok(GetFamilyDataResult { family })
    }

    /// Serialize the stored dataset in the current wire shape.
    pub fn export_family_data(&self) -> Result<ExportFamilyDataResult> {
        let family = self.family_store.load_family()?;
        let json = serde_json::to_string(&family)?;
        Ok(ExportFamilyDataResult { json })
    }

    /// Insert a new member or replace the one with the same id.
    pub fn upsert_member(&self, command: UpsertMemberCommand) -> Result<UpsertMemberResult> {
        let member = command.member;
        info!("Upserting member: {}", member.id);

        let mut family = self.family_store.load_family()?;

        match family.members.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => family.members.push(member),
        }

        family_validator::ensure_valid(&family)?;
        self.family_store.save_family(&family)?;

        Ok(UpsertMemberResult { family })
    }

    /// Remove a member from the dataset.
    ///
    /// Fails if another member still names the removed one as a co-parent;
    /// those links have to be cleared first.
    pub fn remove_member(&self, command: RemoveMemberCommand) -> Result<RemoveMemberResult> {
        info!("Removing member: {}", command.member_id);

        let mut family = self.family_store.load_family()?;

        let position = family
            .members
            .iter()
            .position(|m| m.id == command.member_id)
            .ok_or_else(|| {
                warn!("Member not found: {}", command.member_id);
                anyhow::anyhow!("Member not found: {}", command.member_id)
            })?;
        let removed = family.members.remove(position);

        family_validator::ensure_valid(&family)?;
        self.family_store.save_family(&family)?;

        info!("Removed member {} ({})", removed.name, removed.id);

        Ok(RemoveMemberResult {
            success_message: format!("Member '{}' removed successfully", removed.name),
        })
    }

    /// The stored dataset, for callers that want the collection directly.
    pub fn current_family(&self) -> Result<FamilyData> {
        self.family_store.load_family()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ChildLink, FamilyMember, Spouse};
    use tempfile::tempdir;

    fn setup_test() -> (FamilyService, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let conn = FileConnection::new(temp_dir.path()).unwrap();
        (FamilyService::new(Arc::new(conn)), temp_dir)
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
    fn test_import_current_shape_payload() {
        let (service, _temp_dir) = setup_test();

        let payload = r#"[
            {"id": "m1", "name": "Alice", "birthYear": 1980, "isLiving": true,
             "children": [{"id": "m2", "otherParentId": "m3"}]},
            {"id": "m2", "name": "Kim", "birthYear": 2006, "isLiving": true},
            {"id": "m3", "name": "Bob", "birthYear": 1979, "isLiving": true}
        ]"#;

        let result = service
            .import_family_data(ImportFamilyDataCommand {
                payload: payload.to_string(),
            })
            .unwrap();

        assert_eq!(result.migrated_from, "4");
        assert_eq!(result.family.len(), 3);

        let stored = service.get_family_data().unwrap();
        assert_eq!(stored.family, result.family);
    }

    #[test]
    fn test_import_legacy_payload_is_migrated() {
        let (service, _temp_dir) = setup_test();

        let payload = r#"{
            "schemaVersion": "1",
            "members": [
                {"id": "m1", "name": "Alice", "birthYear": 1980, "isLiving": true,
                 "spouse": {"name": "Bob", "birthYear": 1979, "isLiving": true}}
            ]
        }"#;

        let result = service
            .import_family_data(ImportFamilyDataCommand {
                payload: payload.to_string(),
            })
            .unwrap();

        assert_eq!(result.migrated_from, "1");
        let stored = service.get_family_data().unwrap().family;
        let spouses = stored.member("m1").unwrap().spouses.as_ref().unwrap();
        assert_eq!(spouses[0].name, "Bob");
        assert!(spouses[0].is_current);
    }

    #[test]
    fn test_import_rejects_invalid_data() {
        let (service, _temp_dir) = setup_test();

        // Two spouses marked current for the same member.
        let payload = r#"[
            {"id": "m1", "name": "Alice", "birthYear": 1980, "isLiving": true,
             "spouses": [
                {"id": "s1", "name": "Bob", "birthYear": 1979, "isLiving": true, "isCurrent": true},
                {"id": "s2", "name": "Carl", "birthYear": 1981, "isLiving": true, "isCurrent": true}
             ]}
        ]"#;

        let result = service.import_family_data(ImportFamilyDataCommand {
            payload: payload.to_string(),
        });
        assert!(result.is_err());

        // Nothing was persisted.
        assert!(service.get_family_data().unwrap().family.is_empty());
    }

    #[test]
    fn test_import_rejects_garbage() {
        let (service, _temp_dir) = setup_test();
        let result = service.import_family_data(ImportFamilyDataCommand {
            payload: "not json at all".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_upsert_member_inserts_and_replaces() {
        let (service, _temp_dir) = setup_test();

        service
            .upsert_member(UpsertMemberCommand {
                member: member("m1"),
            })
            .unwrap();

        let mut renamed = member("m1");
        renamed.name = "Renamed".to_string();
        let result = service
            .upsert_member(UpsertMemberCommand { member: renamed })
            .unwrap();

        assert_eq!(result.family.len(), 1);
        assert_eq!(result.family.member("m1").unwrap().name, "Renamed");
    }

    #[test]
    fn test_upsert_rejects_invalid_links() {
        let (service, _temp_dir) = setup_test();
        service
            .upsert_member(UpsertMemberCommand {
                member: member("m1"),
            })
            .unwrap();

        let mut broken = member("m2");
        broken.children = Some(vec![ChildLink {
            id: "c1".to_string(),
            other_parent_id: Some("nobody".to_string()),
        }]);

        let result = service.upsert_member(UpsertMemberCommand { member: broken });
        assert!(result.is_err());

        // The stored dataset is unchanged.
        assert_eq!(service.current_family().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_member() {
        let (service, _temp_dir) = setup_test();
        service
            .upsert_member(UpsertMemberCommand {
                member: member("m1"),
            })
            .unwrap();

        let result = service
            .remove_member(RemoveMemberCommand {
                member_id: "m1".to_string(),
            })
            .unwrap();
        assert!(result.success_message.contains("Member m1"));
        assert!(service.current_family().unwrap().is_empty());

        let missing = service.remove_member(RemoveMemberCommand {
            member_id: "m1".to_string(),
        });
        assert!(missing.is_err());
    }

    #[test]
    fn test_remove_member_still_referenced_fails() {
        let (service, _temp_dir) = setup_test();

        let mut alice = member("m1");
        alice.children = Some(vec![ChildLink {
            id: "c1".to_string(),
            other_parent_id: Some("m2".to_string()),
        }]);
        service
            .upsert_member(UpsertMemberCommand { member: member("m2") })
            .unwrap();
        service
            .upsert_member(UpsertMemberCommand { member: alice })
            .unwrap();

        // m2 is still named as a co-parent by m1.
        let result = service.remove_member(RemoveMemberCommand {
            member_id: "m2".to_string(),
        });
        assert!(result.is_err());
        assert_eq!(service.current_family().unwrap().len(), 2);
    }

    #[test]
    fn test_export_round_trips_through_import() {
        let (service, _temp_dir) = setup_test();

        let mut alice = member("m1");
        alice.spouses = Some(vec![Spouse {
            id: "m2".to_string(),
            name: "Bob".to_string(),
            birth_year: 1979,
            is_living: true,
            marriage_year: Some(2005),
            divorce_year: None,
            is_current: true,
        }]);
        service
            .upsert_member(UpsertMemberCommand { member: alice })
            .unwrap();

        let exported = service.export_family_data().unwrap();
        let before = service.current_family().unwrap();

        let reimported = service
            .import_family_data(ImportFamilyDataCommand {
                payload: exported.json,
            })
            .unwrap();
        assert_eq!(reimported.family, before);
    }
}
