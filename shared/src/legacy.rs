//! Earlier wire shapes of the family dataset and their upward migration.
//!
//! The dataset went through three shapes before the current one and none of
//! them carried a version marker. `VersionedFamilyData` is the envelope that
//! fixes that: serialized data is tagged with `schemaVersion`, and untagged
//! payloads (everything written before the envelope existed) are read as the
//! current shape. Each legacy shape migrates upward exactly once via
//! [`VersionedFamilyData::into_current`].

use serde::{Deserialize, Serialize};

use crate::{ChildLink, FamilyData, FamilyMember, Spouse};

/// Revision 1's anonymous spouse: no id, no marriage metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpouseRef {
    pub name: String,
    pub birth_year: i32,
    pub is_living: bool,
}

/// Revision 1: children as bare id strings, at most one spouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberV1 {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub is_living: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<SpouseRef>,
}

/// Revision 2: children as bare id strings, full spouse records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberV2 {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub is_living: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouses: Option<Vec<Spouse>>,
}

/// Revision 3: spouse information dropped entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberV3 {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub is_living: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

/// A family dataset tagged with the revision its members are shaped as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "schemaVersion", content = "members")]
pub enum VersionedFamilyData {
    #[serde(rename = "1")]
    V1(Vec<FamilyMemberV1>),
    #[serde(rename = "2")]
    V2(Vec<FamilyMemberV2>),
    #[serde(rename = "3")]
    V3(Vec<FamilyMemberV3>),
    #[serde(rename = "4")]
    V4(FamilyData),
}

impl VersionedFamilyData {
    /// Parse a serialized dataset, tagged or not.
    ///
    /// A bare JSON array predates the version envelope and is read as the
    /// current shape; anything else must be a tagged envelope object.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        if value.is_array() {
            return serde_json::from_value::<FamilyData>(value).map(Self::V4);
        }
        serde_json::from_value(value)
    }

    /// The `schemaVersion` label this dataset carries.
    pub fn schema_version(&self) -> &'static str {
        match self {
            Self::V1(_) => "1",
            Self::V2(_) => "2",
            Self::V3(_) => "3",
            Self::V4(_) => "4",
        }
    }

    /// Migrate the dataset to the current shape.
    ///
    /// Bare child id strings become [`ChildLink`]s with no co-parent.
    /// Revision 1's anonymous spouse had no id of its own, so one is
    /// synthesized from the member id; the marriage is marked current since
    /// the old shape could only describe the active one.
    pub fn into_current(self) -> FamilyData {
        match self {
            Self::V1(members) => FamilyData {
                members: members.into_iter().map(migrate_v1).collect(),
            },
            Self::V2(members) => FamilyData {
                members: members.into_iter().map(migrate_v2).collect(),
            },
            Self::V3(members) => FamilyData {
                members: members.into_iter().map(migrate_v3).collect(),
            },
            Self::V4(family) => family,
        }
    }
}

fn child_links(ids: Option<Vec<String>>) -> Option<Vec<ChildLink>> {
    ids.map(|ids| {
        ids.into_iter()
            .map(|id| ChildLink {
                id,
                other_parent_id: None,
            })
            .collect()
    })
}

fn migrate_v1(member: FamilyMemberV1) -> FamilyMember {
    let FamilyMemberV1 {
        id,
        name,
        birth_year,
        is_living,
        children,
        spouse,
    } = member;

    let spouses = spouse.map(|s| {
        vec![Spouse {
            id: format!("spouse::{}", id),
            name: s.name,
            birth_year: s.birth_year,
            is_living: s.is_living,
            marriage_year: None,
            divorce_year: None,
            is_current: true,
        }]
    });

    FamilyMember {
        id,
        name,
        birth_year,
        is_living,
        children: child_links(children),
        spouses,
    }
}

fn migrate_v2(member: FamilyMemberV2) -> FamilyMember {
    FamilyMember {
        id: member.id,
        name: member.name,
        birth_year: member.birth_year,
        is_living: member.is_living,
        children: child_links(member.children),
        spouses: member.spouses,
    }
}

fn migrate_v3(member: FamilyMemberV3) -> FamilyMember {
    FamilyMember {
        id: member.id,
        name: member.name,
        birth_year: member.birth_year,
        is_living: member.is_living,
        children: child_links(member.children),
        spouses: None,
    }
}
