use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod legacy;

/// A person in the family dataset, in the current wire shape.
///
/// Field names on the wire are camelCase to stay compatible with the
/// existing serialized datasets. `children` and `spouses` are omitted
/// entirely when absent rather than serialized as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub is_living: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouses: Option<Vec<Spouse>>,
}

/// Link from a member to one of their children, optionally naming the
/// child's other parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLink {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_parent_id: Option<String>,
}

/// Marriage record attached to a member. At most one entry per member is
/// expected to have `is_current` set; that constraint is checked by the
/// backend validator, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spouse {
    pub id: String,
    pub name: String,
    pub birth_year: i32,
    pub is_living: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marriage_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divorce_year: Option<i32>,
    pub is_current: bool,
}

/// The full family dataset: an ordered collection of members. Order carries
/// no meaning; on the wire this is a plain JSON array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FamilyData {
    pub members: Vec<FamilyMember>,
}

impl FamilyData {
    /// Look up a member by id.
    pub fn member(&self, member_id: &str) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.id == member_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

/// Structural violations a family dataset can carry. These are reported by
/// the backend validator; the types themselves accept any field values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("duplicate member id: {0}")]
    DuplicateMemberId(String),
    #[error("member with empty id")]
    EmptyMemberId,
    #[error("member {member_id} has a child entry with an empty id")]
    EmptyChildId { member_id: String },
    #[error("member {member_id} is listed as the other parent of their own child {child_id}")]
    SelfParentLink { member_id: String, child_id: String },
    #[error("member {member_id} names unknown co-parent {other_parent_id}")]
    UnknownOtherParent {
        member_id: String,
        other_parent_id: String,
    },
    #[error("member {member_id} has more than one current spouse")]
    MultipleCurrentSpouses { member_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_member() -> FamilyMember {
        FamilyMember {
            id: "m1".to_string(),
            name: "Alice".to_string(),
            birth_year: 1980,
            is_living: true,
            children: Some(vec![ChildLink {
                id: "c1".to_string(),
                other_parent_id: Some("m2".to_string()),
            }]),
            spouses: Some(vec![Spouse {
                id: "m2".to_string(),
                name: "Bob".to_string(),
                birth_year: 1979,
                is_living: true,
                marriage_year: Some(2005),
                divorce_year: None,
                is_current: true,
            }]),
        }
    }

    #[test]
    fn test_member_round_trip() {
        let member = sample_member();
        let encoded = serde_json::to_string(&member).unwrap();
        let decoded: FamilyMember = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, member);
    }

    #[test]
    fn test_member_wire_format_is_camel_case() {
        let value = serde_json::to_value(sample_member()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "m1",
                "name": "Alice",
                "birthYear": 1980,
                "isLiving": true,
                "children": [{"id": "c1", "otherParentId": "m2"}],
                "spouses": [{
                    "id": "m2",
                    "name": "Bob",
                    "birthYear": 1979,
                    "isLiving": true,
                    "marriageYear": 2005,
                    "isCurrent": true
                }]
            })
        );
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let member = FamilyMember {
            id: "m3".to_string(),
            name: "Carol".to_string(),
            birth_year: 1950,
            is_living: false,
            children: None,
            spouses: None,
        };
        let value = serde_json::to_value(&member).unwrap();
        assert_eq!(
            value,
            json!({"id": "m3", "name": "Carol", "birthYear": 1950, "isLiving": false})
        );

        // Missing optional fields deserialize as None.
        let decoded: FamilyMember = serde_json::from_value(
            json!({"id": "m3", "name": "Carol", "birthYear": 1950, "isLiving": false}),
        )
        .unwrap();
        assert_eq!(decoded, member);
    }

    #[test]
    fn test_family_data_is_a_plain_array() {
        let family = FamilyData {
            members: vec![sample_member()],
        };
        let value = serde_json::to_value(&family).unwrap();
        assert!(value.is_array());

        let decoded: FamilyData = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.len(), 1);
        assert!(decoded.member("m1").is_some());
        assert!(decoded.member("nobody").is_none());
    }
}
