//! Structural validation for the family dataset.
//!
//! The wire types accept any field values; the constraints the application
//! relies on live here: member ids unique and non-empty, child links naming
//! a real co-parent, at most one current spouse per member.

use anyhow::Result;
use std::collections::HashSet;

use shared::{FamilyData, ValidationIssue};

/// Collect every structural violation in the dataset.
pub fn validate_family(family: &FamilyData) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for member in &family.members {
        if member.id.is_empty() {
            issues.push(ValidationIssue::EmptyMemberId);
        } else if !seen.insert(member.id.as_str()) {
            issues.push(ValidationIssue::DuplicateMemberId(member.id.clone()));
        }
    }

    let known_ids: HashSet<&str> = family.members.iter().map(|m| m.id.as_str()).collect();

    for member in &family.members {
        if let Some(children) = &member.children {
            for child in children {
                if child.id.is_empty() {
                    issues.push(ValidationIssue::EmptyChildId {
                        member_id: member.id.clone(),
                    });
                }
                if let Some(other_parent_id) = &child.other_parent_id {
                    if *other_parent_id == member.id {
                        issues.push(ValidationIssue::SelfParentLink {
                            member_id: member.id.clone(),
                            child_id: child.id.clone(),
                        });
                    } else if !known_ids.contains(other_parent_id.as_str()) {
                        issues.push(ValidationIssue::UnknownOtherParent {
                            member_id: member.id.clone(),
                            other_parent_id: other_parent_id.clone(),
                        });
                    }
                }
            }
        }

        if let Some(spouses) = &member.spouses {
            let current = spouses.iter().filter(|s| s.is_current).count();
            if current > 1 {
                issues.push(ValidationIssue::MultipleCurrentSpouses {
                    member_id: member.id.clone(),
                });
            }
        }
    }

    issues
}

/// Fail with a single error listing every violation, if any.
pub fn ensure_valid(family: &FamilyData) -> Result<()> {
    let issues = validate_family(family);
    if issues.is_empty() {
        return Ok(());
    }
    let summary = issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    Err(anyhow::anyhow!("invalid family data: {}", summary))
}
