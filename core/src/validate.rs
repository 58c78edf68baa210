//! Mandatory presence and group constraint validation.
//!
//! Runs after matching and walks the option table in declaration order. For
//! each option it checks, in this order:
//!
//! 1. a mandatory option was supplied,
//! 2. a unique option was supplied at most once,
//! 3. when the option is present and belongs to a numbered group:
//!    - AND: every other non-optional member of the same AND group is present,
//!    - XOR: no other member of the same XOR group is present,
//!    - IOR: nothing further.
//!
//! With [`IorPolicy::AtLeastOne`], a final pass additionally requires each
//! numbered IOR group to have at least one member present.
//!
//! # Examples
//!
//! ```
//! use optgroup_core::*;
//!
//! let table: OptionTable = "?^1 -a\n?^1 -b".parse().unwrap();
//! let mut parsed = ParsedArgs::default();
//! parsed.push_value(table.lookup("-a").unwrap(), String::new());
//! assert!(check_constraints(&table, &parsed, IorPolicy::Permissive).is_empty());
//!
//! parsed.push_value(table.lookup("-b").unwrap(), String::new());
//! let errors = check_constraints(&table, &parsed, IorPolicy::Permissive);
//! assert!(matches!(errors[..], [ConstraintError::XorGroupViolation { group: 1, .. }]));
//! ```

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::config::IorPolicy;
use crate::grammar::OptionTable;
use crate::matcher::ParsedArgs;
use crate::types::{Group, GroupKind};

/// Presence and group constraint violations.
///
/// Options are named by their canonical (primary) spelling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    /// A mandatory option was never supplied.
    #[error("missing mandatory option '{option}'")]
    MissingMandatory { option: String },
    /// A unique option was supplied more than once.
    #[error("option '{option}' may only be given once (got {count})")]
    Repeated { option: String, count: usize },
    /// An AND group member is present but a required sibling is absent.
    #[error("AND group {group}: '{option}' requires '{missing}'")]
    AndGroupIncomplete {
        group: u8,
        option: String,
        missing: String,
    },
    /// Two members of an XOR group are present.
    #[error("XOR group {group}: '{option}' and '{other}' are mutually exclusive")]
    XorGroupViolation {
        group: u8,
        option: String,
        other: String,
    },
    /// No member of an IOR group is present (only under
    /// [`IorPolicy::AtLeastOne`]).
    #[error("IOR group {group}: at least one of {} is required", .members.join(", "))]
    IorGroupEmpty { group: u8, members: Vec<String> },
}

/// Checks every constraint and returns all violations, in discovery order.
///
/// Each XOR pair and each missing AND sibling is reported once.
pub fn check_constraints(
    table: &OptionTable,
    parsed: &ParsedArgs,
    ior_policy: IorPolicy,
) -> Vec<ConstraintError> {
    let mut errors = Vec::new();
    let mut reported_and: HashSet<(u8, String)> = HashSet::new();

    for (id, spec) in table.iter() {
        let count = parsed.count(id);

        if !spec.optional && count == 0 {
            errors.push(ConstraintError::MissingMandatory {
                option: spec.canonical().to_string(),
            });
        }

        if spec.unique && count > 1 {
            errors.push(ConstraintError::Repeated {
                option: spec.canonical().to_string(),
                count,
            });
        }

        if count == 0 || !spec.group.is_numbered() {
            continue;
        }

        match spec.group.kind {
            GroupKind::And => {
                for (other_id, other) in table.members(spec.group) {
                    if other_id == id || other.optional || parsed.contains(other_id) {
                        continue;
                    }
                    let missing = other.canonical().to_string();
                    if reported_and.insert((spec.group.number, missing.clone())) {
                        errors.push(ConstraintError::AndGroupIncomplete {
                            group: spec.group.number,
                            option: spec.canonical().to_string(),
                            missing,
                        });
                    }
                }
            }
            GroupKind::Xor => {
                for (other_id, other) in table.members(spec.group) {
                    if other_id > id && parsed.contains(other_id) {
                        errors.push(ConstraintError::XorGroupViolation {
                            group: spec.group.number,
                            option: spec.canonical().to_string(),
                            other: other.canonical().to_string(),
                        });
                    }
                }
            }
            GroupKind::Ior => {}
        }
    }

    if ior_policy == IorPolicy::AtLeastOne {
        errors.extend(check_ior_groups(table, parsed));
    }

    debug!(violations = errors.len(), "Checked option constraints");
    errors
}

fn check_ior_groups(table: &OptionTable, parsed: &ParsedArgs) -> Vec<ConstraintError> {
    let mut errors = Vec::new();
    let mut seen: Vec<Group> = Vec::new();

    for (_, spec) in table.iter() {
        let group = spec.group;
        if group.kind != GroupKind::Ior || !group.is_numbered() || seen.contains(&group) {
            continue;
        }
        seen.push(group);

        let any_present = table.members(group).any(|(id, _)| parsed.contains(id));
        if !any_present {
            errors.push(ConstraintError::IorGroupEmpty {
                group: group.number,
                members: table
                    .members(group)
                    .map(|(_, member)| member.canonical().to_string())
                    .collect(),
            });
        }
    }

    errors
}
