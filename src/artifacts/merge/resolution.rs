//! Per-file three-way merge decisions
//!
//! Every file name found in the base, current or target table gets exactly
//! one [`MergeDecision`]. Which one depends on where the file is present and
//! on blob id equality (same id means same content):
//!
//! | present in      | condition                      | decision    |
//! |-----------------|--------------------------------|-------------|
//! | current, target | current == target              | Unchanged   |
//! | current, target | current == base                | TakeTarget  |
//! | current, target | target == base                 | KeepCurrent |
//! | current, target | otherwise (also no base)       | Conflict    |
//! | current only    | base had it, current == base   | Delete      |
//! | current only    | otherwise                      | KeepCurrent |
//! | target only     | base had it, target == base    | Delete      |
//! | target only     | otherwise                      | TakeTarget  |
//! | base only       |                                | Delete      |

use crate::artifacts::objects::commit::FileTable;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Presence: u8 {
        const NONE = 0b000;
        const BASE = 0b001;
        const CURRENT = 0b010;
        const TARGET = 0b100;
    }
}

impl fmt::Debug for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (Presence::BASE, "BASE"),
            (Presence::CURRENT, "CURRENT"),
            (Presence::TARGET, "TARGET"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect::<Vec<_>>();

        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    /// Both sides hold the same content
    Unchanged(ObjectId),
    KeepCurrent(ObjectId),
    TakeTarget(ObjectId),
    Delete,
    /// Both sides changed the file differently
    Conflict {
        current: ObjectId,
        target: ObjectId,
    },
}

impl MergeDecision {
    /// Blob the merged file resolves to without conflict markers
    pub fn resolved_oid(&self) -> Option<&ObjectId> {
        match self {
            MergeDecision::Unchanged(oid)
            | MergeDecision::KeepCurrent(oid)
            | MergeDecision::TakeTarget(oid) => Some(oid),
            MergeDecision::Delete | MergeDecision::Conflict { .. } => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, MergeDecision::Conflict { .. })
    }
}

/// File tables of the merge base and both tips
#[derive(Debug, Clone, Copy)]
pub struct ThreeWayMerge<'t> {
    base: &'t FileTable,
    current: &'t FileTable,
    target: &'t FileTable,
}

impl<'t> ThreeWayMerge<'t> {
    pub fn new(base: &'t FileTable, current: &'t FileTable, target: &'t FileTable) -> Self {
        ThreeWayMerge {
            base,
            current,
            target,
        }
    }

    /// One decision per file name of the union of the three tables, by name
    pub fn decisions(&self) -> BTreeMap<String, MergeDecision> {
        self.file_names()
            .into_iter()
            .map(|name| {
                let (base, current, target) = (
                    self.base.get(name),
                    self.current.get(name),
                    self.target.get(name),
                );
                let presence = Self::presence(base, current, target);
                let decision = Self::decide(base, current, target);
                debug!(file = %name, ?presence, ?decision, "merge decision");

                (name.clone(), decision)
            })
            .collect()
    }

    fn file_names(&self) -> BTreeSet<&'t String> {
        self.base
            .keys()
            .chain(self.current.keys())
            .chain(self.target.keys())
            .collect()
    }

    pub fn presence(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> Presence {
        let mut presence = Presence::NONE;
        presence.set(Presence::BASE, base.is_some());
        presence.set(Presence::CURRENT, current.is_some());
        presence.set(Presence::TARGET, target.is_some());
        presence
    }

    pub fn decide(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        target: Option<&ObjectId>,
    ) -> MergeDecision {
        match (current, target) {
            (Some(current), Some(target)) if current == target => {
                MergeDecision::Unchanged(current.clone())
            }
            (Some(current), Some(target)) => match base {
                Some(base) if base == current => MergeDecision::TakeTarget(target.clone()),
                Some(base) if base == target => MergeDecision::KeepCurrent(current.clone()),
                _ => MergeDecision::Conflict {
                    current: current.clone(),
                    target: target.clone(),
                },
            },
            // the other side deleted it; honour that only if this side left it alone
            (Some(current), None) => match base {
                Some(base) if base == current => MergeDecision::Delete,
                _ => MergeDecision::KeepCurrent(current.clone()),
            },
            (None, Some(target)) => match base {
                Some(base) if base == target => MergeDecision::Delete,
                _ => MergeDecision::TakeTarget(target.clone()),
            },
            (None, None) => MergeDecision::Delete,
        }
    }
}

/// Content written for a conflicted file
///
/// Both sides are copied verbatim, so a side without a trailing newline runs
/// straight into the next marker.
pub fn conflict_markers(current: &[u8], target: &[u8], branch: &str) -> Bytes {
    let mut content = Vec::with_capacity(current.len() + target.len() + branch.len() + 32);
    content.extend_from_slice(b"<<<<<<< HEAD\n");
    content.extend_from_slice(current);
    content.extend_from_slice(b"=======\n");
    content.extend_from_slice(target);
    content.extend_from_slice(format!(">>>>>>> {branch}\n").as_bytes());

    Bytes::from(content)
}
