use crate::domain::volume::snapshot::ResourceSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDecision {
    Skip,
    Process,
}

/// Only phase, capacity and iops gate a provider update; other field churn
/// (labels, claim ref, reclaim policy, ...) is ignored. Missing capacity
/// counts as zero, matching what the provider is sent.
pub fn detect_change(old: Option<&ResourceSnapshot>, new: &ResourceSnapshot) -> ChangeDecision {
    let Some(old) = old else {
        return ChangeDecision::Process;
    };

    if old.phase == new.phase
        && old.capacity_bytes.unwrap_or_default() == new.capacity_bytes.unwrap_or_default()
        && old.iops() == new.iops()
    {
        ChangeDecision::Skip
    } else {
        ChangeDecision::Process
    }
}

pub fn is_material(old: Option<&ResourceSnapshot>, new: &ResourceSnapshot) -> bool {
    detect_change(old, new) == ChangeDecision::Process
}

/// True only for a first-time bind: the previous phase is known and was not
/// Bound, and the new phase is Bound.
pub fn is_first_bind(old: Option<&ResourceSnapshot>, new: &ResourceSnapshot) -> bool {
    old.is_some_and(|old| !old.phase.is_bound()) && new.phase.is_bound()
}
