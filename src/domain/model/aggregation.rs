use std::collections::{BTreeSet, HashSet};

/// Outcome of executing one [`Plan`](super::Plan).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    /// Generation token the plan ran under.
    pub generation: u64,
    /// Ids that were not selected before this plan merged.
    pub added_ids: HashSet<u64>,
    /// Pages whose request failed; they contributed no ids.
    pub failed_pages: BTreeSet<u64>,
    /// Records asked for but missing because a page came back short.
    pub dropped_count: u64,
    /// A newer plan started before this one could merge; nothing was added.
    pub superseded: bool,
}

impl AggregationResult {
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Whether some pages could not be loaded.
    pub fn is_partial(&self) -> bool {
        !self.failed_pages.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.added_ids.is_empty() && self.failed_pages.is_empty()
    }
}
