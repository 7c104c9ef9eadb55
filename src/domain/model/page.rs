use super::Item;

/// One page of the remote collection as returned by a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Item>,
    /// 1-based page number.
    pub page_number: u64,
    pub page_size: u64,
    /// Server-reported collection size. May be stale.
    pub total_count: u64,
}

impl Page {
    pub fn ids(&self) -> Vec<u64> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Ids of the first `take_count` items, or of every item when the page is short.
    pub fn leading_ids(&self, take_count: u64) -> Vec<u64> {
        let take = usize::try_from(take_count).unwrap_or(usize::MAX);
        self.items.iter().take(take).map(|item| item.id).collect()
    }

    pub fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size.max(1))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
