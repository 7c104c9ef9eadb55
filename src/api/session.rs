//! Session facade and builder.

use std::collections::HashSet;
use std::sync::Arc;

use crate::client::{HttpPageClient, PageClient};
use crate::config::SelectionConfig;
use crate::domain::model::{AggregationResult, Page};
use crate::error::SelectionResult;
use crate::pagination::{PaginationController, PaginationState};
use crate::selection::{plan, plan_within, SelectionAggregator, SelectionStore};

/// One user's selection session over the remote collection.
///
/// Use [`SelectionSession::builder(config)`](Self::builder) to obtain a
/// [`SelectionSessionBuilder`].
pub struct SelectionSession {
    config: SelectionConfig,
    store: Arc<SelectionStore>,
    aggregator: SelectionAggregator,
    pagination: PaginationController,
    clamp_to_reported_total: bool,
}

impl SelectionSession {
    /// Create a new builder from a configuration.
    pub fn builder(config: SelectionConfig) -> SelectionSessionBuilder {
        SelectionSessionBuilder {
            config,
            client: None,
            store: None,
            clamp_to_reported_total: false,
        }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Select the first `desired_count` records of the collection.
    ///
    /// Ids land in the selection set alongside anything already selected.
    /// Pages that fail are listed in the result's `failed_pages`.
    pub async fn request_bulk_selection(
        &self,
        desired_count: u64,
    ) -> SelectionResult<AggregationResult> {
        let reported_total = self.pagination.state().total_count;
        let plan = match reported_total {
            Some(total) if self.clamp_to_reported_total => {
                plan_within(desired_count, self.config.page_size, total)?
            }
            _ => plan(desired_count, self.config.page_size)?,
        };
        Ok(self.aggregator.apply_plan(&plan).await)
    }

    /// Flip the selection of one row. Returns whether it is selected afterwards.
    pub fn toggle_row(&self, id: u64) -> bool {
        let selected = self.store.toggle(id);
        tracing::trace!(id, selected, "row toggled");
        selected
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.store.contains(id)
    }

    pub fn selection_snapshot(&self) -> HashSet<u64> {
        self.store.snapshot()
    }

    pub fn selection_len(&self) -> usize {
        self.store.len()
    }

    pub fn clear_selection(&self) {
        self.store.clear();
    }

    /// Handle a pager page-change event.
    pub async fn on_page_navigate(&self, first: u64, rows: u64) -> SelectionResult<Page> {
        self.pagination.navigate(first, rows).await
    }

    pub async fn go_to_page(&self, page_number: u64) -> SelectionResult<Page> {
        self.pagination.go_to_page(page_number).await
    }

    pub fn current_page(&self) -> u64 {
        self.pagination.current_page()
    }

    pub fn pagination_state(&self) -> PaginationState {
        self.pagination.state()
    }
}

/// Builder for [`SelectionSession`].
pub struct SelectionSessionBuilder {
    config: SelectionConfig,
    client: Option<Arc<dyn PageClient>>,
    store: Option<Arc<SelectionStore>>,
    clamp_to_reported_total: bool,
}

impl SelectionSessionBuilder {
    /// Use a custom page client instead of building an [`HttpPageClient`].
    pub fn client(mut self, client: Arc<dyn PageClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Share an existing selection set.
    pub fn store(mut self, store: Arc<SelectionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Cap bulk requests at the collection size last reported by a navigation.
    pub fn clamp_to_reported_total(mut self, enabled: bool) -> Self {
        self.clamp_to_reported_total = enabled;
        self
    }

    pub fn build(self) -> SelectionResult<SelectionSession> {
        self.config.validate()?;

        let client: Arc<dyn PageClient> = match self.client {
            Some(client) => client,
            None => Arc::new(HttpPageClient::new(&self.config)?),
        };
        let store = self.store.unwrap_or_default();

        let aggregator = SelectionAggregator::new(Arc::clone(&client), Arc::clone(&store))
            .with_max_concurrent_fetches(self.config.effective_concurrency());
        let pagination = PaginationController::new(client, self.config.page_size);

        tracing::debug!(
            base_url = %self.config.base_url,
            page_size = self.config.page_size,
            max_concurrent_fetches = self.config.effective_concurrency(),
            "selection session ready"
        );

        Ok(SelectionSession {
            config: self.config,
            store,
            aggregator,
            pagination,
            clamp_to_reported_total: self.clamp_to_reported_total,
        })
    }
}
