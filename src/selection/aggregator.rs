use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::client::PageClient;
use crate::config::DEFAULT_MAX_CONCURRENT_FETCHES;
use crate::domain::model::{AggregationResult, Plan, PlanStep};
use crate::error::FetchError;

use super::{GenerationCounter, SelectionStore};

/// Executes plans against a [`PageClient`] and merges the ids into a [`SelectionStore`].
pub struct SelectionAggregator {
    client: Arc<dyn PageClient>,
    store: Arc<SelectionStore>,
    generations: Arc<GenerationCounter>,
    /// Shared by every `apply_plan` call, so overlapping plans stay under one limit.
    fetch_permits: Arc<Semaphore>,
}

enum StepOutcome {
    Fetched { ids: Vec<u64>, shortfall: u64 },
    Failed(FetchError),
}

impl SelectionAggregator {
    pub fn new(client: Arc<dyn PageClient>, store: Arc<SelectionStore>) -> Self {
        Self {
            client,
            store,
            generations: Arc::new(GenerationCounter::new()),
            fetch_permits: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT_FETCHES)),
        }
    }

    /// Cap simultaneous page requests. Values below one are treated as one.
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.fetch_permits = Arc::new(Semaphore::new(limit.max(1)));
        self
    }

    pub fn store(&self) -> &Arc<SelectionStore> {
        &self.store
    }

    pub fn current_generation(&self) -> u64 {
        self.generations.current()
    }

    /// Run every step of `plan` and merge the collected ids.
    ///
    /// Failed pages are reported, not fatal. If another `apply_plan` starts
    /// before this one merges, nothing is merged and the result is marked
    /// superseded.
    pub async fn apply_plan(&self, plan: &Plan) -> AggregationResult {
        let generation = self.generations.advance();
        if plan.is_empty() {
            return AggregationResult::empty(generation);
        }

        tracing::info!(
            generation,
            steps = plan.len(),
            records = plan.total_take(),
            "applying selection plan"
        );

        let mut steps: Vec<PlanStep> = Vec::with_capacity(plan.len());
        let mut tasks = Vec::with_capacity(plan.len());
        let mut failed_pages = BTreeSet::new();

        for step in plan {
            if step.page_number() == 0 || step.take_count() == 0 {
                tracing::warn!(
                    generation,
                    page = step.page_number(),
                    take = step.take_count(),
                    "refusing malformed plan step"
                );
                failed_pages.insert(step.page_number());
                continue;
            }
            let Ok(permit) = Arc::clone(&self.fetch_permits).acquire_owned().await else {
                break;
            };
            if !self.generations.is_current(generation) {
                tracing::debug!(
                    generation,
                    page = step.page_number(),
                    "plan superseded; not issuing remaining fetches"
                );
                break;
            }

            let step = *step;
            let client = Arc::clone(&self.client);
            let task = tokio::spawn(async move {
                let outcome = match client.fetch_page(step.page_number()).await {
                    Ok(page) => {
                        let ids = page.leading_ids(step.take_count());
                        let shortfall = step.take_count().saturating_sub(ids.len() as u64);
                        StepOutcome::Fetched { ids, shortfall }
                    }
                    Err(e) => StepOutcome::Failed(e),
                };
                drop(permit);
                outcome
            });

            steps.push(step);
            tasks.push(task);
        }

        let mut contributed: HashSet<u64> = HashSet::new();
        let mut dropped_count = 0u64;

        for (step, joined) in steps.iter().zip(join_all(tasks).await) {
            match joined {
                Ok(StepOutcome::Fetched { ids, shortfall }) => {
                    if shortfall > 0 {
                        tracing::debug!(
                            generation,
                            page = step.page_number(),
                            shortfall,
                            "page returned fewer items than planned"
                        );
                    }
                    dropped_count += shortfall;
                    contributed.extend(ids);
                }
                Ok(StepOutcome::Failed(e)) => {
                    tracing::warn!(
                        generation,
                        page = step.page_number(),
                        error = %e,
                        "page fetch failed"
                    );
                    failed_pages.insert(step.page_number());
                }
                Err(e) => {
                    tracing::error!(
                        generation,
                        page = step.page_number(),
                        error = %e,
                        "page fetch task aborted"
                    );
                    failed_pages.insert(step.page_number());
                }
            }
        }

        let merged = self
            .store
            .add_if(contributed, || self.generations.is_current(generation));

        let Some(added_ids) = merged else {
            tracing::debug!(generation, "discarding results of superseded plan");
            return AggregationResult {
                generation,
                added_ids: HashSet::new(),
                failed_pages,
                dropped_count,
                superseded: true,
            };
        };

        tracing::info!(
            generation,
            added = added_ids.len(),
            failed = failed_pages.len(),
            "selection plan merged"
        );

        AggregationResult {
            generation,
            added_ids,
            failed_pages,
            dropped_count,
            superseded: false,
        }
    }
}
