//! Pure mapping from a desired count to page-fetch instructions.

use crate::domain::model::{Plan, PlanStep};
use crate::error::{SelectionError, SelectionResult};

/// Plan the pages needed to collect `desired_count` records.
///
/// Emits `(k, page_size)` for every full page `k` in increasing order, then a
/// single remainder step when `desired_count` is not a multiple of
/// `page_size`. A zero count yields an empty plan.
pub fn plan(desired_count: u64, page_size: u64) -> SelectionResult<Plan> {
    if page_size == 0 {
        return Err(SelectionError::InvalidPageSize(page_size));
    }

    let full_pages = desired_count / page_size;
    let remainder = desired_count % page_size;

    let steps = (1..=full_pages)
        .map(|page_number| PlanStep::new(page_number, page_size))
        .chain((remainder > 0).then(|| PlanStep::new(full_pages + 1, remainder)))
        .collect();
    Ok(Plan::new(steps))
}

/// Like [`plan`], with the count capped at the server-reported `total_count`.
pub fn plan_within(desired_count: u64, page_size: u64, total_count: u64) -> SelectionResult<Plan> {
    plan(desired_count.min(total_count), page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(plan: &Plan) -> Vec<(u64, u64)> {
        plan.iter().map(|s| (s.page_number(), s.take_count())).collect()
    }

    #[test]
    fn test_plan_with_remainder() {
        assert_eq!(steps(&plan(25, 12).unwrap()), vec![(1, 12), (2, 12), (3, 1)]);
    }

    #[test]
    fn test_plan_exact_multiple() {
        assert_eq!(steps(&plan(24, 12).unwrap()), vec![(1, 12), (2, 12)]);
    }

    #[test]
    fn test_plan_zero_and_one() {
        assert!(plan(0, 12).unwrap().is_empty());
        assert_eq!(steps(&plan(1, 12).unwrap()), vec![(1, 1)]);
    }

    #[test]
    fn test_plan_rejects_zero_page_size() {
        assert!(matches!(plan(5, 0), Err(SelectionError::InvalidPageSize(0))));
    }

    #[test]
    fn test_take_counts_sum_to_desired() {
        for page_size in 1..=17u64 {
            for desired in 0..=120u64 {
                let p = plan(desired, page_size).unwrap();
                assert_eq!(p.total_take(), desired, "n={} p={}", desired, page_size);
                assert!(p
                    .iter()
                    .all(|s| s.take_count() >= 1 && s.take_count() <= page_size));
                let pages = p.page_numbers();
                assert_eq!(pages, (1..=pages.len() as u64).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_plan_is_deterministic() {
        assert_eq!(plan(1000, 12).unwrap(), plan(1000, 12).unwrap());
    }

    #[test]
    fn test_plan_within_caps_at_total() {
        assert_eq!(steps(&plan_within(50, 12, 14).unwrap()), vec![(1, 12), (2, 2)]);
        assert_eq!(steps(&plan_within(5, 12, 14).unwrap()), vec![(1, 5)]);
        assert!(plan_within(5, 12, 0).unwrap().is_empty());
    }
}
