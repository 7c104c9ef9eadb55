/// One instruction of a [`Plan`]: fetch `page_number` and keep its first
/// `take_count` items.
///
/// Steps are only produced by [`plan`](crate::selection::plan), which keeps
/// `page_number >= 1` and `1 <= take_count <= page_size`.
///
/// ```compile_fail
/// let step = pagesel::PlanStep::new(0, 3);
/// ```
///
/// ```compile_fail
/// let step = pagesel::PlanStep { page_number: 0, take_count: 3 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanStep {
    page_number: u64,
    take_count: u64,
}

impl PlanStep {
    pub(crate) fn new(page_number: u64, take_count: u64) -> Self {
        Self {
            page_number,
            take_count,
        }
    }

    /// 1-based page to fetch.
    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    /// Leading items of the page to keep.
    pub fn take_count(&self) -> u64 {
        self.take_count
    }
}

/// Ordered page-fetch instructions satisfying a desired selection count.
///
/// Steps are stored front-to-back; executing them in a different order is
/// allowed. Plans come from [`plan`](crate::selection::plan) only:
///
/// ```compile_fail
/// let plan = pagesel::Plan::new(Vec::new());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

impl Plan {
    pub(crate) fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of records the plan asks for.
    pub fn total_take(&self) -> u64 {
        self.steps.iter().map(|s| s.take_count).sum()
    }

    pub fn page_numbers(&self) -> Vec<u64> {
        self.steps.iter().map(|s| s.page_number).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a PlanStep;
    type IntoIter = std::slice::Iter<'a, PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Plan {
    type Item = PlanStep;
    type IntoIter = std::vec::IntoIter<PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}
