//! Aggregation of install outcomes into a summary.

use crate::resolver::{InstallOutcome, InstallStatus};

/// Outcomes partitioned by status, each partition in completion order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InstallReport<'a> {
    /// Freshly installed components.
    pub installed: Vec<&'a InstallOutcome>,
    /// Components whose missing files were restored.
    pub repaired: Vec<&'a InstallOutcome>,
    /// Components that were already complete.
    pub skipped: Vec<&'a InstallOutcome>,
}

impl<'a> InstallReport<'a> {
    /// Partition `results` by status.
    pub fn summarize(results: &'a [InstallOutcome]) -> Self {
        let mut report = Self::default();
        for outcome in results {
            match outcome.status {
                InstallStatus::Installed => report.installed.push(outcome),
                InstallStatus::Repaired => report.repaired.push(outcome),
                InstallStatus::Skipped => report.skipped.push(outcome),
            }
        }
        report
    }

    /// Total number of components that reached an outcome.
    pub fn total(&self) -> usize {
        self.installed.len() + self.repaired.len() + self.skipped.len()
    }

    /// Whether no component reached an outcome.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
