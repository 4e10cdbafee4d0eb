//! Failure and warning aggregation for a command run.

use crate::palette::{ICON_ERROR, ICON_WARN, fmt_error, fmt_warning};

/// Details about a component whose branch was abandoned.
#[derive(Debug, Clone)]
pub struct FailedComponent {
    /// Component name.
    pub(crate) name: String,
    /// Reason the component failed.
    pub(crate) reason: String,
}

/// Aggregates warnings and failed components for a command run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Whether output is colorized.
    use_color: bool,
    /// Collected warning messages.
    warnings: Vec<String>,
    /// Collected failed components.
    failed: Vec<FailedComponent>,
}

impl Diagnostics {
    /// Create a new diagnostics collector.
    pub(crate) fn new(use_color: bool) -> Self {
        Self {
            use_color,
            warnings: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Record a warning and print it immediately.
    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        eprintln!("{} {message}", fmt_warning(ICON_WARN, self.use_color));
        self.warnings.push(message);
    }

    /// Print a non-warning continuation line.
    pub(crate) fn note(&self, message: impl Into<String>) {
        eprintln!("  {}", message.into());
    }

    /// Record an abandoned component and print a one-line diagnostic.
    pub(crate) fn fail(&mut self, name: &str, reason: impl Into<String>) {
        let reason = reason.into();
        eprintln!(
            "{} Failed to process {name}: {reason}",
            fmt_error(ICON_ERROR, self.use_color)
        );
        self.failed.push(FailedComponent {
            name: name.to_string(),
            reason,
        });
    }

    /// Components that failed during the run.
    pub(crate) fn failed(&self) -> &[FailedComponent] {
        &self.failed
    }

    /// Print a summary for failed components if any were recorded.
    pub(crate) fn print_failure_summary(&self) {
        let failed = self.failed();
        if failed.is_empty() {
            return;
        }

        eprintln!("Failed to add {} component(s):", failed.len());
        for failed in failed {
            eprintln!("  - {}: {}", failed.name, failed.reason);
        }
    }

    /// Number of warnings emitted so far.
    pub(crate) fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Print a warning summary when warnings were emitted.
    pub(crate) fn print_warning_summary(&self) {
        let count = self.warning_count();
        if count == 0 {
            return;
        }

        eprintln!("Completed with {count} warning(s).");
    }
}

#[cfg(test)]
mod tests {
    use super::Diagnostics;

    #[test]
    fn records_failures_in_order() {
        let mut diagnostics = Diagnostics::new(false);
        diagnostics.fail("ghost", "not found");
        diagnostics.fail("card", "network error");

        let names = diagnostics
            .failed()
            .iter()
            .map(|failed| failed.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["ghost", "card"]);
    }
}
