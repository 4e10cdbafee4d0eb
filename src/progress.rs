//! Spinner display driven by resolver events.

use std::{
    io::{self, IsTerminal},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    diagnostics::Diagnostics,
    palette::{ICON_SKIP, ICON_SUCCESS, fmt_component, fmt_muted, fmt_success},
    resolver::{InstallOutcome, InstallStatus, ResolveEvent},
};

/// Spinner ticks.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Live progress for an `add` run.
///
/// Without color, or when stderr is not a terminal, the spinner is dropped and
/// persistent lines are printed directly.
pub struct Progress {
    /// Active spinner, if enabled.
    spinner: Option<ProgressBar>,
    /// Whether output is colorized.
    use_color: bool,
}

impl Progress {
    /// Start a progress display.
    pub(crate) fn new(use_color: bool) -> Self {
        let spinner = (use_color && io::stderr().is_terminal()).then(|| {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}") {
                spinner.set_style(style.tick_strings(SPINNER_FRAMES));
            }
            spinner.enable_steady_tick(Duration::from_millis(80));
            spinner.set_message("Starting...");
            spinner
        });
        Self { spinner, use_color }
    }

    /// Update the display for a resolver event.
    pub(crate) fn handle(&self, event: &ResolveEvent<'_>, diagnostics: &mut Diagnostics) {
        let color = self.use_color;
        match event {
            ResolveEvent::Fetching { name, parent } => {
                let name = fmt_component(name, color);
                match parent {
                    Some(parent) => self.status(format!("Resolving dependency {name} (for {parent})...")),
                    None => self.status(format!("Looking up component {name}...")),
                }
            }
            ResolveEvent::Writing { name, status } => {
                let verb = match status {
                    InstallStatus::Repaired => "Repairing",
                    _ => "Installing",
                };
                self.status(format!("{verb} {}...", fmt_component(name, color)));
            }
            ResolveEvent::Finished { outcome, external } => {
                for line in finished_lines(outcome, external, color) {
                    self.line(line);
                }
            }
            ResolveEvent::Failed { name, error } => {
                self.suspend(|| diagnostics.fail(name, error.to_string()));
            }
        }
    }

    /// Replace the spinner message.
    fn status(&self, message: String) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(message);
        }
    }

    /// Print a persistent line above the spinner.
    fn line(&self, message: String) {
        match &self.spinner {
            Some(spinner) => spinner.println(message),
            None => eprintln!("{message}"),
        }
    }

    /// Run `f` with the spinner hidden.
    fn suspend<F: FnOnce()>(&self, f: F) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(f),
            None => f(),
        }
    }

    /// Stop and clear the spinner.
    pub(crate) fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Persistent lines announcing a finished component.
fn finished_lines(outcome: &InstallOutcome, external: &[String], color: bool) -> Vec<String> {
    let name = fmt_component(&outcome.name, color);
    match outcome.status {
        InstallStatus::Skipped => vec![format!(
            "{ICON_SKIP} {name} already exists and is complete. {}",
            fmt_muted("(skipped)", color)
        )],
        InstallStatus::Repaired => vec![format!("{} {name} repaired.", fmt_success(ICON_SUCCESS, color))],
        InstallStatus::Installed => {
            let mut lines = vec![format!("{} {name} installed.", fmt_success(ICON_SUCCESS, color))];
            if !external.is_empty() {
                lines.push(format!(
                    "   {} {}",
                    fmt_muted("└─ requires:", color),
                    fmt_component(&external.join(", "), color)
                ));
            }
            lines
        }
    }
}
