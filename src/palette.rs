//! Color palette and styling for CLI output.
//!
//! This module defines a consistent visual style for all CLI output.
//! Colors are designed for modern terminals with full color support.

use owo_colors::{OwoColorize, Style};

/// Icon for a completed step.
pub const ICON_SUCCESS: &str = "✓";
/// Icon for a failed step.
pub const ICON_ERROR: &str = "×";
/// Icon for a warning.
pub const ICON_WARN: &str = "⚠";
/// Icon preceding a path.
pub const ICON_ARROW: &str = "➜";
/// Bullet for list entries and steps.
pub const ICON_BULLET: &str = "●";
/// Icon for skipped components.
pub const ICON_SKIP: &str = "⏭";

/// Style for component names - the primary identifier, visually prominent.
pub fn component_name() -> Style {
    Style::new().bright_blue().bold()
}

/// Style for process steps like "Analyzing request...".
pub fn step() -> Style {
    Style::new().magenta().bold()
}

/// Style for success icons and headings.
pub fn success() -> Style {
    Style::new().green().bold()
}

/// Style for warning icons and headings.
pub fn warning() -> Style {
    Style::new().yellow().bold()
}

/// Style for error icons.
pub fn error() -> Style {
    Style::new().red().bold()
}

/// Style for subdued text such as paths and hints.
pub fn muted() -> Style {
    Style::new().dimmed()
}

/// Apply a style when color is enabled.
fn paint(text: &str, style: Style, use_color: bool) -> String {
    if use_color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Format a component name with styling.
pub fn fmt_component(name: &str, use_color: bool) -> String {
    paint(name, component_name(), use_color)
}

/// Format a process step with styling.
pub fn fmt_step(text: &str, use_color: bool) -> String {
    paint(text, step(), use_color)
}

/// Format success text with styling.
pub fn fmt_success(text: &str, use_color: bool) -> String {
    paint(text, success(), use_color)
}

/// Format warning text with styling.
pub fn fmt_warning(text: &str, use_color: bool) -> String {
    paint(text, warning(), use_color)
}

/// Format error text with styling.
pub fn fmt_error(text: &str, use_color: bool) -> String {
    paint(text, error(), use_color)
}

/// Format subdued text with styling.
pub fn fmt_muted(text: &str, use_color: bool) -> String {
    paint(text, muted(), use_color)
}

/// Format the product logo, one color per letter of "Rely".
pub fn fmt_logo(use_color: bool) -> String {
    let letters = [
        ("R", Style::new().blue().bold()),
        ("e", Style::new().red().bold()),
        ("l", Style::new().yellow().bold()),
        ("y", Style::new().green().bold()),
    ];
    let mut logo = letters
        .iter()
        .map(|(letter, style)| paint(letter, *style, use_color))
        .collect::<String>();
    logo.push(' ');
    logo.push_str(&paint("UI", Style::new().bold(), use_color));
    logo
}
