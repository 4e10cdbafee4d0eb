//! Implementation of the `rely build` command.

use std::path::{Path, PathBuf};

use crate::{
    build::build_registry,
    commands::ColorChoice,
    diagnostics::Diagnostics,
    error::Result,
    palette::{ICON_SUCCESS, fmt_component, fmt_muted, fmt_success},
    paths::{display_path, resolve_in},
};

/// Execute the build command.
pub async fn run(
    color: ColorChoice,
    project_root: &Path,
    templates: PathBuf,
    out: PathBuf,
) -> Result<()> {
    let use_color = color.enabled();
    let mut diagnostics = Diagnostics::new(use_color);
    let templates = resolve_in(project_root, &templates);
    let out = resolve_in(project_root, &out);

    println!("Building registry from {}", display_path(&templates, project_root));

    let built = build_registry(&templates, &out, &mut diagnostics)?;
    for component in &built {
        println!(
            "{} {} {}",
            fmt_success(ICON_SUCCESS, use_color),
            fmt_component(&component.descriptor.name, use_color),
            fmt_muted(
                &format!("-> {}", display_path(&component.output_path, project_root)),
                use_color
            )
        );
    }

    println!();
    println!(
        "Registry built in {} ({} component(s)).",
        display_path(&out, project_root),
        built.len()
    );
    diagnostics.print_warning_summary();
    Ok(())
}
