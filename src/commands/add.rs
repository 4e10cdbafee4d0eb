//! Implementation of the `rely add` command.

use std::{
    io::{self, Write},
    path::Path,
};

use inquire::{Text, error::InquireError, validator::Validation};

use crate::{
    commands::ColorChoice,
    config::Config,
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette::{
        ICON_ARROW, ICON_BULLET, ICON_SUCCESS, fmt_component, fmt_muted, fmt_step, fmt_success,
        fmt_warning,
    },
    paths::display_path,
    progress::Progress,
    project::{AliasStatus, check_alias_config, check_vue_project},
    registry::HttpRegistry,
    report::InstallReport,
    resolver::{InstallStatus, ResolveEvent, Resolver},
};

/// Column width for component names in the summary.
const NAME_WIDTH: usize = 15;

/// Execute the add command.
pub async fn run(
    color: ColorChoice,
    project_root: &Path,
    components: Vec<String>,
    registry: Option<String>,
    skip_checks: bool,
) -> Result<()> {
    let use_color = color.enabled();
    let mut diagnostics = Diagnostics::new(use_color);

    if !skip_checks {
        check_vue_project(project_root)?;
        warn_about_aliases(project_root, &mut diagnostics);
    }

    let names = if components.is_empty() {
        match prompt_components()? {
            Some(names) => names,
            None => return Ok(()),
        }
    } else {
        split_names(&components)
    };
    if names.is_empty() {
        println!("No components requested.");
        return Ok(());
    }

    let config = Config::load(project_root)?;
    let registry = HttpRegistry::new(config.registry_url(registry.as_deref()))?;

    println!("{}", fmt_step(&format!("{ICON_BULLET} Analyzing request..."), use_color));

    let progress = Progress::new(use_color);
    let mut finished = Vec::<(InstallStatus, Vec<String>)>::new();
    let outcomes = Resolver::new(&registry, project_root)
        .resolve(&names, |event| {
            if let ResolveEvent::Finished { outcome, external } = &event {
                finished.push((outcome.status, external.to_vec()));
            }
            progress.handle(&event, &mut diagnostics);
        })
        .await;
    progress.finish();

    let external = external_packages(
        finished
            .iter()
            .map(|(status, packages)| (*status, packages.as_slice())),
    );
    let report = InstallReport::summarize(&outcomes);
    write_summary(
        &mut io::stdout().lock(),
        &report,
        &external,
        project_root,
        use_color,
    )
    .map_err(|source| Error::Output { source })?;
    diagnostics.print_failure_summary();
    diagnostics.print_warning_summary();
    Ok(())
}

/// Ask for a space-separated list of components, or `None` if canceled.
fn prompt_components() -> Result<Option<Vec<String>>> {
    let response = Text::new("Which component do you want to install?")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("You must enter a name.".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt();

    match response {
        Ok(value) => Ok(Some(split_names(&[value]))),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(error) => Err(Error::PromptFailed {
            message: error.to_string(),
        }),
    }
}

/// Split arguments on whitespace, dropping empty pieces.
fn split_names(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|value| value.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Distinct external packages declared by freshly installed components.
///
/// Repaired and skipped components are assumed to have their packages in
/// place already.
fn external_packages<'a>(
    finished: impl IntoIterator<Item = (InstallStatus, &'a [String])>,
) -> Vec<String> {
    let mut packages = Vec::<String>::new();
    for (status, declared) in finished {
        if status != InstallStatus::Installed {
            continue;
        }
        for package in declared {
            if !packages.contains(package) {
                packages.push(package.clone());
            }
        }
    }
    packages
}

/// Warn when the `@/` import alias is not configured.
fn warn_about_aliases(project_root: &Path, diagnostics: &mut Diagnostics) {
    match check_alias_config(project_root) {
        AliasStatus::Configured | AliasStatus::Unreadable => {}
        AliasStatus::NoConfig => {
            diagnostics.warn("No tsconfig.json found. Make sure your path aliases are configured.");
        }
        AliasStatus::MissingAlias { config_path } => {
            diagnostics.warn(format!(
                "Components import each other through the '@/' alias, which is not set in {}.",
                display_path(&config_path, project_root)
            ));
            diagnostics.note("If you see import errors, add this to compilerOptions:");
            diagnostics.note("  \"paths\": { \"@/*\": [\"./src/*\"] }");
        }
    }
}

/// Render the install summary.
fn write_summary(
    out: &mut impl Write,
    report: &InstallReport<'_>,
    external: &[String],
    project_root: &Path,
    use_color: bool,
) -> io::Result<()> {
    writeln!(out)?;
    if report.is_empty() {
        return Ok(());
    }

    if !report.installed.is_empty() {
        writeln!(out, "{}", fmt_success("Installed:", use_color))?;
        for outcome in &report.installed {
            let name = format!("{:<width$}", outcome.name, width = NAME_WIDTH);
            writeln!(
                out,
                "  {} {} {} {}",
                fmt_success(ICON_SUCCESS, use_color),
                fmt_component(&name, use_color),
                fmt_muted(ICON_ARROW, use_color),
                fmt_muted(&display_path(&outcome.target_path, project_root), use_color)
            )?;
        }
        writeln!(out)?;
    }

    if !report.repaired.is_empty() {
        writeln!(out, "{}", fmt_warning("Repaired (files restored):", use_color))?;
        for outcome in &report.repaired {
            writeln!(
                out,
                "  {} {}",
                fmt_warning(ICON_BULLET, use_color),
                fmt_component(&outcome.name, use_color)
            )?;
        }
        writeln!(out)?;
    }

    if !report.skipped.is_empty() {
        writeln!(out, "{}", fmt_step("Unchanged (already up to date):", use_color))?;
        for outcome in &report.skipped {
            writeln!(
                out,
                "  {} {}",
                fmt_step(ICON_BULLET, use_color),
                fmt_muted(&outcome.name, use_color)
            )?;
        }
        writeln!(out)?;
    }

    if !external.is_empty() {
        writeln!(
            out,
            "{} {}",
            fmt_muted("Install the required packages with your package manager:", use_color),
            fmt_component(&external.join(" "), use_color)
        )?;
        writeln!(out)?;
    }

    writeln!(out, "{}", fmt_component("  All set. Happy coding!", use_color))?;
    writeln!(out)
}
