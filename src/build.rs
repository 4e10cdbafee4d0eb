//! Registry generation from a directory of component templates.
//!
//! Templates are laid out as `<templates>/core/<name>/` and
//! `<templates>/components/<name>/`. Each component directory holds its
//! `.vue` and `.ts` sources plus an optional `meta.toml`:
//!
//! ```toml
//! [dependencies]
//! core = ["primitive"]
//! external = ["radix-vue"]
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    registry::{ComponentDescriptor, ComponentKind, RegistryFile},
};

/// Name of the per-component metadata file.
pub const META_FILE_NAME: &str = "meta.toml";

/// Template categories in build order.
const CATEGORIES: &[(&str, ComponentKind)] = &[
    ("core", ComponentKind::Core),
    ("components", ComponentKind::Ui),
];

/// Metadata file structure.
#[derive(Debug, Default, Deserialize)]
struct ComponentMeta {
    /// Declared dependencies.
    #[serde(default)]
    dependencies: MetaDependencies,
}

/// Dependency lists declared in metadata.
#[derive(Debug, Default, Deserialize)]
struct MetaDependencies {
    /// Registry components required first.
    #[serde(default)]
    core: Vec<String>,
    /// External packages.
    #[serde(default)]
    external: Vec<String>,
}

/// A registry document written by a build.
#[derive(Debug, Clone)]
pub struct BuiltComponent {
    /// Component that was built.
    pub descriptor: ComponentDescriptor,
    /// Path of the written JSON document.
    pub output_path: PathBuf,
}

/// Build registry documents for every template under `templates` into `out`.
///
/// The output directory is removed and recreated first.
pub fn build_registry(
    templates: &Path,
    out: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<BuiltComponent>> {
    if !templates.is_dir() {
        return Err(Error::TemplatesMissing {
            path: templates.to_path_buf(),
        });
    }

    if out.exists() {
        fs::remove_dir_all(out).map_err(|error| Error::RegistryWrite {
            path: out.to_path_buf(),
            source: error,
        })?;
    }
    fs::create_dir_all(out).map_err(|error| Error::RegistryWrite {
        path: out.to_path_buf(),
        source: error,
    })?;

    let mut built = Vec::new();
    for (dir_name, kind) in CATEGORIES {
        let category_dir = templates.join(dir_name);
        if !category_dir.is_dir() {
            diagnostics.warn(format!("No templates/{dir_name} directory found"));
            continue;
        }

        for component_dir in child_entries(&category_dir)? {
            if !component_dir.is_dir() {
                continue;
            }
            let Some(descriptor) = build_component(&component_dir, *kind, diagnostics)? else {
                continue;
            };
            let output_path = out.join(format!("{}.json", descriptor.name));
            write_document(&descriptor, &output_path)?;
            built.push(BuiltComponent {
                descriptor,
                output_path,
            });
        }
    }

    Ok(built)
}

/// Build a descriptor from one component directory, or `None` if it has no sources.
fn build_component(
    component_dir: &Path,
    kind: ComponentKind,
    diagnostics: &mut Diagnostics,
) -> Result<Option<ComponentDescriptor>> {
    let Some(name) = component_dir.file_name().and_then(|name| name.to_str()) else {
        diagnostics.warn(format!(
            "Skipping {}: name is not valid UTF-8",
            component_dir.display()
        ));
        return Ok(None);
    };

    let mut files = Vec::new();
    for path in child_entries(component_dir)? {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !path.is_file() || !is_template_source(file_name) {
            continue;
        }
        let content = fs::read_to_string(&path).map_err(|error| Error::TemplateRead {
            path: path.clone(),
            source: error,
        })?;
        files.push(RegistryFile {
            name: file_name.to_string(),
            content,
        });
    }

    if files.is_empty() {
        debug!(component = name, "no template sources, skipping");
        return Ok(None);
    }

    let meta = read_meta(component_dir, name, diagnostics);
    Ok(Some(ComponentDescriptor {
        name: name.to_string(),
        kind,
        dependencies: meta.dependencies.external,
        registry_dependencies: meta.dependencies.core,
        files,
    }))
}

/// Whether a file in a component directory is shipped in the registry.
fn is_template_source(file_name: &str) -> bool {
    !file_name.starts_with('.')
        && file_name != META_FILE_NAME
        && (file_name.ends_with(".vue") || file_name.ends_with(".ts"))
}

/// Read component metadata, warning and using defaults when it is invalid.
fn read_meta(component_dir: &Path, name: &str, diagnostics: &mut Diagnostics) -> ComponentMeta {
    let path = component_dir.join(META_FILE_NAME);
    if !path.is_file() {
        return ComponentMeta::default();
    }

    let parsed = fs::read_to_string(&path)
        .map_err(|error| error.to_string())
        .and_then(|contents| toml::from_str::<ComponentMeta>(&contents).map_err(|error| error.to_string()));
    match parsed {
        Ok(meta) => meta,
        Err(message) => {
            diagnostics.warn(format!("Could not read {META_FILE_NAME} for {name}: {message}"));
            ComponentMeta::default()
        }
    }
}

/// Immediate children of `dir`, sorted by file name.
fn child_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map(|entry| entry.into_path()).map_err(|error| {
                let path = error.path().unwrap_or(dir).to_path_buf();
                Error::TemplateRead {
                    path,
                    source: io::Error::from(error),
                }
            })
        })
        .collect()
}

/// Serialize a descriptor as pretty JSON.
fn write_document(descriptor: &ComponentDescriptor, path: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(descriptor).map_err(|error| Error::RegistrySerialize {
            name: descriptor.name.clone(),
            source: error,
        })?;
    fs::write(path, json).map_err(|error| Error::RegistryWrite {
        path: path.to_path_buf(),
        source: error,
    })
}
