//! Checks that the target directory is a Vue project with path aliases.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::error::{Error, Result};

/// Packages that mark a project as Vue-based.
const VUE_PACKAGES: &[&str] = &["vue", "nuxt"];

/// Alias keys components rely on for imports.
const ALIAS_KEYS: &[&str] = &["@/*", "@"];

/// Outcome of inspecting the project's path alias configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasStatus {
    /// `@/` is configured in `compilerOptions.paths`.
    Configured,
    /// Neither `tsconfig.json` nor `jsconfig.json` exists.
    NoConfig,
    /// The config exists but does not define the `@/` alias.
    MissingAlias {
        /// Config file that was inspected.
        config_path: PathBuf,
    },
    /// The config could not be parsed (for example, it contains comments).
    Unreadable,
}

/// Fail unless `package.json` exists and depends on Vue or Nuxt.
pub fn check_vue_project(project_root: &Path) -> Result<()> {
    let path = project_root.join("package.json");
    if !path.is_file() {
        return Err(Error::NotAProject {
            root: project_root.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(&path).map_err(|error| Error::PackageJson {
        path: path.clone(),
        message: error.to_string(),
    })?;
    let package: Value = serde_json::from_str(&contents).map_err(|error| Error::PackageJson {
        path: path.clone(),
        message: error.to_string(),
    })?;

    let uses_vue = ["dependencies", "devDependencies"].iter().any(|section| {
        package
            .get(section)
            .and_then(Value::as_object)
            .is_some_and(|deps| VUE_PACKAGES.iter().any(|name| deps.contains_key(*name)))
    });

    if uses_vue {
        Ok(())
    } else {
        Err(Error::NotVueProject)
    }
}

/// Inspect `tsconfig.json` (or `jsconfig.json`) for the `@/` alias.
pub fn check_alias_config(project_root: &Path) -> AliasStatus {
    let Some(config_path) = ["tsconfig.json", "jsconfig.json"]
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
    else {
        return AliasStatus::NoConfig;
    };

    let Ok(contents) = fs::read_to_string(&config_path) else {
        return AliasStatus::Unreadable;
    };
    let Ok(config) = serde_json::from_str::<Value>(&contents) else {
        return AliasStatus::Unreadable;
    };

    let has_alias = config
        .pointer("/compilerOptions/paths")
        .and_then(Value::as_object)
        .is_some_and(|paths| ALIAS_KEYS.iter().any(|key| paths.contains_key(*key)));

    if has_alias {
        AliasStatus::Configured
    } else {
        AliasStatus::MissingAlias { config_path }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{AliasStatus, check_alias_config, check_vue_project};
    use crate::error::Error;

    #[test]
    fn requires_package_json() {
        let dir = tempdir().expect("tempdir");
        let error = check_vue_project(dir.path()).expect_err("should fail");
        assert!(matches!(error, Error::NotAProject { .. }));
    }

    #[test]
    fn rejects_projects_without_vue() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies":{"react":"^18.0.0"}}"#,
        )
        .expect("write");
        let error = check_vue_project(dir.path()).expect_err("should fail");
        assert!(matches!(error, Error::NotVueProject));
    }

    #[test]
    fn accepts_nuxt_dev_dependency() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join("package.json"),
            r#"{"devDependencies":{"nuxt":"^3.0.0"}}"#,
        )
        .expect("write");
        check_vue_project(dir.path()).expect("nuxt project");
    }

    #[test]
    fn reports_missing_tsconfig() {
        let dir = tempdir().expect("tempdir");
        assert_eq!(check_alias_config(dir.path()), AliasStatus::NoConfig);
    }

    #[test]
    fn detects_configured_alias() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{"compilerOptions":{"paths":{"@/*":["./src/*"]}}}"#,
        )
        .expect("write");
        assert_eq!(check_alias_config(dir.path()), AliasStatus::Configured);
    }

    #[test]
    fn falls_back_to_jsconfig() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("jsconfig.json"), r#"{"compilerOptions":{}}"#).expect("write");
        assert!(matches!(
            check_alias_config(dir.path()),
            AliasStatus::MissingAlias { config_path } if config_path.ends_with("jsconfig.json")
        ));
    }

    #[test]
    fn tolerates_commented_config() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            dir.path().join("tsconfig.json"),
            "{ // comment\n \"compilerOptions\": {} }",
        )
        .expect("write");
        assert_eq!(check_alias_config(dir.path()), AliasStatus::Unreadable);
    }
}
