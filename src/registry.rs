//! Component descriptors and the registry client.
//!
//! The registry is a static collection of JSON documents, one per component,
//! served at `<base>/<name>.json`. Documents are validated here so the rest of
//! the crate only ever sees well-formed [`ComponentDescriptor`] values.

use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Registry used when neither the CLI nor the config names one.
pub const DEFAULT_REGISTRY_URL: &str = "https://withrely.github.io/rely-ui-vue/registry";

/// Installation category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// User-facing UI component, installed under `src/components/ui`.
    #[serde(rename = "components:ui")]
    Ui,
    /// Internal building block, installed under `src/components/core`.
    #[serde(rename = "components:core")]
    Core,
}

impl ComponentKind {
    /// Directory under the project's `src/components` for this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Core => "core",
        }
    }

    /// Directory a component of this kind is installed into.
    pub fn target_dir(self, project_root: &Path, name: &str) -> PathBuf {
        project_root
            .join("src")
            .join("components")
            .join(self.dir_name())
            .join(name)
    }
}

/// A single source file shipped with a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryFile {
    /// File name relative to the component directory.
    pub name: String,
    /// Full file contents.
    pub content: String,
}

/// A component as published in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDescriptor {
    /// Component name, matching the registry lookup key.
    pub name: String,
    /// Installation category.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// External package names; advisory only.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Registry components that must be resolved first.
    #[serde(default)]
    pub registry_dependencies: Vec<String>,
    /// Files written into the component directory.
    pub files: Vec<RegistryFile>,
}

impl ComponentDescriptor {
    /// Parse and validate a registry document fetched for `name`.
    pub fn from_json(name: &str, body: &str) -> Result<Self> {
        let descriptor: Self =
            serde_json::from_str(body).map_err(|error| Error::InvalidDescriptor {
                name: name.to_string(),
                message: error.to_string(),
            })?;
        descriptor.validate(name)?;
        Ok(descriptor)
    }

    /// Check invariants serde cannot express.
    fn validate(&self, requested: &str) -> Result<()> {
        let invalid = |message: String| Error::InvalidDescriptor {
            name: requested.to_string(),
            message,
        };

        if self.name != requested {
            return Err(invalid(format!(
                "document describes \"{}\" instead",
                self.name
            )));
        }

        let mut seen = Vec::with_capacity(self.files.len());
        for file in &self.files {
            if !is_plain_file_name(&file.name) {
                return Err(invalid(format!("invalid file name \"{}\"", file.name)));
            }
            if seen.contains(&file.name.as_str()) {
                return Err(invalid(format!("duplicate file \"{}\"", file.name)));
            }
            seen.push(file.name.as_str());
        }
        Ok(())
    }

    /// Names of the files this component ships.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.name.as_str()).collect()
    }
}

/// Reject names that would escape the registry or the components directory.
pub fn validate_component_name(name: &str) -> Result<()> {
    if is_plain_file_name(name) && !name.trim().is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidComponentName {
            name: name.to_string(),
        })
    }
}

/// Whether a file name stays inside its parent directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

/// Source of component descriptors.
pub trait Registry {
    /// Fetch the descriptor for a component by name.
    ///
    /// Fails with [`Error::ComponentNotFound`] when the registry has no such
    /// component and with [`Error::Network`] for any other failure.
    async fn fetch(&self, name: &str) -> Result<ComponentDescriptor>;
}

/// Registry client backed by HTTP.
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    /// Base URL of the registry directory.
    base_url: Url,
    /// Shared HTTP client.
    client: reqwest::Client,
}

impl HttpRegistry {
    /// Create a client for the registry at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let invalid = || Error::InvalidUrl {
            url: base_url.to_string(),
        };
        let parsed = Url::parse(base_url).map_err(|_| invalid())?;
        if parsed.cannot_be_a_base() {
            return Err(invalid());
        }
        Ok(Self {
            base_url: parsed,
            client: reqwest::Client::new(),
        })
    }

    /// URL of the document for `name`.
    ///
    /// The name is appended as a single percent-encoded path segment.
    pub fn component_url(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&format!("{name}.json"));
        }
        url
    }
}

impl Registry for HttpRegistry {
    async fn fetch(&self, name: &str) -> Result<ComponentDescriptor> {
        validate_component_name(name)?;
        let url = self.component_url(name);
        debug!(component = name, %url, "fetching registry entry");

        let network = |message: String| Error::Network {
            name: name.to_string(),
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|error| network(error.to_string()))?;

        let status = response.status();
        debug!(component = name, status = status.as_u16(), "registry responded");
        if status == StatusCode::NOT_FOUND {
            return Err(Error::ComponentNotFound {
                name: name.to_string(),
            });
        }
        if !status.is_success() {
            return Err(network(format!("registry returned {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|error| network(error.to_string()))?;
        ComponentDescriptor::from_json(name, &body)
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::{ComponentDescriptor, ComponentKind, HttpRegistry, Registry};
    use crate::error::Error;

    const BUTTON_JSON: &str = r#"{
        "name": "button",
        "type": "components:ui",
        "dependencies": ["radix-vue"],
        "registryDependencies": ["primitive"],
        "files": [
            { "name": "Button.vue", "content": "<template />" },
            { "name": "index.ts", "content": "export {}" }
        ]
    }"#;

    /// Serve a single HTTP response and return the base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/registry/")
    }

    #[test]
    fn parses_registry_document() {
        let descriptor = ComponentDescriptor::from_json("button", BUTTON_JSON).expect("parse");
        assert_eq!(descriptor.kind, ComponentKind::Ui);
        assert_eq!(descriptor.dependencies, vec!["radix-vue"]);
        assert_eq!(descriptor.registry_dependencies, vec!["primitive"]);
        assert_eq!(descriptor.file_names(), vec!["Button.vue", "index.ts"]);
    }

    #[test]
    fn rejects_unknown_kind() {
        let body = r#"{"name":"x","type":"components:page","files":[]}"#;
        let error = ComponentDescriptor::from_json("x", body).expect_err("should fail");
        assert!(matches!(error, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn rejects_mismatched_name() {
        let body = r#"{"name":"other","type":"components:core","files":[]}"#;
        let error = ComponentDescriptor::from_json("x", body).expect_err("should fail");
        assert!(matches!(error, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn rejects_path_traversal_in_file_names() {
        let body = r#"{"name":"x","type":"components:core","files":[{"name":"../evil.ts","content":""}]}"#;
        let error = ComponentDescriptor::from_json("x", body).expect_err("should fail");
        assert!(matches!(error, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn rejects_duplicate_file_names() {
        let body = r#"{"name":"x","type":"components:core","files":[{"name":"a.ts","content":""},{"name":"a.ts","content":""}]}"#;
        let error = ComponentDescriptor::from_json("x", body).expect_err("should fail");
        assert!(matches!(error, Error::InvalidDescriptor { .. }));
    }

    #[test]
    fn builds_component_urls_without_double_slash() {
        let registry = HttpRegistry::new("https://example.com/registry/").expect("registry");
        assert_eq!(
            registry.component_url("button").as_str(),
            "https://example.com/registry/button.json"
        );
    }

    #[test]
    fn encodes_reserved_characters_in_component_urls() {
        let registry = HttpRegistry::new("https://example.com/registry").expect("registry");
        let url = registry.component_url("a#b?c");
        assert_eq!(url.path(), "/registry/a%23b%3Fc.json");
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), None);
    }

    #[test]
    fn rejects_base_urls_without_a_path() {
        let error = HttpRegistry::new("mailto:registry@example.com").expect_err("should fail");
        assert!(matches!(error, Error::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let error = HttpRegistry::new("not a url").expect_err("should fail");
        assert!(matches!(error, Error::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn rejects_names_that_escape_the_registry() {
        let registry = HttpRegistry::new("https://example.com/registry").expect("registry");
        let error = registry.fetch("../secrets").await.expect_err("should fail");
        assert!(matches!(error, Error::InvalidComponentName { .. }));
    }

    #[tokio::test]
    async fn fetches_descriptor_over_http() {
        let base = serve_once("200 OK", BUTTON_JSON).await;
        let registry = HttpRegistry::new(&base).expect("registry");
        let descriptor = registry.fetch("button").await.expect("fetch");
        assert_eq!(descriptor.name, "button");
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let base = serve_once("404 Not Found", "").await;
        let registry = HttpRegistry::new(&base).expect("registry");
        let error = registry.fetch("missing").await.expect_err("should fail");
        assert!(matches!(error, Error::ComponentNotFound { name } if name == "missing"));
    }

    #[tokio::test]
    async fn maps_server_errors_to_network() {
        let base = serve_once("500 Internal Server Error", "").await;
        let registry = HttpRegistry::new(&base).expect("registry");
        let error = registry.fetch("button").await.expect_err("should fail");
        assert!(matches!(error, Error::Network { .. }));
    }

    #[tokio::test]
    async fn reports_malformed_documents() {
        let base = serve_once("200 OK", "{ not json").await;
        let registry = HttpRegistry::new(&base).expect("registry");
        let error = registry.fetch("button").await.expect_err("should fail");
        assert!(matches!(error, Error::InvalidDescriptor { .. }));
    }
}
