//! Test utilities for resolving components without a network.
//!
//! This module provides an in-memory `MemoryRegistry` that records every
//! fetch and can be told to fail specific lookups, plus a fluent builder for
//! component descriptors.

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, fs, path::Path};

use crate::{
    error::{Error, Result},
    registry::{ComponentDescriptor, ComponentKind, Registry, RegistryFile},
};

/// Fluent builder for component descriptors.
pub struct ComponentBuilder {
    /// Descriptor under construction.
    descriptor: ComponentDescriptor,
}

impl ComponentBuilder {
    /// Start a UI component with no files or dependencies.
    pub fn ui(name: &str) -> Self {
        Self::new(name, ComponentKind::Ui)
    }

    /// Start a core component with no files or dependencies.
    pub fn core(name: &str) -> Self {
        Self::new(name, ComponentKind::Core)
    }

    /// Start a component of the given kind.
    fn new(name: &str, kind: ComponentKind) -> Self {
        Self {
            descriptor: ComponentDescriptor {
                name: name.to_string(),
                kind,
                dependencies: Vec::new(),
                registry_dependencies: Vec::new(),
                files: Vec::new(),
            },
        }
    }

    /// Add a file whose content names the component and file.
    pub fn file(mut self, name: &str) -> Self {
        let content = format!("// {}/{name}\n", self.descriptor.name);
        self.descriptor.files.push(RegistryFile {
            name: name.to_string(),
            content,
        });
        self
    }

    /// Add a registry dependency.
    pub fn requires(mut self, name: &str) -> Self {
        self.descriptor.registry_dependencies.push(name.to_string());
        self
    }

    /// Add an external package dependency.
    pub fn external(mut self, package: &str) -> Self {
        self.descriptor.dependencies.push(package.to_string());
        self
    }

    /// Finish building.
    pub fn build(self) -> ComponentDescriptor {
        self.descriptor
    }
}

/// In-memory registry that records fetches.
#[derive(Default)]
pub struct MemoryRegistry {
    /// Published descriptors keyed by name.
    components: HashMap<String, ComponentDescriptor>,
    /// Names whose fetch fails with a network error.
    broken: Vec<String>,
    /// Every fetched name, in call order.
    fetches: RefCell<Vec<String>>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a component.
    pub fn with(mut self, component: ComponentBuilder) -> Self {
        let descriptor = component.build();
        self.components.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Make fetches for `name` fail with a network error.
    pub fn with_network_failure(mut self, name: &str) -> Self {
        self.broken.push(name.to_string());
        self
    }

    /// Names fetched so far, in order.
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }

    /// Number of times `name` was fetched.
    pub fn fetch_count(&self, name: &str) -> usize {
        self.fetches.borrow().iter().filter(|n| *n == name).count()
    }
}

impl Registry for MemoryRegistry {
    async fn fetch(&self, name: &str) -> Result<ComponentDescriptor> {
        self.fetches.borrow_mut().push(name.to_string());
        if self.broken.iter().any(|n| n == name) {
            return Err(Error::Network {
                name: name.to_string(),
                url: format!("memory://{name}.json"),
                message: "connection reset".to_string(),
            });
        }
        self.components
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ComponentNotFound {
                name: name.to_string(),
            })
    }
}

/// Read an installed component file relative to the project root.
pub fn read_installed(root: &Path, relative: &str) -> Option<String> {
    fs::read_to_string(root.join(relative)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_fetches_and_failures() {
        let registry = MemoryRegistry::new()
            .with(ComponentBuilder::core("primitive").file("Primitive.vue"))
            .with_network_failure("flaky");

        assert!(registry.fetch("primitive").await.is_ok());
        assert!(matches!(
            registry.fetch("missing").await,
            Err(Error::ComponentNotFound { .. })
        ));
        assert!(matches!(
            registry.fetch("flaky").await,
            Err(Error::Network { .. })
        ));
        assert_eq!(registry.fetches(), vec!["primitive", "missing", "flaky"]);
    }
}
