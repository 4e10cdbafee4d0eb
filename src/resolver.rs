//! Dependency resolution and installation.
//!
//! Requested components are processed one at a time, depth-first. Each
//! component's registry dependencies are fully resolved before its own
//! directory is checked or written, and every name is processed at most once
//! per run, which both deduplicates diamonds and terminates cycles.
//!
//! The walk uses an explicit stack rather than recursion. Popping a
//! [`Frame::Visit`] marks the name visited and fetches it; the fetched
//! descriptor is pushed back as a [`Frame::Install`] underneath its
//! dependencies (pushed in reverse so they pop in declaration order). Results
//! therefore come out in depth-first post-order.

use std::{collections::HashSet, path::PathBuf};

use tracing::debug;

use crate::{
    error::{Error, Result},
    integrity::{self, IntegrityVerdict},
    materialize::materialize,
    registry::{ComponentDescriptor, Registry},
};

/// Terminal state of a processed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    /// The component directory was missing and has been written.
    Installed,
    /// The directory existed with files missing; every file was rewritten.
    Repaired,
    /// All files were already present; nothing was touched.
    Skipped,
}

/// Result of processing one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Component name.
    pub name: String,
    /// What happened to the component.
    pub status: InstallStatus,
    /// Directory written to or confirmed.
    pub target_path: PathBuf,
}

/// Progress notifications emitted while resolving.
#[derive(Debug)]
pub enum ResolveEvent<'a> {
    /// A descriptor is about to be fetched.
    Fetching {
        /// Component being fetched.
        name: &'a str,
        /// Component that declared this one as a dependency, if any.
        parent: Option<&'a str>,
    },
    /// Files are about to be written.
    Writing {
        /// Component being written.
        name: &'a str,
        /// `Installed` for a fresh install, `Repaired` for a repair.
        status: InstallStatus,
    },
    /// A component reached a terminal outcome.
    Finished {
        /// The recorded outcome.
        outcome: &'a InstallOutcome,
        /// External packages the component declares.
        external: &'a [String],
    },
    /// A component's branch was abandoned.
    Failed {
        /// Component that failed.
        name: &'a str,
        /// Why it failed.
        error: &'a Error,
    },
}

/// Unit of work on the resolution stack.
enum Frame {
    /// Fetch a component and schedule its dependencies.
    Visit {
        /// Component to fetch.
        name: String,
        /// Component that requested it.
        parent: Option<String>,
    },
    /// Check and write a component whose dependencies are done.
    Install(ComponentDescriptor),
}

/// Per-run bookkeeping.
#[derive(Default)]
struct ResolutionState {
    /// Names already processed this run.
    visited: HashSet<String>,
    /// Outcomes in completion order.
    results: Vec<InstallOutcome>,
}

/// Resolves and installs components into a project.
pub struct Resolver<'a, R> {
    /// Where descriptors come from.
    registry: &'a R,
    /// Project root that `src/components` lives under.
    project_root: PathBuf,
}

impl<'a, R: Registry> Resolver<'a, R> {
    /// Create a resolver writing under `project_root`.
    pub fn new(registry: &'a R, project_root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            project_root: project_root.into(),
        }
    }

    /// Resolve the requested names in order, reporting progress to `on_event`.
    ///
    /// Failures are confined to the branch rooted at the failing component:
    /// they are reported as [`ResolveEvent::Failed`] and produce no outcome.
    pub async fn resolve<S, F>(&self, requested: &[S], mut on_event: F) -> Vec<InstallOutcome>
    where
        S: AsRef<str>,
        F: FnMut(ResolveEvent<'_>),
    {
        let mut state = ResolutionState::default();
        for name in requested {
            self.resolve_root(name.as_ref(), &mut state, &mut on_event)
                .await;
        }
        state.results
    }

    /// Process one requested name and everything it depends on.
    async fn resolve_root<F>(&self, root: &str, state: &mut ResolutionState, on_event: &mut F)
    where
        F: FnMut(ResolveEvent<'_>),
    {
        let mut stack = vec![Frame::Visit {
            name: root.to_string(),
            parent: None,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Visit { name, parent } => {
                    if !state.visited.insert(name.clone()) {
                        debug!(component = %name, "already processed");
                        continue;
                    }
                    on_event(ResolveEvent::Fetching {
                        name: &name,
                        parent: parent.as_deref(),
                    });

                    let descriptor = match self.registry.fetch(&name).await {
                        Ok(descriptor) => descriptor,
                        Err(error) => {
                            debug!(component = %name, %error, "abandoning component");
                            on_event(ResolveEvent::Failed {
                                name: &name,
                                error: &error,
                            });
                            continue;
                        }
                    };

                    let dependencies = descriptor
                        .registry_dependencies
                        .iter()
                        .rev()
                        .filter(|dep| !state.visited.contains(dep.as_str()))
                        .map(|dep| Frame::Visit {
                            name: dep.clone(),
                            parent: Some(name.clone()),
                        })
                        .collect::<Vec<_>>();
                    stack.push(Frame::Install(descriptor));
                    stack.extend(dependencies);
                }
                Frame::Install(descriptor) => {
                    match self.install(&descriptor, on_event) {
                        Ok(outcome) => {
                            on_event(ResolveEvent::Finished {
                                outcome: &outcome,
                                external: &descriptor.dependencies,
                            });
                            state.results.push(outcome);
                        }
                        Err(error) => {
                            debug!(component = %descriptor.name, %error, "failed to write component");
                            on_event(ResolveEvent::Failed {
                                name: &descriptor.name,
                                error: &error,
                            });
                        }
                    }
                }
            }
        }
    }

    /// Check a component's directory and write its files if needed.
    fn install<F>(&self, descriptor: &ComponentDescriptor, on_event: &mut F) -> Result<InstallOutcome>
    where
        F: FnMut(ResolveEvent<'_>),
    {
        let target_path = descriptor
            .kind
            .target_dir(&self.project_root, &descriptor.name);
        let verdict = integrity::check(&target_path, &descriptor.file_names());
        debug!(component = %descriptor.name, ?verdict, "integrity checked");

        let status = match verdict {
            IntegrityVerdict::Complete => InstallStatus::Skipped,
            IntegrityVerdict::MissingFiles => InstallStatus::Repaired,
            IntegrityVerdict::MissingDirectory => InstallStatus::Installed,
        };

        if status != InstallStatus::Skipped {
            on_event(ResolveEvent::Writing {
                name: &descriptor.name,
                status,
            });
            materialize(&target_path, &descriptor.files)?;
        }

        Ok(InstallOutcome {
            name: descriptor.name.clone(),
            status,
            target_path,
        })
    }
}
