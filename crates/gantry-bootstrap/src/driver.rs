// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

use gantry_config::ProfilerConfig;
use gantry_contract::{
    Agent, BootArgs, InstrumentationHandle, ModuleLocation, ServiceTypeRegistry,
};
use gantry_loader::{HostBoundary, IsolatedNamespace, ModuleCatalog, ResolvedType};
use tracing::debug;

use crate::executor::{host_policy, PrivilegedExecutor, SecurityPolicy};
use crate::BootstrapError;

/// End-to-end boot protocol driver.
///
/// One namespace and one entry-point name per boot invocation; the driver
/// never searches for candidate entry types, and never retries.  Retries,
/// if any, are a caller concern.
pub struct AgentBootstrap {
    namespace: Arc<IsolatedNamespace>,
    executor: PrivilegedExecutor,
    entry_point: Option<String>,
}

impl AgentBootstrap {
    /// Build the isolated namespace over `locations` and wire the executor
    /// with the process-wide security policy.
    ///
    /// Absent locations fail here, eagerly, with `InvalidArgument` — no
    /// namespace is created and no boot is attempted.
    pub fn new(
        locations: Option<Vec<ModuleLocation>>,
        parent: Arc<HostBoundary>,
        catalog: &ModuleCatalog,
    ) -> Result<Self, BootstrapError> {
        Self::with_policy(locations, parent, catalog, host_policy())
    }

    /// As [`AgentBootstrap::new`], with an explicit security policy.
    pub fn with_policy(
        locations: Option<Vec<ModuleLocation>>,
        parent: Arc<HostBoundary>,
        catalog: &ModuleCatalog,
        policy: Arc<dyn SecurityPolicy>,
    ) -> Result<Self, BootstrapError> {
        let namespace = IsolatedNamespace::create(locations, parent, catalog)
            .map_err(|_| BootstrapError::InvalidArgument("module locations"))?;
        let namespace = Arc::new(namespace);
        let executor = PrivilegedExecutor::new(namespace.clone(), policy);
        Ok(Self {
            namespace,
            executor,
            entry_point: None,
        })
    }

    /// Record the fully-qualified entry-type name to instantiate.
    ///
    /// Precondition: called at most once per boot cycle, before [`boot`].
    /// Calling it again is a caller error and is not guarded here.
    ///
    /// [`boot`]: AgentBootstrap::boot
    pub fn set_entry_point(&mut self, name: impl Into<String>) {
        self.entry_point = Some(name.into());
    }

    /// The namespace this driver boots into.
    pub fn namespace(&self) -> &Arc<IsolatedNamespace> {
        &self.namespace
    }

    /// Resolve the entry type, construct it under privilege/ambient scope
    /// with the fixed argument tuple, and validate the result against the
    /// Agent capability.
    ///
    /// Ownership of the returned agent passes to the caller; the driver
    /// keeps no reference.
    pub fn boot(
        &self,
        agent_args: &str,
        instrumentation: InstrumentationHandle,
        profiler_config: Arc<ProfilerConfig>,
        plugin_locations: Vec<ModuleLocation>,
        service_types: Arc<ServiceTypeRegistry>,
    ) -> Result<Box<dyn Agent>, BootstrapError> {
        let name = self
            .entry_point
            .as_deref()
            .ok_or(BootstrapError::InvalidArgument("entry point name"))?;

        debug!(entry_point = name, "resolving boot class");
        let resolved =
            self.namespace
                .resolve(name)
                .map_err(|e| BootstrapError::ClassNotFound {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;

        let args = BootArgs {
            agent_args: agent_args.to_string(),
            instrumentation,
            profiler_config,
            plugin_locations,
            service_types,
        };

        let constructed = self.executor.execute(|| {
            let entry = match &resolved {
                ResolvedType::Entry(entry) => entry,
                // Shared contract types are interfaces from the module's
                // point of view; they carry no constructor.
                ResolvedType::Shared(shared) => {
                    return Err(BootstrapError::ConstructorNotFound {
                        name: shared.name.clone(),
                    })
                }
            };

            if !entry.exported {
                return Err(BootstrapError::ConstructionDenied {
                    reason: format!("entry point {} is not exported", entry.type_name),
                });
            }

            let constructor = entry.constructor.as_ref().ok_or_else(|| {
                BootstrapError::ConstructorNotFound {
                    name: entry.type_name.clone(),
                }
            })?;

            debug!(entry_point = %entry.type_name, "invoking constructor");
            constructor(args).map_err(|source| BootstrapError::ConstructionFailed { source })
        })?;

        match constructed {
            None => Err(BootstrapError::InvalidAgentType {
                class_name: "Agent is null".to_string(),
            }),
            Some(object) => match object.into_agent() {
                Ok(agent) => {
                    debug!(entry_point = name, "agent constructed");
                    Ok(agent)
                }
                Err(rejected) => Err(BootstrapError::InvalidAgentType {
                    class_name: rejected.type_name().to_string(),
                }),
            },
        }
    }
}
