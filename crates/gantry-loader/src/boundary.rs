// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use gantry_config::ProfilerConfig;
use gantry_contract::{Agent, Instrumentation, ServiceTypeRegistry};

/// A shared contract type as seen through the parent boundary.
///
/// Identity is the host's `TypeId`: every namespace delegating a shared name
/// observes the same identity, which is what lets host and module exchange
/// values of these types at the boot seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedType {
    pub name: String,
    pub type_id: TypeId,
}

/// The parent boundary: the fixed set of bootstrap-shared names that must
/// resolve to host types rather than module-private ones.
///
/// Names outside this set are never served by the boundary — modules keep
/// their own, invisible, implementation types.
#[derive(Debug, Default)]
pub struct HostBoundary {
    shared: HashMap<String, SharedType>,
}

impl HostBoundary {
    /// Empty boundary, sharing nothing.  Test scaffolding mostly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Boundary pre-populated with the gantry contract surface.
    pub fn with_defaults() -> Arc<Self> {
        let mut boundary = Self::new();
        boundary.share::<dyn Agent>("gantry.contract.Agent");
        boundary.share::<dyn Instrumentation>("gantry.contract.Instrumentation");
        boundary.share::<ServiceTypeRegistry>("gantry.contract.ServiceTypeRegistry");
        boundary.share::<ProfilerConfig>("gantry.config.ProfilerConfig");
        Arc::new(boundary)
    }

    /// Add `name` to the shared set, bound to the host identity of `T`.
    pub fn share<T: ?Sized + 'static>(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.shared.insert(
            name.clone(),
            SharedType {
                name,
                type_id: TypeId::of::<T>(),
            },
        );
    }

    /// Look a name up in the shared set.
    pub fn lookup(&self, name: &str) -> Option<SharedType> {
        self.shared.get(name).cloned()
    }

    pub fn is_shared(&self, name: &str) -> bool {
        self.shared.contains_key(name)
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_boundary_shares_the_contract_surface() {
        let boundary = HostBoundary::with_defaults();
        assert!(boundary.is_shared("gantry.contract.Agent"));
        assert!(boundary.is_shared("gantry.config.ProfilerConfig"));
        assert!(!boundary.is_shared("acme.collector.CollectorAgent"));
    }

    #[test]
    fn shared_identity_is_the_host_type_id() {
        let boundary = HostBoundary::with_defaults();
        let shared = boundary.lookup("gantry.contract.Agent").unwrap();
        assert_eq!(shared.type_id, TypeId::of::<dyn Agent>());
    }

    #[test]
    fn lookup_of_unshared_name_is_none() {
        let boundary = HostBoundary::new();
        assert!(boundary.lookup("gantry.contract.Agent").is_none());
    }
}
