// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use gantry_contract::ModuleLocation;
use tracing::{debug, warn};

use crate::{EntryDescriptor, HostBoundary, LoaderError, ModuleCatalog, ModuleManifest, SharedType};

/// Outcome of a name resolution inside a namespace.
#[derive(Clone)]
pub enum ResolvedType {
    /// Delegated to the parent boundary; identity is the host type.
    Shared(SharedType),
    /// Satisfied by one of the namespace's own module locations.
    Entry(Arc<EntryDescriptor>),
}

/// A private loading boundary built from a set of module locations.
///
/// Delegation is asymmetric: names in the parent [`HostBoundary`]'s shared
/// set always resolve through the parent (so host and module agree on type
/// identity for the contract surface); every other name resolves from the
/// namespace's own locations, in order, and stays invisible outside it.
///
/// Lives for the duration of the process; there is no unloading.
pub struct IsolatedNamespace {
    parent: Arc<HostBoundary>,
    /// Manifests snapshot, in location order. First provider of a name wins.
    modules: Vec<(ModuleLocation, Arc<ModuleManifest>)>,
    /// Names resolved so far; kept for the namespace lifetime.
    cache: RwLock<HashMap<String, ResolvedType>>,
}

impl IsolatedNamespace {
    /// Create a namespace over `locations`, delegating shared names to
    /// `parent`.
    ///
    /// Absent locations are a programming error detected eagerly, before any
    /// namespace state exists.  An *empty* location list is allowed (such a
    /// namespace can only resolve shared names).  Locations with no catalog
    /// entry are skipped with a warning; their names simply never resolve.
    pub fn create(
        locations: Option<Vec<ModuleLocation>>,
        parent: Arc<HostBoundary>,
        catalog: &ModuleCatalog,
    ) -> Result<Self, LoaderError> {
        let locations = locations.ok_or(LoaderError::MissingLocations)?;

        let mut modules = Vec::with_capacity(locations.len());
        for location in locations {
            match catalog.get(&location) {
                Some(manifest) => {
                    debug!(location = %location, module = manifest.name(), "attached module");
                    modules.push((location, manifest));
                }
                None => {
                    warn!(location = %location, "module location not in catalog; skipping");
                }
            }
        }

        Ok(Self {
            parent,
            modules,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Resolve a fully-qualified type name inside this namespace.
    ///
    /// Safe to call from any thread; each name is resolved once and cached
    /// for the namespace lifetime.
    pub fn resolve(&self, name: &str) -> Result<ResolvedType, LoaderError> {
        if let Some(hit) = self
            .cache
            .read()
            .expect("namespace cache lock poisoned")
            .get(name)
        {
            return Ok(hit.clone());
        }

        let resolved = self.resolve_uncached(name)?;
        self.cache
            .write()
            .expect("namespace cache lock poisoned")
            .insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn resolve_uncached(&self, name: &str) -> Result<ResolvedType, LoaderError> {
        // Shared contract names always go to the parent, never to a module,
        // so type identity stays unified across all namespaces.
        if let Some(shared) = self.parent.lookup(name) {
            debug!(name, "resolved through parent boundary");
            return Ok(ResolvedType::Shared(shared));
        }

        for (location, manifest) in &self.modules {
            if let Some(entry) = manifest.get(name) {
                debug!(name, location = %location, "resolved from module");
                return Ok(ResolvedType::Entry(entry));
            }
        }

        Err(LoaderError::ClassNotFound(name.to_string()))
    }

    /// Parent boundary this namespace delegates shared names to.
    pub fn parent(&self) -> &Arc<HostBoundary> {
        &self.parent
    }

    /// Locations that actually attached at creation, in order.
    pub fn attached_locations(&self) -> Vec<ModuleLocation> {
        self.modules.iter().map(|(loc, _)| loc.clone()).collect()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
