// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use gantry_contract::ModuleLocation;
use tracing::debug;

use crate::ModuleManifest;

/// Process-wide registry mapping module locations to their manifests.
///
/// Linked-in modules register themselves here at host startup; namespaces
/// look locations up lazily.  The catalog never resolves entry names itself —
/// that is the namespace's job, under its delegation rules.
#[derive(Default)]
pub struct ModuleCatalog {
    modules: RwLock<HashMap<ModuleLocation, Arc<ModuleManifest>>>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manifest under `location`.  Re-registering a location
    /// replaces the previous manifest.
    pub fn register(&self, location: ModuleLocation, manifest: ModuleManifest) {
        debug!(location = %location, module = manifest.name(), "registering module");
        self.modules
            .write()
            .expect("module catalog lock poisoned")
            .insert(location, Arc::new(manifest));
    }

    pub fn get(&self, location: &ModuleLocation) -> Option<Arc<ModuleManifest>> {
        self.modules
            .read()
            .expect("module catalog lock poisoned")
            .get(location)
            .cloned()
    }

    pub fn locations(&self) -> Vec<ModuleLocation> {
        self.modules
            .read()
            .expect("module catalog lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
