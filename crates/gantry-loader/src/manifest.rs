// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use gantry_contract::{BootArgs, Constructed};

/// Constructor with the fixed construction signature.
///
/// The parameter tuple is pinned by [`BootArgs`] at compile time — there is
/// no runtime signature search.  `Ok(None)` models a constructor that
/// produced no object (rejected later during Agent validation).
pub type ConstructorFn =
    Arc<dyn Fn(BootArgs) -> anyhow::Result<Option<Constructed>> + Send + Sync>;

/// One entry type a module exposes under a fully-qualified name.
#[derive(Clone)]
pub struct EntryDescriptor {
    /// Fully-qualified type name, e.g. `"acme.collector.CollectorAgent"`.
    pub type_name: String,
    /// Whether the host may invoke the constructor.  Non-exported entries
    /// resolve but refuse construction, mirroring access-rule denial.
    pub exported: bool,
    /// Constructor with the fixed signature; `None` means the type exists
    /// but offers no conforming constructor.
    pub constructor: Option<ConstructorFn>,
}

impl EntryDescriptor {
    /// Exported entry with a conforming constructor.
    pub fn exported(
        type_name: impl Into<String>,
        constructor: impl Fn(BootArgs) -> anyhow::Result<Option<Constructed>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            exported: true,
            constructor: Some(Arc::new(constructor)),
        }
    }

    /// Module-internal entry: resolvable, but construction is denied.
    pub fn internal(
        type_name: impl Into<String>,
        constructor: impl Fn(BootArgs) -> anyhow::Result<Option<Constructed>> + Send + Sync + 'static,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            exported: false,
            constructor: Some(Arc::new(constructor)),
        }
    }

    /// Entry with no conforming constructor at all.
    pub fn without_constructor(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            exported: true,
            constructor: None,
        }
    }
}

impl fmt::Debug for EntryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryDescriptor")
            .field("type_name", &self.type_name)
            .field("exported", &self.exported)
            .field("constructor", &self.constructor.is_some())
            .finish()
    }
}

/// Everything one module location provides: a name-keyed entry-type table.
///
/// This is the compile-time-registry stand-in for a loadable archive; the
/// host never links against the entry types themselves, only against this
/// table shape.
#[derive(Debug, Default)]
pub struct ModuleManifest {
    name: String,
    entries: HashMap<String, Arc<EntryDescriptor>>,
}

impl ModuleManifest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Module display name (diagnostics only).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add an entry, keyed by its fully-qualified type name.
    /// Registering the same name twice overwrites, as a rebuilt archive would.
    pub fn register(&mut self, entry: EntryDescriptor) {
        self.entries.insert(entry.type_name.clone(), Arc::new(entry));
    }

    pub fn get(&self, type_name: &str) -> Option<Arc<EntryDescriptor>> {
        self.entries.get(type_name).cloned()
    }

    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_get() {
        let mut manifest = ModuleManifest::new("test-module");
        manifest.register(EntryDescriptor::without_constructor("a.b.C"));
        assert!(manifest.get("a.b.C").is_some());
        assert!(manifest.get("a.b.D").is_none());
    }

    #[test]
    fn registering_same_name_twice_overwrites() {
        let mut manifest = ModuleManifest::new("test-module");
        manifest.register(EntryDescriptor::without_constructor("a.b.C"));
        manifest.register(EntryDescriptor::exported("a.b.C", |_| Ok(None)));
        assert_eq!(manifest.type_names(), vec!["a.b.C"]);
        assert!(manifest.get("a.b.C").unwrap().constructor.is_some());
    }

    #[test]
    fn descriptor_kinds() {
        let exported = EntryDescriptor::exported("x.Y", |_| Ok(None));
        assert!(exported.exported && exported.constructor.is_some());

        let internal = EntryDescriptor::internal("x.Z", |_| Ok(None));
        assert!(!internal.exported && internal.constructor.is_some());

        let bare = EntryDescriptor::without_constructor("x.W");
        assert!(bare.exported && bare.constructor.is_none());
    }
}
