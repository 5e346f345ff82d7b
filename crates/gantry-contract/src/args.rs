// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::fmt;
use std::sync::Arc;

use gantry_config::ProfilerConfig;

use crate::{InstrumentationHandle, ServiceTypeRegistry};

/// A single module source reference: an archive path, URL, or registry key
/// such as `"builtin:heartbeat"` or `"lib/collector-agent"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleLocation(String);

impl ModuleLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleLocation {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The fixed, ordered construction tuple every entry-type constructor
/// receives — the stable contract that substitutes for static linkage.
///
/// Field order mirrors the `boot(...)` parameter order exactly; both sides
/// agree on this shape statically through this crate.
pub struct BootArgs {
    /// Opaque agent argument string, forwarded verbatim from configuration.
    pub agent_args: String,
    /// Instrumentation capability supplied by the host runtime.
    pub instrumentation: InstrumentationHandle,
    /// Parsed profiler configuration; opaque to the bootstrap core.
    pub profiler_config: Arc<ProfilerConfig>,
    /// Auxiliary plugin archive locations enumerated by the host.
    pub plugin_locations: Vec<ModuleLocation>,
    /// Service-type registry populated by the host before boot.
    pub service_types: Arc<ServiceTypeRegistry>,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
