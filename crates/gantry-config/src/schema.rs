// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Serde default helper — returns `true`.
///
/// `#[serde(default)]` on a `bool` always falls back to `bool::default()`
/// (i.e. `false`), so fields that should be on unless explicitly disabled
/// need a named function.
fn default_true() -> bool {
    true
}

/// Profiler configuration, merged from the layered TOML files found by
/// [`crate::load`].
///
/// The bootstrap core treats this as an opaque value: it is parsed here,
/// handed to `boot(...)` as one of the five construction arguments, and
/// interpreted only by the agent module itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilerConfig {
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub plugins: PluginSection,
    #[serde(default)]
    pub collector: CollectorSection,
}

/// Which agent module to boot and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSection {
    /// Ordered module locations (archive paths or registry keys) searched
    /// for the entry type.  Absent means "no agent configured" and the host
    /// refuses to boot.
    pub modules: Option<Vec<String>>,
    /// Fully-qualified name of the entry type to instantiate.
    pub entry_point: Option<String>,
    /// Opaque argument string forwarded verbatim to the agent constructor.
    #[serde(default)]
    pub args: String,
    /// Master switch; when false the host starts without booting any agent.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            modules: None,
            entry_point: None,
            args: String::new(),
            enabled: true,
        }
    }
}

/// Auxiliary plugin archives made visible to the booted agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginSection {
    /// Directory scanned for plugin archives at startup.
    pub dir: Option<PathBuf>,
    /// Filename patterns to exclude from the scan (exact-suffix match).
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Where the agent ships its data.  Opaque to the bootstrap core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectorSection {
    /// Collector endpoint, e.g. "tcp://collector.internal:9994".
    pub endpoint: Option<String>,
    /// Sampling rate in the 0.0–1.0 range; absent means "agent default".
    pub sampling_rate: Option<f32>,
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_agent_enabled() {
        let cfg = ProfilerConfig::default();
        assert!(cfg.agent.enabled);
        assert!(cfg.agent.modules.is_none());
    }

    #[test]
    fn agent_section_parses_from_toml() {
        let cfg: ProfilerConfig = toml::from_str(
            r#"
            [agent]
            modules = ["lib/collector-agent"]
            entry_point = "acme.collector.CollectorAgent"
            args = "sampling=full"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.agent.modules.as_deref(),
            Some(&["lib/collector-agent".to_string()][..])
        );
        assert_eq!(
            cfg.agent.entry_point.as_deref(),
            Some("acme.collector.CollectorAgent")
        );
        assert_eq!(cfg.agent.args, "sampling=full");
        assert!(cfg.agent.enabled);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: ProfilerConfig = toml::from_str("").unwrap();
        assert!(cfg.plugins.dir.is_none());
        assert!(cfg.collector.endpoint.is_none());
    }
}
