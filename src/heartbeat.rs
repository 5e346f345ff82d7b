// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Built-in reference module.
//!
//! Registered in the catalog under [`LOCATION`]; exports one entry type,
//! `gantry.heartbeat.HeartbeatAgent`, a minimal agent that logs a heartbeat
//! on a ticker thread.  Useful for smoke-testing a host deployment before
//! any real agent module is configured.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gantry_contract::{Agent, BootArgs, Constructed};
use gantry_loader::{EntryDescriptor, ModuleManifest};
use tracing::{debug, info};

/// Catalog location of the built-in module.
pub const LOCATION: &str = "builtin:heartbeat";

/// Entry type exported by this module.
pub const ENTRY_POINT: &str = "gantry.heartbeat.HeartbeatAgent";

pub fn manifest() -> ModuleManifest {
    let mut manifest = ModuleManifest::new("heartbeat");
    manifest.register(EntryDescriptor::exported(ENTRY_POINT, |args| {
        Ok(Some(Constructed::agent(HeartbeatAgent::new(args))))
    }));
    manifest
}

/// Agent that logs a heartbeat every `interval_ms` (agent args, default
/// 5000) until stopped.
pub struct HeartbeatAgent {
    interval: Duration,
    stop: Arc<AtomicBool>,
    ticker: Option<thread::JoinHandle<()>>,
}

impl HeartbeatAgent {
    fn new(args: BootArgs) -> Self {
        debug!(
            service_types = args.service_types.len(),
            plugins = args.plugin_locations.len(),
            "heartbeat agent constructed"
        );
        Self {
            interval: parse_interval(&args.agent_args),
            stop: Arc::new(AtomicBool::new(false)),
            ticker: None,
        }
    }
}

impl Agent for HeartbeatAgent {
    fn start(&mut self) -> anyhow::Result<()> {
        let stop = self.stop.clone();
        let interval = self.interval;
        self.ticker = Some(thread::spawn(move || {
            while !stop.load(Ordering::SeqCst) {
                info!("heartbeat");
                thread::sleep(interval);
            }
        }));
        Ok(())
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(ticker) = self.ticker.take() {
            let _ = ticker.join();
        }
    }
}

/// Extract `interval_ms=<n>` from a comma-separated `key=value` argument
/// string; anything unparseable falls back to the 5 s default.
fn parse_interval(agent_args: &str) -> Duration {
    agent_args
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == "interval_ms")
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
