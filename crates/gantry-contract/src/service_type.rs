// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::HashMap;

use anyhow::bail;

/// A service classification the agent uses to tag recorded activity,
/// identified by a stable numeric code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceType {
    pub code: i16,
    pub name: String,
}

impl ServiceType {
    pub fn new(code: i16, name: impl Into<String>) -> Self {
        Self { code, name: name.into() }
    }
}

/// Registry of service types, populated by the host (and its plugins)
/// before boot and handed to the agent constructor read-only.
#[derive(Debug, Default)]
pub struct ServiceTypeRegistry {
    by_code: HashMap<i16, ServiceType>,
    by_name: HashMap<String, i16>,
}

impl ServiceTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service type.  Codes and names must be unique; a clash
    /// indicates two plugins fighting over the same identifier and is an
    /// error rather than a silent overwrite.
    pub fn register(&mut self, service_type: ServiceType) -> anyhow::Result<()> {
        if self.by_code.contains_key(&service_type.code) {
            bail!("duplicate service type code: {}", service_type.code);
        }
        if self.by_name.contains_key(&service_type.name) {
            bail!("duplicate service type name: {}", service_type.name);
        }
        self.by_name.insert(service_type.name.clone(), service_type.code);
        self.by_code.insert(service_type.code, service_type);
        Ok(())
    }

    pub fn by_code(&self, code: i16) -> Option<&ServiceType> {
        self.by_code.get(&code)
    }

    pub fn by_name(&self, name: &str) -> Option<&ServiceType> {
        self.by_name.get(name).and_then(|code| self.by_code.get(code))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
