// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The agent boot protocol.
//!
//! [`AgentBootstrap`] ties the pieces together: it creates an
//! [`gantry_loader::IsolatedNamespace`] over the supplied module locations,
//! resolves the caller-supplied entry-point name inside it, invokes the
//! fixed-signature constructor under [`PrivilegedExecutor`] scope, and
//! validates the result against the [`gantry_contract::Agent`] capability.
//! Every failure is a [`BootstrapError`]; the host must treat any of them as
//! fatal to agent startup — there is no degraded mode and no retry here.

mod driver;
mod error;
mod executor;

pub use driver::AgentBootstrap;
pub use error::BootstrapError;
pub use executor::{
    ambient_namespace, host_policy, install_host_policy, NoEnforcement, PrivilegeGrant,
    PrivilegedExecutor, SecurityPolicy,
};
