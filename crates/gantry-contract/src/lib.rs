// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The bootstrap-shared contract surface.
//!
//! Everything in this crate is linked statically by **both** the host and
//! every agent module, so the two sides observe identical type identity for
//! the contract types.  This small shared surface is what substitutes for a
//! static link-time dependency on the module implementation: the host knows
//! only [`Agent`], [`BootArgs`], and the opaque collaborator handles.

mod agent;
mod args;
mod instrument;
mod service_type;

pub use agent::{Agent, Constructed};
pub use args::{BootArgs, ModuleLocation};
pub use instrument::{Instrumentation, InstrumentationHandle};
pub use service_type::{ServiceType, ServiceTypeRegistry};
