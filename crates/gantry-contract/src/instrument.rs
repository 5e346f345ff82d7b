// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::sync::Arc;

/// Opaque instrumentation capability handed to the agent at construction.
///
/// The instrumentation engine itself (code rewriting, interception) is an
/// external collaborator; the bootstrap core only threads this handle
/// through to the constructor untouched.
pub trait Instrumentation: Send + Sync {
    /// Ask the host runtime to (re)instrument the named target on its next
    /// load.  Implementations may queue, coalesce, or reject requests.
    fn request_retransform(&self, target: &str) -> anyhow::Result<()>;

    /// Whether the host runtime supports retransformation at all.
    fn retransform_supported(&self) -> bool {
        false
    }
}

/// Shared handle shape used throughout the boot contract.
pub type InstrumentationHandle = Arc<dyn Instrumentation>;
