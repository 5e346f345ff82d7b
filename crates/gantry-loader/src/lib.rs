// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Isolated module loading.
//!
//! Modules are not dynamically linked: each module ships a [`ModuleManifest`]
//! — a table of fully-qualified entry-type names to constructor descriptors —
//! registered in the process-wide [`ModuleCatalog`] under its
//! [`gantry_contract::ModuleLocation`].  An [`IsolatedNamespace`] is a view
//! over the manifests of its own locations plus the fixed shared-contract
//! names of the parent [`HostBoundary`]; entry types of one namespace are
//! invisible to the host and to every other namespace.

mod boundary;
mod catalog;
mod error;
mod manifest;
mod namespace;

pub use boundary::{HostBoundary, SharedType};
pub use catalog::ModuleCatalog;
pub use error::LoaderError;
pub use manifest::{ConstructorFn, EntryDescriptor, ModuleManifest};
pub use namespace::{IsolatedNamespace, ResolvedType};
