// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Privilege- and ambient-context-scoped execution.
//!
//! The load-and-construct step runs with two pieces of scoped state: an
//! optional privilege grant (when the host enforces a security policy) and
//! the calling thread's ambient resolution context, which must point at the
//! isolated namespace for the duration of the work and at nothing else
//! afterwards.  Both are drop guards — restoration happens on every exit
//! path, unwinding included.

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

use gantry_loader::IsolatedNamespace;

use crate::BootstrapError;

thread_local! {
    /// Which namespace the current thread's name lookups resolve against.
    static AMBIENT_NAMESPACE: RefCell<Option<Arc<IsolatedNamespace>>> =
        const { RefCell::new(None) };
}

/// Probe the calling thread's ambient resolution context.
///
/// Module constructors may call this to resolve collaborator types from
/// their own namespace; outside an [`PrivilegedExecutor::execute`] scope it
/// returns whatever the thread held before (usually `None`).
pub fn ambient_namespace() -> Option<Arc<IsolatedNamespace>> {
    AMBIENT_NAMESPACE.with(|cell| cell.borrow().clone())
}

/// Restores the previous ambient namespace when dropped.
struct AmbientGuard {
    previous: Option<Arc<IsolatedNamespace>>,
}

impl AmbientGuard {
    fn set(namespace: Arc<IsolatedNamespace>) -> Self {
        let previous = AMBIENT_NAMESPACE.with(|cell| cell.replace(Some(namespace)));
        Self { previous }
    }
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        AMBIENT_NAMESPACE.with(|cell| {
            *cell.borrow_mut() = previous;
        });
    }
}

// ─── Security policy ─────────────────────────────────────────────────────────

/// Held for the duration of one privileged unit of work; releases on drop.
pub struct PrivilegeGrant {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl PrivilegeGrant {
    /// Grant that needs no release — the host enforces nothing.
    pub fn unrestricted() -> Self {
        Self { release: None }
    }

    /// Grant with an explicit release action, run exactly once on drop.
    pub fn scoped(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for PrivilegeGrant {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Strategy for running work under the host's security regime.
///
/// Selected once at process start (see [`install_host_policy`]) and never
/// re-detected per call.
pub trait SecurityPolicy: Send + Sync {
    /// Acquire the namespace-creation/resolution privilege for the duration
    /// of one unit of work.
    fn acquire(&self) -> PrivilegeGrant;
}

/// Default policy: the host enforces nothing, work runs directly.
pub struct NoEnforcement;

impl SecurityPolicy for NoEnforcement {
    fn acquire(&self) -> PrivilegeGrant {
        PrivilegeGrant::unrestricted()
    }
}

static HOST_POLICY: OnceLock<Arc<dyn SecurityPolicy>> = OnceLock::new();

/// Install the process-wide security policy.  Effective only on the first
/// call; returns whether this call installed it.
pub fn install_host_policy(policy: Arc<dyn SecurityPolicy>) -> bool {
    HOST_POLICY.set(policy).is_ok()
}

/// The process-wide policy, defaulting to [`NoEnforcement`].
pub fn host_policy() -> Arc<dyn SecurityPolicy> {
    HOST_POLICY
        .get_or_init(|| Arc::new(NoEnforcement))
        .clone()
}

// ─── Executor ─────────────────────────────────────────────────────────────────

/// Runs one unit of work under the privilege grant and with the calling
/// thread's ambient resolution context pointed at the isolated namespace.
///
/// Introduces no error kinds of its own: whatever `work` raises propagates
/// after both scopes are restored.
pub struct PrivilegedExecutor {
    namespace: Arc<IsolatedNamespace>,
    policy: Arc<dyn SecurityPolicy>,
}

impl PrivilegedExecutor {
    pub fn new(namespace: Arc<IsolatedNamespace>, policy: Arc<dyn SecurityPolicy>) -> Self {
        Self { namespace, policy }
    }

    pub fn namespace(&self) -> &Arc<IsolatedNamespace> {
        &self.namespace
    }

    pub fn execute<R>(
        &self,
        work: impl FnOnce() -> Result<R, BootstrapError>,
    ) -> Result<R, BootstrapError> {
        let _grant = self.policy.acquire();
        let _ambient = AmbientGuard::set(self.namespace.clone());
        work()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gantry_loader::{HostBoundary, ModuleCatalog};

    use super::*;

    fn namespace() -> Arc<IsolatedNamespace> {
        let catalog = ModuleCatalog::new();
        Arc::new(
            IsolatedNamespace::create(Some(vec![]), HostBoundary::with_defaults(), &catalog)
                .unwrap(),
        )
    }

    #[test]
    fn ambient_is_set_during_work_and_restored_after() {
        let ns = namespace();
        let executor = PrivilegedExecutor::new(ns.clone(), Arc::new(NoEnforcement));

        assert!(ambient_namespace().is_none());
        executor
            .execute(|| {
                let ambient = ambient_namespace().expect("ambient set inside execute");
                assert!(Arc::ptr_eq(&ambient, &ns));
                Ok(())
            })
            .unwrap();
        assert!(ambient_namespace().is_none());
    }

    #[test]
    fn ambient_is_restored_on_error() {
        let executor = PrivilegedExecutor::new(namespace(), Arc::new(NoEnforcement));
        let result: Result<(), _> =
            executor.execute(|| Err(BootstrapError::InvalidArgument("probe")));
        assert!(result.is_err());
        assert!(ambient_namespace().is_none());
    }

    #[test]
    fn ambient_is_restored_on_unwind() {
        let executor = PrivilegedExecutor::new(namespace(), Arc::new(NoEnforcement));
        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _: Result<(), _> = executor.execute(|| panic!("constructor blew up"));
        }));
        assert!(unwound.is_err());
        assert!(ambient_namespace().is_none());
    }

    #[test]
    fn nested_execute_restores_the_outer_namespace() {
        let outer_ns = namespace();
        let inner_ns = namespace();
        let outer = PrivilegedExecutor::new(outer_ns.clone(), Arc::new(NoEnforcement));
        let inner = PrivilegedExecutor::new(inner_ns.clone(), Arc::new(NoEnforcement));

        outer
            .execute(|| {
                inner
                    .execute(|| {
                        assert!(Arc::ptr_eq(&ambient_namespace().unwrap(), &inner_ns));
                        Ok(())
                    })
                    .unwrap();
                assert!(Arc::ptr_eq(&ambient_namespace().unwrap(), &outer_ns));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn policy_grant_is_acquired_and_released_around_work() {
        struct CountingPolicy {
            acquired: Arc<AtomicUsize>,
            released: Arc<AtomicUsize>,
        }
        impl SecurityPolicy for CountingPolicy {
            fn acquire(&self) -> PrivilegeGrant {
                self.acquired.fetch_add(1, Ordering::SeqCst);
                let released = self.released.clone();
                PrivilegeGrant::scoped(move || {
                    released.fetch_add(1, Ordering::SeqCst);
                })
            }
        }

        let acquired = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(AtomicUsize::new(0));
        let executor = PrivilegedExecutor::new(
            namespace(),
            Arc::new(CountingPolicy {
                acquired: acquired.clone(),
                released: released.clone(),
            }),
        );

        executor
            .execute(|| {
                assert_eq!(acquired.load(Ordering::SeqCst), 1);
                assert_eq!(released.load(Ordering::SeqCst), 0);
                Ok(())
            })
            .unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 1);

        // Grant is released even when work fails.
        let _: Result<(), _> =
            executor.execute(|| Err(BootstrapError::InvalidArgument("probe")));
        assert_eq!(acquired.load(Ordering::SeqCst), 2);
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }
}
