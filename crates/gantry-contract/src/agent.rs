// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::any::Any;

/// The capability a constructed module instance must satisfy to be accepted
/// as the result of `boot`.
///
/// Ownership of the instance passes to the caller of `boot`; the bootstrap
/// core keeps no reference and does not manage the lifecycle beyond
/// construction.
pub trait Agent: Send {
    /// Start the agent.  Called once by the host after a successful boot.
    fn start(&mut self) -> anyhow::Result<()>;

    /// Stop the agent.  Must be safe to call after a failed `start`.
    fn stop(&mut self);
}

/// Carrier for a freshly constructed module object, before the host has
/// validated it against the [`Agent`] capability.
///
/// Module constructors return whatever they like through this type; the
/// concrete Rust type name is captured at the construction site so that a
/// validation failure can name the mismatched type in its diagnostic.
pub struct Constructed {
    value: Box<dyn Any + Send>,
    type_name: &'static str,
}

impl Constructed {
    /// Wrap a conforming agent instance.
    pub fn agent<A: Agent + 'static>(agent: A) -> Self {
        Self {
            value: Box::new(Box::new(agent) as Box<dyn Agent>),
            type_name: std::any::type_name::<A>(),
        }
    }

    /// Wrap an arbitrary value.  Such a value fails Agent validation; this
    /// exists so the host can diagnose modules built against a mismatched
    /// contract version rather than silently accepting them.
    pub fn opaque<T: Any + Send>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Concrete type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Validate against the Agent capability.  On mismatch the carrier is
    /// handed back unchanged so the caller can still name the actual type.
    pub fn into_agent(self) -> Result<Box<dyn Agent>, Constructed> {
        let type_name = self.type_name;
        match self.value.downcast::<Box<dyn Agent>>() {
            Ok(agent) => Ok(*agent),
            Err(value) => Err(Self { value, type_name }),
        }
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct NopAgent;

    impl Agent for NopAgent {
        fn start(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
        fn stop(&mut self) {}
    }

    #[test]
    fn agent_carrier_validates() {
        let constructed = Constructed::agent(NopAgent);
        assert!(constructed.type_name().ends_with("NopAgent"));
        let Ok(mut agent) = constructed.into_agent() else {
            panic!("NopAgent is an Agent");
        };
        assert!(agent.start().is_ok());
        agent.stop();
    }

    #[test]
    fn opaque_carrier_fails_validation_and_names_type() {
        let constructed = Constructed::opaque(String::from("not an agent"));
        let Err(rejected) = constructed.into_agent() else {
            panic!("a plain String must not validate as an Agent");
        };
        assert_eq!(rejected.type_name(), "alloc::string::String");
    }
}
