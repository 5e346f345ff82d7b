use thiserror::Error;

/// Everything that can go wrong between "boot was called" and "an Agent was
/// returned".  One kind, parameterised by sub-reason; the host treats every
/// variant as fatal to agent startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A required argument was absent.  Raised eagerly, before any
    /// namespace or construction work happens.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The entry-point name did not resolve in the isolated namespace.
    #[error("boot class not found. class: {name}. error: {reason}")]
    ClassNotFound { name: String, reason: String },

    /// The entry type resolved but offers no constructor with the fixed
    /// signature (agent args, instrumentation, profiler config, plugin
    /// locations, service type registry).
    #[error(
        "constructor not found. class: {name}. expected signature: \
         (agent args, instrumentation, profiler config, plugin locations, \
         service type registry)"
    )]
    ConstructorNotFound { name: String },

    /// The constructor ran and failed; the original cause is preserved.
    #[error("boot create failed. error: {source}")]
    ConstructionFailed {
        #[source]
        source: anyhow::Error,
    },

    /// Access to the constructor was refused.
    #[error("boot method invoke failed. error: {reason}")]
    ConstructionDenied { reason: String },

    /// Construction produced no object, or an object that does not satisfy
    /// the Agent capability.  The message names what was actually produced.
    #[error("Invalid AgentType. boot failed. AgentClass: {class_name}")]
    InvalidAgentType { class_name: String },
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_not_found_names_the_class() {
        let err = BootstrapError::ClassNotFound {
            name: "missing.pkg.Agent".into(),
            reason: "class not found: missing.pkg.Agent".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("boot class not found"));
        assert!(msg.contains("missing.pkg.Agent"));
    }

    #[test]
    fn construction_failed_preserves_cause() {
        let err = BootstrapError::ConstructionFailed {
            source: anyhow::anyhow!("collector endpoint unreachable"),
        };
        assert!(err.to_string().contains("boot create failed"));
        assert!(err.to_string().contains("collector endpoint unreachable"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_agent_type_names_the_actual_type() {
        let err = BootstrapError::InvalidAgentType {
            class_name: "alloc::string::String".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid AgentType. boot failed. AgentClass: alloc::string::String"
        );
    }
}
