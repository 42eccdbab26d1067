//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions must be:
/// - Clone: they are logged and may be sent to several handlers
/// - Debug: for logging
/// - Send + 'static: results are produced on tokio tasks
pub trait Action: Clone + Debug + Send + 'static {
    /// Action name for logging and filtering
    fn name(&self) -> &'static str;

    /// Short description for log lines.
    ///
    /// Defaults to the `Debug` output. Override for actions that carry large
    /// payloads (API responses, result lists).
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Ping,
        Payload(Vec<u8>),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Ping => "Ping",
                TestAction::Payload(_) => "Payload",
            }
        }

        fn summary(&self) -> String {
            match self {
                TestAction::Payload(bytes) => format!("Payload({} bytes)", bytes.len()),
                _ => format!("{:?}", self),
            }
        }
    }

    #[test]
    fn test_default_summary_is_debug() {
        assert_eq!(TestAction::Ping.summary(), "Ping");
    }

    #[test]
    fn test_custom_summary() {
        assert_eq!(TestAction::Payload(vec![0; 3]).summary(), "Payload(3 bytes)");
        assert_eq!(TestAction::Payload(vec![]).name(), "Payload");
    }
}
