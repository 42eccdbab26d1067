//! Store middleware

use crate::Action;

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging or other cross-cutting concerns
/// to the store.
pub trait Middleware<A: Action> {
    /// Called before the action is dispatched to the reducer
    fn before(&mut self, action: &A);

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);
}

/// Middleware that logs actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Log after dispatch only
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Log both before and after dispatch
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) {
        if self.log_before {
            tracing::trace!(action = %action.summary(), "Dispatching action");
        }
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                summary = %action.summary(),
                state_changed = state_changed,
                "Action processed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Ping;

    impl Action for Ping {
        fn name(&self) -> &'static str {
            "Ping"
        }
    }

    #[test]
    fn test_logging_middleware_settings() {
        let quiet = LoggingMiddleware::new();
        assert!(!quiet.log_before);
        assert!(quiet.log_after);

        let verbose = LoggingMiddleware::verbose();
        assert!(verbose.log_before);
        assert!(verbose.log_after);
    }

    #[test]
    fn test_logging_middleware_without_subscriber() {
        let mut middleware = LoggingMiddleware::verbose();
        middleware.before(&Ping);
        middleware.after(&Ping, true);
    }
}
