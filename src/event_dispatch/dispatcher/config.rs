// ============================================================================
// Dispatcher Configuration
// ============================================================================
//
// Controls what `notify` does when a handler returns an error.
//
// ============================================================================

/// What to do when a handler fails during `notify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing handler and return its error
    #[default]
    Abort,
    /// Log the failure and keep delivering to the remaining handlers
    Continue,
}

#[derive(Clone, Debug, Default)]
pub struct DispatcherConfig {
    /// Behaviour on handler failure
    pub failure_policy: FailurePolicy,
}

impl DispatcherConfig {
    /// First failure aborts delivery (the default)
    pub fn strict() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
        }
    }

    /// Failures are isolated per handler
    pub fn lenient() -> Self {
        Self {
            failure_policy: FailurePolicy::Continue,
        }
    }
}
