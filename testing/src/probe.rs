//! Hook probes recording lifecycle invocations.

use crate::lock;
use reactive_request_core::{
    ErrorHook, HookError, Hooks, PendingHook, RequestError, SuccessHook,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Records every lifecycle hook invocation it observes.
///
/// Hand the bound hooks to a bundle, drive it, then assert on the counts
/// and payloads the probe collected.
#[derive(Clone, Debug, Default)]
pub struct HookProbe {
    pending: Arc<Mutex<usize>>,
    successes: Arc<Mutex<Vec<Value>>>,
    errors: Arc<Mutex<Vec<RequestError<Value>>>>,
}

impl HookProbe {
    /// Create a probe with no recorded invocations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A pending hook bound to this probe.
    #[must_use]
    pub fn pending_hook(&self) -> PendingHook {
        let calls = Arc::clone(&self.pending);
        Arc::new(move || {
            let calls = Arc::clone(&calls);
            Box::pin(async move {
                *lock(&calls) += 1;
                Ok(())
            })
        })
    }

    /// A success hook bound to this probe.
    #[must_use]
    pub fn success_hook(&self) -> SuccessHook<Value> {
        let successes = Arc::clone(&self.successes);
        Arc::new(move |data| {
            let successes = Arc::clone(&successes);
            Box::pin(async move {
                lock(&successes).push(data);
                Ok(())
            })
        })
    }

    /// An error hook bound to this probe.
    #[must_use]
    pub fn error_hook(&self) -> ErrorHook<Value> {
        let errors = Arc::clone(&self.errors);
        Arc::new(move |error| {
            let errors = Arc::clone(&errors);
            Box::pin(async move {
                lock(&errors).push(error);
                Ok(())
            })
        })
    }

    /// All three hooks bound to this probe.
    #[must_use]
    pub fn hooks(&self) -> Hooks<Value, Value> {
        Hooks {
            on_pending: Some(self.pending_hook()),
            on_success: Some(self.success_hook()),
            on_error: Some(self.error_hook()),
        }
    }

    /// Number of pending-hook invocations observed.
    #[must_use]
    pub fn pending_calls(&self) -> usize {
        *lock(&self.pending)
    }

    /// Payloads the success hook received, in order.
    #[must_use]
    pub fn successes(&self) -> Vec<Value> {
        lock(&self.successes).clone()
    }

    /// Failures the error hook received, in order.
    #[must_use]
    pub fn errors(&self) -> Vec<RequestError<Value>> {
        lock(&self.errors).clone()
    }
}

/// A pending hook that always fails with `message`.
#[must_use]
pub fn failing_pending_hook(message: &str) -> PendingHook {
    let message = message.to_string();
    Arc::new(move || {
        let message = message.clone();
        Box::pin(async move { Err(HookError::new(message)) })
    })
}

/// A success hook that always fails with `message`.
#[must_use]
pub fn failing_success_hook(message: &str) -> SuccessHook<Value> {
    let message = message.to_string();
    Arc::new(move |_data| {
        let message = message.clone();
        Box::pin(async move { Err(HookError::new(message)) })
    })
}

/// An error hook that always fails with `message`.
#[must_use]
pub fn failing_error_hook(message: &str) -> ErrorHook<Value> {
    let message = message.to_string();
    Arc::new(move |_error| {
        let message = message.clone();
        Box::pin(async move { Err(HookError::new(message)) })
    })
}
