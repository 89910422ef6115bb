//! Canned transport functions.
//!
//! Each constructor returns a [`TransportFn`] over `serde_json::Value`
//! payloads, the open-record shape the wrapper's tests work in.

use crate::lock;
use reactive_request_core::{TransportError, TransportFn, TransportOptions};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A transport that always resolves with a clone of `value`.
#[must_use]
pub fn ok_transport(value: Value) -> TransportFn<Value, Value> {
    Arc::new(move |_target, _options| {
        let value = value.clone();
        Box::pin(async move { Ok(value) })
    })
}

/// A transport that always rejects with a clone of `error`.
#[must_use]
pub fn err_transport(error: TransportError<Value>) -> TransportFn<Value, Value> {
    Arc::new(move |_target, _options| {
        let error = error.clone();
        Box::pin(async move { Err(error) })
    })
}

/// A transport that never settles.
///
/// Useful for observing the `Pending` state of an in-flight request.
#[must_use]
pub fn hanging_transport() -> TransportFn<Value, Value> {
    Arc::new(|_target, _options| Box::pin(std::future::pending()))
}

/// A transport that resolves with `value` on the first call and rejects
/// with `error` on every later call.
///
/// Useful for observing state retained across a failed attempt.
#[must_use]
pub fn ok_then_err_transport(
    value: Value,
    error: TransportError<Value>,
) -> TransportFn<Value, Value> {
    let calls = Arc::new(Mutex::new(0_usize));
    Arc::new(move |_target, _options| {
        let first = {
            let mut calls = lock(&calls);
            *calls += 1;
            *calls == 1
        };
        let value = value.clone();
        let error = error.clone();
        Box::pin(async move { if first { Ok(value) } else { Err(error) } })
    })
}

/// Invocations observed by a [`recording_transport`].
#[derive(Clone, Debug, Default)]
pub struct TransportLog {
    calls: Arc<Mutex<Vec<(String, TransportOptions)>>>,
}

impl TransportLog {
    /// All `(target, options)` pairs the transport received, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, TransportOptions)> {
        lock(&self.calls).clone()
    }

    /// Number of calls observed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Check whether the transport has not been called.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.calls).is_empty()
    }

    /// The options of the most recent call.
    #[must_use]
    pub fn last_options(&self) -> Option<TransportOptions> {
        lock(&self.calls).last().map(|(_, options)| options.clone())
    }

    fn record(&self, target: String, options: TransportOptions) {
        lock(&self.calls).push((target, options));
    }
}

/// A transport that records every invocation and resolves with a clone of
/// `value`.
///
/// The log is the test's view of what actually reached the transport after
/// option merging and hook extraction.
#[must_use]
pub fn recording_transport(value: Value) -> (TransportFn<Value, Value>, TransportLog) {
    let log = TransportLog::default();
    let transport_log = log.clone();

    let transport: TransportFn<Value, Value> = Arc::new(move |target, options| {
        transport_log.record(target, options);
        let value = value.clone();
        Box::pin(async move { Ok(value) })
    });

    (transport, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn ok_transport_resolves_with_the_value() {
        let transport = ok_transport(json!({"n": 1}));
        let result = transport("/x".to_string(), TransportOptions::new()).await;
        assert_eq!(result, Ok(json!({"n": 1})));
    }

    #[tokio::test]
    async fn recording_transport_captures_target_and_options() {
        let (transport, log) = recording_transport(json!(null));
        let mut options = TransportOptions::new();
        options.insert("method".to_string(), json!("POST"));

        let _ = transport("/submit".to_string(), options.clone()).await;

        assert_eq!(log.len(), 1);
        assert_eq!(log.calls()[0], ("/submit".to_string(), options));
    }
}
