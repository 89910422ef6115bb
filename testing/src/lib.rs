//! # Reactive Request Testing
//!
//! Test doubles for the reactive request wrapper: canned transport
//! functions and hook probes that record how the lifecycle drove them.
//!
//! ## Example
//!
//! ```ignore
//! use reactive_request_core::{Hooks, Options, RequestState};
//! use reactive_request_testing::{mocks, HookProbe};
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn success_path() {
//!     let probe = HookProbe::new();
//!     let state = RequestState::new(
//!         "/success",
//!         Options::new().with_hooks(probe.hooks()),
//!         mocks::ok_transport(json!({"foo": "bar"})),
//!     );
//!
//!     state.execute().await.unwrap();
//!     assert_eq!(probe.pending_calls(), 1);
//!     assert_eq!(probe.successes(), vec![json!({"foo": "bar"})]);
//! }
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Canned transport functions
pub mod mocks;

/// Hook probes recording lifecycle invocations
pub mod probe;

pub use probe::{failing_error_hook, failing_pending_hook, failing_success_hook, HookProbe};

/// Lock a mutex, recovering the guard from a poisoned lock.
///
/// Test doubles keep recording after a panicking test thread.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
