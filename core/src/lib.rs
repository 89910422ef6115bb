//! # Reactive Request Core
//!
//! Reactive state wrapper around an injected transport call.
//!
//! A [`RequestState`] bundle owns three observable cells (`data`, `status`,
//! `error`) and an `execute` operation. Executing performs one transport
//! call, updates the cells as the call progresses, and invokes user-supplied
//! lifecycle hooks at fixed points. Per-call option patches are combined
//! with the base options by a deep, type-aware merge: nested records merge
//! recursively, arrays and primitive values replace wholesale.
//!
//! ## Core Concepts
//!
//! - **Transport**: an opaque async function from `(target, options)` to a
//!   response payload, injected as a [`TransportFn`]
//! - **Signal**: a reactive cell with synchronous reads/writes and change
//!   notification
//! - **Options / Patch**: base configuration and per-call overrides,
//!   combined by [`merge`]
//! - **Hooks**: `on_pending` / `on_success` / `on_error` callbacks awaited
//!   at the matching lifecycle points
//!
//! ## Example
//!
//! ```ignore
//! use reactive_request_core::{Options, RequestState};
//!
//! let state = RequestState::new("/users/42", Options::new(), transport);
//!
//! let user = state.execute().await?;
//! assert!(state.status().get().is_success());
//! assert_eq!(state.data().get(), Some(user));
//! ```

/// Error taxonomy for transport calls and lifecycle hooks
pub mod error;

/// Deep merge of transport option records
pub mod merge;

/// Request options, lifecycle hooks, and status tracking
pub mod options;

/// The request lifecycle state machine
pub mod request;

/// Reactive cell primitive
pub mod signal;

pub use error::{HookError, RequestError, TransportError};
pub use merge::merge;
pub use options::{
    ErrorHook, HookFuture, HookResult, Hooks, Options, Patch, PendingHook, Status, SuccessHook,
    TransportOptions,
};
pub use request::{RequestState, TransportFn, TransportFuture};
pub use signal::Signal;
