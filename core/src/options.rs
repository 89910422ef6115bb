//! Request options, lifecycle hooks, and status tracking.
//!
//! [`Options`] is the base configuration a bundle is constructed with;
//! [`Patch`] is the per-call override shape. Transport settings live in an
//! open keyed record the core does not interpret, hooks are boxed async
//! callbacks, and `immediate` controls dispatch at construction time.

use crate::error::{HookError, RequestError};
use crate::merge::merge;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Lifecycle phase of a request bundle.
///
/// Exactly one value holds at any time. `Idle` is the initial state and is
/// never re-entered; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No request has been dispatched yet.
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request resolved.
    Success,
    /// The last request failed.
    Error,
}

impl Status {
    /// Check whether no request has been dispatched yet.
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check whether a request is in flight.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check whether the last request resolved.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Check whether the last request failed.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "pending"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Transport settings forwarded to the transport call.
///
/// An open keyed record: method, headers, body, and arbitrary
/// transport-specific keys the core passes through uninterpreted.
pub type TransportOptions = Map<String, Value>;

/// Result returned by lifecycle hooks.
pub type HookResult = Result<(), HookError>;

/// Boxed future returned by lifecycle hooks.
pub type HookFuture = Pin<Box<dyn Future<Output = HookResult> + Send>>;

/// Hook awaited after status moves to pending, before the transport call.
pub type PendingHook = Arc<dyn Fn() -> HookFuture + Send + Sync>;

/// Hook awaited with the response after a successful transport call.
pub type SuccessHook<D> = Arc<dyn Fn(D) -> HookFuture + Send + Sync>;

/// Hook awaited with the recorded failure after a failed attempt.
pub type ErrorHook<E> = Arc<dyn Fn(RequestError<E>) -> HookFuture + Send + Sync>;

/// The three optional lifecycle hooks.
///
/// A hook set on a per-call patch replaces the base hook wholesale for that
/// invocation; an unset patch hook leaves the base hook in force. Hooks are
/// consumed by the bundle and never forwarded to the transport call.
pub struct Hooks<D, E> {
    /// Runs before the transport call begins.
    pub on_pending: Option<PendingHook>,
    /// Runs after a successful response has been recorded.
    pub on_success: Option<SuccessHook<D>>,
    /// Runs after a failure has been recorded.
    pub on_error: Option<ErrorHook<E>>,
}

impl<D, E> Hooks<D, E> {
    /// Create an empty hook set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on_pending: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Builder: set the pending hook.
    #[must_use]
    pub fn on_pending<F>(mut self, hook: F) -> Self
    where
        F: Fn() -> HookFuture + Send + Sync + 'static,
    {
        self.on_pending = Some(Arc::new(hook));
        self
    }

    /// Builder: set the success hook.
    #[must_use]
    pub fn on_success<F>(mut self, hook: F) -> Self
    where
        F: Fn(D) -> HookFuture + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Builder: set the error hook.
    #[must_use]
    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(RequestError<E>) -> HookFuture + Send + Sync + 'static,
    {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// The hooks in force for one invocation: each patch hook replaces the
    /// corresponding base hook, each unset one falls back to the base.
    #[must_use]
    pub fn overridden_by(&self, patch: &Self) -> Self {
        Self {
            on_pending: patch.on_pending.clone().or_else(|| self.on_pending.clone()),
            on_success: patch.on_success.clone().or_else(|| self.on_success.clone()),
            on_error: patch.on_error.clone().or_else(|| self.on_error.clone()),
        }
    }
}

impl<D, E> Default for Hooks<D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E> Clone for Hooks<D, E> {
    fn clone(&self) -> Self {
        Self {
            on_pending: self.on_pending.clone(),
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<D, E> fmt::Debug for Hooks<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_pending", &self.on_pending.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Base options for a request bundle.
pub struct Options<D, E> {
    /// Transport settings forwarded to the transport call.
    pub transport: TransportOptions,
    /// Lifecycle hooks.
    pub hooks: Hooks<D, E>,
    /// Dispatch one execution at construction time.
    pub immediate: bool,
}

impl<D, E> Options<D, E> {
    /// Create empty options with `immediate` off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: Map::new(),
            hooks: Hooks::new(),
            immediate: false,
        }
    }

    /// Builder: replace the transport settings.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Builder: replace the hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks<D, E>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Builder: toggle dispatch at construction time.
    #[must_use]
    pub const fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Effective transport settings and hooks for one invocation.
    ///
    /// Transport records merge deeply ([`merge`]); hooks follow the same
    /// policy at the typed layer: a patch hook replaces the base hook
    /// wholesale, an unset one leaves the base hook in force.
    #[must_use]
    pub fn resolve(&self, patch: &Patch<D, E>) -> (TransportOptions, Hooks<D, E>) {
        let transport = merge(&self.transport, &patch.transport);
        let hooks = self.hooks.overridden_by(&patch.hooks);
        (transport, hooks)
    }
}

impl<D, E> Default for Options<D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E> Clone for Options<D, E> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            hooks: self.hooks.clone(),
            immediate: self.immediate,
        }
    }
}

impl<D, E> fmt::Debug for Options<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("transport", &self.transport)
            .field("hooks", &self.hooks)
            .field("immediate", &self.immediate)
            .finish()
    }
}

/// Per-call override for a single `execute` invocation.
///
/// Same shape as [`Options`] minus `immediate`: a single invocation cannot
/// toggle dispatch at construction time.
pub struct Patch<D, E> {
    /// Transport settings merged over the base settings.
    pub transport: TransportOptions,
    /// Hooks replacing the base hooks for this invocation.
    pub hooks: Hooks<D, E>,
}

impl<D, E> Patch<D, E> {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: Map::new(),
            hooks: Hooks::new(),
        }
    }

    /// Builder: replace the transport settings.
    #[must_use]
    pub fn with_transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Builder: replace the hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Hooks<D, E>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl<D, E> Default for Patch<D, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, E> Clone for Patch<D, E> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            hooks: self.hooks.clone(),
        }
    }
}

impl<D, E> fmt::Debug for Patch<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch")
            .field("transport", &self.transport)
            .field("hooks", &self.hooks)
            .finish()
    }
}
