//! The request lifecycle state machine.
//!
//! [`RequestState`] owns three reactive cells (`data`, `status`, `error`)
//! and drives one transport call per `execute`. Status moves
//! `Idle -> Pending -> Success | Error`; from a settled state a new
//! `execute` passes through `Pending` again. `Idle` is never re-entered
//! and there is no terminal state.

use crate::error::{RequestError, TransportError};
use crate::options::{Hooks, Options, Patch, Status, TransportOptions};
use crate::signal::Signal;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by a transport function.
pub type TransportFuture<D, E> =
    Pin<Box<dyn Future<Output = Result<D, TransportError<E>>> + Send>>;

/// The injected transport collaborator.
///
/// Receives the request target and the effective transport options for one
/// invocation; resolves with the response payload or rejects with a typed
/// transport error. Lifecycle hooks and the `immediate` flag never reach
/// the transport.
pub type TransportFn<D, E> =
    Arc<dyn Fn(String, TransportOptions) -> TransportFuture<D, E> + Send + Sync>;

/// Reactive state bundle around one request target.
///
/// Cloning yields another handle to the same bundle: all handles share the
/// same cells. Overlapping `execute` calls are not serialized; the last
/// write to each cell wins.
pub struct RequestState<D, E> {
    target: String,
    options: Options<D, E>,
    transport: TransportFn<D, E>,
    data: Signal<Option<D>>,
    status: Signal<Status>,
    error: Signal<Option<RequestError<E>>>,
}

impl<D, E> Clone for RequestState<D, E> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            options: self.options.clone(),
            transport: Arc::clone(&self.transport),
            data: self.data.clone(),
            status: self.status.clone(),
            error: self.error.clone(),
        }
    }
}

impl<D, E> fmt::Debug for RequestState<D, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestState")
            .field("target", &self.target)
            .field("status", &self.status.get())
            .finish_non_exhaustive()
    }
}

impl<D, E> RequestState<D, E>
where
    D: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a bundle for `target`.
    ///
    /// `data` and `error` start empty and `status` starts [`Status::Idle`].
    /// With `options.immediate` set, one execution is dispatched before
    /// `new` returns: the status has already left `Idle` when this
    /// function returns, and a failure of that execution is observable
    /// only through the `status` and `error` cells.
    ///
    /// # Panics
    ///
    /// Panics if `options.immediate` is set and no Tokio runtime is
    /// current, since the in-flight part of the execution is spawned onto
    /// the runtime.
    #[must_use]
    pub fn new(
        target: impl Into<String>,
        options: Options<D, E>,
        transport: TransportFn<D, E>,
    ) -> Self {
        let state = Self {
            target: target.into(),
            options,
            transport,
            data: Signal::new(None),
            status: Signal::new(Status::Idle),
            error: Signal::new(None),
        };

        if state.options.immediate {
            let (transport_options, hooks) = state.dispatch(&Patch::new());
            let spawned = state.clone();
            tokio::spawn(async move {
                // The rejection is discarded; the failure stays observable
                // through the status and error cells.
                let _ = spawned.settle(transport_options, hooks).await;
            });
        }

        state
    }

    /// The request target this bundle was created for.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The last successful response payload.
    ///
    /// Sticky: a failed attempt does not clear it; only a new success
    /// overwrites it.
    #[must_use]
    pub const fn data(&self) -> &Signal<Option<D>> {
        &self.data
    }

    /// The current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> &Signal<Status> {
        &self.status
    }

    /// The last recorded failure, cleared on every new dispatch.
    #[must_use]
    pub const fn error(&self) -> &Signal<Option<RequestError<E>>> {
        &self.error
    }

    /// Execute with the base options.
    ///
    /// # Errors
    ///
    /// See [`execute_with`](Self::execute_with).
    pub async fn execute(&self) -> Result<D, RequestError<E>> {
        self.execute_with(Patch::new()).await
    }

    /// Execute with `patch` applied over the base options for this call
    /// only.
    ///
    /// Transport records merge deeply (nested records recurse, arrays and
    /// primitives replace); patch hooks replace base hooks wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] when the transport call fails,
    /// and [`RequestError::Hook`] when a lifecycle hook fails. A failing
    /// `on_pending` hook surfaces before the transport is invoked and
    /// leaves the status at `Pending`; any later failure moves the status
    /// to `Error` and is recorded into the `error` cell.
    pub async fn execute_with(&self, patch: Patch<D, E>) -> Result<D, RequestError<E>> {
        let (transport_options, hooks) = self.dispatch(&patch);
        self.settle(transport_options, hooks).await
    }

    /// Synchronous prefix of one execution: resolve the effective options,
    /// clear the previous error, move to `Pending`.
    fn dispatch(&self, patch: &Patch<D, E>) -> (TransportOptions, Hooks<D, E>) {
        let (transport_options, hooks) = self.options.resolve(patch);

        self.error.set(None);
        self.status.set(Status::Pending);
        tracing::debug!(request = %self.target, "request pending");

        (transport_options, hooks)
    }

    /// Asynchronous remainder of one execution: pending hook, transport
    /// call, settlement, settled hook.
    async fn settle(
        &self,
        transport_options: TransportOptions,
        hooks: Hooks<D, E>,
    ) -> Result<D, RequestError<E>> {
        if let Some(on_pending) = &hooks.on_pending {
            // Surfaces directly: the transport is never invoked, the
            // status stays Pending, and on_error does not run.
            on_pending().await.map_err(RequestError::Hook)?;
        }

        let attempt: Result<D, RequestError<E>> = async {
            let response = (self.transport)(self.target.clone(), transport_options)
                .await
                .map_err(RequestError::Transport)?;

            self.data.set(Some(response.clone()));
            self.status.set(Status::Success);
            tracing::debug!(request = %self.target, "request succeeded");

            if let Some(on_success) = &hooks.on_success {
                on_success(response.clone()).await.map_err(RequestError::Hook)?;
            }

            Ok(response)
        }
        .await;

        match attempt {
            Ok(response) => Ok(response),
            Err(error) => {
                self.status.set(Status::Error);
                self.error.set(Some(error.clone()));
                tracing::debug!(request = %self.target, error = %error, "request failed");

                if let Some(on_error) = &hooks.on_error {
                    // A failing error hook propagates in place of the
                    // recorded error; the cells keep the recorded one.
                    on_error(error.clone()).await.map_err(RequestError::Hook)?;
                }

                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_transport() -> TransportFn<(), ()> {
        Arc::new(|_target, _options| Box::pin(async { Ok(()) }))
    }

    #[test]
    fn bundle_starts_idle_and_empty() {
        let state: RequestState<(), ()> =
            RequestState::new("/ping", Options::new(), unit_transport());

        assert!(state.status().get().is_idle());
        assert_eq!(state.data().get(), None);
        assert_eq!(state.error().get(), None);
        assert_eq!(state.target(), "/ping");
    }

    #[test]
    fn handles_share_cells() {
        let state: RequestState<(), ()> =
            RequestState::new("/ping", Options::new(), unit_transport());
        let handle = state.clone();

        state.status().set(Status::Pending);
        assert!(handle.status().get().is_pending());
    }
}
