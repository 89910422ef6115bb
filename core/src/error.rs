//! Error taxonomy for transport calls and lifecycle hooks.
//!
//! The payload-carrying types implement `Display` by hand so the payload
//! type parameter stays unbounded: rendering never touches the payload,
//! only the recorded message.

use std::fmt;
use thiserror::Error;

/// Error raised by a transport call.
///
/// Carries a human-readable message, the HTTP status when a response was
/// received, and the error payload decoded into the caller's error type
/// when the body allowed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError<E> {
    /// Description of the failure.
    pub message: String,
    /// HTTP status code, when a response was received.
    pub status: Option<u16>,
    /// Typed payload decoded from the error response body.
    pub data: Option<E>,
}

impl<E> TransportError<E> {
    /// Create a transport error with no status or payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Builder: attach the HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Builder: attach the decoded error payload.
    #[must_use]
    pub fn with_data(mut self, data: E) -> Self {
        self.data = Some(data);
        self
    }
}

impl<E> fmt::Display for TransportError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl<E: fmt::Debug> std::error::Error for TransportError<E> {}

/// Error raised by a user-supplied lifecycle hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hook failed: {message}")]
pub struct HookError {
    /// Description of the failure.
    pub message: String,
}

impl HookError {
    /// Create a hook error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Failure returned by `execute`: the transport call failed, or a
/// lifecycle hook did.
///
/// This is also the payload recorded into the `error` cell. A failing
/// `on_success` hook is routed through the same error path as a transport
/// rejection, so observers of the cell see either variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError<E> {
    /// The transport call rejected.
    Transport(TransportError<E>),

    /// A lifecycle hook failed.
    Hook(HookError),
}

impl<E> RequestError<E> {
    /// Check whether this is a transport failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check whether this is a hook failure.
    #[must_use]
    pub const fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }

    /// The transport failure, if that is what this is.
    #[must_use]
    pub const fn as_transport(&self) -> Option<&TransportError<E>> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Hook(_) => None,
        }
    }

    /// The hook failure, if that is what this is.
    #[must_use]
    pub const fn as_hook(&self) -> Option<&HookError> {
        match self {
            Self::Hook(error) => Some(error),
            Self::Transport(_) => None,
        }
    }
}

impl<E> fmt::Display for RequestError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(error) => error.fmt(f),
            Self::Hook(error) => error.fmt(f),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for RequestError<E> {}

impl<E> From<TransportError<E>> for RequestError<E> {
    fn from(error: TransportError<E>) -> Self {
        Self::Transport(error)
    }
}

impl<E> From<HookError> for RequestError<E> {
    fn from(error: HookError) -> Self {
        Self::Hook(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_builders_attach_status_and_data() {
        let error: TransportError<String> = TransportError::new("boom")
            .with_status(503)
            .with_data("unavailable".to_string());

        assert_eq!(error.message, "boom");
        assert_eq!(error.status, Some(503));
        assert_eq!(error.data.as_deref(), Some("unavailable"));
    }

    #[test]
    fn request_error_displays_the_inner_message() {
        let transport: RequestError<()> = TransportError::new("no route").into();
        let hook: RequestError<()> = HookError::new("rejected").into();

        assert_eq!(transport.to_string(), "no route");
        assert_eq!(hook.to_string(), "hook failed: rejected");
        assert!(transport.is_transport());
        assert!(hook.is_hook());
    }
}
