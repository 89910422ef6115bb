//! # Reactive Request HTTP
//!
//! A reqwest-backed transport for the reactive request wrapper.
//!
//! [`HttpTransport`] interprets the conventional transport-option keys —
//! `method`, `baseURL`, `headers`, `query`, `body` — performs the HTTP
//! call, decodes success bodies into the caller's payload type, and maps
//! failures to typed transport errors carrying the status code and the
//! decoded error body when one is available. Everything else in the option
//! record is ignored, so arbitrary transport-specific keys can ride along.
//!
//! ## Example
//!
//! ```ignore
//! use reactive_request_core::{Options, RequestState};
//! use reactive_request_http::HttpTransport;
//! use serde_json::Value;
//!
//! let transport = HttpTransport::builder()
//!     .base_url("https://api.example.com")
//!     .build()
//!     .into_transport_fn::<Value, Value>();
//!
//! let users = RequestState::new("/users", Options::new(), transport);
//! let payload = users.execute().await?;
//! ```

/// The reqwest-backed transport and its builder
pub mod client;

/// HTTP request methods
pub mod method;

pub use client::{HttpTransport, HttpTransportBuilder};
pub use method::{Method, UnknownMethod};
