//! The reqwest-backed transport and its builder.

use crate::method::Method;
use futures::StreamExt;
use reactive_request_core::{TransportError, TransportFn, TransportOptions};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

/// Maximum response size (50MB)
const MAX_RESPONSE_SIZE: usize = 50 * 1024 * 1024;

/// HTTP transport backed by a shared `reqwest` client.
///
/// Interprets the conventional transport-option keys (`method`, `baseURL`,
/// `headers`, `query`, `body`); all other keys pass through uninterpreted.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
    base_url: Option<String>,
}

impl HttpTransport {
    /// Create a transport with a fresh client and no base URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport builder.
    #[must_use]
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder {
            client: None,
            base_url: None,
        }
    }

    /// Convert into a transport function decoding success bodies into `D`
    /// and failure bodies into `E`.
    #[must_use]
    pub fn into_transport_fn<D, E>(self) -> TransportFn<D, E>
    where
        D: DeserializeOwned + Send + Sync + 'static,
        E: DeserializeOwned + Send + Sync + 'static,
    {
        Arc::new(move |target, options| {
            let transport = self.clone();
            Box::pin(async move { transport.perform::<D, E>(&target, &options).await })
        })
    }

    /// Perform one HTTP call described by `target` and `options`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for unresolvable targets, unknown
    /// methods, network failures, non-success statuses (carrying the
    /// status code and the decoded error body when available), and
    /// undecodable success bodies.
    pub async fn perform<D, E>(
        &self,
        target: &str,
        options: &TransportOptions,
    ) -> Result<D, TransportError<E>>
    where
        D: DeserializeOwned,
        E: DeserializeOwned,
    {
        let method = match options.get("method").and_then(Value::as_str) {
            Some(name) => Method::from_str(name)
                .map_err(|error| TransportError::new(error.to_string()))?,
            None => Method::default(),
        };
        let url = self
            .resolve_url(target, options)
            .map_err(TransportError::new)?;

        tracing::debug!(method = %method, url = %url, "dispatching http request");

        let mut request = self.client.request(method.to_reqwest(), url.as_str());

        if let Some(headers) = options.get("headers").and_then(Value::as_object) {
            for (name, value) in headers {
                if let Some(value) = value.as_str() {
                    request = request.header(name.as_str(), value);
                }
            }
        }

        if let Some(query) = options.get("query").and_then(Value::as_object) {
            let pairs: Vec<(String, String)> = query
                .iter()
                .filter_map(|(name, value)| Some((name.clone(), scalar_to_string(value)?)))
                .collect();
            request = request.query(&pairs);
        }

        match options.get("body") {
            Some(Value::String(raw)) => request = request.body(raw.clone()),
            Some(value) if !value.is_null() => request = request.json(value),
            _ => {}
        }

        let response = request
            .send()
            .await
            .map_err(|error| TransportError::new(format!("request failed: {error}")))?;

        let status = response.status();
        let body = read_capped(response).await?;

        if status.is_success() {
            decode_body(&body).map_err(|error| {
                TransportError::new(format!("response decoding failed: {error}"))
                    .with_status(status.as_u16())
            })
        } else {
            Err(TransportError {
                message: format!("{method} {url} failed with status {}", status.as_u16()),
                status: Some(status.as_u16()),
                data: serde_json::from_slice(&body).ok(),
            })
        }
    }

    /// Resolve `target` against the `baseURL` option or the configured
    /// base URL. Absolute targets pass through; the final URL must be
    /// `http://` or `https://`.
    fn resolve_url(&self, target: &str, options: &TransportOptions) -> Result<String, String> {
        let base = options
            .get("baseURL")
            .and_then(Value::as_str)
            .or(self.base_url.as_deref());

        let url = if target.contains("://") {
            target.to_string()
        } else if let Some(base) = base {
            format!(
                "{}/{}",
                base.trim_end_matches('/'),
                target.trim_start_matches('/')
            )
        } else {
            target.to_string()
        };

        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(url)
        } else {
            Err(format!(
                "target must resolve to an http:// or https:// URL: {url}"
            ))
        }
    }
}

/// Builder for [`HttpTransport`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransportBuilder {
    client: Option<Client>,
    base_url: Option<String>,
}

impl HttpTransportBuilder {
    /// Set the `reqwest` client to perform calls with.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL prefixed to relative targets.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build the [`HttpTransport`].
    #[must_use]
    pub fn build(self) -> HttpTransport {
        HttpTransport {
            client: self.client.unwrap_or_default(),
            base_url: self.base_url,
        }
    }
}

/// Decode a response body, treating an empty body as JSON `null`.
fn decode_body<D: DeserializeOwned>(body: &[u8]) -> Result<D, serde_json::Error> {
    if body.is_empty() {
        serde_json::from_slice(b"null")
    } else {
        serde_json::from_slice(body)
    }
}

/// Render a scalar query value; composite values are skipped.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Stream the response body, refusing bodies over [`MAX_RESPONSE_SIZE`].
async fn read_capped<E>(response: reqwest::Response) -> Result<Vec<u8>, TransportError<E>> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|error| TransportError::new(format!("failed to read response: {error}")))?;

        if body.len() + chunk.len() > MAX_RESPONSE_SIZE {
            return Err(TransportError::new(format!(
                "response larger than {MAX_RESPONSE_SIZE} bytes"
            )));
        }

        body.extend_from_slice(&chunk);
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(value: Value) -> TransportOptions {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn rejects_non_http_targets_before_sending() {
        let transport = HttpTransport::new();
        let result = transport
            .perform::<Value, Value>("file:///etc/passwd", &TransportOptions::new())
            .await;

        let error = result.expect_err("file scheme must be rejected");
        assert!(error.message.contains("http://"));
        assert_eq!(error.status, None);
    }

    #[tokio::test]
    async fn rejects_relative_targets_without_a_base_url() {
        let transport = HttpTransport::new();
        let result = transport
            .perform::<Value, Value>("/users", &TransportOptions::new())
            .await;

        assert!(result.expect_err("relative target needs a base").message.contains("http://"));
    }

    #[tokio::test]
    async fn rejects_unknown_methods_before_sending() {
        let transport = HttpTransport::builder().base_url("http://localhost:9").build();
        let result = transport
            .perform::<Value, Value>("/users", &options(json!({"method": "FETCH"})))
            .await;

        let error = result.expect_err("unknown method must be rejected");
        assert!(error.message.contains("FETCH"));
    }

    #[test]
    fn base_url_joins_without_duplicate_slashes() {
        let transport = HttpTransport::builder()
            .base_url("http://api.example.com/")
            .build();

        let url = transport.resolve_url("/users", &TransportOptions::new());
        assert_eq!(url, Ok("http://api.example.com/users".to_string()));
    }

    #[test]
    fn base_url_option_overrides_the_configured_base() {
        let transport = HttpTransport::builder()
            .base_url("http://configured.example.com")
            .build();

        let url = transport.resolve_url(
            "/users",
            &options(json!({"baseURL": "http://patched.example.com"})),
        );
        assert_eq!(url, Ok("http://patched.example.com/users".to_string()));
    }
}
