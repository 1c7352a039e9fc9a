//! Request building shared by every resource wrapper.
//!
//! [`prepare`] is pure: it resolves headers, URL and payload placement into a
//! [`PreparedRequest`]. [`send`] performs it and maps non-success statuses to
//! [`StardustError::Http`] without otherwise touching the response.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{
    params::{serialize_query, Payload},
    ClientOptions, Method, PayloadPlacement, RequestOverrides, Result, StardustError,
};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Opaque API key. `Debug` never prints the value.
#[derive(Clone, Eq, PartialEq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty or blank key, which means anonymous access.
    pub fn new(api_key: impl Into<String>) -> Option<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            None
        } else {
            Some(Self(api_key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Joins a base URL and a resource path with exactly one `/` between them.
pub fn url_join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fully resolved outbound request.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub method: Method,
    /// Absolute URL including the query string, if any.
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body for body-carrying verbs.
    pub body: Option<Payload>,
    pub timeout: Duration,
}

/// Resolves one API call into a [`PreparedRequest`].
///
/// Header precedence is verb defaults, then the credential, then overrides.
pub fn prepare(
    credential: Option<&Credential>,
    options: &ClientOptions,
    method: Method,
    url: &str,
    payload: Payload,
    overrides: &RequestOverrides,
) -> Result<PreparedRequest> {
    let profile = options.method_defaults.profile(method);
    let mut headers = profile.headers.clone();

    if let Some(credential) = credential {
        let value = HeaderValue::from_str(credential.expose())
            .map_err(|_| StardustError::Encode("api key is not a valid header value".to_owned()))?;
        headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
    }

    for (name, value) in &overrides.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| StardustError::Encode(format!("invalid header name '{name}'")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| StardustError::Encode(format!("invalid value for header '{name}'")))?;
        headers.insert(header_name, header_value);
    }

    let (url, body) = match profile.placement {
        PayloadPlacement::Query => {
            let query = serialize_query(&payload);
            if query.is_empty() {
                (url.to_owned(), None)
            } else {
                (format!("{url}?{query}"), None)
            }
        }
        PayloadPlacement::Body => (url.to_owned(), Some(payload)),
    };

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
        timeout: Duration::from_millis(overrides.timeout_ms.unwrap_or(options.timeout_ms)),
    })
}

/// Sends a prepared request. One attempt, no retries.
pub async fn send(http: &reqwest::Client, request: PreparedRequest) -> Result<reqwest::Response> {
    #[cfg(feature = "tracing")]
    tracing::debug!(method = %request.method, url = %request.url, "sending request");

    let mut builder = http
        .request(request.method.into(), &request.url)
        .headers(request.headers)
        .timeout(request.timeout);

    if let Some(body) = &request.body {
        let bytes = serde_json::to_vec(body)
            .map_err(|err| StardustError::Encode(format!("invalid request body: {err}")))?;
        builder = builder.body(bytes);
    }

    let response = builder.send().await.map_err(StardustError::Transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.map_err(StardustError::Transport)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(status = status.as_u16(), "request failed");

    Err(StardustError::Http {
        status: status.as_u16(),
        body,
    })
}
