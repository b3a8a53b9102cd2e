//! Minimal HTTP client shared by the provider crates.
//!
//! - Request options: headers, `Auth`, query params, timeout
//! - Redacts sensitive query params and never logs secret values
//! - One attempt per call: failures surface immediately, there is no retry loop
//! - Extracts a readable message from the error bodies of the providers we talk to
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), lookout_http::HttpError> {
//! let client = lookout_http::HttpClient::new("https://api.example.com")?;
//! let got: serde_json::Value = client
//!     .get_json("v1/items", lookout_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```
//!
//! Security: header tokens are sanitized before use, and logs only ever
//! include the auth kind (oauth1/header/none), not the secret.

mod oauth;

pub use oauth::OAuth1Credentials;
pub use reqwest::{header, Method, StatusCode};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;

const SECRET_PARAMS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },
}

impl HttpError {
    /// HTTP status of an API error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HttpError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Authentication strategies supported by the client.
///
/// ```
/// use lookout_http::Auth;
///
/// let auth = Auth::Header { name: "x-subscription-token", value: "token" };
/// match auth {
///     Auth::Header { name, value } => {
///         assert_eq!(name, "x-subscription-token");
///         assert_eq!(value, "token");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// OAuth 1.0a user context, signed per request.
    OAuth1(&'a OAuth1Credentials),
    /// Token carried in a custom header (e.g. Brave: x-subscription-token).
    /// `name` must be lowercase.
    Header { name: &'static str, value: &'a str },
    None,
}

/// Per-request tuning knobs.
///
/// ```
/// use lookout_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     query: Some(vec![("q", "osint".into())]),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.auth.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use lookout_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://api.example.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("lookout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
        })
    }

    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// GET JSON with per-request options.
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.request_json::<(), T>(Method::GET, path, None, opts).await
    }

    /// POST a JSON body with per-request options.
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_json(Method::POST, path, Some(body), opts).await
    }

    async fn request_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let mut rb = self
            .inner
            .request(method.clone(), url.clone())
            .timeout(timeout);

        let pairs: Vec<(&str, &str)> = opts
            .query
            .as_ref()
            .map(|q| q.iter().map(|(k, v)| (*k, v.as_ref())).collect())
            .unwrap_or_default();
        if !pairs.is_empty() {
            rb = rb.query(&pairs);
        }

        if let Some(b) = body {
            let bytes = serde_json::to_vec(b).map_err(|e| HttpError::Build(e.to_string()))?;
            rb = rb
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        if let Some(hdrs) = &opts.headers {
            rb = rb.headers(hdrs.clone());
        }

        let auth_kind = match &opts.auth {
            Some(Auth::OAuth1(creds)) => {
                let existing: Vec<(String, String)> = url
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect();
                let mut signed: Vec<(&str, &str)> = existing
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                signed.extend(pairs.iter().copied());
                rb = rb.header(
                    reqwest::header::AUTHORIZATION,
                    creds.authorization(&method, &url, &signed),
                );
                "oauth1"
            }
            Some(Auth::Header { name, value }) => {
                let name = HeaderName::from_static(*name);
                let value = HeaderValue::from_str(&sanitize_token(value)?)
                    .map_err(|e| HttpError::Build(format!("invalid {name} header: {e}")))?;
                rb = rb.header(name, value);
                "header"
            }
            Some(Auth::None) | None => "none",
        };

        let req_id = uuid::Uuid::new_v4().simple().to_string();
        tracing::debug!(
            req_id = %req_id,
            method = %method,
            host_path = %format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            query = ?redact_query(&pairs),
            timeout_ms = timeout.as_millis() as u64,
            auth_kind,
            has_body = %body.is_some(),
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            tracing::debug!(req_id = %req_id, message = %err, "http.network_error.send");
            HttpError::Network(err.to_string())
        })?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|err| {
            tracing::debug!(req_id = %req_id, message = %err, "http.network_error.body");
            HttpError::Network(err.to_string())
        })?;

        let snippet = snip_body(&bytes);
        tracing::debug!(
            req_id = %req_id,
            %status,
            duration_ms = t0.elapsed().as_millis() as u64,
            body_len = bytes.len(),
            "http.response"
        );
        tracing::trace!(req_id = %req_id, body_snippet = %snippet, "http.response.body_snippet");

        if status.is_success() {
            return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                tracing::debug!(
                    req_id = %req_id,
                    serde_err = %e,
                    body_snippet = %snippet,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snippet)
            });
        }

        let message = extract_error_message(&bytes);
        tracing::debug!(req_id = %req_id, %status, message = %message, "http.error");
        Err(HttpError::Api { status, message })
    }
}

/// Best-effort human message from the error bodies of Twitter, Brave,
/// Instagram and generic JSON APIs. Falls back to a body snippet.
fn extract_error_message(body: &[u8]) -> String {
    // Brave: {"error":{"detail":"...","code":"..."}}; OpenAI-like: {"error":{"message":"..."}}
    #[derive(Deserialize)]
    struct Nested {
        error: NestedDetail,
    }
    #[derive(Deserialize)]
    struct NestedDetail {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
    }

    // Twitter: {"errors":[{"message":"...", "detail":"...", "title":"..."}]}
    #[derive(Deserialize)]
    struct TwErrors {
        errors: Vec<TwErr>,
    }
    #[derive(Deserialize)]
    struct TwErr {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        title: String,
    }

    // Instagram and generic: {"message":"..."} or {"detail":"..."} or {"error":"..."}
    #[derive(Deserialize)]
    struct Msg {
        #[serde(default)]
        message: String,
        #[serde(default)]
        detail: String,
        #[serde(default)]
        error: String,
    }

    if let Ok(env) = serde_json::from_slice::<Nested>(body) {
        let d = env.error;
        if let Some(m) = first_non_empty([d.message, d.detail]) {
            return m;
        }
    }
    if let Ok(tw) = serde_json::from_slice::<TwErrors>(body) {
        if let Some(first) = tw.errors.into_iter().next() {
            if let Some(m) = first_non_empty([first.detail, first.message, first.title]) {
                return m;
            }
        }
    }
    if let Ok(m) = serde_json::from_slice::<Msg>(body) {
        if let Some(m) = first_non_empty([m.message, m.detail, m.error]) {
            return m;
        }
    }
    snip_body(body)
}

fn first_non_empty<const N: usize>(candidates: [String; N]) -> Option<String> {
    candidates.into_iter().find(|s| !s.is_empty())
}

fn redact_query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| {
            let is_secret = SECRET_PARAMS.contains(&k.to_ascii_lowercase().as_str());
            (
                (*k).to_string(),
                if is_secret {
                    "<redacted>".to_string()
                } else {
                    (*v).to_string()
                },
            )
        })
        .collect()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut cut = 500;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

fn sanitize_token(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("API token contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build("API token contains control characters".into()));
    }
    Ok(s)
}
