//! OAuth 1.0a request signing (HMAC-SHA1), as required by Twitter/X user-context endpoints.

use base64::Engine;
use reqwest::{Method, Url};
use std::time::{SystemTime, UNIX_EPOCH};

/// The four user-context secrets of an OAuth 1.0a application.
#[derive(Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials")
            .field("consumer_key", &"<redacted>")
            .field("access_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl OAuth1Credentials {
    /// Build the `Authorization` header value for one request.
    ///
    /// `params` must contain every query (and form) parameter that will be sent.
    pub fn authorization(&self, method: &Method, url: &Url, params: &[(&str, &str)]) -> String {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            .to_string();
        self.authorization_with(method, url, params, &nonce, &timestamp)
    }

    fn authorization_with(
        &self,
        method: &Method,
        url: &Url,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> String {
        let oauth = [
            ("oauth_consumer_key", self.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp),
            ("oauth_token", self.access_token.as_str()),
            ("oauth_version", "1.0"),
        ];
        let signature = self.signature(method, url, params, &oauth);

        let mut header = String::from("OAuth ");
        let fields = oauth
            .iter()
            .copied()
            .chain(std::iter::once(("oauth_signature", signature.as_str())))
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        header.push_str(&fields);
        header
    }

    fn signature(
        &self,
        method: &Method,
        url: &Url,
        params: &[(&str, &str)],
        oauth: &[(&str, &str)],
    ) -> String {
        let mut pairs: Vec<(String, String)> = params
            .iter()
            .chain(oauth.iter())
            .map(|(k, v)| (encode(k), encode(v)))
            .collect();
        pairs.sort();
        let param_string = pairs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let mut base_url = url.clone();
        base_url.set_query(None);
        base_url.set_fragment(None);

        let base_string = format!(
            "{}&{}&{}",
            method.as_str().to_ascii_uppercase(),
            encode(base_url.as_str()),
            encode(&param_string)
        );
        let signing_key = format!(
            "{}&{}",
            encode(&self.consumer_secret),
            encode(&self.access_secret)
        );

        let key = ring::hmac::Key::new(
            ring::hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            signing_key.as_bytes(),
        );
        let tag = ring::hmac::sign(&key, base_string.as_bytes());
        base64::engine::general_purpose::STANDARD.encode(tag.as_ref())
    }
}

fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}
