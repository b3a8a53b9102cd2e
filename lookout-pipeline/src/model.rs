//! Requests, result items and envelopes.
use lookout_common::LookoutError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Named request parameters, echoed into the envelope.
pub type Params = BTreeMap<String, Value>;

pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_NUM_RESULTS: u32 = 10;

const NUMERIC_PARAMS: &[&str] = &["max_results", "num_results"];
const RESERVED_PARAMS: &[&str] = &["category", "data", "error"];

/// Provider category a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SocialProfile,
    SocialSearch,
    MediaProfile,
    WebSearch,
    EmailEnumeration,
}

impl Category {
    /// Parameters that must be present and non-empty.
    pub fn required(self) -> &'static [&'static str] {
        match self {
            Category::SocialProfile => &["username"],
            Category::SocialSearch => &["query"],
            Category::MediaProfile => &["username"],
            Category::WebSearch => &["query"],
            Category::EmailEnumeration => &["email"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::SocialProfile => "social-profile",
            Category::SocialSearch => "social-search",
            Category::MediaProfile => "media-profile",
            Category::WebSearch => "web-search",
            Category::EmailEnumeration => "email-enumeration",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One orchestrated query.
///
/// ```
/// use lookout_pipeline::{Category, Request};
///
/// let req = Request::new(Category::WebSearch)
///     .param("query", "OSINT tools")
///     .param("num_results", 3);
/// assert!(req.validate().is_ok());
///
/// let err = Request::new(Category::EmailEnumeration).validate().unwrap_err();
/// assert_eq!(err.to_string(), "missing required parameter(s): email");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub category: Category,
    pub params: Params,
}

impl Request {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            params: Params::new(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Check required and numeric parameters without touching the network.
    pub fn validate(&self) -> Result<(), LookoutError> {
        if let Some(key) = self
            .params
            .keys()
            .find(|k| RESERVED_PARAMS.contains(&k.as_str()))
        {
            return Err(LookoutError::validation(format!(
                "invalid parameter name: {key} is reserved"
            )));
        }

        let missing: Vec<&str> = self
            .category
            .required()
            .iter()
            .copied()
            .filter(|k| !self.params.get(*k).is_some_and(is_present))
            .collect();
        if !missing.is_empty() {
            return Err(LookoutError::validation(format!(
                "missing required parameter(s): {}",
                missing.join(", ")
            )));
        }

        for key in NUMERIC_PARAMS {
            self.count(key, 1)?;
        }
        Ok(())
    }

    /// A present parameter as text. Numbers are rendered, other shapes ignored.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.params.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// A positive integer parameter, or `default` when absent.
    pub fn count(&self, key: &str, default: u32) -> Result<u32, LookoutError> {
        let invalid = || {
            LookoutError::validation(format!(
                "invalid parameter {key}: expected a positive integer"
            ))
        };
        let parsed = match self.params.get(key) {
            None | Some(Value::Null) => return Ok(default),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(default),
            Some(Value::String(s)) => s.trim().parse::<u32>().map_err(|_| invalid())?,
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(invalid)?,
            Some(_) => return Err(invalid()),
        };
        if parsed == 0 {
            return Err(invalid());
        }
        Ok(parsed)
    }
}

fn is_present(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Provider-specific record: field name to value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem(Map<String, Value>);

impl ResultItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Aggregated outcome of one request.
///
/// Serializes as `{ "category": ..., <params>..., "data": [...], "error": ... }`;
/// `error` is omitted when the request succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub category: Category,
    #[serde(flatten)]
    pub params: Params,
    pub data: Vec<ResultItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultEnvelope {
    /// Empty envelope echoing the request. Reserved names are not echoed so
    /// they cannot collide with the envelope's own fields.
    pub fn for_request(request: &Request) -> Self {
        Self {
            category: request.category,
            params: request
                .params
                .iter()
                .filter(|(k, _)| !RESERVED_PARAMS.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            data: Vec::new(),
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_blank_and_null_params_are_reported_together() {
        let req = Request::new(Category::SocialProfile)
            .param("username", "   ")
            .param("query", Value::Null);
        assert_eq!(
            req.validate().unwrap_err(),
            LookoutError::validation("missing required parameter(s): username")
        );
    }

    #[test]
    fn numeric_params_accept_numbers_and_numeric_strings() {
        let req = Request::new(Category::SocialSearch)
            .param("query", "OSINT")
            .param("max_results", "5");
        assert_eq!(req.count("max_results", DEFAULT_MAX_RESULTS).unwrap(), 5);

        let req = req.param("max_results", 7);
        assert_eq!(req.count("max_results", DEFAULT_MAX_RESULTS).unwrap(), 7);

        let req = Request::new(Category::WebSearch).param("query", "x");
        assert_eq!(req.count("num_results", DEFAULT_NUM_RESULTS).unwrap(), 10);
    }

    #[test]
    fn bad_numbers_fail_validation() {
        for bad in [json!("five"), json!(0), json!(-3), json!(2.5), json!([1])] {
            let req = Request::new(Category::WebSearch)
                .param("query", "x")
                .param("num_results", bad.clone());
            assert_eq!(
                req.validate().unwrap_err().to_string(),
                "invalid parameter num_results: expected a positive integer",
                "{bad}"
            );
        }
    }

    #[test]
    fn reserved_names_are_rejected() {
        let req = Request::new(Category::WebSearch)
            .param("query", "x")
            .param("data", "oops");
        assert!(matches!(req.validate(), Err(LookoutError::Validation(_))));
    }

    #[test]
    fn envelope_flattens_params_and_omits_absent_error() {
        let req = Request::new(Category::WebSearch)
            .param("query", "OSINT tools")
            .param("num_results", 3);
        let mut env = ResultEnvelope::for_request(&req);
        env.data.push(ResultItem::new().with("url", "https://a.example"));

        assert_eq!(
            serde_json::to_value(&env).unwrap(),
            json!({
                "category": "web-search",
                "num_results": 3,
                "query": "OSINT tools",
                "data": [{"url": "https://a.example"}]
            })
        );
    }

    #[test]
    fn envelope_does_not_echo_reserved_names() {
        let req = Request::new(Category::EmailEnumeration)
            .param("email", "a@b.c")
            .param("error", "x")
            .param("category", "web-search");
        let env = ResultEnvelope::for_request(&req);
        assert_eq!(env.params.keys().collect::<Vec<_>>(), ["email"]);
        assert_eq!(env.category, Category::EmailEnumeration);
    }

    #[test]
    fn item_fields_keep_insertion_order() {
        let item = ResultItem::new()
            .with("platform", "gravatar")
            .with("exists", true)
            .with("additional_info", Value::Null);
        let keys: Vec<&str> = item.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["platform", "exists", "additional_info"]);
    }
}
