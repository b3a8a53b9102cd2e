//! Loader for Lookout configuration with YAML + environment overlays.
//!
//! Sources are merged in order: an optional YAML file, then
//! `LOOKOUT__`-prefixed environment variables (`__` separates nesting, e.g.
//! `LOOKOUT__TWITTER__CONSUMER_KEY`). Every string value then goes through
//! `${VAR}` expansion. All sections are optional; an empty configuration is
//! valid and simply leaves credential-gated providers disabled.
use config::{Config, ConfigError, Environment, File, FileFormat};
use lookout_common::observability::{LogConfig, LogFormat};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Default, Deserialize)]
pub struct LookoutConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub twitter: TwitterSection,
    #[serde(default)]
    pub brave: BraveSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// OAuth 1.0a user-context credentials for Twitter/X.
#[derive(Debug, Default, Deserialize)]
pub struct TwitterSection {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_token: Option<String>,
    pub access_secret: Option<String>,
}

impl TwitterSection {
    /// Names of credentials that are absent, blank, or unresolved `${VAR}` placeholders.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("access_token", &self.access_token),
            ("access_secret", &self.access_secret),
        ]
        .into_iter()
        .filter(|(_, v)| !usable(v.as_deref()))
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BraveSection {
    pub subscription_token: Option<String>,
}

impl BraveSection {
    /// The token, if it is set to something usable.
    pub fn token(&self) -> Option<&str> {
        self.subscription_token
            .as_deref()
            .filter(|t| usable(Some(*t)))
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_file")]
    pub file: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default, deserialize_with = "flag")]
    pub stderr: bool,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            dir: None,
            level: default_log_level(),
            format: LogFormat::default(),
            stderr: false,
        }
    }
}

impl LoggingSection {
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            file_name: self.file.clone(),
            dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.level.clone(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_log_file() -> String {
    "lookout.log".into()
}
fn default_log_level() -> String {
    "info".into()
}

fn usable(v: Option<&str>) -> bool {
    matches!(v.map(str::trim), Some(s) if !s.is_empty() && !s.contains("${"))
}

// Environment overrides arrive as strings.
fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Bool(b) => Ok(b),
        Raw::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid flag: {other}"))),
        },
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct LookoutConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for LookoutConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LookoutConfigLoader {
    /// Start empty; `LOOKOUT__` environment overrides are layered on top at [`load`](Self::load).
    ///
    /// ```
    /// use lookout_config::LookoutConfigLoader;
    ///
    /// let config = LookoutConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.logging.file, "lookout.log");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a file that must exist; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, for environment-only deployments.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use lookout_config::LookoutConfigLoader;
    ///
    /// let cfg = LookoutConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// twitter:
    ///   consumer_key: "ck"
    ///   consumer_secret: "cs"
    /// brave:
    ///   subscription_token: "tok"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.twitter.missing(), vec!["access_token", "access_secret"]);
    /// assert_eq!(cfg.brave.token(), Some("tok"));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    pub fn load(self) -> Result<LookoutConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(Environment::with_prefix("LOOKOUT").separator("__"))
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_in_nested_sections() {
        temp_env::with_vars([("CK", Some("key-1")), ("CS", Some("secret-1"))], || {
            let mut v = json!({
                "twitter": { "consumer_key": "${CK}", "consumer_secret": "$CS" },
                "output": { "dir": "./out" }
            });
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!({
                    "twitter": { "consumer_key": "key-1", "consumer_secret": "secret-1" },
                    "output": { "dir": "./out" }
                })
            );
        });
    }

    #[test]
    fn expands_recursively_and_terminates_on_cycles() {
        temp_env::with_vars(
            [
                ("INNER", Some("qux")),
                ("OUTER", Some("mid-${INNER}")),
                ("A", Some("${B}")),
                ("B", Some("${A}")),
            ],
            || {
                let mut v = json!(["${OUTER}", "x=${A}"]);
                expand_env_in_value(&mut v);
                assert_eq!(v[0], json!("mid-qux"));
                assert!(v[1].as_str().unwrap().contains("${"));
            },
        );
    }

    #[test]
    fn placeholders_and_blanks_count_as_missing() {
        let section = TwitterSection {
            consumer_key: Some("ck".into()),
            consumer_secret: Some("   ".into()),
            access_token: Some("${TWITTER_ACCESS_TOKEN}".into()),
            access_secret: None,
        };
        assert_eq!(
            section.missing(),
            vec!["consumer_secret", "access_token", "access_secret"]
        );

        let brave = BraveSection {
            subscription_token: Some("${BRAVE_API_KEY}".into()),
        };
        assert_eq!(brave.token(), None);
    }

    #[test]
    fn logging_section_maps_to_log_config() {
        let cfg = LookoutConfigLoader::new()
            .with_yaml_str("logging:\n  level: debug\n  format: json\n  stderr: 'yes'\n")
            .load()
            .unwrap();
        let log = cfg.logging.to_log_config();
        assert_eq!(log.default_filter, "debug");
        assert_eq!(log.format, LogFormat::Json);
        assert!(log.emit_stderr);
        assert_eq!(log.file_name, "lookout.log");
    }
}
