use crate::adapter::{self, AdapterOutput};
use crate::model::{Category, Request, ResultEnvelope, DEFAULT_MAX_RESULTS, DEFAULT_NUM_RESULTS};
use crate::source::{MediaSource, SearchSource, SocialSource};
use lookout_common::LookoutError;
use lookout_config::LookoutConfig;
use lookout_email::Probe;
use lookout_http::OAuth1Credentials;
use lookout_social::instagram::InstagramApi;
use lookout_social::twitter::TwitterApi;
use lookout_web::brave::BraveApi;

/// A provider that is either usable or switched off with a reason.
enum Slot<T> {
    Ready(T),
    Disabled(String),
}

impl<T> Slot<T> {
    fn ready(&self) -> Result<&T, LookoutError> {
        match self {
            Slot::Ready(p) => Ok(p),
            Slot::Disabled(reason) => Err(LookoutError::configuration(reason.clone())),
        }
    }

    fn from_init(name: &str, init: anyhow::Result<T>) -> Self {
        match init {
            Ok(p) => {
                tracing::info!("{name} initialized successfully");
                Slot::Ready(p)
            }
            Err(e) => {
                tracing::error!("{name} initialization failed: {e}");
                Slot::Disabled(format!("{name} initialization failed: {e}"))
            }
        }
    }
}

/// Routes a [`Request`] to exactly one adapter and wraps the outcome in a
/// [`ResultEnvelope`]. `execute` never fails; every problem ends up in the
/// envelope's `error` field.
pub struct Orchestrator {
    social: Slot<Box<dyn SocialSource>>,
    media: Slot<Box<dyn MediaSource>>,
    search: Slot<Box<dyn SearchSource>>,
    probes: Slot<Vec<Box<dyn Probe>>>,
}

impl Orchestrator {
    /// Start from an orchestrator with every category disabled.
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder {
            inner: Orchestrator {
                social: Slot::Disabled("social provider not configured".into()),
                media: Slot::Disabled("media provider not configured".into()),
                search: Slot::Disabled("web search provider not configured".into()),
                probes: Slot::Disabled("email probes not configured".into()),
            },
        }
    }

    /// Wire the real provider clients. Twitter/X needs all four OAuth
    /// credentials and Brave needs a subscription token; without them the
    /// matching categories answer with a configuration error.
    pub fn from_config(cfg: &LookoutConfig) -> Self {
        let missing = cfg.twitter.missing();
        let social = if missing.is_empty() {
            let creds = OAuth1Credentials {
                consumer_key: cfg.twitter.consumer_key.clone().unwrap_or_default(),
                consumer_secret: cfg.twitter.consumer_secret.clone().unwrap_or_default(),
                access_token: cfg.twitter.access_token.clone().unwrap_or_default(),
                access_secret: cfg.twitter.access_secret.clone().unwrap_or_default(),
            };
            Slot::from_init(
                "Twitter/X API",
                TwitterApi::new(creds).map(|api| Box::new(api) as Box<dyn SocialSource>),
            )
        } else {
            tracing::warn!("Twitter/X API credentials not provided");
            Slot::Disabled(format!(
                "Twitter/X API not initialized: missing credential(s): {}",
                missing.join(", ")
            ))
        };

        let search = match cfg.brave.token() {
            Some(token) => Slot::from_init(
                "Brave Search API",
                BraveApi::new(token.to_string()).map(|api| Box::new(api) as Box<dyn SearchSource>),
            ),
            None => {
                tracing::warn!("Brave Search subscription token not provided");
                Slot::Disabled("Brave Search API not initialized: missing subscription_token".into())
            }
        };

        let media = Slot::from_init(
            "Instagram client",
            InstagramApi::new().map(|api| Box::new(api) as Box<dyn MediaSource>),
        );
        let probes = Slot::from_init("Email probes", lookout_email::default_registry());

        Self {
            social,
            media,
            search,
            probes,
        }
    }

    pub async fn execute(&self, request: Request) -> ResultEnvelope {
        let mut envelope = ResultEnvelope::for_request(&request);
        let category = request.category;
        tracing::debug!("Executing {category} request");

        let output = match self.dispatch(&request).await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Rejected {category} request: {e}");
                AdapterOutput {
                    items: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };

        envelope.data = output.items;
        envelope.error = output.error;
        envelope
    }

    /// Validation, then the configuration gate, then the adapter.
    async fn dispatch(&self, request: &Request) -> Result<AdapterOutput, LookoutError> {
        request.validate()?;

        let output = match request.category {
            Category::SocialProfile | Category::SocialSearch => {
                let source = self.social.ready()?;
                let max_results = request.count("max_results", DEFAULT_MAX_RESULTS)?;
                adapter::social(
                    source.as_ref(),
                    request.text("username").as_deref(),
                    request.text("query").as_deref(),
                    max_results,
                )
                .await
            }
            Category::MediaProfile => {
                let source = self.media.ready()?;
                let username = request.text("username").unwrap_or_default();
                adapter::media(source.as_ref(), &username).await
            }
            Category::WebSearch => {
                let source = self.search.ready()?;
                let num_results = request.count("num_results", DEFAULT_NUM_RESULTS)?;
                let query = request.text("query").unwrap_or_default();
                adapter::web(source.as_ref(), &query, num_results as usize).await
            }
            Category::EmailEnumeration => {
                let probes = self.probes.ready()?;
                let email = request.text("email").unwrap_or_default();
                adapter::email(probes, &email).await
            }
        };
        Ok(output)
    }
}

/// Explicit wiring, mainly for substituting providers.
///
/// ```
/// use lookout_pipeline::Orchestrator;
///
/// let orchestrator = Orchestrator::builder()
///     .probes(Vec::new())
///     .disable_social("no credentials in this environment")
///     .build();
/// # let _ = orchestrator;
/// ```
pub struct OrchestratorBuilder {
    inner: Orchestrator,
}

impl OrchestratorBuilder {
    pub fn social(mut self, source: impl SocialSource + 'static) -> Self {
        self.inner.social = Slot::Ready(Box::new(source));
        self
    }

    pub fn media(mut self, source: impl MediaSource + 'static) -> Self {
        self.inner.media = Slot::Ready(Box::new(source));
        self
    }

    pub fn search(mut self, source: impl SearchSource + 'static) -> Self {
        self.inner.search = Slot::Ready(Box::new(source));
        self
    }

    pub fn probes(mut self, probes: Vec<Box<dyn Probe>>) -> Self {
        self.inner.probes = Slot::Ready(probes);
        self
    }

    pub fn disable_social(mut self, reason: impl Into<String>) -> Self {
        self.inner.social = Slot::Disabled(reason.into());
        self
    }

    pub fn disable_search(mut self, reason: impl Into<String>) -> Self {
        self.inner.search = Slot::Disabled(reason.into());
        self
    }

    pub fn build(self) -> Orchestrator {
        self.inner
    }
}
