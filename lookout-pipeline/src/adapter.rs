//! Provider adapters: call one provider, project its records into
//! [`ResultItem`]s, and turn failures into data.
//!
//! An adapter never returns `Err`. Items gathered before a failure are kept
//! and the failure text goes into [`AdapterOutput::error`]. Each call logs one
//! INFO line on success or one ERROR line on failure.
use crate::model::ResultItem;
use crate::source::{MediaSource, SearchSource, SocialSource};
use lookout_common::LookoutError;
use lookout_email::{Probe, ProbeOutcome};
use lookout_social::instagram::types::Profile;
use lookout_social::twitter::types::{Tweet, User};
use lookout_web::brave::WebHit;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AdapterOutput {
    pub items: Vec<ResultItem>,
    pub error: Option<String>,
}

impl AdapterOutput {
    fn ok(items: Vec<ResultItem>) -> Self {
        Self { items, error: None }
    }

    fn failed(items: Vec<ResultItem>, err: &LookoutError) -> Self {
        Self {
            items,
            error: Some(err.to_string()),
        }
    }
}

/// Account lookup then post search. Either half may be skipped.
///
/// The account lookup always runs first; if it fails the search is not
/// attempted.
pub async fn social(
    source: &dyn SocialSource,
    username: Option<&str>,
    query: Option<&str>,
    max_results: u32,
) -> AdapterOutput {
    let mut items = Vec::new();

    if let Some(username) = username {
        match source.user(username).await {
            Ok(Some(user)) => items.push(user_item(&user)),
            Ok(None) => tracing::debug!("No Twitter/X user found for {username}"),
            Err(e) => {
                tracing::error!("Error retrieving Twitter/X data: {e}");
                return AdapterOutput::failed(items, &e);
            }
        }
    }

    let mut post_count = 0;
    if let Some(query) = query {
        match source.recent_posts(query, max_results).await {
            Ok(posts) => {
                post_count = posts.len();
                items.extend(posts.iter().map(post_item));
            }
            Err(e) => {
                tracing::error!("Error retrieving Twitter/X data: {e}");
                return AdapterOutput::failed(items, &e);
            }
        }
    }

    tracing::info!(
        "Retrieved Twitter/X data (user: {}, query: {}): {post_count} post(s)",
        username.unwrap_or("-"),
        query.unwrap_or("-"),
    );
    AdapterOutput::ok(items)
}

pub async fn media(source: &dyn MediaSource, username: &str) -> AdapterOutput {
    match source.profile(username).await {
        Ok(profile) => {
            tracing::info!("Retrieved Instagram data for {username}");
            AdapterOutput::ok(vec![profile_item(&profile)])
        }
        Err(e) => {
            tracing::error!("Error retrieving Instagram data: {e}");
            AdapterOutput::failed(Vec::new(), &e)
        }
    }
}

pub async fn web(source: &dyn SearchSource, query: &str, num_results: usize) -> AdapterOutput {
    match source.search(query, num_results).await {
        Ok(hits) => {
            let items: Vec<ResultItem> = hits.iter().take(num_results).map(hit_item).collect();
            tracing::info!(
                "Retrieved {} web results for query: {query}",
                items.len()
            );
            AdapterOutput::ok(items)
        }
        Err(e) => {
            tracing::error!("Error performing web search: {e}");
            AdapterOutput::failed(Vec::new(), &e)
        }
    }
}

/// Run every probe in order. A failing probe is logged and skipped; only
/// platforms where the address exists are reported.
pub async fn email(probes: &[Box<dyn Probe>], email: &str) -> AdapterOutput {
    let mut items = Vec::new();
    for probe in probes {
        match probe.check(email).await {
            Ok(outcome) if outcome.exists => items.push(probe_item(outcome)),
            Ok(_) => {}
            Err(e) => tracing::warn!("Module {} failed for {email}: {e}", probe.name()),
        }
    }
    tracing::info!(
        "Completed email enumeration for {email}: {} platform(s) found",
        items.len()
    );
    AdapterOutput::ok(items)
}

fn user_item(user: &User) -> ResultItem {
    ResultItem::new()
        .with("id", user.id.clone())
        .with("name", user.name.clone())
        .with("username", user.username.clone())
        .with("description", user.description.clone())
        .with("public_metrics", json_or_null("public_metrics", &user.public_metrics))
}

fn post_item(tweet: &Tweet) -> ResultItem {
    ResultItem::new()
        .with("id", tweet.id.clone())
        .with("text", tweet.text.clone())
        .with("created_at", tweet.created_at.clone())
        .with("public_metrics", json_or_null("public_metrics", &tweet.public_metrics))
}

fn json_or_null<T: Serialize>(field: &str, value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::debug!("Could not serialize {field}, recording null: {e}");
        Value::Null
    })
}

fn profile_item(profile: &Profile) -> ResultItem {
    ResultItem::new()
        .with("username", profile.username.clone())
        .with("full_name", profile.full_name.clone())
        .with("biography", profile.biography.clone())
        .with("followers", profile.followers)
        .with("following", profile.followees)
        .with("posts", profile.media_count)
        .with("is_private", profile.is_private)
}

fn hit_item(hit: &WebHit) -> ResultItem {
    let mut item = ResultItem::new().with("url", hit.url.clone());
    if let Some(title) = &hit.title {
        item = item.with("title", title.clone());
    }
    if let Some(description) = &hit.description {
        item = item.with("description", description.clone());
    }
    item
}

fn probe_item(outcome: ProbeOutcome) -> ResultItem {
    ResultItem::new()
        .with("platform", outcome.platform)
        .with("exists", outcome.exists)
        .with("additional_info", outcome.other.unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_social::twitter::types::UserMetrics;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn user_projection_keeps_missing_fields_as_null() {
        let user = User {
            id: "42".into(),
            username: "example_user".into(),
            name: None,
            description: Some("bio".into()),
            public_metrics: Some(UserMetrics {
                followers_count: Some(3),
                ..Default::default()
            }),
        };
        assert_eq!(
            serde_json::to_value(user_item(&user)).unwrap(),
            json!({
                "id": "42",
                "name": null,
                "username": "example_user",
                "description": "bio",
                "public_metrics": {"followers_count": 3}
            })
        );
    }

    #[test]
    fn profile_projection_uses_result_field_names() {
        let profile = Profile {
            username: "someone".into(),
            full_name: "Some One".into(),
            biography: String::new(),
            followers: 10,
            followees: 2,
            media_count: 5,
            is_private: true,
        };
        let item = profile_item(&profile);
        let keys: Vec<&str> = item.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "username",
                "full_name",
                "biography",
                "followers",
                "following",
                "posts",
                "is_private"
            ]
        );
        assert_eq!(item.get("following"), Some(&json!(2)));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("metrics overflow"))
        }
    }

    #[derive(Clone, Default)]
    struct Buf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buf {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(bytes);
            Ok(bytes.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_field_serialization_is_logged_and_null() {
        let buf = Buf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        let value = tracing::subscriber::with_default(subscriber, || {
            json_or_null("public_metrics", &Unserializable)
        });

        assert_eq!(value, Value::Null);
        let logs = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Could not serialize public_metrics, recording null: metrics overflow"));
    }

    #[test]
    fn web_hit_omits_absent_title() {
        let hit = WebHit {
            url: "https://a.example".into(),
            title: None,
            description: Some("d".into()),
        };
        assert_eq!(
            serde_json::to_value(hit_item(&hit)).unwrap(),
            json!({"url": "https://a.example", "description": "d"})
        );
    }
}
