use chrono::{Local, TimeZone};
use lookout_pipeline::{
    ArtifactStatus, Category, Orchestrator, Request, ResultEnvelope, ResultItem, ResultPersister,
};
use regex::Regex;
use serde_json::json;

fn web_envelope() -> ResultEnvelope {
    let req = Request::new(Category::WebSearch)
        .param("query", "OSINT tools")
        .param("num_results", 3);
    let mut env = ResultEnvelope::for_request(&req);
    env.data = vec![
        ResultItem::new()
            .with("url", "https://a.example")
            .with("title", "A"),
        ResultItem::new().with("url", "https://b.example"),
    ];
    env
}

#[test]
fn artifact_round_trips_to_an_equal_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let persister = ResultPersister::new(dir.path());
    let env = web_envelope();

    let artifact = persister.persist(&env, "web_osint");
    assert_eq!(artifact.status, ArtifactStatus::Success);
    assert_eq!(artifact.message, None);

    let name = artifact.filename.file_name().unwrap().to_str().unwrap();
    assert!(Regex::new(r"^web_osint_\d{8}_\d{6}\.json$").unwrap().is_match(name));
    assert_eq!(artifact.filename.parent(), Some(dir.path()));

    let text = std::fs::read_to_string(&artifact.filename).unwrap();
    assert!(text.starts_with("{\n    \"category\": \"web-search\""));
    let back: ResultEnvelope = serde_json::from_str(&text).unwrap();
    assert_eq!(back, env);
}

#[test]
fn error_envelope_keeps_the_error_field() {
    let dir = tempfile::tempdir().unwrap();
    let persister = ResultPersister::new(dir.path());
    let mut env = ResultEnvelope::for_request(
        &Request::new(Category::MediaProfile).param("username", "ghost404"),
    );
    env.error = Some("not found".into());

    let artifact = persister.persist(&env, "instagram_osint");
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(artifact.filename).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "category": "media-profile",
            "username": "ghost404",
            "data": [],
            "error": "not found"
        })
    );
}

#[test]
fn same_second_collision_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let persister = ResultPersister::new(dir.path());
    let at = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

    let first = persister.persist_at(&web_envelope(), "web_osint", at);
    assert_eq!(first.status, ArtifactStatus::Success);
    let before = std::fs::read_to_string(&first.filename).unwrap();

    let mut other = web_envelope();
    other.data.clear();
    let second = persister.persist_at(&other, "web_osint", at);

    assert_eq!(second.status, ArtifactStatus::Error);
    assert_eq!(second.filename, first.filename);
    assert!(second.message.is_some());
    assert_eq!(std::fs::read_to_string(&first.filename).unwrap(), before);
}

#[test]
fn unwritable_directory_yields_error_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let persister = ResultPersister::new(dir.path().join("missing").join("nested"));

    let artifact = persister.persist(&web_envelope(), "web_osint");

    assert_eq!(artifact.status, ArtifactStatus::Error);
    assert!(artifact
        .filename
        .to_string_lossy()
        .contains("web_osint_"));
    assert!(!artifact.message.as_ref().unwrap().is_empty());
    assert!(artifact.into_result().is_err());
}

#[tokio::test]
async fn rejected_reserved_name_still_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let persister = ResultPersister::new(dir.path());
    let orchestrator = Orchestrator::builder().probes(Vec::new()).build();

    let env = orchestrator
        .execute(
            Request::new(Category::EmailEnumeration)
                .param("email", "a@b.c")
                .param("error", "x"),
        )
        .await;
    assert_eq!(
        env.error.as_deref(),
        Some("invalid parameter name: error is reserved")
    );

    let artifact = persister.persist(&env, "email_osint");
    assert_eq!(artifact.status, ArtifactStatus::Success);

    let text = std::fs::read_to_string(&artifact.filename).unwrap();
    assert_eq!(text.matches("\"error\"").count(), 1);
    let back: ResultEnvelope = serde_json::from_str(&text).unwrap();
    assert_eq!(back, env);
    assert_eq!(back.params.get("email"), Some(&json!("a@b.c")));
}
