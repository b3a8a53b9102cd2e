use lookout_http::OAuth1Credentials;
use lookout_social::twitter::TwitterApi;
use serde_json::json;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn creds() -> OAuth1Credentials {
    OAuth1Credentials {
        consumer_key: "ck".into(),
        consumer_secret: "cs".into(),
        access_token: "at".into(),
        access_secret: "as".into(),
    }
}

#[tokio::test]
async fn user_lookup_returns_profile_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/by/username/example_user"))
        .and(query_param("user.fields", "description,public_metrics"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "2244994945",
                "name": "Example",
                "username": "example_user",
                "description": "hello",
                "public_metrics": {
                    "followers_count": 10,
                    "following_count": 2,
                    "tweet_count": 99,
                    "listed_count": 1
                }
            }
        })))
        .mount(&server)
        .await;

    let api = TwitterApi::with_base_url(&server.uri(), creds()).unwrap();
    let user = api.user_by_username("example_user").await.unwrap().unwrap();

    assert_eq!(user.id, "2244994945");
    assert_eq!(user.name.as_deref(), Some("Example"));
    assert_eq!(user.public_metrics.unwrap().followers_count, Some(10));
}

#[tokio::test]
async fn unknown_user_is_none_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/by/username/ghost404"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{
                "title": "Not Found Error",
                "detail": "Could not find user with username: [ghost404].",
                "type": "https://api.twitter.com/2/problems/resource-not-found"
            }]
        })))
        .mount(&server)
        .await;

    let api = TwitterApi::with_base_url(&server.uri(), creds()).unwrap();
    assert!(api.user_by_username("ghost404").await.unwrap().is_none());
}

#[tokio::test]
async fn recent_search_clamps_page_size_and_truncates() {
    let server = MockServer::start().await;
    let tweets: Vec<_> = (0..10)
        .map(|i| {
            json!({
                "id": format!("{i}"),
                "text": format!("post {i}"),
                "created_at": "2024-05-01T12:00:00.000Z",
                "public_metrics": {"retweet_count": 1, "like_count": i}
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("query", "OSINT"))
        .and(query_param("max_results", "10"))
        .and(query_param("tweet.fields", "created_at,public_metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": tweets,
            "meta": {"result_count": 10}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = TwitterApi::with_base_url(&server.uri(), creds()).unwrap();
    let got = api.recent_search("OSINT", 5).await.unwrap();

    assert_eq!(got.len(), 5);
    assert_eq!(got[0].text, "post 0");
    assert_eq!(got[4].id, "4");
}

#[tokio::test]
async fn empty_search_is_empty_vec() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
        .mount(&server)
        .await;

    let api = TwitterApi::with_base_url(&server.uri(), creds()).unwrap();
    assert!(api.recent_search("nothing", 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn auth_failures_surface_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "Unauthorized",
            "detail": "Unauthorized",
            "status": 401
        })))
        .mount(&server)
        .await;

    let api = TwitterApi::with_base_url(&server.uri(), creds()).unwrap();
    let err = api.recent_search("OSINT", 10).await.unwrap_err();
    assert!(err.to_string().starts_with("Unauthorized"), "{err}");
}
