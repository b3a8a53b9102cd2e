use lookout_http::{Auth, HttpClient, HttpError, OAuth1Credentials, RequestOpts, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn get_json_sends_query_and_header_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/res/v1/web/search"))
        .and(query_param("q", "OSINT tools"))
        .and(header("x-subscription-token", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let got: Value = client
        .get_json(
            "res/v1/web/search",
            RequestOpts {
                auth: Some(Auth::Header {
                    name: "x-subscription-token",
                    value: " tok123 ",
                }),
                query: Some(vec![("q", "OSINT tools".into())]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(got, json!({"ok": true}));
}

#[tokio::test]
async fn oauth1_requests_carry_signed_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/by/username/jack"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let creds = OAuth1Credentials {
        consumer_key: "ck".into(),
        consumer_secret: "cs".into(),
        access_token: "at".into(),
        access_secret: "as".into(),
    };
    let client = HttpClient::new(&server.uri()).unwrap();
    let _: Value = client
        .get_json(
            "2/users/by/username/jack",
            RequestOpts {
                auth: Some(Auth::OAuth1(&creds)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let auth = received[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("OAuth oauth_consumer_key=\"ck\""));
    assert!(auth.contains("oauth_signature="));
}

#[tokio::test]
async fn api_errors_carry_status_and_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/account/status"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"message": "Client has sent too many requests"})),
        )
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .post_json::<_, Value>(
            "v1/account/status",
            &json!({"email": "a@b.c"}),
            RequestOpts::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    match err {
        HttpError::Api { message, .. } => assert_eq!(message, "Client has sent too many requests"),
        other => panic!("unexpected error: {other}"),
    }
    // One attempt only.
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_success_bodies_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = HttpClient::new(&server.uri()).unwrap();
    let err = client
        .get_json::<Value>("anything", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Decode(_, ref snip) if snip == "not json"));
}

#[tokio::test]
async fn unreachable_hosts_are_network_errors() {
    let client = HttpClient::new("http://127.0.0.1:9").unwrap();
    let err = client
        .get_json::<Value>("x", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Network(_)));
}
