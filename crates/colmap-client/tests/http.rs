use std::time::Duration;

use colmap_client::{HttpSuggestionSource, SuggestError, SuggestionSource};
use colmap_model::SUGGEST_PATH;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn columns() -> Vec<String> {
    vec![
        "Email Address".to_string(),
        "Phone Number".to_string(),
        "Notes".to_string(),
    ]
}

async fn source_for(server: &MockServer) -> HttpSuggestionSource {
    HttpSuggestionSource::new(format!("{}{}", server.uri(), SUGGEST_PATH)).unwrap()
}

#[tokio::test]
async fn posts_columns_and_decodes_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_PATH))
        .and(body_json(json!({
            "columns": ["Email Address", "Phone Number", "Notes"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "mapping": {
                "email": "Email Address",
                "phone": "Phone Number",
                "notes": null,
                "fax": ""
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mapping = source_for(&server).await.fetch(&columns()).await.unwrap();

    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping.get("email"), Some("Email Address"));
    assert_eq!(mapping.get("phone"), Some("Phone Number"));
    assert!(!mapping.contains_field("notes"));
}

#[tokio::test]
async fn server_error_is_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("engine down"))
        .mount(&server)
        .await;

    let err = source_for(&server).await.fetch(&columns()).await.unwrap_err();

    assert_eq!(
        err,
        SuggestError::Status {
            status: 500,
            body: "engine down".to_string()
        }
    );
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn invalid_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server).await.fetch(&columns()).await.unwrap_err();
    assert!(matches!(err, SuggestError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_mapping_key_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let err = source_for(&server).await.fetch(&columns()).await.unwrap_err();
    assert!(matches!(err, SuggestError::MalformedResponse(_)));
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SUGGEST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "mapping": {} }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let source = HttpSuggestionSource::with_timeout(
        format!("{}{}", server.uri(), SUGGEST_PATH),
        Duration::from_millis(100),
    )
    .unwrap();
    let err = source.fetch(&columns()).await.unwrap_err();
    assert!(matches!(err, SuggestError::Network(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}{}", listener.local_addr().unwrap(), SUGGEST_PATH);
    drop(listener);

    let source = HttpSuggestionSource::new(endpoint).unwrap();
    let err = source.fetch(&columns()).await.unwrap_err();
    assert!(matches!(err, SuggestError::Network(_)));
}
