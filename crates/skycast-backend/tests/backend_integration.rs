//! Integration tests for BackendClient using wiremock.

use skycast_backend::{BackendClient, BackendError, PushToken, Rainfall, UserId};
use skycast_core::{BackendConfig, Platform};
use wiremock::matchers::{body_json, body_string_contains, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(uri: &str) -> BackendClient {
    BackendClient::new(&BackendConfig {
        base_url: uri.to_string(),
        request_timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_snake_case_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_json(serde_json::json!({ "username": "alice", "city": "Paris" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": 12
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let record = client
        .create_or_update_user("alice", "Paris", None)
        .await
        .unwrap();

    assert_eq!(record.user_id, Some(UserId(12)));
}

#[tokio::test]
async fn test_update_user_sends_known_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .and(body_json(serde_json::json!({
            "username": "alice",
            "city": "Lyon",
            "userId": 12
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "userId": 12
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let record = client
        .create_or_update_user("alice", "Lyon", Some(UserId(12)))
        .await
        .unwrap();

    assert_eq!(record.user_id, Some(UserId(12)));
}

#[tokio::test]
async fn test_upsert_is_stable_for_same_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user_id": 3
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let first = client.create_or_update_user("bob", "Oslo", None).await.unwrap();
    let second = client.create_or_update_user("bob", "Oslo", None).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_upsert_ack_without_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "User added successfully."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let record = client.create_or_update_user("carol", "Rome", None).await.unwrap();

    assert_eq!(record.user_id, None);
}

#[tokio::test]
async fn test_upsert_server_error_is_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "This username has already used by other users. Please enter another one."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client.create_or_update_user("alice", "Paris", None).await;

    match result {
        Err(BackendError::Server { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.starts_with("This username has already used"));
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upsert_server_error_without_body_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client.create_or_update_user("alice", "Paris", None).await;

    match result {
        Err(BackendError::Server { message, .. }) => {
            assert_eq!(message, "Failed to create/update profile.")
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upsert_unreachable_host_is_network_error() {
    let client = client_for("http://127.0.0.1:1");
    let result = client.create_or_update_user("alice", "Paris", None).await;

    assert!(matches!(result, Err(BackendError::Network(_))));
}

#[tokio::test]
async fn test_lookup_user_bare_integer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(query_param("username", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(9)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    assert_eq!(client.lookup_user("alice").await.unwrap(), UserId(9));
}

#[tokio::test]
async fn test_lookup_user_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "User not found."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client.lookup_user("ghost").await;

    assert!(matches!(result, Err(BackendError::NotFound(name)) if name == "ghost"));
}

#[tokio::test]
async fn test_register_push_token_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/expo-token"))
        .and(body_json(serde_json::json!({
            "user_id": 5,
            "token": "ExponentPushToken[abc]",
            "platform": "android"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "token registered"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let token = PushToken::new("ExponentPushToken[abc]").unwrap();
    client
        .register_push_token(UserId(5), &token, Platform::Android)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_remove_push_token_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/remove-expo-token"))
        .and(body_json(serde_json::json!({ "user_id": 5 })))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "User not found."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client.remove_push_token(UserId(5)).await;

    assert!(matches!(result, Err(BackendError::Server { status: 404, .. })));
}

#[tokio::test]
async fn test_classify_image_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"file\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "class": "Cumulus",
            "rainfall": 0.62
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client
        .classify_image(vec![0xFF, 0xD8, 0xFF, 0xE0], "photo.jpg")
        .await
        .unwrap();

    assert_eq!(result.class, "Cumulus");
    assert_eq!(result.rainfall, Rainfall::Probability(0.62));
}

#[tokio::test]
async fn test_classify_image_server_failure_is_prediction_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Failed to classify image."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client.classify_image(vec![1, 2, 3], "photo.jpg").await;

    assert!(matches!(result, Err(BackendError::Prediction(_))));
}

#[tokio::test]
async fn test_classify_image_unreachable_is_prediction_error() {
    let client = client_for("http://127.0.0.1:1");
    let result = client.classify_image(vec![1, 2, 3], "photo.jpg").await;

    assert!(matches!(result, Err(BackendError::Prediction(_))));
}

#[tokio::test]
async fn test_fetch_weather_fact() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get-fact"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "fact": "Lightning is hotter than the surface of the sun."
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let fact = client.fetch_weather_fact().await.unwrap();

    assert!(fact.fact.starts_with("Lightning"));
}

#[tokio::test]
async fn test_fetch_weather_image_decodes_base64() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-weather-image"))
        .and(body_json(serde_json::json!({ "prompt": "fog over a bay" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            // "PNG" in base64
            "imageBase64": "UE5H",
            "text": "Here is your image"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let image = client.fetch_weather_image("fog over a bay").await.unwrap();

    assert_eq!(image.bytes, b"PNG".to_vec());
    assert_eq!(image.caption.as_deref(), Some("Here is your image"));
}

#[tokio::test]
async fn test_fetch_weather_image_missing_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-weather-image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "imageBase64": null,
            "text": "I can only describe it"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let result = client.fetch_weather_image("fog").await;

    assert!(matches!(result, Err(BackendError::InvalidResponse(_))));
}
