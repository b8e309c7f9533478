//! Integration tests for the HTTP backends against a mockito server.
//!
//! Covers: chat request body and reply decoding, non-success statuses, inventory mapping,
//! lead submission body, crawl report decoding and backend-provided error messages.

use autoconnect_client::{
    endpoint, HttpChatBackend, HttpCrawlBackend, HttpInventoryBackend, HttpLeadBackend,
};
use autoconnect_core::{
    ApiError, ChatBackend, ChatReply, CrawlBackend, InventoryBackend, Lead, LeadBackend,
};
use mockito::Matcher;
use serde_json::json;

/// **Test: chat sends question + session id and decodes the reply variant.**
///
/// **Expected:** body is `{question, session_id}`; reply with modelNames decodes to ModelList.
#[tokio::test]
async fn test_chat_posts_question_and_session() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "question": "which models do you have?",
            "session_id": "session-1"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"modelNames":["Corolla","Camry"],"response":"ignored"}"#)
        .create_async()
        .await;

    let backend = HttpChatBackend::new(&server.url());
    let reply = backend
        .ask("which models do you have?", "session-1")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        reply,
        ChatReply::ModelList(vec!["Corolla".to_string(), "Camry".to_string()])
    );
}

/// **Test: non-2xx chat status is a failure.**
///
/// **Expected:** `ApiError::Status { status: 500, .. }`.
#[tokio::test]
async fn test_chat_non_success_status_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let backend = HttpChatBackend::new(&server.url());
    let err = backend.ask("hi", "s").await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Status {
            status: 500,
            message: None
        }
    ));
}

/// **Test: chat body that is not JSON is a decode error.**
#[tokio::test]
async fn test_chat_invalid_json_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let backend = HttpChatBackend::new(&server.url());
    let err = backend.ask("hi", "s").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

/// **Test: unreachable host is a transport error.**
#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let backend = HttpChatBackend::new("http://127.0.0.1:1");
    let err = backend.ask("hi", "s").await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

/// **Test: inventory mapping is consumed as a list of cars in order.**
#[tokio::test]
async fn test_inventory_lists_mapping_values() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/models")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"car2":{"name":"Sonet","year":2024,"price":12000,"image":"sonet.png"},
                "car1":{"name":"Seltos","year":2023,"price":"15,000"}}"#,
        )
        .create_async()
        .await;

    let backend = HttpInventoryBackend::new(&server.url());
    let cars = backend.list_models().await.unwrap();

    let names: Vec<&str> = cars.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Sonet", "Seltos"]);
    assert_eq!(cars[0].year, Some(2024));
}

/// **Test: lead is posted as `{name, email, car}`.**
#[tokio::test]
async fn test_save_interest_posts_lead() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/saveInterest")
        .match_body(Matcher::Json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "car": "Toyota Corolla LE"
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let backend = HttpLeadBackend::new(&server.url());
    let lead = Lead {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        car: "Toyota Corolla LE".to_string(),
    };
    backend.save_interest(&lead).await.unwrap();

    mock.assert_async().await;
}

/// **Test: lead rejection keeps the backend message.**
#[tokio::test]
async fn test_save_interest_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/saveInterest")
        .with_status(422)
        .with_body(r#"{"message":"email already registered"}"#)
        .create_async()
        .await;

    let backend = HttpLeadBackend::new(&server.url());
    let lead = Lead {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        car: "Corolla".to_string(),
    };
    let err = backend.save_interest(&lead).await.unwrap_err();
    assert_eq!(err.user_message(), "email already registered");
}

/// **Test: crawl posts `{url}` to the service root and decodes the report.**
///
/// **Expected:** total pages, times and the `Data` URLs in order.
#[tokio::test]
async fn test_crawl_report() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::Json(json!({"url": "https://dealer.example"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"Total_pages":2,"Execution_Time":"4.1 s","Time":"2024-06-01 09:00:00",
                "Data":["https://a.com","https://b.com"]}"#,
        )
        .create_async()
        .await;

    let backend = HttpCrawlBackend::new(&server.url());
    let report = backend.crawl("https://dealer.example").await.unwrap();

    mock.assert_async().await;
    assert_eq!(report.total_pages, 2);
    assert_eq!(report.execution_time, "4.1 s");
    assert_eq!(report.urls(), ["https://a.com", "https://b.com"]);
}

/// **Test: crawl failure surfaces the backend-provided message.**
#[tokio::test]
async fn test_crawl_error_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Root URL is not reachable"}"#)
        .create_async()
        .await;

    let backend = HttpCrawlBackend::new(&server.url());
    let err = backend.crawl("https://nowhere.example").await.unwrap_err();
    assert_eq!(err.user_message(), "Root URL is not reachable");
}

#[test]
fn test_endpoint_joins_with_single_slash() {
    assert_eq!(endpoint("http://h/", "/models"), "http://h/models");
    assert_eq!(endpoint("http://h", "models"), "http://h/models");
    assert_eq!(endpoint("http://h/", ""), "http://h/");
    assert_eq!(
        HttpChatBackend::new("http://h/").url(),
        "http://h/chat/"
    );
}
