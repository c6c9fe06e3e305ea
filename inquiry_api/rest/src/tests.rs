use std::net::Ipv4Addr;

use inquiry_core_contact_contracts::{ContactSendMessageError, MockContactService};
use inquiry_models::{
    contact::{ContactInquiry, ContactInquiryMessage, ContactInquiryName, ContactInquiryPhone},
    form::SubmissionResult,
};
use pretty_assertions::assert_eq;
use reqwest::{header, Method, Response, StatusCode};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{middlewares::request_id::REQUEST_ID_HEADER, RestServer};

/// Serve the router on an ephemeral port and return the contact endpoint.
async fn spawn(contact: MockContactService) -> String {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = RestServer::new(contact).router();
    tokio::spawn(async move { axum::serve(listener, router).await });
    format!("http://{addr}/api/contact")
}

fn inquiry() -> ContactInquiry {
    ContactInquiry {
        name: ContactInquiryName::try_new("John Doe").unwrap(),
        email: "john@example.com".parse().unwrap(),
        phone: ContactInquiryPhone::try_new("0712345678").unwrap(),
        message: ContactInquiryMessage::try_new("This is a valid test message.").unwrap(),
    }
}

fn valid_json() -> serde_json::Value {
    json!({
        "name": "John Doe",
        "email": "john@example.com",
        "phone": "0712345678",
        "message": "This is a valid test message.",
    })
}

async fn post_json(contact: MockContactService, body: serde_json::Value) -> Response {
    let endpoint = spawn(contact).await;
    reqwest::Client::new()
        .post(endpoint)
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn post_raw(contact: MockContactService, content_type: &str, body: &'static str) -> Response {
    let endpoint = spawn(contact).await;
    reqwest::Client::new()
        .post(endpoint)
        .header(header::CONTENT_TYPE, content_type)
        .body(body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn json_ok() {
    // Arrange
    let contact = MockContactService::new().with_send_message(inquiry(), Ok(()));

    // Act
    let response = post_json(contact, valid_json()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    assert_eq!(
        response.json::<SubmissionResult>().await.unwrap(),
        SubmissionResult::ok()
    );
}

#[tokio::test]
async fn form_ok() {
    // Arrange
    let contact = MockContactService::new().with_send_message(inquiry(), Ok(()));

    // Act
    let response = post_raw(
        contact,
        "application/x-www-form-urlencoded",
        "name=John+Doe&email=john%40example.com&phone=0712345678\
         &message=This+is+a+valid+test+message.",
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<SubmissionResult>().await.unwrap(),
        SubmissionResult::ok()
    );
}

#[tokio::test]
async fn fields_are_trimmed() {
    // Arrange
    let contact = MockContactService::new().with_send_message(inquiry(), Ok(()));
    let body = json!({
        "name": "  John Doe ",
        "email": " john@example.com",
        "phone": "0712345678\n",
        "message": "\tThis is a valid test message.  ",
    });

    // Act
    let response = post_json(contact, body).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_fields() {
    for body in [
        json!({}),
        json!({"name": "John Doe", "email": "john@example.com", "phone": "0712345678"}),
        json!({"name": "   ", "email": "john@example.com", "phone": "0712345678", "message": "Hello there"}),
        json!({"name": null, "email": "john@example.com", "phone": "0712345678", "message": "Hello there"}),
    ] {
        // Act
        let response = post_json(MockContactService::new(), body).await;

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<SubmissionResult>().await.unwrap(),
            SubmissionResult::failure("Missing required fields")
        );
    }
}

#[tokio::test]
async fn invalid_email() {
    // Arrange
    let mut body = valid_json();
    body["email"] = json!("not-an-email");

    // Act
    let response = post_json(MockContactService::new(), body).await;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<SubmissionResult>().await.unwrap(),
        SubmissionResult::failure("Invalid field value")
    );
}

#[tokio::test]
async fn invalid_body() {
    // Act
    let response = post_raw(MockContactService::new(), "application/json", "{not json").await;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<SubmissionResult>().await.unwrap(),
        SubmissionResult::failure("Invalid request body")
    );
}

#[tokio::test]
async fn send_failed() {
    // Arrange
    let contact = MockContactService::new()
        .with_send_message(inquiry(), Err(ContactSendMessageError::Send));

    // Act
    let response = post_json(contact, valid_json()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<SubmissionResult>().await.unwrap(),
        SubmissionResult::failure("Failed to send email")
    );
}

#[tokio::test]
async fn internal_error() {
    // Arrange
    let contact = MockContactService::new().with_send_message(
        inquiry(),
        Err(ContactSendMessageError::Other(anyhow::anyhow!(
            "template missing"
        ))),
    );

    // Act
    let response = post_json(contact, valid_json()).await;

    // Assert
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<SubmissionResult>().await.unwrap(),
        SubmissionResult::failure("Internal server error")
    );
}

#[tokio::test]
async fn wrong_method() {
    // Arrange
    let endpoint = spawn(MockContactService::new()).await;

    // Act
    let response = reqwest::get(endpoint).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn cors() {
    // Arrange
    let endpoint = spawn(MockContactService::new()).await;

    // Act
    let response = reqwest::Client::new()
        .request(Method::OPTIONS, endpoint)
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|x| x.to_str().ok()),
        Some("*")
    );
}
