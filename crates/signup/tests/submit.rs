//! Submission against a throwaway local HTTP responder.
//!
//! The responder accepts a single connection, records the raw request and
//! answers with a fixed status line.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use signup::{FieldKey, SignupForm, SubmitError, Submitter};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

struct Captured {
    head: String,
    body: Vec<u8>,
}

async fn one_shot_backend(status_line: &'static str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];

        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|l| {
                let (name, value) = l.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        Captured {
            head,
            body: buf[header_end..].to_vec(),
        }
    });

    (format!("http://{addr}/users"), handle)
}

fn complete_form() -> SignupForm {
    let mut form = SignupForm::new();
    form.apply_input(FieldKey::FirstName, "Grace");
    form.apply_input(FieldKey::LastName, "Hopper");
    form.select_region("United States");
    form.apply_input(FieldKey::PhoneNumber, "2025550143");
    form.apply_input(FieldKey::Email, "grace@navy.mil");
    form
}

#[tokio::test]
async fn posts_json_body_to_the_endpoint() {
    let (url, backend) = one_shot_backend("201 Created").await;
    let submitter = Submitter::new(&url, Duration::from_secs(5)).unwrap();

    let receipt = submitter.submit(complete_form().values()).await.unwrap();
    assert_eq!(receipt.status, 201);

    let captured = backend.await.unwrap();
    assert!(captured.head.starts_with("POST /users HTTP/1.1\r\n"));
    assert!(
        captured
            .head
            .to_ascii_lowercase()
            .contains("content-type: application/json")
    );

    let body: Value = serde_json::from_slice(&captured.body).unwrap();
    assert_eq!(
        body,
        json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "region": "United States",
            "regionCode": "+1",
            "phoneNumber": "202-555-0143",
            "email": "grace@navy.mil",
        })
    );
}

#[tokio::test]
async fn non_success_status_is_a_rejection() {
    let (url, backend) = one_shot_backend("500 Internal Server Error").await;
    let submitter = Submitter::new(&url, Duration::from_secs(5)).unwrap();

    let err = submitter.submit(complete_form().values()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Rejected { status: 500 }));
    assert_eq!(err.summary(), "Error submitting form (HTTP 500)");
    backend.await.unwrap();
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Bind then drop so the port is very likely closed.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let submitter =
        Submitter::new(&format!("http://{addr}/users"), Duration::from_secs(2)).unwrap();
    let err = submitter.submit(complete_form().values()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Network(_)));
}
