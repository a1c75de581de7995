use std::net::TcpListener;
use std::time::Duration;

use bytes::Bytes;
use lifeadmin_engine::{FailureKind, ReqwestUploader, SuccessPolicy, UploadSettings, Uploader};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn uploader_for(server: &MockServer) -> ReqwestUploader {
    ReqwestUploader::new(UploadSettings {
        endpoint: server.uri(),
        ..UploadSettings::default()
    })
}

#[tokio::test]
async fn upload_posts_multipart_file_field_and_decodes_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"file\"; filename=\"invoice.pdf\""))
        .and(body_string_contains("%PDF-1.4 body"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"ocr_text": "Invoice text", "logged": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = uploader_for(&server)
        .upload("invoice.pdf", Bytes::from_static(b"%PDF-1.4 body"))
        .await
        .expect("upload ok");

    assert_eq!(output.status, 200);
    assert_eq!(
        output.body,
        json!({"result": {"ocr_text": "Invoice text", "logged": true}})
    );
}

#[tokio::test]
async fn upload_treats_error_status_with_json_as_success_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "ocr failed"})))
        .mount(&server)
        .await;

    let output = uploader_for(&server)
        .upload("scan.png", Bytes::from_static(b"png"))
        .await
        .expect("json body accepted");
    assert_eq!(output.status, 500);
    assert_eq!(output.body, json!({"detail": "ocr failed"}));
}

#[tokio::test]
async fn strict_policy_fails_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "busy"})))
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: server.uri(),
        policy: SuccessPolicy::RequireSuccessStatus,
        ..UploadSettings::default()
    });
    let err = uploader
        .upload("scan.png", Bytes::from_static(b"png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn upload_fails_to_decode_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let err = uploader_for(&server)
        .upload("scan.png", Bytes::from_static(b"png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn upload_reports_transport_failure_when_nothing_listens() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: format!("http://127.0.0.1:{port}"),
        ..UploadSettings::default()
    });

    let err = uploader
        .upload("scan.png", Bytes::from_static(b"png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert!(err.kind.is_transport());
}

#[tokio::test]
async fn configured_request_timeout_applies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: server.uri(),
        request_timeout: Some(Duration::from_millis(50)),
        ..UploadSettings::default()
    });
    let err = uploader
        .upload("scan.png", Bytes::from_static(b"png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"result\":{}}"))
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(UploadSettings {
        endpoint: server.uri(),
        max_response_bytes: 4,
        ..UploadSettings::default()
    });
    let err = uploader
        .upload("scan.png", Bytes::from_static(b"png"))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 4,
            actual: Some(13)
        }
    );
}

#[tokio::test]
async fn probe_reads_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "LifeAdmin AI backend is running"})),
        )
        .mount(&server)
        .await;

    let message = uploader_for(&server).probe().await.expect("probe ok");
    assert_eq!(message, "LifeAdmin AI backend is running");
}
