use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use lifeadmin_logging::{client_debug, client_info};
use reqwest::multipart::{Form, Part};
use reqwest::{StatusCode, Url};

use crate::{FailureKind, UploadError, UploadOutput};

const PROCESS_PATH: &str = "/process";
const PROBE_PATH: &str = "/";
const FILE_FIELD: &str = "file";

/// Decides which responses count as a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// Any body that parses as JSON is a success, whatever the status code.
    #[default]
    AnyJson,
    /// Non-2xx statuses fail with [`FailureKind::HttpStatus`] before decoding.
    RequireSuccessStatus,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Origin serving `/process`, e.g. `http://127.0.0.1:8000`.
    pub endpoint: String,
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
    pub policy: SuccessPolicy,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_response_bytes: 16 * 1024 * 1024,
            policy: SuccessPolicy::AnyJson,
        }
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Sends one file as multipart part `file` to `/process`.
    async fn upload(&self, file_name: &str, bytes: Bytes) -> Result<UploadOutput, UploadError>;

    /// Checks that the backend answers on its root route.
    async fn probe(&self) -> Result<String, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| UploadError::new(FailureKind::Network, err.to_string()))
    }

    fn url_for(&self, path: &str) -> Result<Url, UploadError> {
        Url::parse(&self.settings.endpoint)
            .and_then(|base| base.join(path))
            .map_err(|err| UploadError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, UploadError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(UploadError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(UploadError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(&self, file_name: &str, bytes: Bytes) -> Result<UploadOutput, UploadError> {
        let url = self.url_for(PROCESS_PATH)?;
        let client = self.build_client()?;
        let size = bytes.len();
        let part = Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
        let form = Form::new().part(FILE_FIELD, part);

        client_info!("POST {} file={} bytes={}", url, file_name, size);
        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        client_debug!("response status={} body_len={}", status, body.len());
        interpret_response(self.settings.policy, status, &body)
    }

    async fn probe(&self) -> Result<String, UploadError> {
        let url = self.url_for(PROBE_PATH)?;
        let client = self.build_client()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = self.read_body(response).await?;
        let output = interpret_response(SuccessPolicy::RequireSuccessStatus, status, &body)?;
        Ok(output
            .body
            .get("message")
            .and_then(|message| message.as_str())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| output.body.to_string()))
    }
}

/// Single decision point turning a raw response into an upload outcome.
pub fn interpret_response(
    policy: SuccessPolicy,
    status: StatusCode,
    body: &[u8],
) -> Result<UploadOutput, UploadError> {
    if policy == SuccessPolicy::RequireSuccessStatus && !status.is_success() {
        return Err(UploadError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }
    let body = serde_json::from_slice(body)
        .map_err(|err| UploadError::new(FailureKind::Decode, err.to_string()))?;
    Ok(UploadOutput {
        status: status.as_u16(),
        body,
    })
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}
