use std::time::Duration;

use bytes::BytesMut;
use compressor_logging::{compressor_debug, compressor_info, compressor_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::filename::filename_from_content_disposition;
use crate::{CompressError, CompressOutput, Endpoint, FailureKind, UploadRequest};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Prefix every endpoint path is joined onto, e.g. `http://host:5000/api`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Applies to the health check only; uploads use `request_timeout`.
    pub health_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            health_timeout: Duration::from_secs(5),
            max_response_bytes: 100 * 1024 * 1024,
        }
    }
}

impl ApiSettings {
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
pub trait Compressor: Send + Sync {
    /// Uploads one file and returns the compressed payload.
    async fn compress(&self, request: &UploadRequest) -> Result<CompressOutput, CompressError>;

    /// Calls the API health endpoint and returns its message.
    async fn health(&self) -> Result<String, CompressError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCompressor {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestCompressor {
    pub fn new(settings: ApiSettings) -> Result<Self, CompressError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| CompressError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn build_form(&self, request: &UploadRequest) -> Result<Form, CompressError> {
        let contents = tokio::fs::read(&request.file_path).await.map_err(|err| {
            CompressError::new(
                FailureKind::ReadInput,
                format!("Could not read {}: {err}", request.file_path.display()),
            )
        })?;
        compressor_info!(
            "uploading {} ({} bytes) to {}",
            request.file_name,
            contents.len(),
            request.endpoint.path()
        );

        let mut part = Part::bytes(contents).file_name(request.file_name.clone());
        if let Some(mime) = mime_for(&request.file_name) {
            part = part
                .mime_str(mime)
                .map_err(|err| CompressError::new(FailureKind::InvalidRequest, err.to_string()))?;
        }
        let mut form = Form::new().part("file", part);
        if let Endpoint::Image { quality } = request.endpoint {
            form = form.text("qualidade", quality.to_string());
        }
        Ok(form)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, CompressError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl Compressor for ReqwestCompressor {
    async fn compress(&self, request: &UploadRequest) -> Result<CompressOutput, CompressError> {
        let form = self.build_form(request).await?;
        let url = self.settings.endpoint_url(request.endpoint.path());

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        compressor_debug!("POST {} -> {}", url, status);
        if !status.is_success() {
            // Oversized error bodies fail like any oversized response; other
            // read failures are treated like an empty body.
            let body = match self.read_body(response).await {
                Ok(body) => body,
                Err(err) if matches!(err.kind, FailureKind::TooLarge { .. }) => return Err(err),
                Err(_) => Vec::new(),
            };
            let message = server_error_message(status.as_u16(), &body);
            compressor_warn!("compression rejected ({}): {}", status, message);
            return Err(CompressError::new(
                FailureKind::Server {
                    status: status.as_u16(),
                },
                message,
            ));
        }

        let suggested_filename = header_str(&response, CONTENT_DISPOSITION.as_str())
            .as_deref()
            .and_then(filename_from_content_disposition);
        let bytes = self.read_body(response).await?;

        compressor_info!(
            "received {} bytes (suggested name {:?})",
            bytes.len(),
            suggested_filename
        );
        Ok(CompressOutput {
            bytes,
            suggested_filename,
        })
    }

    async fn health(&self) -> Result<String, CompressError> {
        let url = self.settings.endpoint_url("health");
        let response = self
            .client
            .get(&url)
            .timeout(self.settings.health_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            return Err(CompressError::new(
                FailureKind::Server {
                    status: status.as_u16(),
                },
                server_error_message(status.as_u16(), &body),
            ));
        }

        let health: HealthBody = serde_json::from_slice(&body)
            .map_err(|err| CompressError::new(FailureKind::InvalidResponse, err.to_string()))?;
        if health.status != "ok" {
            return Err(CompressError::new(
                FailureKind::InvalidResponse,
                format!("API reported status {:?}", health.status),
            ));
        }
        Ok(health.message.unwrap_or(health.status))
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Picks the user-facing message out of an error body: a non-empty `error`
/// string, else a non-empty `detail` string, else `Error {status}`.
pub fn server_error_message(status: u16, body: &[u8]) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_slice(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };
    field("error")
        .or_else(|| field("detail"))
        .unwrap_or_else(|| format!("Error {status}"))
}

fn header_str(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn mime_for(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => Some("application/pdf"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> CompressError {
    CompressError::new(
        FailureKind::TooLarge { max_bytes, actual },
        format!("Response too large (limit {max_bytes} bytes)"),
    )
}

fn map_reqwest_error(err: reqwest::Error) -> CompressError {
    if err.is_timeout() {
        return CompressError::new(FailureKind::Timeout, err.to_string());
    }
    CompressError::new(FailureKind::Network, err.to_string())
}
