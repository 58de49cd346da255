use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use uploader_logging::{client_debug, client_info};
use url::Url;

use crate::{ApiError, FailureKind, ListingResponse, UploadRequest, UploadResponse};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Single URL used for both listing (GET) and uploading (POST).
    pub endpoint: Url,
    /// `None` leaves connection setup unbounded.
    pub connect_timeout: Option<Duration>,
    /// `None` lets a hung request stay outstanding.
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait BucketApi: Send + Sync {
    /// Current file names in the bucket, in the order the endpoint reports them.
    async fn list_files(&self) -> Result<Vec<String>, ApiError>;

    /// Stores one file and returns the endpoint's confirmation message.
    async fn upload(&self, request: &UploadRequest) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBucketApi {
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestBucketApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            endpoint: settings.endpoint,
            client,
        })
    }
}

#[async_trait::async_trait]
impl BucketApi for ReqwestBucketApi {
    async fn list_files(&self) -> Result<Vec<String>, ApiError> {
        client_debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let listing: ListingResponse = read_json(ensure_success(response)?).await?;
        let files = listing.into_files();
        client_info!("Listing returned {} file(s)", files.len());
        Ok(files)
    }

    async fn upload(&self, request: &UploadRequest) -> Result<String, ApiError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| ApiError::new(FailureKind::InvalidBody, err.to_string()))?;
        client_debug!(
            "POST {} filename={} body_len={}",
            self.endpoint,
            request.filename,
            body.len()
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let parsed: UploadResponse = read_json(ensure_success(response)?).await?;
        client_info!("Upload of {} accepted", request.filename);
        Ok(parsed.confirmation())
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(ApiError::new(
        FailureKind::HttpStatus {
            code: status.as_u16(),
            reason: reason_phrase(status),
        },
        status.to_string(),
    ))
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| ApiError::new(FailureKind::InvalidBody, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
