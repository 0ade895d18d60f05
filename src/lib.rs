// src/lib.rs
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub mod catalog;
pub mod cli;
pub mod flag;
pub mod upsert;

use crate::flag::{FlagDefinition, RemoteFlag, ValueType};

const API_PREFIX: &str = "mr-api";

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Missing authentication: {0}")]
    AuthError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two FeatureHub admin calls the provisioning logic relies on.
#[async_trait]
pub trait AdminApi {
    async fn list_flags(&self, application_id: &Uuid) -> Result<Vec<RemoteFlag>, AdminError>;
    async fn create_flag(
        &self,
        application_id: &Uuid,
        definition: &FlagDefinition,
    ) -> Result<RemoteFlag, AdminError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFeature<'a> {
    key: &'a str,
    name: &'a str,
    value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

pub struct Client {
    base_url: String,
    http_client: reqwest::Client,
    timeout: Option<Duration>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn debug_info(&self) -> String {
        format!(
            "Client {{ base_url: {}, timeout: {:?} }}",
            self.base_url, self.timeout
        )
    }

    fn features_url(&self, application_id: &Uuid) -> String {
        format!(
            "{}/{}/application/{}/features",
            self.base_url, API_PREFIX, application_id
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, AdminError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AdminError::ApiError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl AdminApi for Client {
    async fn list_flags(&self, application_id: &Uuid) -> Result<Vec<RemoteFlag>, AdminError> {
        let url = self.features_url(application_id);
        debug!("Listing features: GET {}", url);

        let response = Self::check(self.http_client.get(&url).send().await?).await?;
        let flags = response.json::<Vec<RemoteFlag>>().await?;

        debug!("Application {} has {} features", application_id, flags.len());
        Ok(flags)
    }

    async fn create_flag(
        &self,
        application_id: &Uuid,
        definition: &FlagDefinition,
    ) -> Result<RemoteFlag, AdminError> {
        let url = format!(
            "{}?includeEnvironments=false",
            self.features_url(application_id)
        );
        let payload = CreateFeature {
            key: &definition.key,
            name: &definition.name,
            value_type: definition.value_type,
            description: definition.description.as_deref(),
        };
        debug!("Creating feature '{}': POST {}", definition.key, url);

        let response = Self::check(
            self.http_client.post(&url).json(&payload).send().await?,
        )
        .await?;

        // FeatureHub answers with the application's whole feature list.
        let features = response.json::<Vec<RemoteFlag>>().await?;
        let created = features
            .into_iter()
            .find(|f| f.key == definition.key)
            .ok_or_else(|| {
                AdminError::UnexpectedResponse(format!(
                    "create of '{}' did not return it",
                    definition.key
                ))
            })?;
        info!(
            "Created feature '{}' ({})",
            definition.key,
            created.id.as_deref().unwrap_or("no id")
        );
        Ok(created)
    }
}

pub struct ClientBuilder {
    base_url: String,
    token: String,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self {
            base_url: String::new(),
            token: String::new(),
            timeout: None,
        }
    }

    /// The admin SDK URL, e.g. `https://app.featurehub.io/vanilla/{id}`.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Service account access token, sent as a bearer token.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client, AdminError> {
        if self.base_url.is_empty() {
            return Err(AdminError::ValidationError("Base URL is required".to_string()));
        }
        if self.token.is_empty() {
            return Err(AdminError::AuthError("Access token is required".to_string()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| {
                AdminError::AuthError("Access token is not a valid header value".to_string())
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("FeatureHub-Admin-Rust"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);

        let mut http_client = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            http_client = http_client.timeout(timeout);
        }

        info!("FeatureHub admin client using base URL {}", self.base_url);
        Ok(Client {
            base_url: self.base_url,
            http_client: http_client.build()?,
            timeout: self.timeout,
        })
    }
}
