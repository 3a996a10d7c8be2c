//! GenClient - handles communication with the cover generation backend.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::request::GenerationRequest;
use crate::config::ApiConfig;
use crate::models::{Cover, User};

/// Generation endpoint, relative to the base URL.
pub const GEN_COVER_PATH: &str = "/api/gen-cover";

/// Session snapshot endpoint, relative to the base URL.
pub const USER_INFO_PATH: &str = "/api/get-user-info";

/// HTTP status code the backend uses for "not signed in".
const HTTP_STATUS_UNAUTHORIZED: u16 = 401;

/// Application code for success in the response envelope.
const CODE_OK: i64 = 0;

/// Response envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default = "Option::default")]
    data: Option<T>,
}

/// Outcome of a generation submission that reached the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResponse {
    /// HTTP 401. The body is ignored.
    Unauthorized,
    /// Non-zero application code.
    Rejected { code: i64, message: String },
    /// Code 0, with the cover when the backend returned an object.
    Generated(Option<Cover>),
}

/// Outcome of a user info refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInfoResponse {
    Found(User),
    Unauthorized,
    Rejected { code: i64, message: String },
}

/// Client for the generation backend.
#[derive(Debug, Clone)]
pub struct GenClient {
    base_url: String,
    session_token: Option<String>,
    http_client: reqwest::Client,
}

impl GenClient {
    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig, session_token: Option<String>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token,
            http_client,
        })
    }

    /// Create a client with default timeouts against `base_url`.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        Self::from_config(&config, None)
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Submit a generation request to `/api/gen-cover`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the request fails in transport and
    /// `ApiError::InvalidResponse` if a non-401 body is not the expected
    /// JSON envelope.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ApiError> {
        let url = format!("{}{}", self.base_url, GEN_COVER_PATH);
        log::info!("Submitting generation with fields {:?}", request.field_names());

        let form = request.to_form()?;
        let response = self.authorized(self.http_client.post(&url)).multipart(form).send().await?;

        if response.status().as_u16() == HTTP_STATUS_UNAUTHORIZED {
            log::warn!("Generation rejected: not signed in");
            return Ok(GenerationResponse::Unauthorized);
        }

        let envelope: Envelope<serde_json::Value> = Self::parse_envelope(response).await?;
        if envelope.code != CODE_OK {
            log::warn!(
                "Generation failed with code {}: {}",
                envelope.code,
                envelope.message
            );
            return Ok(GenerationResponse::Rejected {
                code: envelope.code,
                message: envelope.message,
            });
        }

        Ok(GenerationResponse::Generated(
            envelope.data.and_then(Cover::from_data),
        ))
    }

    /// Fetch the current session user from `/api/get-user-info`.
    pub async fn fetch_user_info(&self) -> Result<UserInfoResponse, ApiError> {
        let url = format!("{}{}", self.base_url, USER_INFO_PATH);

        let response = self.authorized(self.http_client.post(&url)).send().await?;

        if response.status().as_u16() == HTTP_STATUS_UNAUTHORIZED {
            return Ok(UserInfoResponse::Unauthorized);
        }

        let envelope: Envelope<User> = Self::parse_envelope(response).await?;
        match (envelope.code, envelope.data) {
            (CODE_OK, Some(user)) => Ok(UserInfoResponse::Found(user)),
            (CODE_OK, None) => Ok(UserInfoResponse::Unauthorized),
            (code, _) => Ok(UserInfoResponse::Rejected {
                code,
                message: envelope.message,
            }),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Envelope<T>, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("status {}: {}", status, e))
        })
    }
}

/// Errors that can occur when talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Backend returned code {code}: {message}")]
    Rejected { code: i64, message: String },
}
