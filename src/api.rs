//! JSON API client.
//!
//! Every call resolves its path against the configured server origin, the
//! same way a browser resolves a relative URL against the page it's on, so a
//! production client (empty base) and a development client (explicit base)
//! share one code path.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::config::{Rewrite, Settings};
use crate::error::ApiError;
use crate::models::{
    LoginRequest, NextLiftResponse, RecordLiftRequest, SetTrainingMaxesRequest,
    SkipOptionalWeekRequest, TrainingMaxesResponse, UserResponse, Validate,
};

const USER_AGENT: &str = concat!("lift-tracker/", env!("CARGO_PKG_VERSION"));

pub const LOGIN_PATH: &str = "/api/login";
pub const USER_PATH: &str = "/api/user";
pub const NEXT_LIFT_PATH: &str = "/api/nextLift";
pub const SET_TRAINING_MAXES_PATH: &str = "/api/setTrainingMaxes";
pub const TRAINING_MAXES_PATH: &str = "/api/trainingMaxes";
pub const RECORD_LIFT_PATH: &str = "/api/record-lift";
pub const SKIP_OPTIONAL_WEEK_PATH: &str = "/api/skip-optional-week";

/// `base` + `path`, plus a form-encoded query string when there are params.
pub fn apipath(base: &str, path: &str, params: &[(&str, &str)]) -> String {
    let mut target = format!("{base}{path}");
    if !params.is_empty() {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        target.push('?');
        target.push_str(&query);
    }
    target
}

/// Status and raw body of a completed HTTP exchange, 2xx or not.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(ApiError::Status {
            status: self.status,
            message: self.body.trim().to_string(),
        })
    }

    /// Decode the body and run the shape checks on it.
    pub fn decode<T: DeserializeOwned + Validate>(&self) -> Result<T, ApiError> {
        let value: T =
            serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))?;
        value.validate().map_err(ApiError::Invalid)?;
        Ok(value)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: Url,
    base: String,
    rewrite: Option<Rewrite>,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            origin: settings.server_origin.clone(),
            base: settings.api_base().to_string(),
            rewrite: settings.rewrite.clone(),
        })
    }

    /// Full URL for `path`, after origin resolution and any rewrite rule.
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let target = apipath(&self.base, path, params);
        let resolved = self.origin.join(&target)?;
        match self.rewrite.as_ref().and_then(|r| r.apply(resolved.as_str())) {
            Some(rewritten) => Ok(Url::parse(&rewritten)?),
            None => Ok(resolved),
        }
    }

    /// One JSON HTTP exchange.
    ///
    /// Only transport failures and cancellation are errors here. A non-2xx
    /// answer comes back as an `ApiResponse` for the caller to branch on.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.url(path, params)?;
        debug!(method = %method, url = %url, "sending API request");

        let mut builder = self
            .http
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, ApiError>(ApiResponse { status, body })
        };

        let result = tokio::select! {
            _ = cancel.cancelled() => Err(ApiError::Cancelled),
            result = exchange => result,
        };

        match &result {
            Ok(response) if !response.is_success() => {
                debug!(url = %url, status = %response.status, "API request returned an error status");
            }
            Err(ApiError::Cancelled) => debug!(url = %url, "API request cancelled"),
            Err(e) => warn!(url = %url, error = %e, "API request failed"),
            Ok(_) => {}
        }
        result
    }

    async fn get<T: DeserializeOwned + Validate>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, ApiError> {
        self.request::<()>(Method::GET, path, &[], None, cancel)
            .await?
            .error_for_status()?
            .decode()
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse, ApiError> {
        self.request(Method::POST, path, &[], Some(body), cancel)
            .await?
            .error_for_status()
    }

    /// The session cookie the server sets is kept by the client for later calls.
    pub async fn login(&self, password: &str, cancel: &CancellationToken) -> Result<(), ApiError> {
        let req = LoginRequest {
            password: password.to_string(),
        };
        self.post(LOGIN_PATH, &req, cancel).await?;
        Ok(())
    }

    pub async fn user(&self, cancel: &CancellationToken) -> Result<UserResponse, ApiError> {
        self.get(USER_PATH, cancel).await
    }

    pub async fn next_lift(&self, cancel: &CancellationToken) -> Result<NextLiftResponse, ApiError> {
        self.get(NEXT_LIFT_PATH, cancel).await
    }

    pub async fn training_maxes(
        &self,
        cancel: &CancellationToken,
    ) -> Result<TrainingMaxesResponse, ApiError> {
        self.get(TRAINING_MAXES_PATH, cancel).await
    }

    /// Some server versions answer with the saved maxes, others with nothing.
    pub async fn set_training_maxes(
        &self,
        req: &SetTrainingMaxesRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<TrainingMaxesResponse>, ApiError> {
        let response = self.post(SET_TRAINING_MAXES_PATH, req, cancel).await?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        response.decode().map(Some)
    }

    pub async fn record_lift(
        &self,
        req: &RecordLiftRequest,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.post(RECORD_LIFT_PATH, req, cancel).await?;
        Ok(())
    }

    pub async fn skip_optional_week(
        &self,
        req: &SkipOptionalWeekRequest,
        cancel: &CancellationToken,
    ) -> Result<(), ApiError> {
        self.post(SKIP_OPTIONAL_WEEK_PATH, req, cancel).await?;
        Ok(())
    }
}
