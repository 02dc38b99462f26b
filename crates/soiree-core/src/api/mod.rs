//! HTTP client for the backend REST API.
//!
//! Every call except login and token refresh carries
//! `Authorization: Bearer <access_token>` when a token is stored; expiring
//! tokens are refreshed first (see [`auth`]). Failures are logged in
//! sanitized form and returned as [`ApiError`] with a generic message.
//! Nothing is retried.

use std::{path::PathBuf, time::Duration};

use log::{debug, warn};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    error::{PlanningError, Result},
    models::{
        EventPayload, RemoteEvent, RequirementImage, RequirementInfo, RequirementQuestion,
        Tradition,
    },
    quote::{QuoteReceipt, QuoteRequest, SendQuotes},
};

pub mod auth;
pub mod error;
pub mod sanitize;

pub use auth::{is_token_expired, token_expiry, LoginResponse, TOKEN_EXPIRY_MARGIN};
pub use error::ApiError;
pub use sanitize::sanitize;

/// Backend base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A state or city entry, served either as a bare string or as an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameEntry {
    Plain(String),
    Named { name: String },
}

impl NameEntry {
    fn into_name(self) -> String {
        match self {
            NameEntry::Plain(name) | NameEntry::Named { name } => name,
        }
    }
}

/// Client for the backend REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    pub(crate) db_path: PathBuf,
    refresh_guard: Mutex<()>,
}

impl ApiClient {
    /// Creates a client for `base_url`, keeping tokens in the store at
    /// `db_path`.
    pub fn new(
        base_url: impl Into<String>,
        db_path: impl Into<PathBuf>,
        timeout: Duration,
    ) -> std::result::Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            db_path: db_path.into(),
            refresh_guard: Mutex::new(()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Adds the bearer header when a token is available.
    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(match self.access_token().await? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("{operation}: {}", sanitize(&e.to_string()));
            ApiError::Transport {
                operation,
                source: e,
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("{operation}: HTTP 401, clearing stored tokens");
            self.clear_tokens().await?;
            return Err(ApiError::Unauthorized.into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{operation}: HTTP {status}: {}", sanitize(&body));
            return Err(ApiError::Status {
                operation,
                status: status.as_u16(),
            }
            .into());
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = self.send(operation, request).await?;
        let body = response.text().await.map_err(|e| ApiError::Transport {
            operation,
            source: e,
        })?;
        decode(operation, &body)
    }

    /// Reads a list served either bare or wrapped in `results` or `key`.
    async fn send_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        key: &str,
        request: RequestBuilder,
    ) -> Result<Vec<T>> {
        let value: Value = self.send_json(operation, request).await?;
        let list = match value {
            Value::Object(mut object) => object
                .remove("results")
                .or_else(|| object.remove(key))
                .unwrap_or(Value::Object(object)),
            other => other,
        };
        serde_json::from_value(list).map_err(|e| decode_error(operation, e))
    }

    // Events

    pub async fn list_events(&self) -> Result<Vec<RemoteEvent>> {
        let request = self.authorized(self.http.get(self.url("/events/"))).await?;
        self.send_list("Failed to load events", "events", request).await
    }

    pub async fn get_event(&self, id: u64) -> Result<RemoteEvent> {
        let request = self
            .authorized(self.http.get(self.url(&format!("/events/{id}/"))))
            .await?;
        self.send_json("Failed to load event", request)
            .await
            .map_err(|e| not_found_as(e, id))
    }

    pub async fn create_event(&self, payload: &EventPayload) -> Result<RemoteEvent> {
        let request = self
            .authorized(self.http.post(self.url("/events/")).json(payload))
            .await?;
        let event: RemoteEvent = self.send_json("Failed to create event", request).await?;
        debug!("Created event {}", event.id);
        Ok(event)
    }

    pub async fn update_event(&self, id: u64, payload: &EventPayload) -> Result<RemoteEvent> {
        let request = self
            .authorized(
                self.http
                    .put(self.url(&format!("/events/{id}/")))
                    .json(payload),
            )
            .await?;
        self.send_json("Failed to update event", request)
            .await
            .map_err(|e| not_found_as(e, id))
    }

    pub async fn delete_event(&self, id: u64) -> Result<()> {
        let request = self
            .authorized(self.http.delete(self.url(&format!("/events/{id}/"))))
            .await?;
        self.send("Failed to delete event", request)
            .await
            .map_err(|e| not_found_as(e, id))?;
        Ok(())
    }

    // Reference data

    pub async fn states(&self) -> Result<Vec<String>> {
        let request = self
            .authorized(self.http.get(self.url("/events/states/")))
            .await?;
        let entries: Vec<NameEntry> = self
            .send_list("Failed to load states", "states", request)
            .await?;
        Ok(entries.into_iter().map(NameEntry::into_name).collect())
    }

    pub async fn cities(&self, state: &str) -> Result<Vec<String>> {
        let request = self
            .authorized(
                self.http
                    .get(self.url("/events/cities/"))
                    .query(&[("state", state)]),
            )
            .await?;
        let entries: Vec<NameEntry> = self
            .send_list("Failed to load cities", "cities", request)
            .await?;
        Ok(entries.into_iter().map(NameEntry::into_name).collect())
    }

    pub async fn traditions(&self, event_type: &str) -> Result<Vec<Tradition>> {
        let request = self
            .authorized(
                self.http
                    .get(self.url("/events/traditions/by_event_type/"))
                    .query(&[("event_type", event_type)]),
            )
            .await?;
        self.send_list("Failed to load traditions", "traditions", request)
            .await
    }

    pub async fn requirements(&self, event_id: &str) -> Result<Vec<RequirementInfo>> {
        let request = self
            .authorized(
                self.http
                    .get(self.url("/events/requirements/"))
                    .query(&[("event_id", event_id)]),
            )
            .await?;
        self.send_list("Failed to load requirements", "requirements", request)
            .await
    }

    pub async fn requirement_questions(
        &self,
        requirement_id: &str,
    ) -> Result<Vec<RequirementQuestion>> {
        let request = self
            .authorized(
                self.http
                    .get(self.url("/events/requirement-questions/"))
                    .query(&[("requirement_id", requirement_id)]),
            )
            .await?;
        self.send_list("Failed to load requirement questions", "questions", request)
            .await
    }

    pub async fn requirement_images(
        &self,
        requirement_name: &str,
        event_name: &str,
    ) -> Result<Vec<RequirementImage>> {
        let request = self
            .authorized(
                self.http
                    .get(self.url("/events/requirement-images/"))
                    .query(&[
                        ("requirement_name", requirement_name),
                        ("event_name", event_name),
                    ]),
            )
            .await?;
        self.send_list("Failed to load requirement images", "images", request)
            .await
    }

    // Quotes

    pub async fn send_quotes(&self, event_id: u64, body: &SendQuotes) -> Result<Value> {
        let request = self
            .authorized(
                self.http
                    .post(self.url(&format!("/events/{event_id}/send-quotes/")))
                    .json(body),
            )
            .await?;
        self.send_json("Failed to send quotes to vendors", request)
            .await
    }

    pub async fn create_quote_request(&self, quote: &QuoteRequest) -> Result<QuoteReceipt> {
        let request = self
            .authorized(self.http.post(self.url("/quote-requests/")).json(quote))
            .await?;
        self.send_json("Failed to submit quote request", request)
            .await
    }
}

fn decode_error(operation: &'static str, source: serde_json::Error) -> PlanningError {
    warn!("{operation}: undecodable response: {source}");
    ApiError::Decode { operation, source }.into()
}

fn decode<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T> {
    // 204 and empty 200 responses
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| decode_error(operation, e))
}

fn not_found_as(error: PlanningError, id: u64) -> PlanningError {
    match error {
        PlanningError::Api(ref api) if api.status() == Some(404) => {
            PlanningError::EventNotFound { id }
        }
        other => other,
    }
}

