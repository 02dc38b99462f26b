//! Access-token freshness and single-flight refresh.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jiff::{SignedDuration, Timestamp};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{sanitize::sanitize, ApiClient, ApiError};
use crate::{
    db::{self, ACCESS_TOKEN_KEY, AUTH_STORE_KEY, REFRESH_TOKEN_KEY},
    error::Result,
};

/// Tokens expiring within this margin are refreshed before use.
pub const TOKEN_EXPIRY_MARGIN: SignedDuration = SignedDuration::from_secs(30);

/// Expiry (`exp` claim) of a JWT, without verifying its signature.
pub fn token_expiry(token: &str) -> Option<Timestamp> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    Timestamp::from_second(exp).ok()
}

/// Whether the token must be refreshed at `now`. Undecodable tokens count
/// as expired.
pub fn is_token_expired(token: &str, now: Timestamp) -> bool {
    match token_expiry(token) {
        Some(exp) => exp.duration_since(now) <= TOKEN_EXPIRY_MARGIN,
        None => true,
    }
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Tokens and profile returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Value,
}

/// Persisted auth store, in the browser store's layout.
fn auth_store(user: &Value) -> Value {
    json!({
        "state": { "user": user, "isAuthenticated": true },
        "version": 0
    })
}

impl ApiClient {
    /// A usable access token, refreshing it first when it is about to
    /// expire. `None` when the user never logged in.
    pub async fn access_token(&self) -> Result<Option<String>> {
        let Some(token) = self.stored(ACCESS_TOKEN_KEY).await? else {
            return Ok(None);
        };
        if !is_token_expired(&token, Timestamp::now()) {
            return Ok(Some(token));
        }

        let _guard = self.refresh_guard.lock().await;

        // Another caller may have refreshed while this one waited.
        if let Some(token) = self.stored(ACCESS_TOKEN_KEY).await? {
            if !is_token_expired(&token, Timestamp::now()) {
                debug!("Reusing access token refreshed by a concurrent request");
                return Ok(Some(token));
            }
        }

        self.refresh_access_token().await.map(Some)
    }

    async fn refresh_access_token(&self) -> Result<String> {
        let Some(refresh) = self.stored(REFRESH_TOKEN_KEY).await? else {
            warn!("Access token expired and no refresh token is stored");
            self.clear_tokens().await?;
            return Err(ApiError::RefreshFailed.into());
        };

        let response = self
            .http
            .post(self.url("/auth/token/refresh/"))
            .json(&RefreshRequest { refresh: &refresh })
            .send()
            .await;

        let refreshed = match response {
            Ok(response) if response.status().is_success() => {
                response.json::<RefreshResponse>().await.ok()
            }
            Ok(response) => {
                warn!("Token refresh rejected with HTTP {}", response.status());
                None
            }
            Err(e) => {
                warn!("Token refresh failed: {}", sanitize(&e.to_string()));
                None
            }
        };

        let Some(refreshed) = refreshed else {
            self.clear_tokens().await?;
            return Err(ApiError::RefreshFailed.into());
        };

        let access = refreshed.access.clone();
        db::blocking(&self.db_path, move |storage| {
            storage.set_item(ACCESS_TOKEN_KEY, &refreshed.access)?;
            if let Some(rotated) = refreshed.refresh.as_deref() {
                storage.set_item(REFRESH_TOKEN_KEY, rotated)?;
            }
            Ok(())
        })
        .await?;
        info!("Access token refreshed");
        Ok(access)
    }

    /// Logs in and stores the tokens and profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = self
            .http
            .post(self.url("/auth/login/"))
            .json(&LoginRequest { email, password });
        let login: LoginResponse = self.send_json("Failed to log in", request).await?;

        let stored = login.clone();
        db::blocking(&self.db_path, move |storage| {
            storage.set_item(ACCESS_TOKEN_KEY, &stored.access)?;
            storage.set_item(REFRESH_TOKEN_KEY, &stored.refresh)?;
            storage.set_item(AUTH_STORE_KEY, &auth_store(&stored.user).to_string())
        })
        .await?;
        Ok(login)
    }

    /// Whether an access token is stored.
    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.stored(ACCESS_TOKEN_KEY).await?.is_some())
    }

    /// Removes every piece of stored auth state.
    pub async fn clear_tokens(&self) -> Result<()> {
        db::blocking(&self.db_path, |storage| {
            for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, AUTH_STORE_KEY] {
                storage.remove_item(key)?;
            }
            Ok(())
        })
        .await
    }

    async fn stored(&self, key: &'static str) -> Result<Option<String>> {
        db::blocking(&self.db_path, move |storage| storage.get_item(key)).await
    }
}
