//! Login and logout.

use log::info;

use super::EventPlanner;
use crate::{api::LoginResponse, error::Result, params::Login};

impl EventPlanner {
    /// Logs in and stores the tokens in local storage.
    pub async fn login(&self, params: &Login) -> Result<LoginResponse> {
        let response = self.api.login(params.email.trim(), &params.password).await?;
        info!("Logged in");
        Ok(response)
    }

    /// Forgets the stored tokens. Returns whether a session existed.
    pub async fn logout(&self) -> Result<bool> {
        let was_logged_in = self.api.is_logged_in().await?;
        self.api.clear_tokens().await?;
        Ok(was_logged_in)
    }
}
