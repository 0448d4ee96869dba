use std::sync::Arc;

use advisor::{Advisor, AdvisorError, GeminiClient};
use chrono::Datelike;

use crate::config::AppConfig;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    advisor: Option<Advisor>,
}

impl AppState {
    pub fn new(config: AppConfig, advisor: Option<Advisor>) -> Self {
        Self {
            config: Arc::new(config),
            advisor,
        }
    }

    /// Builds the Gemini-backed advisor when an API key is available.
    /// Reference endpoints keep working without one.
    pub fn from_config(config: AppConfig, api_key: Option<String>) -> Result<Self, AdvisorError> {
        let advisor = match api_key {
            Some(key) => {
                let client = GeminiClient::new(
                    key,
                    config.gemini.base_url.clone(),
                    config.gemini.model.clone(),
                )
                .with_timeout(config.gemini.timeout())?;

                tracing::info!(model = %client.model(), "Gemini advisor configured");
                Some(Advisor::new(Arc::new(client), config.gemini.settings()))
            }
            None => {
                tracing::warn!("No Gemini API key set; AI endpoints will return 503");
                None
            }
        };

        Ok(Self::new(config, advisor))
    }

    pub fn advisor(&self) -> Result<&Advisor, AppError> {
        self.advisor
            .as_ref()
            .ok_or_else(|| AppError::from(AdvisorError::MissingApiKey))
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    pub fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}
