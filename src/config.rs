//! Environment configuration

use crate::api::ApiConfig;
use crate::runtime::ControllerConfig;
use std::time::Duration;

const API_URL_VAR: &str = "CLINIC_ASSIST_API_URL";
const TIMEOUT_VAR: &str = "CLINIC_ASSIST_TIMEOUT_SECS";

/// Everything the binary needs to wire up a session
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub controller: ControllerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.api.base_url = url.trim().trim_end_matches('/').to_string();
        }

        match lookup(TIMEOUT_VAR).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => {
                config.controller.request_timeout = Duration::from_secs(secs);
            }
            Some(_) => {
                tracing::warn!(
                    var = TIMEOUT_VAR,
                    default_secs = config.controller.request_timeout.as_secs(),
                    "Ignoring invalid timeout"
                );
            }
            None => {}
        }

        config
    }
}
