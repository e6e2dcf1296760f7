//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `HEROES_*` environment variables and configuration
//! files. Command-line arguments are parsed separately by the CLI.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::http::{DEFAULT_BASE_URL, DEFAULT_VALIDATION_ERRORS_KEY};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration values for the hero client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HEROES")]
pub struct HeroesSettings {
    /// Backend address; API paths are appended to it.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Key under which the backend nests validation messages.
    pub validation_errors_key: Option<String>,
    /// Emit logs as JSON lines instead of compact text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl HeroesSettings {
    /// Parsed backend address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured address is not a URL.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
    }

    /// Request timeout, falling back to the default. Zero is raised to one
    /// second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Validation envelope key, falling back to the default.
    pub fn validation_errors_key(&self) -> &str {
        self.validation_errors_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(DEFAULT_VALIDATION_ERRORS_KEY)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for client configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> HeroesSettings {
        HeroesSettings::load_from_iter([OsString::from("heroes")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("HEROES_BASE_URL", None::<String>),
            ("HEROES_REQUEST_TIMEOUT_SECS", None::<String>),
            ("HEROES_VALIDATION_ERRORS_KEY", None::<String>),
            ("HEROES_LOG_JSON", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.base_url().expect("default is a URL").as_str(),
            "http://localhost:8080/"
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.validation_errors_key(), "errors");
        assert!(!settings.log_json);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "HEROES_BASE_URL",
                Some("https://heroes.example.test/backend".to_owned()),
            ),
            ("HEROES_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            ("HEROES_VALIDATION_ERRORS_KEY", Some("violations".to_owned())),
            ("HEROES_LOG_JSON", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.base_url().expect("configured URL").host_str(),
            Some("heroes.example.test")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(settings.validation_errors_key(), "violations");
        assert!(settings.log_json);
    }

    #[rstest]
    fn malformed_base_url_is_reported() {
        let _guard = lock_env([("HEROES_BASE_URL", Some("not a url".to_owned()))]);
        assert!(load_from_empty_args().base_url().is_err());
    }
}
