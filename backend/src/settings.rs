//! Service configuration loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `PRICE_SEARCH_*` environment variables and
//! an optional configuration file. Accessors resolve them into the typed
//! settings each component expects, applying defaults.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::UpstreamFailurePolicy;
use crate::outbound::finding::FindingConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FINDING_ENDPOINT: &str = "https://svcs.ebay.com/services/search/FindingService/v1";
const DEFAULT_SERVICE_VERSION: &str = "1.0.0";

/// Errors raised while resolving settings into component configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No marketplace application identifier was configured.
    #[error("PRICE_SEARCH_APP_ID must be set to the marketplace application id")]
    MissingAppId,
    /// The Finding endpoint is not a valid URL.
    #[error("invalid finding endpoint {value:?}: {source}")]
    InvalidEndpoint {
        /// Configured value.
        value: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Parser error.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values for the price search service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PRICE_SEARCH")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Marketplace Finding service endpoint.
    pub finding_endpoint: Option<String>,
    /// Marketplace application identifier.
    pub app_id: Option<String>,
    /// Finding service API version.
    pub service_version: Option<String>,
    /// Marketplace site identifier, for example `EBAY-US`.
    pub global_id: Option<String>,
    /// Whole-request timeout for marketplace calls, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Report marketplace outages instead of treating them as no matches.
    #[ortho_config(default = false)]
    pub surface_upstream_failures: bool,
}

impl AppSettings {
    /// Resolve the listen address.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Resolve the marketplace client configuration.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingAppId`] when no application id is set
    /// and [`SettingsError::InvalidEndpoint`] for an unparseable endpoint.
    pub fn finding_config(&self) -> Result<FindingConfig, SettingsError> {
        let app_id = non_blank(self.app_id.as_deref()).ok_or(SettingsError::MissingAppId)?;
        let raw_endpoint = self
            .finding_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_FINDING_ENDPOINT);
        let endpoint = Url::parse(raw_endpoint).map_err(|source| SettingsError::InvalidEndpoint {
            value: raw_endpoint.to_owned(),
            source,
        })?;

        Ok(FindingConfig {
            endpoint,
            app_id: app_id.to_owned(),
            service_version: non_blank(self.service_version.as_deref())
                .unwrap_or(DEFAULT_SERVICE_VERSION)
                .to_owned(),
            global_id: non_blank(self.global_id.as_deref()).map(str::to_owned),
            timeout: self.request_timeout_secs.map(Duration::from_secs),
        })
    }

    /// Resolve how marketplace outages are reported.
    pub fn upstream_failure_policy(&self) -> UpstreamFailurePolicy {
        if self.surface_upstream_failures {
            UpstreamFailurePolicy::Surface
        } else {
            UpstreamFailurePolicy::TreatAsEmpty
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "PRICE_SEARCH_BIND_ADDR",
        "PRICE_SEARCH_FINDING_ENDPOINT",
        "PRICE_SEARCH_APP_ID",
        "PRICE_SEARCH_SERVICE_VERSION",
        "PRICE_SEARCH_GLOBAL_ID",
        "PRICE_SEARCH_REQUEST_TIMEOUT_SECS",
        "PRICE_SEARCH_SURFACE_UPSTREAM_FAILURES",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("price-search")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("static addr")
        );
        assert_eq!(
            settings.upstream_failure_policy(),
            UpstreamFailurePolicy::TreatAsEmpty
        );
        assert!(matches!(
            settings.finding_config(),
            Err(SettingsError::MissingAppId)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PRICE_SEARCH_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "PRICE_SEARCH_FINDING_ENDPOINT",
                Some("http://localhost:8089/finding".to_owned()),
            ),
            ("PRICE_SEARCH_APP_ID", Some("Acme-Prices-PRD".to_owned())),
            ("PRICE_SEARCH_SERVICE_VERSION", Some("1.13.0".to_owned())),
            ("PRICE_SEARCH_GLOBAL_ID", Some("EBAY-GB".to_owned())),
            ("PRICE_SEARCH_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            ("PRICE_SEARCH_SURFACE_UPSTREAM_FAILURES", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("static addr")
        );
        assert_eq!(
            settings.upstream_failure_policy(),
            UpstreamFailurePolicy::Surface
        );

        let finding = settings.finding_config().expect("finding config");
        assert_eq!(finding.endpoint.as_str(), "http://localhost:8089/finding");
        assert_eq!(finding.app_id, "Acme-Prices-PRD");
        assert_eq!(finding.service_version, "1.13.0");
        assert_eq!(finding.global_id.as_deref(), Some("EBAY-GB"));
        assert_eq!(finding.timeout, Some(Duration::from_secs(5)));
    }

    fn settings_with(app_id: Option<&str>, endpoint: Option<&str>) -> AppSettings {
        AppSettings {
            bind_addr: None,
            finding_endpoint: endpoint.map(str::to_owned),
            app_id: app_id.map(str::to_owned),
            service_version: None,
            global_id: Some("  ".to_owned()),
            request_timeout_secs: None,
            surface_upstream_failures: false,
        }
    }

    #[test]
    fn blank_optional_values_fall_back_to_defaults() {
        let finding = settings_with(Some("app"), None)
            .finding_config()
            .expect("finding config");
        assert_eq!(finding.endpoint.as_str(), DEFAULT_FINDING_ENDPOINT);
        assert_eq!(finding.service_version, DEFAULT_SERVICE_VERSION);
        assert!(finding.global_id.is_none());
        assert!(finding.timeout.is_none());
    }

    #[rstest]
    #[case::blank_app_id(Some("   "), None)]
    #[case::bad_endpoint(Some("app"), Some("not a url"))]
    fn invalid_marketplace_settings_are_rejected(
        #[case] app_id: Option<&str>,
        #[case] endpoint: Option<&str>,
    ) {
        assert!(settings_with(app_id, endpoint).finding_config().is_err());
    }

    #[test]
    fn invalid_bind_addr_is_rejected() {
        let mut settings = settings_with(Some("app"), None);
        settings.bind_addr = Some("localhost".to_owned());
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
