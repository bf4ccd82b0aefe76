//! Optional TOML configuration
//!
//! Every key may be omitted. Command-line flags override file values,
//! file values override the defaults below.
//!
//! ```toml
//! client = "oc"
//! title = "OpenShift Namespace Report"
//! stylesheet_url = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css"
//! concurrency = 1
//! command_timeout_secs = 30
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use ocreport_html::{DEFAULT_STYLESHEET_URL, DEFAULT_TITLE, ReportOptions};

pub const DEFAULT_CLIENT: &str = "oc";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Control-plane client binary
    pub client: String,

    /// Report heading and document title
    pub title: String,

    /// Stylesheet linked from the report
    pub stylesheet_url: String,

    /// Namespaces fetched at the same time
    pub concurrency: usize,

    /// Upper bound for each client invocation
    pub command_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: DEFAULT_CLIENT.to_string(),
            title: DEFAULT_TITLE.to_string(),
            stylesheet_url: DEFAULT_STYLESHEET_URL.to_string(),
            concurrency: 1,
            command_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load the config file at `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Concurrency, never below one
    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            title: self.title.clone(),
            stylesheet_url: self.stylesheet_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            client = "/usr/local/bin/oc"
            stylesheet_url = "https://intranet.example/report.css"
            command_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.client, "/usr/local/bin/oc");
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.command_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(
            config.report_options().stylesheet_url,
            "https://intranet.example/report.css"
        );
    }

    #[test]
    fn test_zero_concurrency_means_sequential() {
        let config = Config::from_toml("concurrency = 0").unwrap();
        assert_eq!(config.concurrency(), 1);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml("stylesheet = \"x\"").is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/ocreport.toml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
