//! Export configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Reset shipped as `src/style.css` unless overridden.
pub const DEFAULT_GLOBAL_CSS: &str = "*, *::before, *::after {\n  box-sizing: border-box;\n}\n\nbody {\n  margin: 0;\n}\n\nimg {\n  max-width: 100%;\n}\n";

pub const DEFAULT_FAVICON_URL: &str = "favicon.ico";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid export config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field} url: {source}")]
    InvalidUrl {
        field: &'static str,
        source: url::ParseError,
    },
}

/// Configuration for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Minify stylesheets and markup instead of pretty-printing.
    #[serde(default)]
    pub minify: bool,

    /// Location handed to the asset fetcher for `src/favicon.ico`.
    #[serde(default = "default_favicon_url")]
    pub favicon_url: String,

    /// Webfont stylesheet request; families no page uses are trimmed from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webfont_url: Option<String>,

    /// Contents of `src/style.css`.
    #[serde(default = "default_global_css")]
    pub global_css: String,
}

fn default_favicon_url() -> String {
    DEFAULT_FAVICON_URL.to_owned()
}

fn default_global_css() -> String {
    DEFAULT_GLOBAL_CSS.to_owned()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            minify: false,
            favicon_url: default_favicon_url(),
            webfont_url: None,
            global_css: default_global_css(),
        }
    }
}

impl ExportConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = toml::from_str(input)?;
        if let Some(webfont) = &config.webfont_url {
            Url::parse(webfont).map_err(|source| ConfigError::InvalidUrl {
                field: "webfont_url",
                source,
            })?;
        }
        Ok(config)
    }

    /// Set minification (builder).
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Set the favicon location (builder).
    pub fn with_favicon_url(mut self, url: impl Into<String>) -> Self {
        self.favicon_url = url.into();
        self
    }

    /// Set the webfont stylesheet URL (builder).
    pub fn with_webfont_url(mut self, url: impl Into<String>) -> Self {
        self.webfont_url = Some(url.into());
        self
    }

    /// Set the global stylesheet (builder).
    pub fn with_global_css(mut self, css: impl Into<String>) -> Self {
        self.global_css = css.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = ExportConfig::new();
        assert!(!config.minify);
        assert_eq!(config.favicon_url, "favicon.ico");
        assert_eq!(config.webfont_url, None);
        assert!(config.global_css.contains("box-sizing"));
    }

    #[test]
    fn builder_chain() {
        let config = ExportConfig::new()
            .with_minify(true)
            .with_favicon_url("assets/icon.ico")
            .with_webfont_url("https://fonts.googleapis.com/css2?family=Inter")
            .with_global_css("body{}");
        assert!(config.minify);
        assert_eq!(config.favicon_url, "assets/icon.ico");
        assert_eq!(config.global_css, "body{}");
    }

    #[test]
    fn from_toml_fills_defaults() {
        let config = ExportConfig::from_toml_str(
            r#"
            minify = true
            webfont_url = "https://fonts.googleapis.com/css2?family=Inter&display=swap"
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            ExportConfig::new()
                .with_minify(true)
                .with_webfont_url("https://fonts.googleapis.com/css2?family=Inter&display=swap")
        );
    }

    #[test]
    fn from_toml_rejects_bad_input() {
        assert!(matches!(
            ExportConfig::from_toml_str("minify = \"yes\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ExportConfig::from_toml_str("webfont_url = \"not a url\""),
            Err(ConfigError::InvalidUrl {
                field: "webfont_url",
                ..
            })
        ));
    }

    #[test]
    fn toml_roundtrip() {
        let config = ExportConfig::new().with_webfont_url("https://example.com/fonts.css");
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(ExportConfig::from_toml_str(&text).unwrap(), config);
    }
}
