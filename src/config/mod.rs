//! Configuration module for the storefront

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;
use url::Url;

/// 10 MiB, the upload ceiling when a template does not specify one
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub uploads: UploadSettings,
    pub logging: LoggingSettings,
}

/// Backend API location and transport settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Explicit base URL; wins over host-based selection when set
    pub base_url: Option<String>,
    /// Host the storefront is served from
    pub host: String,
    /// Host name that counts as a development deployment
    pub dev_host: String,
    /// API origin used on the development host
    pub dev_base_url: String,
    /// API base used everywhere else
    pub fallback_base_url: String,
    pub products_endpoint: String,
    pub upload_endpoint: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Accepted file types and size limits for design uploads
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// MIME types accepted by the main designer upload
    pub primary_mime_types: Vec<String>,
    /// MIME types accepted by the auxiliary image slots
    pub secondary_mime_types: Vec<String>,
    /// Used when the selected template carries no limit
    pub default_max_file_size: u64,
    /// Fixed limit for the auxiliary image slots
    pub secondary_max_file_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default directive when RUST_LOG is not set
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with STOREFRONT_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // STOREFRONT_API__HOST, STOREFRONT_UPLOADS__DEFAULT_MAX_FILE_SIZE, ...
            .add_source(
                Environment::with_prefix("STOREFRONT")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("uploads.primary_mime_types")
                    .with_list_parse_key("uploads.secondary_mime_types")
            );

        builder.build()?.try_deserialize()
    }
}

impl ApiSettings {
    /// Resolve the API base URL for the configured host.
    ///
    /// The result always ends with `/` so endpoint names join onto it
    /// instead of replacing its last path segment.
    pub fn resolve_base_url(&self) -> Result<Url, url::ParseError> {
        let raw = match &self.base_url {
            Some(explicit) if !explicit.trim().is_empty() => explicit.trim(),
            _ if self.host.eq_ignore_ascii_case(&self.dev_host) => self.dev_base_url.as_str(),
            _ => self.fallback_base_url.as_str(),
        };

        if raw.ends_with('/') {
            Url::parse(raw)
        } else {
            Url::parse(&format!("{}/", raw))
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api: ApiSettings::default(),
            uploads: UploadSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: None,
            host: "localhost".to_string(),
            dev_host: "localhost".to_string(),
            dev_base_url: "http://localhost:8000".to_string(),
            fallback_base_url: "http://localhost/Shopify/backend/api/".to_string(),
            products_endpoint: "products.php".to_string(),
            upload_endpoint: "upload-designs.php".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        UploadSettings {
            primary_mime_types: vec!["image/png".to_string()],
            secondary_mime_types: vec![
                "image/png".to_string(),
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
            ],
            default_max_file_size: DEFAULT_MAX_FILE_SIZE,
            secondary_max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: "print_shop=info".to_string(),
            json: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_host_uses_dev_origin() {
        let api = ApiSettings::default();
        let url = api.resolve_base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/");
        assert_eq!(
            url.join(&api.products_endpoint).unwrap().as_str(),
            "http://localhost:8000/products.php"
        );
    }

    #[test]
    fn test_other_host_uses_fallback_path() {
        let api = ApiSettings {
            host: "shop.example.com".to_string(),
            ..Default::default()
        };
        let url = api.resolve_base_url().unwrap();
        assert_eq!(
            url.join(&api.upload_endpoint).unwrap().as_str(),
            "http://localhost/Shopify/backend/api/upload-designs.php"
        );
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let api = ApiSettings {
            base_url: Some("https://api.example.com/v1".to_string()),
            ..Default::default()
        };
        let url = api.resolve_base_url().unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
    }

    #[test]
    fn test_upload_defaults() {
        let uploads = UploadSettings::default();
        assert_eq!(uploads.primary_mime_types, vec!["image/png"]);
        assert!(uploads.secondary_mime_types.contains(&"image/jpeg".to_string()));
        assert_eq!(uploads.default_max_file_size, 10_485_760);
    }
}
