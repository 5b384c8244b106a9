use pagebuilder_designer::DesignerConfig;
use pagebuilder_gateway::{ShopCredentials, DEFAULT_API_VERSION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "pagebuilder.config.json";

/// Pagebuilder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Page data backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Quiet period before raw text is parsed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_designer_port")]
    pub designer_port: u16,

    /// Unset means requests never time out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Shop used for product carousels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop: Option<ShopConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    pub domain: String,
    pub access_token: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_designer_port() -> u16 {
    3000
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn shop_credentials(&self) -> Option<ShopCredentials> {
        self.shop.as_ref().map(|shop| ShopCredentials {
            domain: shop.domain.clone(),
            access_token: shop.access_token.clone(),
            api_version: shop.api_version.clone(),
        })
    }

    pub fn designer_config(&self) -> DesignerConfig {
        DesignerConfig {
            backend_url: self.backend_url.clone(),
            port: self.designer_port,
            debounce: Duration::from_millis(self.debounce_ms),
            request_timeout: self.request_timeout(),
            shop: self.shop_credentials(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            debounce_ms: default_debounce_ms(),
            designer_port: default_designer_port(),
            request_timeout_secs: None,
            shop: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "backendUrl": "http://api.internal:8080",
            "debounceMs": 150,
            "requestTimeoutSecs": 10,
            "shop": { "domain": "demo.myshopify.com", "accessToken": "shpat_x" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.backend_url, "http://api.internal:8080");
        assert_eq!(config.designer_port, 3000);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));

        let shop = config.shop_credentials().unwrap();
        assert_eq!(shop.api_version, DEFAULT_API_VERSION);

        let designer = config.designer_config();
        assert_eq!(designer.debounce, Duration::from_millis(150));
        assert_eq!(designer.shop, Some(shop));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend_url, "http://localhost:5000");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.request_timeout(), None);

        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("shop").is_none());
        assert_eq!(json["designerPort"], 3000);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();
        assert_eq!(Config::load(&cwd).unwrap(), Config::default());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "designerPort": 4100 }"#,
        )
        .unwrap();
        let config = Config::load(&cwd).unwrap();
        assert_eq!(config.designer_port, 4100);
        assert_eq!(config.backend_url, "http://localhost:5000");

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();
        assert!(Config::load(&cwd).is_err());
    }
}
