//! ============================================================================
//! Config & Secrets Loading
//! ============================================================================
//! Two TOML sources:
//! - `config.toml`: `[config]` table with the page defaults
//! - `secrets.toml`: API credentials, APP_PASSWORD, optional `[config]`
//!   table overriding the defaults key by key
//! Required secrets fall back to environment variables of the same name.
//! ============================================================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, XpostError};

/// Name of the table holding page configuration in both files
const CONFIG_TABLE: &str = "config";

pub const CONSUMER_KEY: &str = "CONSUMER_KEY";
pub const CONSUMER_SECRET: &str = "CONSUMER_SECRET";
pub const ACCESS_TOKEN: &str = "ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET: &str = "ACCESS_TOKEN_SECRET";
pub const APP_PASSWORD: &str = "APP_PASSWORD";

// ============================================================================
// Page Configuration
// ============================================================================

/// Page configuration, immutable once loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub page_title: String,
    pub textarea_max_chars: usize,
    pub textarea_height: u32,
    pub textarea_font_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_title: "xpost".to_string(),
            textarea_max_chars: 280,
            textarea_height: 100,
            textarea_font_size: 16,
        }
    }
}

impl AppConfig {
    /// Load `[config]` from the base file and apply the optional override
    pub fn load(base_path: &Path, overrides: Option<&toml::Table>) -> Result<Self> {
        let content = std::fs::read_to_string(base_path).map_err(|e| {
            XpostError::Config(format!("cannot read {}: {}", base_path.display(), e))
        })?;
        let config = Self::from_toml_str(&content, overrides)?;
        info!("Loaded config from {}", base_path.display());
        Ok(config)
    }

    /// Parse a base config document and apply the optional override
    pub fn from_toml_str(content: &str, overrides: Option<&toml::Table>) -> Result<Self> {
        let mut doc: toml::Table = toml::from_str(content)
            .map_err(|e| XpostError::Config(format!("invalid config file: {}", e)))?;

        let mut table = match doc.remove(CONFIG_TABLE) {
            Some(toml::Value::Table(table)) => table,
            Some(_) => {
                return Err(XpostError::Config(
                    "[config] must be a table".to_string(),
                ))
            }
            None => {
                return Err(XpostError::Config(
                    "missing [config] table in config file".to_string(),
                ))
            }
        };

        if let Some(overrides) = overrides {
            for (key, value) in overrides {
                debug!("Config override: {}", key);
                table.insert(key.clone(), value.clone());
            }
        }

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| XpostError::Config(format!("invalid [config]: {}", e)))
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// OAuth 1.0a user-context credentials. Debug output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &"<redacted>")
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

// ============================================================================
// Secret Store
// ============================================================================

/// Secrets file contents plus environment fallback
pub struct SecretStore {
    table: toml::Table,
    env: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl SecretStore {
    /// Load secrets from a TOML file; a missing file leaves only the environment
    pub fn load(path: &Path) -> Result<Self> {
        let table = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                XpostError::Config(format!("cannot read {}: {}", path.display(), e))
            })?;
            let table = toml::from_str(&content)
                .map_err(|e| XpostError::Config(format!("invalid secrets file: {}", e)))?;
            info!("Loaded secrets from {}", path.display());
            table
        } else {
            warn!(
                "Secrets file {} not found, reading secrets from environment",
                path.display()
            );
            toml::Table::new()
        };

        Ok(Self::from_table(table))
    }

    /// Secrets from a parsed table, with process environment fallback
    pub fn from_table(table: toml::Table) -> Self {
        Self::with_env(table, |key| std::env::var(key).ok())
    }

    /// Secrets from a parsed table with a custom fallback lookup
    pub fn with_env<F>(table: toml::Table, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            table,
            env: Box::new(env),
        }
    }

    /// Parse a secrets document, no environment fallback
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table = toml::from_str(content)
            .map_err(|e| XpostError::Config(format!("invalid secrets file: {}", e)))?;
        Ok(Self::with_env(table, |_| None))
    }

    fn require(&self, key: &str) -> Result<String> {
        let value = match self.table.get(key) {
            Some(toml::Value::String(s)) => Some(s.clone()),
            Some(_) => {
                return Err(XpostError::Config(format!("secret {} must be a string", key)))
            }
            None => (self.env)(key),
        };

        value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| XpostError::Config(format!("missing required secret {}", key)))
    }

    /// The four API credentials; any missing one is fatal
    pub fn credentials(&self) -> Result<Credentials> {
        Ok(Credentials {
            consumer_key: self.require(CONSUMER_KEY)?,
            consumer_secret: self.require(CONSUMER_SECRET)?,
            access_token: self.require(ACCESS_TOKEN)?,
            access_token_secret: self.require(ACCESS_TOKEN_SECRET)?,
        })
    }

    /// The shared password guarding the app
    pub fn app_password(&self) -> Result<String> {
        self.require(APP_PASSWORD)
    }

    /// Optional `[config]` override table
    pub fn config_override(&self) -> Option<&toml::Table> {
        self.table.get(CONFIG_TABLE).and_then(|v| v.as_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
[config]
page_title = "xpost"
textarea_max_chars = 280
textarea_height = 100
textarea_font_size = 16
"#;

    const SECRETS: &str = r#"
CONSUMER_KEY = "ck"
CONSUMER_SECRET = "cs"
ACCESS_TOKEN = "at"
ACCESS_TOKEN_SECRET = "ats"
APP_PASSWORD = "pw"

[config]
page_title = "My poster"
textarea_font_size = 20
"#;

    #[test]
    fn test_base_config() {
        let config = AppConfig::from_toml_str(BASE, None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_override_replaces_only_named_keys() {
        let secrets = SecretStore::from_toml_str(SECRETS).unwrap();
        let config = AppConfig::from_toml_str(BASE, secrets.config_override()).unwrap();

        assert_eq!(config.page_title, "My poster");
        assert_eq!(config.textarea_font_size, 20);
        assert_eq!(config.textarea_max_chars, 280);
        assert_eq!(config.textarea_height, 100);
    }

    #[test]
    fn test_override_can_supply_missing_base_key() {
        let base = "[config]\npage_title = \"t\"\ntextarea_max_chars = 10\ntextarea_height = 5\n";
        let overrides: toml::Table = toml::from_str("textarea_font_size = 12").unwrap();
        let config = AppConfig::from_toml_str(base, Some(&overrides)).unwrap();
        assert_eq!(config.textarea_font_size, 12);
    }

    #[test]
    fn test_missing_config_table() {
        let err = AppConfig::from_toml_str("title = \"x\"", None).unwrap_err();
        assert!(matches!(err, XpostError::Config(_)));
    }

    #[test]
    fn test_missing_or_ill_typed_key() {
        let base = "[config]\npage_title = \"t\"\ntextarea_max_chars = 10\ntextarea_height = 5\n";
        assert!(matches!(
            AppConfig::from_toml_str(base, None),
            Err(XpostError::Config(_))
        ));

        let base = "[config]\npage_title = \"t\"\ntextarea_max_chars = \"ten\"\ntextarea_height = 5\ntextarea_font_size = 1\n";
        assert!(matches!(
            AppConfig::from_toml_str(base, None),
            Err(XpostError::Config(_))
        ));
    }

    #[test]
    fn test_missing_base_file() {
        let err = AppConfig::load(Path::new("/nonexistent/xpost/config.toml"), None).unwrap_err();
        assert!(matches!(err, XpostError::Config(_)));
    }

    #[test]
    fn test_credentials_and_password() {
        let secrets = SecretStore::from_toml_str(SECRETS).unwrap();
        let creds = secrets.credentials().unwrap();
        assert_eq!(creds.consumer_key, "ck");
        assert_eq!(creds.consumer_secret, "cs");
        assert_eq!(creds.access_token, "at");
        assert_eq!(creds.access_token_secret, "ats");
        assert_eq!(secrets.app_password().unwrap(), "pw");
    }

    #[test]
    fn test_missing_credential_is_fatal() {
        let secrets = SecretStore::from_toml_str("CONSUMER_KEY = \"ck\"").unwrap();
        match secrets.credentials() {
            Err(XpostError::Config(msg)) => assert!(msg.contains(CONSUMER_SECRET)),
            other => panic!("expected config error, got {:?}", other),
        }
        assert!(secrets.app_password().is_err());
        assert!(secrets.config_override().is_none());
    }

    #[test]
    fn test_env_fallback() {
        let table: toml::Table = toml::from_str("CONSUMER_KEY = \"from-file\"").unwrap();
        let secrets = SecretStore::with_env(table, |key| Some(format!("env-{}", key)));

        let creds = secrets.credentials().unwrap();
        assert_eq!(creds.consumer_key, "from-file");
        assert_eq!(creds.access_token, "env-ACCESS_TOKEN");
        assert_eq!(secrets.app_password().unwrap(), "env-APP_PASSWORD");
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let secrets = SecretStore::from_toml_str(SECRETS).unwrap();
        let debug = format!("{:?}", secrets.credentials().unwrap());
        assert!(!debug.contains("\"ck\""));
        assert!(!debug.contains("ats"));
        assert!(debug.contains("<redacted>"));
    }
}
