//! Account and delivery context
//!
//! Resolves the cloud name and CDN settings a player is configured with.
//! Environment values form the base; a per-player `config` prop overrides
//! individual fields.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variables read by [`EnvAccountContext::from_env`].
/// Each is also accepted with a `NEXT_PUBLIC_` prefix.
pub const ENV_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
pub const ENV_SECURE_DISTRIBUTION: &str = "CLOUDINARY_SECURE_DISTRIBUTION";
pub const ENV_PRIVATE_CDN: &str = "CLOUDINARY_PRIVATE_CDN";

/// Account configuration as passed through the `config` prop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloudConfig {
    #[serde(default)]
    pub cloud: CloudSection,
    #[serde(default)]
    pub url: UrlSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudSection {
    pub cloud_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSection {
    pub secure_distribution: Option<String>,
    pub private_cdn: Option<bool>,
}

impl CloudConfig {
    /// Config with only a cloud name set
    pub fn with_cloud_name(cloud_name: impl Into<String>) -> Self {
        Self {
            cloud: CloudSection {
                cloud_name: Some(cloud_name.into()),
            },
            ..Default::default()
        }
    }

    /// Overlay the fields set in `other` on top of `self`
    pub fn merged_with(&self, other: &CloudConfig) -> CloudConfig {
        CloudConfig {
            cloud: CloudSection {
                cloud_name: other
                    .cloud
                    .cloud_name
                    .clone()
                    .or_else(|| self.cloud.cloud_name.clone()),
            },
            url: UrlSection {
                secure_distribution: other
                    .url
                    .secure_distribution
                    .clone()
                    .or_else(|| self.url.secure_distribution.clone()),
                private_cdn: other.url.private_cdn.or(self.url.private_cdn),
            },
        }
    }
}

/// Resolved account fields merged into every player configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountContext {
    pub cloud_name: Option<String>,
    pub secure_distribution: Option<String>,
    pub private_cdn: bool,
}

impl From<CloudConfig> for AccountContext {
    fn from(config: CloudConfig) -> Self {
        Self {
            cloud_name: config.cloud.cloud_name,
            secure_distribution: config.url.secure_distribution,
            private_cdn: config.url.private_cdn.unwrap_or(false),
        }
    }
}

/// Supplies the account context for a player
pub trait AccountContextProvider {
    fn resolve(&self, overrides: Option<&CloudConfig>) -> AccountContext;
}

/// Account context backed by a base config, usually read from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvAccountContext {
    base: CloudConfig,
}

impl EnvAccountContext {
    pub fn new(base: CloudConfig) -> Self {
        Self { base }
    }

    /// Read the base config from environment variables
    pub fn from_env() -> Self {
        let base = CloudConfig {
            cloud: CloudSection {
                cloud_name: env_var(ENV_CLOUD_NAME),
            },
            url: UrlSection {
                secure_distribution: env_var(ENV_SECURE_DISTRIBUTION),
                private_cdn: env_var(ENV_PRIVATE_CDN).map(|v| parse_bool(&v)),
            },
        };
        debug!(cloud_name = ?base.cloud.cloud_name, "Loaded account config from environment");
        Self { base }
    }

    pub fn base(&self) -> &CloudConfig {
        &self.base
    }
}

impl AccountContextProvider for EnvAccountContext {
    fn resolve(&self, overrides: Option<&CloudConfig>) -> AccountContext {
        match overrides {
            Some(overrides) => self.base.merged_with(overrides).into(),
            None => self.base.clone().into(),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .or_else(|_| std::env::var(format!("NEXT_PUBLIC_{}", name)))
        .ok()
        .filter(|v| !v.is_empty())
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_per_field() {
        let base = CloudConfig {
            cloud: CloudSection {
                cloud_name: Some("base".into()),
            },
            url: UrlSection {
                secure_distribution: Some("media.example.com".into()),
                private_cdn: Some(true),
            },
        };
        let provider = EnvAccountContext::new(base);

        let ctx = provider.resolve(Some(&CloudConfig::with_cloud_name("other")));
        assert_eq!(ctx.cloud_name.as_deref(), Some("other"));
        assert_eq!(ctx.secure_distribution.as_deref(), Some("media.example.com"));
        assert!(ctx.private_cdn);
    }

    #[test]
    fn test_no_override_uses_base() {
        let provider = EnvAccountContext::new(CloudConfig::with_cloud_name("demo"));
        let ctx = provider.resolve(None);
        assert_eq!(ctx.cloud_name.as_deref(), Some("demo"));
        assert!(!ctx.private_cdn);
    }

    #[test]
    fn test_config_deserializes_camel_case() {
        let config: CloudConfig = serde_json::from_str(
            r#"{"cloud":{"cloudName":"demo"},"url":{"privateCdn":true}}"#,
        )
        .unwrap();
        assert_eq!(config.cloud.cloud_name.as_deref(), Some("demo"));
        assert_eq!(config.url.private_cdn, Some(true));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("no"));
    }
}
