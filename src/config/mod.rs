//! # Configuration Management Module
//!
//! Typed TOML configuration for SpicyBeats.
//!
//! ## Configuration Structure
//!
//! - [`AppConfig`] - app name and demo sign-in reputation
//! - [`FeedConfig`] - default sort and nearby radius
//! - [`ModerationSettings`] - system settings editable from the admin console
//! - [`AlertPreferences`](crate::alerts::AlertPreferences) - default alert preferences
//! - [`LoggingConfig`] - log level and optional log files
//! - [`SeedConfig`] - optional seed file overrides
//!
//! Every section except `[app]` and `[logging]` may be omitted and falls back to defaults.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spicybeats::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("App: {}", config.app.name);
//!     println!("Default sort: {}", config.feed.sort_key());
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [app]
//! name = "SpicyBeats"
//! demo_reputation = 4.2
//!
//! [feed]
//! default_sort = "newest"
//! nearby_radius_miles = 5.0
//! radius_options = [1.0, 2.0, 5.0, 10.0, 25.0]
//!
//! [moderation]
//! auto_approve_verified_users = true
//! require_moderation = true
//! allow_guest_posting = false
//! max_daily_posts = 5
//! min_reputation_to_post = 2.0
//!
//! [logging]
//! level = "info"
//! file = "spicybeats.log"
//! ```

use crate::alerts::AlertPreferences;
use crate::deals::SortKey;
use anyhow::{anyhow, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    /// Reputation given to demo sign-ins.
    #[serde(default = "default_demo_reputation")]
    pub demo_reputation: f64,
}

fn default_demo_reputation() -> f64 {
    4.2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// One of "newest", "popularity", "distance". Anything else leaves the order as-is.
    pub default_sort: String,
    pub nearby_radius_miles: f64,
    pub radius_options: Vec<f64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_sort: "newest".to_string(),
            nearby_radius_miles: 5.0,
            radius_options: vec![1.0, 2.0, 5.0, 10.0, 25.0],
        }
    }
}

impl FeedConfig {
    pub fn sort_key(&self) -> SortKey {
        let key = SortKey::from_name(&self.default_sort);
        if key == SortKey::Unranked {
            warn!("Unknown default_sort '{}', deals will not be reordered", self.default_sort);
        }
        key
    }

    /// The configured radius when it is one of the offered options, otherwise the
    /// closest offered option. With no options the configured value is used as-is.
    pub fn nearby_radius(&self) -> f64 {
        if self.radius_options.iter().any(|r| *r == self.nearby_radius_miles) {
            return self.nearby_radius_miles;
        }
        self.radius_options
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - self.nearby_radius_miles)
                    .abs()
                    .total_cmp(&(b - self.nearby_radius_miles).abs())
            })
            .unwrap_or(self.nearby_radius_miles)
    }
}

/// System settings administrators can change at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationSettings {
    /// When false, verified members never skip review even at high reputation.
    pub auto_approve_verified_users: bool,
    /// When false, every accepted post goes live immediately.
    pub require_moderation: bool,
    pub allow_guest_posting: bool,
    pub max_daily_posts: u32,
    pub min_reputation_to_post: f64,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            auto_approve_verified_users: true,
            require_moderation: true,
            allow_guest_posting: false,
            max_daily_posts: 5,
            min_reputation_to_post: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    #[serde(default)]
    pub security_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deals_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub moderation: ModerationSettings,
    #[serde(default)]
    pub alerts: AlertPreferences,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub seeds: SeedConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app: AppConfig {
                name: "SpicyBeats".to_string(),
                demo_reputation: default_demo_reputation(),
            },
            feed: FeedConfig::default(),
            moderation: ModerationSettings::default(),
            alerts: AlertPreferences::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("spicybeats.log".to_string()),
                security_file: Some("spicybeats-security.log".to_string()),
            },
            seeds: SeedConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let toml_src = r#"
            [app]
            name = "Test Deals"

            [logging]
            level = "debug"
        "#;
        let cfg: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(cfg.app.name, "Test Deals");
        assert_eq!(cfg.app.demo_reputation, 4.2);
        assert_eq!(cfg.feed.sort_key(), SortKey::Newest);
        assert_eq!(cfg.moderation, ModerationSettings::default());
        assert_eq!(cfg.alerts, AlertPreferences::default());
        assert!(cfg.logging.file.is_none());
        assert!(cfg.seeds.deals_file.is_none());
    }

    #[test]
    fn test_unknown_sort_is_unranked() {
        let feed = FeedConfig { default_sort: "rating".into(), ..FeedConfig::default() };
        assert_eq!(feed.sort_key(), SortKey::Unranked);
    }

    #[test]
    fn test_nearby_radius_snaps_to_option() {
        let mut feed = FeedConfig::default();
        assert_eq!(feed.nearby_radius(), 5.0);
        feed.nearby_radius_miles = 8.0;
        assert_eq!(feed.nearby_radius(), 10.0);
        feed.radius_options.clear();
        assert_eq!(feed.nearby_radius(), 8.0);
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.app.name, "SpicyBeats");
        assert_eq!(back.feed.radius_options, vec![1.0, 2.0, 5.0, 10.0, 25.0]);
        assert_eq!(back.moderation.max_daily_posts, 5);
    }
}
