//! # SpicyBeats - Community Deals Core
//!
//! SpicyBeats is a community deals app: members share local deals, vote on them and browse
//! them by freshness, popularity or distance. This crate holds the app's core logic.
//!
//! ## Features
//!
//! - **Role-based privileges**: seven roles resolved against reputation into a fixed table.
//! - **Deal ranking**: pinned deals first, then newest, most popular or nearest.
//! - **Voting**: counter votes on list screens, one active vote on the details screen.
//! - **Posting**: validated submissions with daily quotas and moderation routing.
//! - **Administration**: bans, the moderation queue, categories, banners and settings.
//! - **Alerts**: per-category alert preferences and an inbox.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spicybeats::config::Config;
//! use spicybeats::deals::DealFeed;
//! use spicybeats::seed::builtin_seeds;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let feed = DealFeed::new("home", builtin_seeds()?.home);
//!     let ranked = feed.view(&Default::default(), config.feed.sort_key());
//!     println!("{} deals", ranked.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`community`] - roles, sessions, permission prompts, posting and administration
//! - [`deals`] - deal records, ranking, voting and screen-owned feeds
//! - [`alerts`] - alert preferences and inbox
//! - [`seed`] - built-in demo data and seed file loaders
//! - [`config`] - configuration management
//! - [`validation`] - input sanitization and field rules
//! - [`logutil`] - log-safe rendering of user text

pub mod alerts;
pub mod community;
pub mod config;
pub mod deals;
pub mod logutil;
pub mod seed;
pub mod validation;
