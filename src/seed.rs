//! Seed data loaders for the built-in mock content.
//!
//! The default deals, admin data and alert inbox ship as JSON under `data/seeds/` and are
//! compiled in. The same formats can be loaded from disk (see `[seeds]` in the config) so
//! demo content can be changed without recompiling. Seed deals carry an `age_minutes`
//! field instead of a timestamp and are dated relative to load time.

use crate::alerts::DealAlert;
use crate::community::admin::AdminSeed;
use crate::community::roles::UserRole;
use crate::deals::{Coordinates, Deal, DealStatus, Votes};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const BUILTIN_DEALS: &str = include_str!("../data/seeds/deals.json");
const BUILTIN_ADMIN: &str = include_str!("../data/seeds/admin.json");
const BUILTIN_ALERTS: &str = include_str!("../data/seeds/alerts.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The saved list names a deal that is not in the home feed.
    #[error("saved deal {0} is not in the home feed")]
    UnknownSavedDeal(u64),

    #[error("seed {id} has an out of range age of {age_minutes} minutes")]
    InvalidAge { id: u64, age_minutes: i64 },
}

/// Every deal list the screens start from.
#[derive(Debug, Clone)]
pub struct DealSeeds {
    pub home: Vec<Deal>,
    pub nearby: Vec<Deal>,
    pub trending: Vec<Deal>,
    pub saved: Vec<Deal>,
    /// Deals "discovered" by pull-to-refresh, in order.
    pub refresh: Vec<Deal>,
}

#[derive(Debug, Deserialize)]
struct DealSeedFile {
    #[serde(default)]
    home: Vec<DealSeed>,
    #[serde(default)]
    nearby: Vec<DealSeed>,
    #[serde(default)]
    trending: Vec<DealSeed>,
    #[serde(default)]
    saved: Vec<u64>,
    #[serde(default)]
    refresh: Vec<DealSeed>,
}

#[derive(Debug, Deserialize)]
struct DealSeed {
    id: u64,
    title: String,
    description: String,
    price: String,
    #[serde(default)]
    original_price: Option<String>,
    category: String,
    location: String,
    distance: String,
    #[serde(default)]
    coordinates: Option<Coordinates>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    votes: Votes,
    #[serde(default)]
    comments: u32,
    #[serde(default)]
    is_pinned: bool,
    #[serde(default)]
    status: DealStatus,
    posted_by: String,
    #[serde(default)]
    is_verified: bool,
    #[serde(default)]
    age_minutes: i64,
    #[serde(default)]
    expires_on: Option<NaiveDate>,
    #[serde(default)]
    poster_role: Option<UserRole>,
    #[serde(default)]
    poster_reputation: Option<f64>,
}

/// `now` moved back by `age_minutes`; negative ages count as zero.
fn dated(now: DateTime<Utc>, id: u64, age_minutes: i64) -> Result<DateTime<Utc>, SeedError> {
    Duration::try_minutes(age_minutes.max(0))
        .and_then(|age| now.checked_sub_signed(age))
        .ok_or(SeedError::InvalidAge { id, age_minutes })
}

impl DealSeed {
    fn into_deal(self, now: DateTime<Utc>) -> Result<Deal, SeedError> {
        let created_at = dated(now, self.id, self.age_minutes)?;
        Ok(Deal {
            id: self.id,
            title: self.title,
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            location: self.location,
            distance: self.distance,
            coordinates: self.coordinates,
            image: self.image,
            votes: self.votes,
            comments: self.comments,
            is_pinned: self.is_pinned,
            status: self.status,
            posted_by: self.posted_by,
            is_verified: self.is_verified,
            created_at,
            expires_on: self.expires_on,
            poster_role: self.poster_role,
            poster_reputation: self.poster_reputation,
        })
    }
}

fn parse_json<T: DeserializeOwned>(contents: &str, origin: &str) -> Result<T, SeedError> {
    serde_json::from_str(contents)
        .map_err(|source| SeedError::Parse { origin: origin.to_string(), source })
}

fn read_file(path: &Path) -> Result<String, SeedError> {
    fs::read_to_string(path)
        .map_err(|source| SeedError::Io { path: path.display().to_string(), source })
}

/// Parse a deal seed document, dating deals relative to `now`.
pub fn deal_seeds_from_str(
    contents: &str,
    origin: &str,
    now: DateTime<Utc>,
) -> Result<DealSeeds, SeedError> {
    let file: DealSeedFile = parse_json(contents, origin)?;
    let convert = |v: Vec<DealSeed>| {
        v.into_iter().map(|s| s.into_deal(now)).collect::<Result<Vec<_>, _>>()
    };
    let home = convert(file.home)?;
    let saved = file
        .saved
        .iter()
        .map(|id| {
            home.iter()
                .find(|d| d.id == *id)
                .cloned()
                .ok_or(SeedError::UnknownSavedDeal(*id))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let seeds = DealSeeds {
        home,
        nearby: convert(file.nearby)?,
        trending: convert(file.trending)?,
        saved,
        refresh: convert(file.refresh)?,
    };
    debug!(
        "Loaded deal seeds from {}: {} home, {} nearby, {} trending, {} saved",
        origin,
        seeds.home.len(),
        seeds.nearby.len(),
        seeds.trending.len(),
        seeds.saved.len()
    );
    Ok(seeds)
}

pub fn builtin_seeds() -> Result<DealSeeds, SeedError> {
    deal_seeds_from_str(BUILTIN_DEALS, "built-in deals", Utc::now())
}

/// Load deals from a JSON file in the `data/seeds/deals.json` format.
pub fn load_deal_seeds<P: AsRef<Path>>(path: P) -> Result<DealSeeds, SeedError> {
    let path = path.as_ref();
    let contents = read_file(path)?;
    deal_seeds_from_str(&contents, &path.display().to_string(), Utc::now())
}

pub fn builtin_admin_seed() -> Result<AdminSeed, SeedError> {
    parse_json(BUILTIN_ADMIN, "built-in admin data")
}

pub fn load_admin_seed<P: AsRef<Path>>(path: P) -> Result<AdminSeed, SeedError> {
    let path = path.as_ref();
    parse_json(&read_file(path)?, &path.display().to_string())
}

#[derive(Debug, Deserialize)]
struct AlertSeed {
    id: u64,
    title: String,
    description: String,
    #[serde(default)]
    age_minutes: i64,
    #[serde(default)]
    is_read: bool,
    category: String,
}

fn alerts_from_str(contents: &str, origin: &str) -> Result<Vec<DealAlert>, SeedError> {
    let now = Utc::now();
    let seeds: Vec<AlertSeed> = parse_json(contents, origin)?;
    seeds
        .into_iter()
        .map(|s| {
            Ok(DealAlert {
                received_at: dated(now, s.id, s.age_minutes)?,
                id: s.id,
                title: s.title,
                description: s.description,
                is_read: s.is_read,
                category: s.category,
            })
        })
        .collect()
}

pub fn builtin_alerts() -> Result<Vec<DealAlert>, SeedError> {
    alerts_from_str(BUILTIN_ALERTS, "built-in alerts")
}

pub fn load_alerts<P: AsRef<Path>>(path: P) -> Result<Vec<DealAlert>, SeedError> {
    let path = path.as_ref();
    alerts_from_str(&read_file(path)?, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builtin_seeds_parse() {
        let seeds = builtin_seeds().unwrap();
        assert_eq!(seeds.home.len(), 5);
        assert_eq!(seeds.nearby.len(), 3);
        assert_eq!(seeds.trending.len(), 2);
        assert_eq!(seeds.saved.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(seeds.refresh.len(), 1);
        assert!(seeds.home[0].is_pinned);
    }

    #[test]
    fn ages_become_timestamps() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let seeds = deal_seeds_from_str(BUILTIN_DEALS, "test", now).unwrap();
        assert_eq!(seeds.home[0].created_at, now - Duration::hours(2));
        assert_eq!(seeds.home[0].time_ago(now), "2 hours ago");
    }

    #[test]
    fn unknown_saved_id_is_an_error() {
        let doc = r#"{"home": [], "saved": [42]}"#;
        let err = deal_seeds_from_str(doc, "test", Utc::now()).unwrap_err();
        assert!(matches!(err, SeedError::UnknownSavedDeal(42)));
    }

    #[test]
    fn malformed_json_reports_origin() {
        let err = deal_seeds_from_str("{", "broken.json", Utc::now()).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn builtin_admin_and_alerts_parse() {
        let admin = builtin_admin_seed().unwrap();
        assert_eq!(admin.users.len(), 5);
        assert_eq!(admin.pending_deals.len(), 3);
        let alerts = builtin_alerts().unwrap();
        assert_eq!(alerts.iter().filter(|a| !a.is_read).count(), 1);
    }
}
