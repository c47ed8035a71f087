//! # Deals Module
//!
//! Community-submitted deals and the pure transformations screens apply to them.
//!
//! ## Components
//!
//! - [`ranker`] - pinned-first ordering, search/category filtering, nearby radius
//! - [`votes`] - counter votes for list screens, single active vote for the details screen
//! - [`details`] - state of the deal details screen (viewer vote, bookmark)
//! - [`feed`] - copy-on-write deal collection owned by a screen
//!
//! ## Ownership
//!
//! A deal list belongs to exactly one [`feed::DealFeed`]. Every change builds a new
//! collection and swaps it in whole, so earlier snapshots handed to readers never change
//! underneath them.

use crate::community::roles::UserRole;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod details;
pub mod feed;
pub mod ranker;
pub mod votes;

pub use feed::DealFeed;
pub use ranker::{rank_deals, SortKey};
pub use votes::{apply_vote, VoteDirection};

/// Category ids and display names. `all` is the "no filter" pseudo-category.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("all", "All"),
    ("electronics", "Electronics"),
    ("food", "Food & Dining"),
    ("clothing", "Clothing"),
    ("home", "Home & Garden"),
    ("automotive", "Automotive"),
    ("services", "Services"),
];

pub const ALL_CATEGORIES: &str = "all";

/// Whether `id` names a category a deal may be posted under (`all` excluded).
pub fn is_postable_category(id: &str) -> bool {
    id != ALL_CATEGORIES && CATEGORIES.iter().any(|(c, _)| *c == id)
}

pub fn category_name(id: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|(c, _)| *c == id).map(|(_, n)| *n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Votes {
    pub up: u32,
    pub down: u32,
}

impl Votes {
    pub fn new(up: u32, down: u32) -> Self {
        Votes { up, down }
    }

    /// Net score, `up - down`.
    pub fn score(&self) -> i64 {
        i64::from(self.up) - i64::from(self.down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: u64,
    pub title: String,
    pub description: String,
    /// Free text, e.g. "$149.99" or "Starting $12.99".
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    pub category: String,
    pub location: String,
    /// Free text, e.g. "0.5 miles". Only the leading number is used.
    pub distance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub votes: Votes,
    #[serde(default)]
    pub comments: u32,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub status: DealStatus,
    pub posted_by: String,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    /// Last day the deal is valid, when the poster gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_reputation: Option<f64>,
}

impl Deal {
    pub fn score(&self) -> i64 {
        self.votes.score()
    }

    /// Leading number of the distance text, with unparseable text mapped to +inf so it
    /// sorts last and never falls inside a radius.
    pub fn distance_miles(&self) -> f64 {
        leading_float(&self.distance).unwrap_or(f64::INFINITY)
    }

    /// Percent saved versus the original price, rounded. `None` unless both prices read
    /// as numbers and the result is an actual saving.
    pub fn discount_percentage(&self) -> Option<i64> {
        let original = self.original_price.as_deref().and_then(money_value)?;
        let price = money_value(&self.price)?;
        if original <= 0.0 {
            return None;
        }
        let pct = ((1.0 - price / original) * 100.0).round() as i64;
        (pct > 0).then_some(pct)
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expires_on.map_or(false, |last| today > last)
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created_at)
    }

    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        time_ago(self.age(now))
    }
}

/// Parse the longest numeric prefix of `s` the way a lenient float reader does:
/// leading whitespace, optional sign, digits with optional fraction, optional exponent.
/// Returns `None` when no digits lead the text.
pub fn leading_float(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    t[..end].parse::<f64>().ok()
}

/// Price text without `$` and thousands separators, read as a leading float.
fn money_value(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    leading_float(&cleaned)
}

/// "Just now", "5 minutes ago", "1 hour ago", "3 days ago".
pub fn time_ago(age: Duration) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    let (n, unit) = if minutes < 60 {
        (minutes, "minute")
    } else if minutes < 60 * 24 {
        (age.num_hours(), "hour")
    } else {
        (age.num_days(), "day")
    };
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
