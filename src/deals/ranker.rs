//! Ordering and filtering of deal lists.
//!
//! [`rank_deals`] never mutates its input. Pinned deals always come first; within each
//! partition the [`SortKey`] decides. The sort is stable, so ties keep their input order,
//! but nothing should depend on that.
use super::{Deal, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Newest,
    Popularity,
    Distance,
    /// Any unrecognized key: only the pinned partition is applied.
    Unranked,
}

impl SortKey {
    /// Map a selector name to a key. Unknown names become [`SortKey::Unranked`].
    pub fn from_name(name: &str) -> SortKey {
        match name {
            "newest" => SortKey::Newest,
            "popularity" => SortKey::Popularity,
            "distance" => SortKey::Distance,
            _ => SortKey::Unranked,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Popularity => "popularity",
            SortKey::Distance => "distance",
            SortKey::Unranked => "unranked",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparator used by [`rank_deals`].
pub fn compare_deals(a: &Deal, b: &Deal, sort: SortKey) -> Ordering {
    b.is_pinned.cmp(&a.is_pinned).then_with(|| match sort {
        SortKey::Newest => b.created_at.cmp(&a.created_at),
        SortKey::Popularity => b.score().cmp(&a.score()),
        // distance_miles maps malformed text to +inf, so total_cmp puts it last
        SortKey::Distance => a.distance_miles().total_cmp(&b.distance_miles()),
        SortKey::Unranked => Ordering::Equal,
    })
}

/// Return a new list ordered pinned-first, then by `sort`.
pub fn rank_deals(deals: &[Deal], sort: SortKey) -> Vec<Deal> {
    let mut ranked = deals.to_vec();
    ranked.sort_by(|a, b| compare_deals(a, b, sort));
    ranked
}

/// Search text and category selection from the home and saved screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFilter {
    pub query: String,
    /// `None` or `"all"` matches every category.
    pub category: Option<String>,
}

impl DealFilter {
    pub fn new(query: &str, category: &str) -> Self {
        DealFilter { query: query.to_string(), category: Some(category.to_string()) }
    }

    pub fn category(category: &str) -> Self {
        DealFilter { query: String::new(), category: Some(category.to_string()) }
    }

    pub fn matches(&self, deal: &Deal) -> bool {
        self.matches_category(deal) && self.matches_query(deal)
    }

    fn matches_category(&self, deal: &Deal) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(c) => deal.category == c,
        }
    }

    fn matches_query(&self, deal: &Deal) -> bool {
        let q = self.query.trim();
        if q.is_empty() {
            return true;
        }
        // the whole (untrimmed) query is matched, only blankness uses the trimmed form
        let needle = self.query.to_lowercase();
        deal.title.to_lowercase().contains(&needle)
            || deal.description.to_lowercase().contains(&needle)
            || deal.location.to_lowercase().contains(&needle)
    }
}

pub fn filter_deals(deals: &[Deal], filter: &DealFilter) -> Vec<Deal> {
    deals.iter().filter(|d| filter.matches(d)).cloned().collect()
}

/// Deals whose distance is within `radius_miles`. Malformed distances are dropped.
pub fn within_radius(deals: &[Deal], radius_miles: f64) -> Vec<Deal> {
    deals
        .iter()
        .filter(|d| d.distance_miles() <= radius_miles)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::Votes;
    use chrono::{TimeZone, Utc};

    fn deal(id: u64, pinned: bool, distance: &str, minute: u32, up: u32, down: u32) -> Deal {
        Deal {
            id,
            title: format!("Deal {}", id),
            description: "desc".into(),
            price: "$10".into(),
            original_price: None,
            category: "food".into(),
            location: "Downtown".into(),
            distance: distance.into(),
            coordinates: None,
            image: None,
            votes: Votes::new(up, down),
            comments: 0,
            is_pinned: pinned,
            status: Default::default(),
            posted_by: "tester".into(),
            is_verified: false,
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, minute, 0).unwrap(),
            expires_on: None,
            poster_role: None,
            poster_reputation: None,
        }
    }

    fn ids(v: &[Deal]) -> Vec<u64> {
        v.iter().map(|d| d.id).collect()
    }

    #[test]
    fn sort_key_names() {
        assert_eq!(SortKey::from_name("newest"), SortKey::Newest);
        assert_eq!(SortKey::from_name("popularity"), SortKey::Popularity);
        assert_eq!(SortKey::from_name("Newest"), SortKey::Unranked);
        assert_eq!(SortKey::from_name("popular"), SortKey::Unranked);
        assert_eq!(SortKey::from_name("rating"), SortKey::Unranked);
    }

    #[test]
    fn malformed_distance_goes_last() {
        let v = vec![
            deal(1, false, "nearby", 0, 0, 0),
            deal(2, false, "3 miles", 0, 0, 0),
            deal(3, false, "0.4 miles", 0, 0, 0),
        ];
        assert_eq!(ids(&rank_deals(&v, SortKey::Distance)), vec![3, 2, 1]);
    }

    #[test]
    fn unranked_keeps_order_within_partitions() {
        let v = vec![
            deal(1, false, "1", 0, 0, 0),
            deal(2, true, "1", 0, 0, 0),
            deal(3, false, "1", 0, 0, 0),
            deal(4, true, "1", 0, 0, 0),
        ];
        assert_eq!(ids(&rank_deals(&v, SortKey::Unranked)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn filter_by_query_and_category() {
        let mut a = deal(1, false, "1", 0, 0, 0);
        a.title = "Artisan Pizza".into();
        let mut b = deal(2, false, "1", 0, 0, 0);
        b.category = "electronics".into();
        b.location = "Pizza Plaza".into();
        let v = vec![a, b];
        assert_eq!(ids(&filter_deals(&v, &DealFilter::new("PIZZA", "all"))), vec![1, 2]);
        assert_eq!(ids(&filter_deals(&v, &DealFilter::new("pizza", "food"))), vec![1]);
        assert_eq!(ids(&filter_deals(&v, &DealFilter::new("   ", "electronics"))), vec![2]);
        assert!(filter_deals(&v, &DealFilter::new("sushi", "all")).is_empty());
    }

    #[test]
    fn radius_excludes_far_and_malformed() {
        let v = vec![
            deal(1, false, "0.2 miles", 0, 0, 0),
            deal(2, false, "5 miles", 0, 0, 0),
            deal(3, false, "5.1 miles", 0, 0, 0),
            deal(4, false, "n/a", 0, 0, 0),
        ];
        assert_eq!(ids(&within_radius(&v, 5.0)), vec![1, 2]);
    }
}
