use chrono::{Duration, TimeZone, Utc};
use spicybeats::deals::feed::DealFeed;
use spicybeats::deals::ranker::{rank_deals, DealFilter, SortKey};
use spicybeats::deals::{Deal, Votes};
use spicybeats::seed::builtin_seeds;

fn deal(id: u64, minutes: i64, up: u32, down: u32) -> Deal {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
    let mut d = builtin_seeds().unwrap().home[0].clone();
    d.id = id;
    d.is_pinned = false;
    d.created_at = base + Duration::minutes(minutes);
    d.votes = Votes::new(up, down);
    d
}

fn ids(deals: &[Deal]) -> Vec<u64> {
    deals.iter().map(|d| d.id).collect()
}

#[test]
fn newest_and_popularity_disagree() {
    let a = deal(1, 0, 5, 1);
    let b = deal(2, 1, 1, 0);
    let input = vec![a, b];
    assert_eq!(ids(&rank_deals(&input, SortKey::Newest)), vec![2, 1]);
    assert_eq!(ids(&rank_deals(&input, SortKey::Popularity)), vec![1, 2]);
    // input untouched
    assert_eq!(ids(&input), vec![1, 2]);
}

#[test]
fn pinned_first_for_every_key() {
    let home = builtin_seeds().unwrap().home;
    for key in [SortKey::Newest, SortKey::Popularity, SortKey::Distance, SortKey::Unranked] {
        let ranked = rank_deals(&home, key);
        let first_unpinned = ranked.iter().position(|d| !d.is_pinned).unwrap_or(ranked.len());
        assert!(ranked[first_unpinned..].iter().all(|d| !d.is_pinned), "{}", key);
        assert_eq!(ranked.len(), home.len());
    }
}

#[test]
fn malformed_distance_sorts_last() {
    let mut near = deal(1, 0, 0, 0);
    near.distance = "0.3 miles".into();
    let mut unknown = deal(2, 0, 0, 0);
    unknown.distance = "somewhere".into();
    let mut far = deal(3, 0, 0, 0);
    far.distance = "12 miles".into();
    let ranked = rank_deals(&[unknown, far, near], SortKey::Distance);
    assert_eq!(ids(&ranked), vec![1, 3, 2]);
}

#[test]
fn seed_home_by_distance() {
    let ranked = rank_deals(&builtin_seeds().unwrap().home, SortKey::Distance);
    assert_eq!(ids(&ranked), vec![1, 2, 5, 3, 4]);
}

#[test]
fn unknown_key_only_partitions() {
    let mut pinned = deal(9, 0, 0, 0);
    pinned.is_pinned = true;
    let input = vec![deal(1, 5, 0, 0), deal(2, 9, 0, 0), pinned];
    assert_eq!(ids(&rank_deals(&input, SortKey::from_name("rating"))), vec![9, 1, 2]);
}

#[test]
fn empty_and_single_lists() {
    assert!(rank_deals(&[], SortKey::Newest).is_empty());
    let one = vec![deal(7, 0, 1, 1)];
    assert_eq!(rank_deals(&one, SortKey::Popularity), one);
}

#[test]
fn search_then_rank() {
    let feed = DealFeed::new("home", builtin_seeds().unwrap().home);
    let all = feed.view(&DealFilter::new("   ", "all"), SortKey::Newest);
    assert_eq!(all.len(), 5);
    let food = feed.view(&DealFilter::category("food"), SortKey::Popularity);
    assert!(food.iter().all(|d| d.category == "food"));
    let none = feed.view(&DealFilter::new("no such deal anywhere", "all"), SortKey::Newest);
    assert!(none.is_empty());
}

#[test]
fn nearby_excludes_far_and_malformed() {
    let feed = DealFeed::new("nearby", builtin_seeds().unwrap().nearby);
    let close = feed.nearby(0.5);
    assert_eq!(ids(&close), vec![101, 102]);
    assert!(close.iter().all(|d| d.distance_miles() <= 0.5));
}
