use spicybeats::community::prompt::ActionStyle;
use spicybeats::deals::DealFeed;
use spicybeats::seed::builtin_seeds;

#[test]
fn remove_asks_then_confirms() {
    let mut saved = DealFeed::new("saved", builtin_seeds().unwrap().saved);
    let ask = saved.confirm_remove(1).unwrap();
    assert_eq!(ask.title, "Remove from Saved");
    assert_eq!(ask.actions[0].style, ActionStyle::Cancel);
    assert_eq!(ask.actions[1].style, ActionStyle::Destructive);

    let done = saved.unsave(1).unwrap();
    assert_eq!(done.title, "Removed");
    assert!(saved.get(1).is_none());
    assert_eq!(saved.len(), 1);
    assert!(saved.unsave(1).is_none());
}

#[test]
fn clear_all_asks_then_confirms() {
    let mut saved = DealFeed::new("saved", builtin_seeds().unwrap().saved);
    assert_eq!(saved.confirm_clear().unwrap().actions[1].label, "Clear All");
    assert_eq!(saved.unsave_all().unwrap().title, "Cleared");
    assert!(saved.is_empty());
    assert!(saved.confirm_clear().is_none());
}

#[test]
fn refresh_prepends_found_deal() {
    let seeds = builtin_seeds().unwrap();
    let found = seeds.refresh[0].clone();
    let mut home = DealFeed::new("home", seeds.home);
    let before = home.snapshot();
    let prompt = home.refresh(found.clone());
    assert_eq!(prompt.title, "🎉 New Deals Found!");
    assert_eq!(prompt.message, "We found 1 new deal in your area!");
    assert_eq!(home.snapshot().deals[0].id, found.id);
    assert_eq!(home.len(), before.len() + 1);
    assert_eq!(home.version(), before.version + 1);
}
