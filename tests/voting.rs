use spicybeats::community::prompt::Denial;
use spicybeats::community::roles::UserRole;
use spicybeats::community::session::Session;
use spicybeats::deals::details::DealDetails;
use spicybeats::deals::{apply_vote, DealFeed, VoteDirection};
use spicybeats::seed::builtin_seeds;

fn member(role: UserRole) -> Session {
    let mut s = Session::guest();
    s.sign_in("voter", role, 3.0);
    s
}

#[test]
fn apply_vote_is_a_counter() {
    let deal = builtin_seeds().unwrap().home[2].clone();
    let once = apply_vote(&deal, VoteDirection::Up);
    let twice = apply_vote(&once, VoteDirection::Up);
    assert_eq!(once.votes.up, deal.votes.up + 1);
    assert_eq!(twice.votes.up, deal.votes.up + 2);
    assert_eq!(twice.votes.down, deal.votes.down);
    assert_eq!((twice.id, &twice.title), (deal.id, &deal.title));

    let down = apply_vote(&deal, VoteDirection::Down);
    assert_eq!(down.votes.down, deal.votes.down + 1);
    assert_eq!(down.votes.up, deal.votes.up);
}

#[test]
fn vote_directions_parse() {
    assert_eq!("up".parse::<VoteDirection>().unwrap(), VoteDirection::Up);
    assert_eq!("Downvote".parse::<VoteDirection>().unwrap(), VoteDirection::Down);
    assert!("sideways".parse::<VoteDirection>().is_err());
}

#[test]
fn guest_vote_is_a_no_op_with_sign_in_prompt() {
    let mut feed = DealFeed::new("home", builtin_seeds().unwrap().home);
    let before = feed.snapshot();
    let denial = feed.vote(&Session::guest(), 1, VoteDirection::Up).unwrap_err();
    assert_eq!(denial, Denial::SignInRequired { action: "vote on deals" });
    assert_eq!(feed.snapshot().deals, before.deals);
    let prompt = denial.prompt();
    assert_eq!(prompt.title, "Join SpicyBeats");
    assert_eq!(prompt.actions[0].label, "Maybe Later");
    assert_eq!(prompt.actions[1].label, "Sign In");
}

#[test]
fn repeated_list_votes_accumulate() {
    let mut feed = DealFeed::new("home", builtin_seeds().unwrap().home);
    let start = feed.get(2).unwrap().votes;
    let s = member(UserRole::User);
    feed.vote(&s, 2, VoteDirection::Up).unwrap();
    let votes = feed.vote(&s, 2, VoteDirection::Up).unwrap().unwrap();
    assert_eq!(votes.up, start.up + 2);
    assert_eq!(feed.version(), 2);
}

#[test]
fn details_screen_allows_one_active_vote() {
    let deal = builtin_seeds().unwrap().home[0].clone();
    let start = deal.votes;
    let s = member(UserRole::Verified);
    let mut details = DealDetails::open(deal);

    let v = details.vote(&s, VoteDirection::Up).unwrap();
    assert_eq!((v.up, v.down), (start.up + 1, start.down));

    // switching direction moves the vote
    let v = details.vote(&s, VoteDirection::Down).unwrap();
    assert_eq!((v.up, v.down), (start.up, start.down + 1));

    // same direction again withdraws it
    let v = details.vote(&s, VoteDirection::Down).unwrap();
    assert_eq!(v, start);
    assert_eq!(details.viewer_vote(), None);

    assert!(details.vote(&Session::guest(), VoteDirection::Up).is_err());
    assert_eq!(details.votes(), start);
}

#[test]
fn bookmark_toggles() {
    let mut details = DealDetails::open(builtin_seeds().unwrap().home[1].clone());
    assert!(!details.is_bookmarked());
    assert_eq!(details.toggle_bookmark().title, "Saved!");
    assert!(details.is_bookmarked());
    assert_eq!(details.toggle_bookmark().title, "Removed from Saved");
    assert!(!details.is_bookmarked());
}

#[test]
fn counted_vote_gets_feedback() {
    let mut feed = DealFeed::new("home", builtin_seeds().unwrap().home);
    let direction = VoteDirection::Down;
    assert!(feed.vote(&member(UserRole::User), 3, direction).unwrap().is_some());
    let prompt = direction.recorded_prompt();
    assert_eq!(prompt.title, "Vote Recorded!");
    assert_eq!(prompt.message, "Thanks for your downvote!");
}
