//! State behind the deal details screen.
use super::votes::{VoteDirection, ViewerVote};
use super::{Deal, Votes};
use crate::community::prompt::{Denial, Prompt, PromptAction};
use crate::community::session::Session;
use crate::logutil::escape_log;
use log::debug;

/// One deal as seen by one viewer: live tallies, the viewer's active vote, bookmark flag.
#[derive(Debug, Clone)]
pub struct DealDetails {
    deal: Deal,
    viewer_vote: ViewerVote,
    bookmarked: bool,
}

impl DealDetails {
    pub fn open(deal: Deal) -> Self {
        DealDetails { deal, viewer_vote: ViewerVote::default(), bookmarked: false }
    }

    pub fn deal(&self) -> &Deal {
        &self.deal
    }

    pub fn votes(&self) -> Votes {
        self.deal.votes
    }

    pub fn viewer_vote(&self) -> Option<VoteDirection> {
        self.viewer_vote.current()
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    /// Vote, swap or withdraw. Denied sessions leave the tallies untouched.
    pub fn vote(&mut self, session: &Session, direction: VoteDirection) -> Result<Votes, Denial> {
        session.gate_vote()?;
        self.deal.votes = self.viewer_vote.cast(self.deal.votes, direction);
        debug!(
            "{} {}voted \"{}\" -> {}/{}",
            session.display_name(),
            direction,
            escape_log(&self.deal.title),
            self.deal.votes.up,
            self.deal.votes.down
        );
        Ok(self.deal.votes)
    }

    /// Flip the bookmark and return the confirmation shown to the viewer.
    pub fn toggle_bookmark(&mut self) -> Prompt {
        self.bookmarked = !self.bookmarked;
        let prompt = if self.bookmarked {
            Prompt::new("Saved!", "Deal saved to your favorites")
        } else {
            Prompt::new("Removed from Saved", "Deal removed from your saved list")
        };
        prompt.with_action(PromptAction::ok("OK"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::roles::UserRole;
    use crate::seed::builtin_seeds;

    fn details() -> DealDetails {
        let seeds = builtin_seeds().unwrap();
        DealDetails::open(seeds.home[0].clone())
    }

    #[test]
    fn guest_vote_is_denied_without_change() {
        let mut d = details();
        let before = d.votes();
        assert!(d.vote(&Session::guest(), VoteDirection::Up).is_err());
        assert_eq!(d.votes(), before);
        assert_eq!(d.viewer_vote(), None);
    }

    #[test]
    fn signed_in_vote_swaps() {
        let mut d = details();
        let before = d.votes();
        let mut s = Session::guest();
        s.sign_in("viewer", UserRole::User, 3.0);
        d.vote(&s, VoteDirection::Up).unwrap();
        let after = d.vote(&s, VoteDirection::Down).unwrap();
        assert_eq!(after.up, before.up);
        assert_eq!(after.down, before.down + 1);
    }

    #[test]
    fn bookmark_toggles() {
        let mut d = details();
        assert_eq!(d.toggle_bookmark().title, "Saved!");
        assert!(d.is_bookmarked());
        assert_eq!(d.toggle_bookmark().title, "Removed from Saved");
        assert!(!d.is_bookmarked());
    }
}
