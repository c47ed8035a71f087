//! Vote counters.
//!
//! List screens treat votes as plain counters: every accepted vote adds one and nothing
//! takes it back. The details screen tracks one active vote per viewer instead; see
//! [`ViewerVote`].
use super::{Deal, Votes};
use crate::community::prompt::{Prompt, PromptAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vote direction: {0} (expected up or down)")]
pub struct UnknownVoteDirection(pub String);

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    /// Feedback shown once a vote has been counted.
    pub fn recorded_prompt(&self) -> Prompt {
        Prompt::new("Vote Recorded!", format!("Thanks for your {}vote!", self))
            .with_action(PromptAction::ok("OK"))
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = UnknownVoteDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "upvote" => Ok(VoteDirection::Up),
            "down" | "downvote" => Ok(VoteDirection::Down),
            _ => Err(UnknownVoteDirection(s.to_string())),
        }
    }
}

impl Votes {
    pub fn incremented(self, direction: VoteDirection) -> Votes {
        match direction {
            VoteDirection::Up => Votes { up: self.up.saturating_add(1), ..self },
            VoteDirection::Down => Votes { down: self.down.saturating_add(1), ..self },
        }
    }

    pub fn decremented(self, direction: VoteDirection) -> Votes {
        match direction {
            VoteDirection::Up => Votes { up: self.up.saturating_sub(1), ..self },
            VoteDirection::Down => Votes { down: self.down.saturating_sub(1), ..self },
        }
    }
}

/// Copy of `deal` with one more vote in `direction`. Not a toggle: applying twice adds two.
///
/// Permission checks happen before this is called; see
/// [`Session::gate_vote`](crate::community::session::Session::gate_vote).
pub fn apply_vote(deal: &Deal, direction: VoteDirection) -> Deal {
    Deal { votes: deal.votes.incremented(direction), ..deal.clone() }
}

/// The viewer's single active vote on the details screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerVote(Option<VoteDirection>);

impl ViewerVote {
    pub fn current(&self) -> Option<VoteDirection> {
        self.0
    }

    /// Cast a vote against `votes` and return the new tallies.
    ///
    /// Same direction as the active vote withdraws it. The other direction swaps it.
    pub fn cast(&mut self, votes: Votes, direction: VoteDirection) -> Votes {
        match self.0 {
            Some(active) if active == direction => {
                self.0 = None;
                votes.decremented(direction)
            }
            Some(active) => {
                self.0 = Some(direction);
                votes.decremented(active).incremented(direction)
            }
            None => {
                self.0 = Some(direction);
                votes.incremented(direction)
            }
        }
    }
}
