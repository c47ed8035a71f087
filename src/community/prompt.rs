//! Permission denials and the confirmation prompts they turn into.
//!
//! A denial is an expected branch, not a failure: the caller lacks a capability and should
//! be steered toward signing in or earning more reputation. [`Denial::prompt`] builds the
//! dialog that the alert service shows for it.
use crate::community::roles::UserRole;
use serde::Serialize;

/// Where an accepted prompt action should take the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    SignIn,
    Home,
    Profile,
    PostDeal,
    AdminPanel,
    DealDetail(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    Default,
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptAction {
    pub label: String,
    pub style: ActionStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<Destination>,
}

impl PromptAction {
    pub fn cancel(label: &str) -> Self {
        Self { label: label.to_string(), style: ActionStyle::Cancel, destination: None }
    }

    pub fn ok(label: &str) -> Self {
        Self { label: label.to_string(), style: ActionStyle::Default, destination: None }
    }

    pub fn go(label: &str, destination: Destination) -> Self {
        Self {
            label: label.to_string(),
            style: ActionStyle::Default,
            destination: Some(destination),
        }
    }

    pub fn destructive(label: &str) -> Self {
        Self { label: label.to_string(), style: ActionStyle::Destructive, destination: None }
    }
}

/// Title, message and labelled actions for the alert service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    pub actions: Vec<PromptAction>,
}

impl Prompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into(), actions: Vec::new() }
    }

    pub fn with_action(mut self, action: PromptAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Ask before a destructive change, e.g. clearing the saved list.
    pub fn confirm(title: &str, message: &str, verb: &str) -> Self {
        Prompt::new(title, message)
            .with_action(PromptAction::cancel("Cancel"))
            .with_action(PromptAction::destructive(verb))
    }
}

/// A privileged action the viewer is not allowed to take.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Denial {
    /// Guests must sign in first. `action` reads like "vote on deals".
    #[error("sign in to {action}")]
    SignInRequired { action: &'static str },

    #[error("your current role ({role}) doesn't allow posting")]
    PostingRestricted { role: UserRole },

    #[error("daily post limit of {limit} reached")]
    DailyLimitReached { limit: u32 },

    /// Signed in, but the role lacks the capability.
    #[error("{role} accounts cannot {action}")]
    InsufficientRole { role: UserRole, action: &'static str },
}

impl Denial {
    pub fn prompt(&self) -> Prompt {
        match self {
            Denial::SignInRequired { action } => Prompt::new(
                "Join SpicyBeats",
                format!("Sign in to {} and connect with the community!", action),
            )
            .with_action(PromptAction::cancel("Maybe Later"))
            .with_action(PromptAction::go("Sign In", Destination::SignIn)),
            Denial::PostingRestricted { role: UserRole::Guest } => {
                Prompt::new("Posting Restricted", "Please sign in to post deals")
                    .with_action(PromptAction::ok("OK"))
            }
            Denial::PostingRestricted { role } => Prompt::new(
                "Posting Restricted",
                format!(
                    "Your current role ({}) doesn't allow posting. Build your reputation to unlock this feature.",
                    role
                ),
            )
            .with_action(PromptAction::ok("OK")),
            Denial::DailyLimitReached { limit } => Prompt::new(
                "Daily Limit Reached",
                format!("You can post up to {} deals per day. Come back tomorrow!", limit),
            )
            .with_action(PromptAction::ok("OK")),
            Denial::InsufficientRole { role, action } => Prompt::new(
                "Access Restricted",
                format!("{} accounts cannot {}.", role.display_name(), action),
            )
            .with_action(PromptAction::ok("OK")),
        }
    }
}
