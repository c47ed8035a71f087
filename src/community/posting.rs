//! # Deal Posting
//!
//! The post-deal flow: a submission is checked in a fixed order and the first problem
//! wins.
//!
//! 1. The session must be allowed to post ([`Session::gate_post`]).
//! 2. Title, description, category, and store location must be filled in, in that order.
//! 3. The community guidelines must be accepted.
//! 4. The poster must be under their role's daily post limit (counted per UTC day).
//!
//! Accepted deals either go live or wait for moderator review. Review is skipped when
//! the system does not require moderation, or when the poster's role auto-approves.
//! Verified members only auto-approve while `auto_approve_verified_users` is on.
use crate::community::prompt::{Denial, Destination, Prompt, PromptAction};
use crate::community::roles::UserRole;
use crate::community::session::Session;
use crate::config::ModerationSettings;
use crate::deals::{is_postable_category, Deal, DealStatus, Votes};
use crate::logutil::escape_log;
use crate::validation::{optional_field, require_field, FieldError, FieldRules};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw form input from the post-deal screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealSubmission {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub original_price: Option<String>,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub rules_accepted: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Denied(#[from] Denial),

    #[error("Please enter a deal title.")]
    MissingTitle,

    #[error("Please enter a deal description.")]
    MissingDescription,

    #[error("Please select a category.")]
    MissingCategory,

    #[error("Unknown category '{0}'.")]
    UnknownCategory(String),

    #[error("Please enter a store location.")]
    MissingLocation,

    #[error("Please accept our community guidelines to continue.")]
    RulesNotAccepted,

    #[error("The expiry date {0} has already passed.")]
    ExpiryInPast(NaiveDate),

    #[error(transparent)]
    Invalid(#[from] FieldError),
}

impl SubmissionError {
    pub fn prompt(&self) -> Prompt {
        match self {
            SubmissionError::Denied(denial) => denial.prompt(),
            SubmissionError::RulesNotAccepted => {
                Prompt::new("Community Rules", self.to_string()).with_action(PromptAction::ok("OK"))
            }
            other => Prompt::new("Missing Information", other.to_string())
                .with_action(PromptAction::ok("OK")),
        }
    }
}

/// The guidelines shown from the rules link on the post screen.
pub fn guidelines_prompt() -> Prompt {
    Prompt::new(
        "Community Guidelines",
        "• No offensive or illegal content\n• Deals must be legitimate and available\n• Include accurate pricing and location\n• No spam or duplicate posts\n• Be respectful to other users",
    )
    .with_action(PromptAction::ok("Awesome!"))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    Live(Deal),
    PendingReview(Deal),
}

impl PostOutcome {
    pub fn deal(&self) -> &Deal {
        match self {
            PostOutcome::Live(deal) | PostOutcome::PendingReview(deal) => deal,
        }
    }

    pub fn into_deal(self) -> Deal {
        match self {
            PostOutcome::Live(deal) | PostOutcome::PendingReview(deal) => deal,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, PostOutcome::Live(_))
    }

    pub fn prompt(&self) -> Prompt {
        let message = if self.is_live() {
            "Your deal is now live! Thanks for sharing with the community."
        } else {
            "Your deal has been submitted for review. You'll be notified once it's approved!"
        };
        Prompt::new("🎉 Deal Posted!", message)
            .with_action(PromptAction::go("View My Deals", Destination::Profile))
            .with_action(PromptAction::go("Post Another", Destination::PostDeal))
    }
}

/// Accepts submissions and tracks how many deals each member posted per day.
#[derive(Debug, Clone)]
pub struct PostingDesk {
    settings: ModerationSettings,
    rules: FieldRules,
    posted_today: HashMap<(String, NaiveDate), u32>,
    next_id: u64,
}

impl PostingDesk {
    /// `first_id` is the id given to the first accepted deal.
    pub fn new(settings: ModerationSettings, first_id: u64) -> Self {
        PostingDesk {
            settings,
            rules: FieldRules::default(),
            posted_today: HashMap::new(),
            next_id: first_id,
        }
    }

    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    /// Apply settings changed from the admin console.
    pub fn set_settings(&mut self, settings: ModerationSettings) {
        self.settings = settings;
    }

    /// Deals `username` posted on `day`. Counts for days before the latest submission are
    /// dropped, so past days read as zero.
    pub fn posts_on(&self, username: &str, day: NaiveDate) -> u32 {
        self.posted_today.get(&(username.to_string(), day)).copied().unwrap_or(0)
    }

    pub fn submit(
        &mut self,
        session: &Session,
        submission: DealSubmission,
        now: DateTime<Utc>,
    ) -> Result<PostOutcome, SubmissionError> {
        session.gate_post()?;
        let privileges = session.privileges();

        let title = required(
            "title",
            &submission.title,
            self.rules.max_title,
            SubmissionError::MissingTitle,
        )?;
        let description = required(
            "description",
            &submission.description,
            self.rules.max_description,
            SubmissionError::MissingDescription,
        )?;
        let category = submission.category.trim().to_lowercase();
        if category.is_empty() {
            return Err(SubmissionError::MissingCategory);
        }
        if !is_postable_category(&category) {
            return Err(SubmissionError::UnknownCategory(category));
        }
        let location = required(
            "location",
            &submission.location,
            self.rules.max_location,
            SubmissionError::MissingLocation,
        )?;
        if !submission.rules_accepted {
            return Err(SubmissionError::RulesNotAccepted);
        }
        let price = optional_field("price", Some(submission.price.as_str()), self.rules.max_price)?
            .unwrap_or_default();
        let original_price = optional_field(
            "original price",
            submission.original_price.as_deref(),
            self.rules.max_price,
        )?;
        let today = now.date_naive();
        if let Some(expiry) = submission.expiry_date {
            if expiry < today {
                return Err(SubmissionError::ExpiryInPast(expiry));
            }
        }

        self.posted_today.retain(|(_, day), _| *day >= today);
        let username = session.display_name().to_string();
        let key = (username.clone(), today);
        let used = self.posted_today.get(&key).copied().unwrap_or(0);
        if used >= privileges.max_daily_posts {
            let limit = privileges.max_daily_posts;
            debug!("{} hit the daily post limit of {}", username, limit);
            return Err(Denial::DailyLimitReached { limit }.into());
        }

        let status = self.review_status(session.role, privileges.auto_approve);
        let deal = Deal {
            id: self.next_id,
            title,
            description,
            price,
            original_price,
            category,
            location,
            distance: "0.0 miles".to_string(),
            coordinates: None,
            image: None,
            votes: Votes::default(),
            comments: 0,
            is_pinned: false,
            status,
            posted_by: username.clone(),
            is_verified: matches!(session.role, UserRole::Verified | UserRole::Business),
            created_at: now,
            expires_on: submission.expiry_date,
            poster_role: Some(session.role),
            poster_reputation: Some(session.reputation),
        };
        self.next_id += 1;
        self.posted_today.insert(key, used + 1);

        info!(
            "{} posted deal {} \"{}\" ({})",
            username,
            deal.id,
            escape_log(&deal.title),
            if status == DealStatus::Approved { "live" } else { "pending review" }
        );
        Ok(match status {
            DealStatus::Approved => PostOutcome::Live(deal),
            _ => PostOutcome::PendingReview(deal),
        })
    }

    fn review_status(&self, role: UserRole, auto_approve: bool) -> DealStatus {
        if !self.settings.require_moderation {
            return DealStatus::Approved;
        }
        let verified_blocked =
            role == UserRole::Verified && !self.settings.auto_approve_verified_users;
        if auto_approve && !verified_blocked {
            DealStatus::Approved
        } else {
            DealStatus::Pending
        }
    }
}

fn required(
    field: &'static str,
    value: &str,
    max: usize,
    missing: SubmissionError,
) -> Result<String, SubmissionError> {
    require_field(field, value, max).map_err(|e| match e {
        FieldError::Missing { .. } => missing,
        other => SubmissionError::Invalid(other),
    })
}
