//! # Admin Console
//!
//! Management screen for administrators: member accounts, the moderation queue,
//! categories, promotional banners, system settings and headline stats.
//!
//! Opening the console requires `can_access_admin`. Each action then checks its own
//! capability against the session's current privileges:
//!
//! | Action | Capability |
//! |---|---|
//! | ban / unban | `can_manage_users` |
//! | approve / reject | `can_moderate` |
//! | toggle / add category | `can_create_categories` |
//! | toggle / add banner | `can_manage_banners` |
//! | update settings | `can_access_admin` |
//! | stats | `can_view_analytics` |
//!
//! Every change is appended to an in-memory audit trail and logged on the `security`
//! target.
use crate::community::prompt::{Denial, Prompt, PromptAction};
use crate::community::session::Session;
use crate::community::user::{AccountStatus, User};
use crate::config::ModerationSettings;
use crate::deals::DealStatus;
use crate::logutil::escape_log;
use crate::validation::{require_field, FieldError};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCategory {
    pub id: u64,
    pub name: String,
    pub emoji: String,
    pub is_active: bool,
    #[serde(default)]
    pub deal_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminBanner {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub priority: u32,
    #[serde(default)]
    pub image: String,
}

/// A deal waiting in the moderation queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeal {
    pub id: u64,
    pub title: String,
    pub user: String,
    pub category: String,
    #[serde(default = "pending")]
    pub status: DealStatus,
    #[serde(default)]
    pub flagged: bool,
    #[serde(default)]
    pub report_count: u32,
}

fn pending() -> DealStatus {
    DealStatus::Pending
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: usize,
    pub active_deals: u32,
    pub pending_reviews: usize,
    pub total_revenue: String,
    pub daily_active_users: u32,
    pub conversion_rate: String,
}

/// Initial console content.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeed {
    pub users: Vec<User>,
    #[serde(default)]
    pub categories: Vec<AdminCategory>,
    #[serde(default)]
    pub banners: Vec<AdminBanner>,
    #[serde(default)]
    pub pending_deals: Vec<PendingDeal>,
    pub stats: AdminStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Ban,
    Unban,
}

impl UserAction {
    fn verb(&self) -> &'static str {
        match self {
            UserAction::Ban => "Ban",
            UserAction::Unban => "Unban",
        }
    }

    fn past(&self) -> &'static str {
        match self {
            UserAction::Ban => "banned",
            UserAction::Unban => "unbanned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealAction {
    Approve,
    Reject,
}

impl DealAction {
    fn verb(&self) -> &'static str {
        match self {
            DealAction::Approve => "Approve",
            DealAction::Reject => "Reject",
        }
    }

    fn past(&self) -> &'static str {
        match self {
            DealAction::Approve => "approved",
            DealAction::Reject => "rejected",
        }
    }
}

/// One system setting change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    AutoApproveVerifiedUsers(bool),
    RequireModeration(bool),
    AllowGuestPosting(bool),
    MaxDailyPosts(u32),
    MinReputationToPost(f64),
}

impl SettingUpdate {
    fn apply(&self, settings: &mut ModerationSettings) {
        match *self {
            SettingUpdate::AutoApproveVerifiedUsers(v) => {
                settings.auto_approve_verified_users = v
            }
            SettingUpdate::RequireModeration(v) => settings.require_moderation = v,
            SettingUpdate::AllowGuestPosting(v) => settings.allow_guest_posting = v,
            SettingUpdate::MaxDailyPosts(v) => settings.max_daily_posts = v,
            SettingUpdate::MinReputationToPost(v) => settings.min_reputation_to_post = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Denied(#[from] Denial),

    #[error("no user with id {0}")]
    UserNotFound(u64),

    #[error("no pending deal with id {0}")]
    DealNotFound(u64),

    #[error("no category with id {0}")]
    CategoryNotFound(u64),

    #[error("no banner with id {0}")]
    BannerNotFound(u64),

    #[error(transparent)]
    Invalid(#[from] FieldError),
}

/// Record of one administrative change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub target: Option<String>,
    pub actor: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AdminConsole {
    session: Session,
    users: Vec<User>,
    categories: Vec<AdminCategory>,
    banners: Vec<AdminBanner>,
    pending_deals: Vec<PendingDeal>,
    base_stats: AdminStats,
    settings: ModerationSettings,
    audit: Vec<AuditEntry>,
}

impl AdminConsole {
    pub fn open(
        session: &Session,
        seed: AdminSeed,
        settings: ModerationSettings,
    ) -> Result<Self, Denial> {
        session.gate_admin()?;
        info!(target: "security", "{} opened the admin console", session.display_name());
        Ok(AdminConsole {
            session: session.clone(),
            users: seed.users,
            categories: seed.categories,
            banners: seed.banners,
            pending_deals: seed.pending_deals,
            base_stats: seed.stats,
            settings,
            audit: Vec::new(),
        })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn categories(&self) -> &[AdminCategory] {
        &self.categories
    }

    pub fn banners(&self) -> &[AdminBanner] {
        &self.banners
    }

    pub fn pending_deals(&self) -> &[PendingDeal] {
        &self.pending_deals
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    pub fn audit_log(&self) -> &[AuditEntry] {
        &self.audit
    }

    fn require(&self, allowed: bool, action: &'static str) -> Result<(), AdminError> {
        if allowed {
            Ok(())
        } else {
            Err(self.session.denied(action).into())
        }
    }

    fn record(&mut self, action: &str, target: Option<String>, details: Option<String>) {
        let actor = self.session.display_name().to_string();
        info!(
            target: "security",
            "{} {} {}{}",
            actor,
            action,
            target.as_deref().map(escape_log).unwrap_or_default(),
            details.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default()
        );
        self.audit.push(AuditEntry {
            timestamp: Utc::now(),
            action: action.to_string(),
            target,
            actor,
            details,
        });
    }

    /// Confirmation shown before a ban or unban.
    pub fn confirm_user_action(
        &self,
        user_id: u64,
        action: UserAction,
    ) -> Result<Prompt, AdminError> {
        let user = self
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or(AdminError::UserNotFound(user_id))?;
        let prompt = Prompt::new(
            format!("{} User", action.verb()),
            format!(
                "Are you sure you want to {} {}?",
                action.verb().to_lowercase(),
                user.username
            ),
        )
        .with_action(PromptAction::cancel("Cancel"));
        Ok(match action {
            UserAction::Ban => prompt.with_action(PromptAction::destructive(action.verb())),
            UserAction::Unban => prompt.with_action(PromptAction::ok(action.verb())),
        })
    }

    pub fn handle_user_action(
        &mut self,
        user_id: u64,
        action: UserAction,
    ) -> Result<Prompt, AdminError> {
        self.require(self.session.privileges().can_manage_users, "manage users")?;
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AdminError::UserNotFound(user_id))?;
        user.status = match action {
            UserAction::Ban => AccountStatus::Banned,
            UserAction::Unban => AccountStatus::Active,
        };
        let username = user.username.clone();
        self.record(action.past(), Some(username), None);
        Ok(success(format!("User {} successfully", action.past())))
    }

    /// Confirmation shown before approving or rejecting a queued deal.
    pub fn confirm_deal_action(
        &self,
        deal_id: u64,
        action: DealAction,
    ) -> Result<Prompt, AdminError> {
        let deal = self
            .pending_deals
            .iter()
            .find(|d| d.id == deal_id)
            .ok_or(AdminError::DealNotFound(deal_id))?;
        Ok(Prompt::new(
            format!("{} Deal", action.verb()),
            format!("{} \"{}\"?", action.verb(), deal.title),
        )
        .with_action(PromptAction::cancel("Cancel"))
        .with_action(PromptAction::ok(action.verb())))
    }

    /// Approve or reject a queued deal. Either way it leaves the queue.
    pub fn handle_deal_action(
        &mut self,
        deal_id: u64,
        action: DealAction,
    ) -> Result<Prompt, AdminError> {
        self.require(self.session.privileges().can_moderate, "moderate deals")?;
        let index = self
            .pending_deals
            .iter()
            .position(|d| d.id == deal_id)
            .ok_or(AdminError::DealNotFound(deal_id))?;
        let deal = self.pending_deals.remove(index);
        let details = (deal.report_count > 0).then(|| format!("{} reports", deal.report_count));
        self.record(action.past(), Some(format!("deal {} \"{}\"", deal.id, deal.title)), details);
        Ok(success(format!("Deal {} successfully", action.past())))
    }

    /// Flip a category on or off and return its new state.
    pub fn toggle_category(&mut self, category_id: u64) -> Result<bool, AdminError> {
        self.require(self.session.privileges().can_create_categories, "manage categories")?;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or(AdminError::CategoryNotFound(category_id))?;
        category.is_active = !category.is_active;
        let (name, active) = (category.name.clone(), category.is_active);
        let action = if active { "enabled category" } else { "disabled category" };
        self.record(action, Some(name), None);
        Ok(active)
    }

    pub fn add_category(&mut self, name: &str, emoji: &str) -> Result<&AdminCategory, AdminError> {
        self.require(self.session.privileges().can_create_categories, "manage categories")?;
        let name = require_field("category name", name, 40)?;
        let id = self.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        self.categories.push(AdminCategory {
            id,
            name: name.clone(),
            emoji: emoji.trim().to_string(),
            is_active: true,
            deal_count: 0,
        });
        self.record("added category", Some(name), None);
        self.categories.last().ok_or(AdminError::CategoryNotFound(id))
    }

    /// Flip a banner on or off and return its new state.
    pub fn toggle_banner(&mut self, banner_id: u64) -> Result<bool, AdminError> {
        self.require(self.session.privileges().can_manage_banners, "manage banners")?;
        let banner = self
            .banners
            .iter_mut()
            .find(|b| b.id == banner_id)
            .ok_or(AdminError::BannerNotFound(banner_id))?;
        banner.is_active = !banner.is_active;
        let (title, active) = (banner.title.clone(), banner.is_active);
        let action = if active { "enabled banner" } else { "disabled banner" };
        self.record(action, Some(title), None);
        Ok(active)
    }

    /// New banners start inactive, after every existing banner in priority.
    pub fn add_banner(
        &mut self,
        title: &str,
        description: &str,
        image: &str,
    ) -> Result<&AdminBanner, AdminError> {
        self.require(self.session.privileges().can_manage_banners, "manage banners")?;
        let title = require_field("banner title", title, 80)?;
        let description = require_field("banner description", description, 200)?;
        let id = self.banners.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let priority = self.banners.iter().map(|b| b.priority).max().unwrap_or(0) + 1;
        self.banners.push(AdminBanner {
            id,
            title: title.clone(),
            description,
            is_active: false,
            priority,
            image: image.trim().to_string(),
        });
        self.record("added banner", Some(title), None);
        self.banners.last().ok_or(AdminError::BannerNotFound(id))
    }

    pub fn update_setting(
        &mut self,
        update: SettingUpdate,
    ) -> Result<&ModerationSettings, AdminError> {
        self.require(self.session.privileges().can_access_admin, "change system settings")?;
        if let SettingUpdate::MinReputationToPost(v) = update {
            if !v.is_finite() {
                warn!("Ignoring non-finite minimum reputation {}", v);
                return Ok(&self.settings);
            }
        }
        update.apply(&mut self.settings);
        self.record("changed setting", None, Some(format!("{:?}", update)));
        Ok(&self.settings)
    }

    /// Headline numbers. Member and queue counts come from the console's live lists.
    pub fn stats(&self) -> Result<AdminStats, AdminError> {
        self.require(self.session.privileges().can_view_analytics, "view analytics")?;
        Ok(AdminStats {
            total_users: self.users.len(),
            pending_reviews: self.pending_deals.len(),
            ..self.base_stats.clone()
        })
    }
}

fn success(message: String) -> Prompt {
    Prompt::new("Success", message).with_action(PromptAction::ok("OK"))
}
