//! Role and privilege levels used across the community.
//!
//! Privileges are a pure function of a [`UserRole`] and a reputation score. Each role maps
//! to a fixed row of capabilities; reputation only matters in two places: a base
//! [`UserRole::User`] needs [`USER_POST_REPUTATION`] to post, and a
//! [`UserRole::Verified`] member needs [`VERIFIED_AUTO_APPROVE_REPUTATION`] for their posts
//! to skip review. Nothing here is cached: resolve again whenever role or reputation changes.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum reputation for a base `user` to post deals.
pub const USER_POST_REPUTATION: f64 = 2.0;
/// Minimum reputation for a `verified` member's posts to go live without review.
pub const VERIFIED_AUTO_APPROVE_REPUTATION: f64 = 4.0;
/// Reputation at which a member earns the top contributor star.
pub const TOP_CONTRIBUTOR_REPUTATION: f64 = 4.5;

/// Badge colour used for unrecognized roles (same as guest).
pub const FALLBACK_ROLE_COLOR: &str = "#94a3b8";

/// Community roles, roughly in order of increasing trust.
///
/// `Business` and `Moderator` are siblings rather than steps on one ladder, so the enum
/// deliberately does not derive `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Guest,
    User,
    Verified,
    Business,
    Moderator,
    Admin,
    Superadmin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Capabilities derived from a role and reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPrivileges {
    pub can_post: bool,
    pub can_vote: bool,
    pub can_comment: bool,
    pub can_moderate: bool,
    pub can_manage_users: bool,
    pub can_manage_content: bool,
    pub can_access_admin: bool,
    pub can_create_categories: bool,
    pub can_manage_banners: bool,
    pub can_view_analytics: bool,
    pub auto_approve: bool,
    pub max_daily_posts: u32,
}

impl UserPrivileges {
    /// Everything off. Guests and unrecognized roles get this.
    pub const NONE: UserPrivileges = UserPrivileges {
        can_post: false,
        can_vote: false,
        can_comment: false,
        can_moderate: false,
        can_manage_users: false,
        can_manage_content: false,
        can_access_admin: false,
        can_create_categories: false,
        can_manage_banners: false,
        can_view_analytics: false,
        auto_approve: false,
        max_daily_posts: 0,
    };
}

impl Default for UserPrivileges {
    fn default() -> Self {
        Self::NONE
    }
}

// Reputation-gated cells are stored as `false` here and filled in by `resolve_privileges`.
const GUEST_ROW: UserPrivileges = UserPrivileges::NONE;

const USER_ROW: UserPrivileges = UserPrivileges {
    can_vote: true,
    can_comment: true,
    max_daily_posts: 3,
    ..UserPrivileges::NONE
};

const VERIFIED_ROW: UserPrivileges = UserPrivileges {
    can_post: true,
    can_vote: true,
    can_comment: true,
    max_daily_posts: 10,
    ..UserPrivileges::NONE
};

const BUSINESS_ROW: UserPrivileges = UserPrivileges {
    can_post: true,
    can_vote: true,
    can_comment: true,
    can_view_analytics: true,
    auto_approve: true,
    max_daily_posts: 15,
    ..UserPrivileges::NONE
};

const MODERATOR_ROW: UserPrivileges = UserPrivileges {
    can_post: true,
    can_vote: true,
    can_comment: true,
    can_moderate: true,
    can_manage_content: true,
    can_view_analytics: true,
    auto_approve: true,
    max_daily_posts: 25,
    ..UserPrivileges::NONE
};

const ADMIN_ROW: UserPrivileges = UserPrivileges {
    can_post: true,
    can_vote: true,
    can_comment: true,
    can_moderate: true,
    can_manage_users: true,
    can_manage_content: true,
    can_access_admin: true,
    can_create_categories: true,
    can_manage_banners: true,
    can_view_analytics: true,
    auto_approve: true,
    max_daily_posts: 50,
};

const SUPERADMIN_ROW: UserPrivileges = UserPrivileges {
    max_daily_posts: 999,
    ..ADMIN_ROW
};

impl UserRole {
    pub const ALL: [UserRole; 7] = [
        UserRole::Guest,
        UserRole::User,
        UserRole::Verified,
        UserRole::Business,
        UserRole::Moderator,
        UserRole::Admin,
        UserRole::Superadmin,
    ];

    /// Roles a demo sign-in may land on.
    pub const DEMO_SIGN_IN: [UserRole; 5] = [
        UserRole::User,
        UserRole::Verified,
        UserRole::Business,
        UserRole::Moderator,
        UserRole::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Guest => "guest",
            UserRole::User => "user",
            UserRole::Verified => "verified",
            UserRole::Business => "business",
            UserRole::Moderator => "moderator",
            UserRole::Admin => "admin",
            UserRole::Superadmin => "superadmin",
        }
    }

    /// Parse an exact lowercase role identifier. `"Admin"` or `" admin"` is not a role.
    pub fn parse(s: &str) -> Option<UserRole> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Guest => "Guest",
            UserRole::User => "User",
            UserRole::Verified => "Verified User",
            UserRole::Business => "Business",
            UserRole::Moderator => "Moderator",
            UserRole::Admin => "Admin",
            UserRole::Superadmin => "Super Admin",
        }
    }

    /// Badge colour as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            UserRole::Guest => FALLBACK_ROLE_COLOR,
            UserRole::User => "#6366f1",
            UserRole::Verified => "#10b981",
            UserRole::Business => "#f59e0b",
            UserRole::Moderator => "#8b5cf6",
            UserRole::Admin => "#ef4444",
            UserRole::Superadmin => "#dc2626",
        }
    }

    /// The role's row in the privilege table, before reputation thresholds apply.
    pub fn base_privileges(&self) -> UserPrivileges {
        match self {
            UserRole::Guest => GUEST_ROW,
            UserRole::User => USER_ROW,
            UserRole::Verified => VERIFIED_ROW,
            UserRole::Business => BUSINESS_ROW,
            UserRole::Moderator => MODERATOR_ROW,
            UserRole::Admin => ADMIN_ROW,
            UserRole::Superadmin => SUPERADMIN_ROW,
        }
    }

    /// Privileges at the default reputation of zero.
    pub fn privileges(&self) -> UserPrivileges {
        resolve_privileges(*self, 0.0)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Resolve the full privilege record for `role` at `reputation`.
///
/// Total and side-effect free. A NaN reputation never meets a threshold.
pub fn resolve_privileges(role: UserRole, reputation: f64) -> UserPrivileges {
    let mut privileges = role.base_privileges();
    match role {
        UserRole::User => privileges.can_post = reputation >= USER_POST_REPUTATION,
        UserRole::Verified => {
            privileges.auto_approve = reputation >= VERIFIED_AUTO_APPROVE_REPUTATION
        }
        _ => {}
    }
    privileges
}

/// Resolve privileges from a raw role identifier.
///
/// Unrecognized identifiers get [`UserPrivileges::NONE`]; a missing reputation counts as 0.
pub fn resolve_privileges_named(role: &str, reputation: Option<f64>) -> UserPrivileges {
    match UserRole::parse(role) {
        Some(r) => resolve_privileges(r, reputation.unwrap_or(0.0)),
        None => UserPrivileges::NONE,
    }
}

/// Human-readable role name for a raw identifier; "Unknown" when unrecognized.
pub fn role_name(role: &str) -> &'static str {
    UserRole::parse(role).map_or("Unknown", |r| r.display_name())
}

/// Badge colour for a raw identifier; falls back to the guest colour.
pub fn role_color(role: &str) -> &'static str {
    UserRole::parse(role).map_or(FALLBACK_ROLE_COLOR, |r| r.color())
}

/// Whether a reputation earns the top contributor star.
pub fn is_top_contributor(reputation: f64) -> bool {
    reputation >= TOP_CONTRIBUTOR_REPUTATION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_matches_exact_ids() {
        assert_eq!(UserRole::parse("moderator"), Some(UserRole::Moderator));
        assert_eq!(UserRole::parse("superadmin"), Some(UserRole::Superadmin));
        assert_eq!(UserRole::parse(" moderator "), None);
        assert_eq!(UserRole::parse("SUPERADMIN"), None);
        assert_eq!(UserRole::parse("owner"), None);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn display_names_and_colors() {
        assert_eq!(role_name("verified"), "Verified User");
        assert_eq!(role_name("superadmin"), "Super Admin");
        assert_eq!(role_name("wizard"), "Unknown");
        assert_eq!(role_color("admin"), "#ef4444");
        assert_eq!(role_color("wizard"), FALLBACK_ROLE_COLOR);
    }

    #[test]
    fn nan_reputation_meets_no_threshold() {
        assert!(!resolve_privileges(UserRole::User, f64::NAN).can_post);
        assert!(!resolve_privileges(UserRole::Verified, f64::NAN).auto_approve);
    }

    #[test]
    fn top_contributor_star() {
        assert!(!is_top_contributor(4.4));
        assert!(is_top_contributor(4.5));
    }
}
