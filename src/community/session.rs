use crate::community::prompt::Denial;
use crate::community::roles::{resolve_privileges, UserPrivileges, UserRole};
use crate::community::user::User;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

/// # Viewer Session
///
/// The person looking at a screen. Every screen starts with a guest session; signing in
/// attaches a role and reputation, signing out drops back to guest.
///
/// Privileges are never stored on the session. Each gate resolves them fresh from the
/// current role and reputation, so a role change takes effect on the next action.
///
/// ## Usage
///
/// ```rust
/// use spicybeats::community::session::Session;
/// use spicybeats::community::roles::UserRole;
///
/// let mut session = Session::guest();
/// assert!(session.gate_vote().is_err());
///
/// session.sign_in("FoodieExplorer", UserRole::User, 3.2);
/// assert!(session.gate_vote().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub role: UserRole,
    pub reputation: f64,
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::guest()
    }
}

impl Session {
    pub fn guest() -> Self {
        Session { username: None, role: UserRole::Guest, reputation: 0.0, signed_in_at: None }
    }

    /// Session for an account. Inactive accounts sign in as guests.
    pub fn for_user(user: &User) -> Self {
        if !user.is_active() {
            debug!("Account {} is {}; treating as guest", user.username, user.status.as_str());
            return Self::guest();
        }
        let mut s = Self::guest();
        s.sign_in(&user.username, user.role, user.reputation);
        s
    }

    pub fn is_guest(&self) -> bool {
        self.role == UserRole::Guest
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("guest")
    }

    pub fn privileges(&self) -> UserPrivileges {
        resolve_privileges(self.role, self.reputation)
    }

    pub fn sign_in(&mut self, username: &str, role: UserRole, reputation: f64) {
        self.username = Some(username.to_string());
        self.role = role;
        self.reputation = reputation;
        self.signed_in_at = Some(Utc::now());
        info!("{} signed in as {}", username, role);
    }

    /// Demo login: pick a random non-guest, non-superadmin role.
    pub fn sign_in_demo<R: Rng + ?Sized>(&mut self, rng: &mut R, reputation: f64) -> UserRole {
        let role = *UserRole::DEMO_SIGN_IN.choose(rng).unwrap_or(&UserRole::User);
        self.sign_in("demo", role, reputation);
        role
    }

    pub fn sign_out(&mut self) {
        if let Some(name) = self.username.take() {
            info!("{} signed out", name);
        }
        *self = Self::guest();
    }

    pub fn gate_vote(&self) -> Result<(), Denial> {
        if self.privileges().can_vote {
            Ok(())
        } else {
            Err(self.denied("vote on deals"))
        }
    }

    pub fn gate_comment(&self) -> Result<(), Denial> {
        if self.privileges().can_comment {
            Ok(())
        } else {
            Err(self.denied("comment on deals"))
        }
    }

    pub fn gate_post(&self) -> Result<(), Denial> {
        if self.privileges().can_post {
            Ok(())
        } else {
            let denial = Denial::PostingRestricted { role: self.role };
            debug!("{} denied: {}", self.display_name(), denial);
            Err(denial)
        }
    }

    pub fn gate_admin(&self) -> Result<(), Denial> {
        if self.privileges().can_access_admin {
            Ok(())
        } else {
            Err(self.denied("open the admin panel"))
        }
    }

    /// Guests are told to sign in; everyone else is told their role is not enough.
    pub(crate) fn denied(&self, action: &'static str) -> Denial {
        let denial = if self.is_guest() {
            Denial::SignInRequired { action }
        } else {
            Denial::InsufficientRole { role: self.role, action }
        };
        warn!(target: "security", "{} denied: {}", self.display_name(), denial);
        denial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn demo_sign_in_never_picks_guest_or_superadmin() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut s = Session::guest();
            let role = s.sign_in_demo(&mut rng, 4.2);
            assert!(UserRole::DEMO_SIGN_IN.contains(&role));
            assert!(!s.is_guest());
        }
    }

    #[test]
    fn sign_out_resets_to_guest() {
        let mut s = Session::guest();
        s.sign_in("alice", UserRole::Admin, 5.0);
        assert!(s.gate_admin().is_ok());
        s.sign_out();
        assert!(s.is_guest());
        assert!(s.username.is_none());
        assert_eq!(s.gate_admin(), Err(Denial::SignInRequired { action: "open the admin panel" }));
    }

    #[test]
    fn low_reputation_user_is_restricted() {
        let mut s = Session::guest();
        s.sign_in("newbie", UserRole::User, 1.0);
        assert_eq!(s.gate_post(), Err(Denial::PostingRestricted { role: UserRole::User }));
        assert!(s.gate_comment().is_ok());
        assert_eq!(
            Session::guest().gate_post(),
            Err(Denial::PostingRestricted { role: UserRole::Guest })
        );
    }

    #[test]
    fn moderator_cannot_open_admin() {
        let mut s = Session::guest();
        s.sign_in("mod", UserRole::Moderator, 4.9);
        assert!(matches!(s.gate_admin(), Err(Denial::InsufficientRole { .. })));
    }
}
