use spicybeats::community::admin::{
    AdminConsole, AdminError, DealAction, SettingUpdate, UserAction,
};
use spicybeats::community::prompt::Denial;
use spicybeats::community::roles::UserRole;
use spicybeats::community::session::Session;
use spicybeats::community::user::AccountStatus;
use spicybeats::config::ModerationSettings;
use spicybeats::seed::builtin_admin_seed;

fn open_as(role: UserRole) -> Result<AdminConsole, Denial> {
    let mut s = Session::guest();
    s.sign_in("sysadmin", role, 5.0);
    AdminConsole::open(&s, builtin_admin_seed().unwrap(), ModerationSettings::default())
}

#[test]
fn non_admins_are_turned_away() {
    for role in [UserRole::User, UserRole::Verified, UserRole::Business, UserRole::Moderator] {
        let denial = open_as(role).unwrap_err();
        assert_eq!(denial.prompt().title, "Access Restricted");
    }
}

#[test]
fn banned_account_loses_everything() {
    let mut console = open_as(UserRole::Superadmin).unwrap();
    console.handle_user_action(2, UserAction::Ban).unwrap();
    let user = console.users().iter().find(|u| u.id == 2).unwrap();
    assert_eq!(user.status, AccountStatus::Banned);
    assert!(!user.effective_privileges().can_moderate);
    assert!(Session::for_user(user).is_guest());
}

#[test]
fn approving_clears_the_queue() {
    let mut console = open_as(UserRole::Admin).unwrap();
    let confirm = console.confirm_deal_action(2, DealAction::Reject).unwrap();
    assert_eq!(confirm.message, "Reject \"Free Pizza Every Day Forever\"?");
    for id in [1, 2, 3] {
        console.handle_deal_action(id, DealAction::Approve).unwrap();
    }
    assert!(console.pending_deals().is_empty());
    assert_eq!(console.stats().unwrap().pending_reviews, 0);
    assert_eq!(console.audit_log().len(), 3);
    assert!(console.audit_log().iter().all(|e| e.actor == "sysadmin"));
}

#[test]
fn unknown_ids_are_reported() {
    let mut console = open_as(UserRole::Admin).unwrap();
    assert_eq!(console.toggle_category(77), Err(AdminError::CategoryNotFound(77)));
    assert_eq!(
        console.confirm_user_action(77, UserAction::Unban),
        Err(AdminError::UserNotFound(77))
    );
    assert!(console.audit_log().is_empty());
}

#[test]
fn settings_feed_back_into_posting() {
    let mut console = open_as(UserRole::Admin).unwrap();
    console.update_setting(SettingUpdate::RequireModeration(false)).unwrap();
    console.update_setting(SettingUpdate::AllowGuestPosting(true)).unwrap();
    let settings = console.settings().clone();
    assert!(!settings.require_moderation);
    assert!(settings.allow_guest_posting);
    assert_eq!(settings.max_daily_posts, 5);
}
