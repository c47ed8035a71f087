//! # Community Module
//!
//! Who is acting and what they may do.
//!
//! ## Components
//!
//! - [`roles`] - role definitions and the privilege table
//! - [`user`] - member account records
//! - [`session`] - the viewer of a screen and its capability gates
//! - [`prompt`] - permission denials and the dialogs they become
//! - [`posting`] - the post-deal submission flow
//! - [`admin`] - the administrator console
//!
//! ## Permission Flow
//!
//! ```text
//! ┌─────────────────┐
//! │  Session        │ ← role + reputation of the viewer
//! └─────────────────┘
//!          │ resolve_privileges
//! ┌─────────────────┐
//! │  Gate           │ ← Ok(()) or Denial
//! └─────────────────┘
//!          │ Denial::prompt
//! ┌─────────────────┐
//! │  Prompt         │ ← shown by the alert service
//! └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use spicybeats::community::roles::{resolve_privileges, UserRole};
//! use spicybeats::community::session::Session;
//!
//! let privileges = resolve_privileges(UserRole::Verified, 4.5);
//! assert!(privileges.auto_approve);
//!
//! let guest = Session::guest();
//! if let Err(denial) = guest.gate_vote() {
//!     assert_eq!(denial.prompt().title, "Join SpicyBeats");
//! }
//! ```

pub mod admin;
pub mod posting;
pub mod prompt;
pub mod roles;
pub mod session;
pub mod user;

pub use prompt::{Denial, Prompt};
pub use roles::{resolve_privileges, UserPrivileges, UserRole};
pub use session::Session;
pub use user::User;
