//! # Boards Service Layer
//!
//! The authorization and lifecycle engine: every state-mutating
//! operation first resolves the caller's membership for the target
//! project and checks it against the role set for that operation, then
//! runs its cascade steps inside one database transaction. Notification
//! events are recorded in the same transaction and published to the
//! transport only after commit.
//!
//! ## Modules
//!
//! - [`caller`] - Explicit per-request caller identity
//! - [`authorize`] - The membership role-check primitive
//! - [`notify`] - Notification transport seam
//! - [`auth`] - Signup/login and password hashing
//! - [`users`] - User accounts and their deletion cascade
//! - [`projects`] - Project lifecycle and invites
//! - [`members`] - Member lifecycle (removal, role changes)
//! - [`issues`] - Issue lifecycle and key allocation
//! - [`comments`] - Comment authorship gate
//! - [`notifications`] - User-facing notification operations

#![warn(missing_docs)]

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod auth;
pub mod authorize;
pub mod caller;
pub mod comments;
pub mod issues;
pub mod members;
pub mod notifications;
pub mod notify;
pub mod projects;
pub mod users;

pub use auth::AuthService;
pub use caller::Caller;
pub use comments::CommentService;
pub use issues::IssueService;
pub use members::MemberService;
pub use notifications::NotificationService;
pub use notify::{NotificationTransport, NullTransport};
pub use projects::ProjectService;
pub use users::UserService;
