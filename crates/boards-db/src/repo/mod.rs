//! Repository query functions
//!
//! One module per table. Functions take a `&mut SqliteConnection` so the
//! service layer controls transaction boundaries: a cascade acquires one
//! transaction and runs every step on it.

pub mod comments;
pub mod issues;
pub mod members;
pub mod notifications;
pub mod projects;
pub mod users;
