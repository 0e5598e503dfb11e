//! Request handlers, grouped by resource

pub mod auth;
pub mod comments;
pub mod issues;
pub mod members;
pub mod notifications;
pub mod projects;
pub mod users;
