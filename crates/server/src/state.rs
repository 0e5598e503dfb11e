//! Shared application state

use crate::token::TokenCodec;
use crate::transport::TracingTransport;
use boards_core::Config;
use boards_db::DbPool;
use boards_service::{
    AuthService, CommentService, IssueService, MemberService, NotificationService, ProjectService,
    UserService,
};
use std::sync::Arc;

/// Everything a handler needs, cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    /// Signup and login
    pub auth: AuthService,
    /// User accounts
    pub users: UserService,
    /// Project lifecycle
    pub projects: ProjectService,
    /// Member lifecycle
    pub members: MemberService,
    /// Issue lifecycle
    pub issues: IssueService,
    /// Comments
    pub comments: CommentService,
    /// Notification inbox
    pub notifications: NotificationService,
    /// Access token codec
    pub tokens: TokenCodec,
}

impl AppState {
    /// Wire the services over one pool with the log-backed transport.
    pub fn new(pool: DbPool, config: &Config) -> Self {
        let transport = Arc::new(TracingTransport);
        Self {
            auth: AuthService::new(pool.clone()),
            users: UserService::new(pool.clone()),
            projects: ProjectService::new(pool.clone(), transport.clone()),
            members: MemberService::new(pool.clone()),
            issues: IssueService::new(pool.clone(), transport),
            comments: CommentService::new(pool.clone()),
            notifications: NotificationService::new(pool),
            tokens: TokenCodec::new(&config.token_secret, config.token_ttl_secs),
        }
    }
}
