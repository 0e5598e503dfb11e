//! API route definitions

use crate::handlers::{auth, comments, issues, members, notifications, projects, users};
use crate::state::AppState;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    service: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        service: "boards-server".to_string(),
    })
}

/// Create the complete API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Auth
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        // Users
        .route("/users", get(users::get_all_users))
        .route("/users/email", get(users::get_user_by_email))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user_details)
                .delete(users::delete_user),
        )
        .route("/users/:id/email", patch(users::update_user_email))
        .route("/users/:id/password", patch(users::update_user_password))
        .route(
            "/users/:id/picture",
            patch(users::update_user_picture).delete(users::delete_user_picture),
        )
        // Notifications
        .route(
            "/users/:id/notifications",
            get(notifications::get_notifications)
                .delete(notifications::delete_all_notifications),
        )
        .route(
            "/users/:id/notifications/:notification_id",
            patch(notifications::toggle_read).delete(notifications::delete_notification),
        )
        // Projects
        .route(
            "/projects",
            post(projects::create_project).get(projects::get_projects_by_user),
        )
        .route(
            "/projects/:id",
            get(projects::get_project)
                .patch(projects::update_project_details)
                .delete(projects::delete_project),
        )
        .route(
            "/projects/:id/icon",
            patch(projects::update_project_icon).delete(projects::delete_project_icon),
        )
        // Members
        .route(
            "/members/:id",
            get(members::get_member)
                .patch(members::update_member_role)
                .delete(members::remove_member),
        )
        .route(
            "/projects/:id/members",
            get(members::get_members_by_project).patch(projects::invite_users),
        )
        .route(
            "/projects/:id/members/:user_id",
            get(members::get_current_member),
        )
        // Issues
        .route(
            "/projects/:id/issues",
            post(issues::create_issue).get(issues::get_issues_by_project),
        )
        .route(
            "/projects/:id/issues/:issue_id",
            get(issues::get_issue)
                .put(issues::update_issue)
                .delete(issues::delete_issue),
        )
        .route(
            "/projects/:id/issues/:issue_id/status",
            patch(issues::update_issue_status),
        )
        // Comments
        .route(
            "/projects/:id/issues/:issue_id/comments",
            post(comments::create_comment).get(comments::get_comments),
        )
        .route(
            "/projects/:id/issues/:issue_id/comments/:comment_id",
            patch(comments::edit_comment).delete(comments::delete_comment),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
