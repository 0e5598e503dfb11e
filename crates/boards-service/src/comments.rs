//! Comment authorship gate
//!
//! Membership alone allows commenting; only the original author may
//! edit or delete a comment. There is no role escalation: even the
//! project owner cannot touch someone else's comment here.

use crate::auth::db_err;
use crate::authorize::assert_is_member;
use crate::caller::Caller;
use boards_core::entity::Comment;
use boards_core::{Error, Result, COMMENT_BODY_MAX};
use boards_db::repo::{comments, issues};
use boards_db::DbPool;
use chrono::Utc;

/// Comment operations.
#[derive(Clone)]
pub struct CommentService {
    pool: DbPool,
}

impl CommentService {
    /// Create the service.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Add a comment to an issue.
    pub async fn create_comment(
        &self,
        caller: &Caller,
        project_id: i64,
        issue_id: i64,
        body: &str,
    ) -> Result<Comment> {
        validate_body(body)?;
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;

        let commenter = assert_is_member(&mut conn, caller, project_id, "Commenter").await?;

        if issues::find_by_id(&mut conn, issue_id).await?.is_none() {
            return Err(Error::IssueNotFound(issue_id));
        }

        let id = comments::insert(&mut conn, issue_id, commenter.id, Utc::now(), body).await?;
        let row = comments::find_by_id(&mut conn, id)
            .await?
            .ok_or(Error::CommentNotFound(id))?;
        Ok(row.into_domain())
    }

    /// List an issue's comments, newest first.
    pub async fn get_comments(
        &self,
        caller: &Caller,
        project_id: i64,
        issue_id: i64,
    ) -> Result<Vec<Comment>> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;

        assert_is_member(&mut conn, caller, project_id, "Authenticated user").await?;

        if issues::find_by_id(&mut conn, issue_id).await?.is_none() {
            return Err(Error::IssueNotFound(issue_id));
        }
        let rows = comments::list_by_issue(&mut conn, issue_id).await?;
        Ok(rows.into_iter().map(|r| r.into_domain()).collect())
    }

    /// Replace a comment's body. Author only.
    pub async fn edit_comment(
        &self,
        caller: &Caller,
        project_id: i64,
        comment_id: i64,
        body: &str,
    ) -> Result<Comment> {
        validate_body(body)?;
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;

        let comment = comments::find_by_id(&mut conn, comment_id)
            .await?
            .ok_or(Error::CommentNotFound(comment_id))?;

        let editor = assert_is_member(&mut conn, caller, project_id, "Editor").await?;

        if editor.id != comment.created_by_member_id {
            return Err(Error::unauthorized(
                "Member is not authorized to edit this comment.",
            ));
        }

        comments::update_body(&mut conn, comment_id, body, Utc::now()).await?;
        let row = comments::find_by_id(&mut conn, comment_id)
            .await?
            .ok_or(Error::CommentNotFound(comment_id))?;
        Ok(row.into_domain())
    }

    /// Delete a comment. Author only.
    pub async fn delete_comment(
        &self,
        caller: &Caller,
        project_id: i64,
        comment_id: i64,
    ) -> Result<()> {
        let mut conn = self.pool.inner().acquire().await.map_err(db_err)?;

        let comment = comments::find_by_id(&mut conn, comment_id)
            .await?
            .ok_or(Error::CommentNotFound(comment_id))?;

        let deleter = assert_is_member(&mut conn, caller, project_id, "Deleter").await?;

        if deleter.id != comment.created_by_member_id {
            return Err(Error::unauthorized(
                "Member is not authorized to delete this comment.",
            ));
        }

        comments::delete(&mut conn, comment_id).await?;
        Ok(())
    }
}

fn validate_body(body: &str) -> Result<()> {
    if body.chars().count() > COMMENT_BODY_MAX {
        return Err(Error::validation(format!(
            "comment body exceeds {COMMENT_BODY_MAX} characters"
        )));
    }
    Ok(())
}
