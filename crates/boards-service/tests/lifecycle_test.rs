//! End-to-end lifecycle tests against an in-memory database.

use async_trait::async_trait;
use boards_core::entity::{Notification, NotificationType};
use boards_core::{AccessRole, Error, IssuePriority, IssueStatus, IssueType, MemberRole};
use boards_db::repo;
use boards_db::DbPool;
use boards_service::issues::{CreateIssue, UpdateIssue};
use boards_service::notify::NotificationTransport;
use boards_service::projects::{CreateProject, MemberInvite};
use boards_service::{
    AuthService, Caller, CommentService, IssueService, MemberService, NotificationService,
    NullTransport, ProjectService, UserService,
};
use std::sync::{Arc, Mutex};

/// Transport that records every published event.
#[derive(Default)]
struct RecordingTransport {
    published: Mutex<Vec<(i64, Notification)>>,
}

#[async_trait]
impl NotificationTransport for RecordingTransport {
    async fn publish(&self, receiver_user_id: i64, notification: &Notification) {
        self.published
            .lock()
            .unwrap()
            .push((receiver_user_id, notification.clone()));
    }
}

struct TestEnv {
    pool: DbPool,
    transport: Arc<RecordingTransport>,
    auth: AuthService,
    users: UserService,
    projects: ProjectService,
    members: MemberService,
    issues: IssueService,
    comments: CommentService,
    notifications: NotificationService,
}

impl TestEnv {
    async fn new() -> Self {
        let pool = DbPool::in_memory().await.unwrap();
        let transport = Arc::new(RecordingTransport::default());
        Self {
            auth: AuthService::new(pool.clone()),
            users: UserService::new(pool.clone()),
            projects: ProjectService::new(pool.clone(), transport.clone()),
            members: MemberService::new(pool.clone()),
            issues: IssueService::new(pool.clone(), transport.clone()),
            comments: CommentService::new(pool.clone()),
            notifications: NotificationService::new(pool.clone()),
            pool,
            transport,
        }
    }

    /// Insert a user directly; fixture accounts skip real hashing.
    async fn add_user(&self, name: &str, email: &str) -> Caller {
        let mut conn = self.pool.inner().acquire().await.unwrap();
        let id = repo::users::insert(&mut conn, name, email, "fixture-hash", "USER")
            .await
            .unwrap();
        Caller::new(id, AccessRole::User)
    }

    async fn owner_count(&self, project_id: i64) -> i64 {
        let mut conn = self.pool.inner().acquire().await.unwrap();
        repo::members::count_by_project_and_role(&mut conn, project_id, "OWNER")
            .await
            .unwrap()
    }

    async fn project_exists(&self, project_id: i64) -> bool {
        let mut conn = self.pool.inner().acquire().await.unwrap();
        repo::projects::find_by_id(&mut conn, project_id)
            .await
            .unwrap()
            .is_some()
    }

    fn published_count(&self) -> usize {
        self.transport.published.lock().unwrap().len()
    }
}

fn create_request(name: &str, key: &str, members: Vec<MemberInvite>) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        key: key.to_string(),
        members,
        icon: None,
    }
}

fn invite(email: &str, role: MemberRole) -> MemberInvite {
    MemberInvite {
        email: email.to_string(),
        role,
    }
}

fn issue_request(title: &str, assignee: Option<i64>) -> CreateIssue {
    CreateIssue {
        title: title.to_string(),
        description: None,
        assignee_member_id: assignee,
        issue_type: IssueType::Task,
        status: IssueStatus::ToDo,
        priority: IssuePriority::Medium,
        due_on: None,
    }
}

#[tokio::test]
async fn signup_and_login() {
    let env = TestEnv::new().await;

    let user = env
        .auth
        .signup("Ada", "ada@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(user.access_role, AccessRole::User);

    let err = env
        .auth
        .signup("Ada again", "ada@example.com", "other")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmailAlreadyExists(_)));

    assert!(env.auth.login("ada@example.com", "hunter2").await.is_ok());
    assert!(matches!(
        env.auth.login("ada@example.com", "wrong").await.unwrap_err(),
        Error::InvalidCredentials
    ));
    assert!(matches!(
        env.auth.login("ghost@example.com", "x").await.unwrap_err(),
        Error::UserNotFound(_)
    ));
}

#[tokio::test]
async fn create_project_makes_caller_sole_owner() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();

    assert_eq!(env.owner_count(project.id).await, 1);

    // One ADDED_TO_PROJECT event for Bob, none for the creator.
    assert_eq!(env.published_count(), 1);
    let published = env.transport.published.lock().unwrap();
    assert_eq!(
        published[0].1.notification_type,
        NotificationType::AddedToProject
    );
}

#[tokio::test]
async fn create_project_rejects_owner_invites_and_unknown_emails() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    env.add_user("Bob", "bob@example.com").await;

    let err = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Owner)],
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let err = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("ghost@example.com", MemberRole::Viewer)],
            ),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn duplicate_project_names_are_per_user() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    env.projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();

    let err = env
        .projects
        .create_project(&ada, create_request("Alpha", "XX", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProjectNameAlreadyExists(_)));

    let err = env
        .projects
        .create_project(&ada, create_request("Beta", "PA", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ProjectKeyAlreadyExists(_)));

    // A different user is free to reuse both.
    assert!(env
        .projects
        .create_project(&bob, create_request("Alpha", "PA", vec![]))
        .await
        .is_ok());
}

#[tokio::test]
async fn invite_rejects_existing_members_and_owner_grants() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();

    env.projects
        .invite_users(
            &ada,
            project.id,
            &[invite("bob@example.com", MemberRole::Viewer)],
        )
        .await
        .unwrap();

    let err = env
        .projects
        .invite_users(
            &ada,
            project.id,
            &[invite("bob@example.com", MemberRole::Developer)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MemberAlreadyExists(_)));

    let err = env
        .projects
        .invite_users(
            &ada,
            project.id,
            &[invite("ada@example.com", MemberRole::Owner)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    assert_eq!(env.owner_count(project.id).await, 1);
}

#[tokio::test]
async fn viewer_cannot_invite_and_stranger_is_not_a_member() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;
    let eve = env.add_user("Eve", "eve@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Viewer)],
            ),
        )
        .await
        .unwrap();

    let err = env
        .projects
        .invite_users(
            &bob,
            project.id,
            &[invite("eve@example.com", MemberRole::Viewer)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let err = env
        .projects
        .invite_users(
            &eve,
            project.id,
            &[invite("eve@example.com", MemberRole::Viewer)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MemberNotFound(_)));
}

#[tokio::test]
async fn issue_keys_start_at_one_and_never_restart() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;

    let project = env
        .projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();

    let first = env
        .issues
        .create_issue(&ada, project.id, issue_request("First", None))
        .await
        .unwrap();
    assert_eq!(first.key, "PA-1");

    let second = env
        .issues
        .create_issue(&ada, project.id, issue_request("Second", None))
        .await
        .unwrap();
    assert_eq!(second.key, "PA-2");

    // Deleting an issue below the maximum leaves a gap; the freed
    // number is never handed out again.
    env.issues
        .delete_issue(&ada, project.id, first.id)
        .await
        .unwrap();
    let third = env
        .issues
        .create_issue(&ada, project.id, issue_request("Third", None))
        .await
        .unwrap();
    assert_eq!(third.key, "PA-3");
}

#[tokio::test]
async fn issue_key_continues_from_highest_existing_suffix() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;

    let project = env
        .projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();

    {
        let mut conn = env.pool.inner().acquire().await.unwrap();
        let row = boards_db::models::IssueRow {
            id: 0,
            project_id: project.id,
            key: "PA-100".to_string(),
            key_number: 100,
            title: "Imported".to_string(),
            description: None,
            assignee_member_id: None,
            issue_type: "TASK".to_string(),
            status: "DONE".to_string(),
            priority: "LOW".to_string(),
            created_on: chrono::Utc::now(),
            updated_on: None,
            due_on: None,
            created_by_member_id: None,
        };
        repo::issues::insert(&mut conn, &row).await.unwrap();
    }

    let next = env
        .issues
        .create_issue(&ada, project.id, issue_request("Next", None))
        .await
        .unwrap();
    assert_eq!(next.key, "PA-101");
}

#[tokio::test]
async fn assignment_notifications_skip_self() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();
    let baseline = env.published_count();

    let ada_member = env
        .members
        .get_current_member(ada.user_id, project.id)
        .await
        .unwrap();
    let bob_member = env
        .members
        .get_current_member(bob.user_id, project.id)
        .await
        .unwrap();

    // Self-assignment: no event.
    env.issues
        .create_issue(&ada, project.id, issue_request("Mine", Some(ada_member.id)))
        .await
        .unwrap();
    assert_eq!(env.published_count(), baseline);

    // Assignment to someone else: exactly one event.
    env.issues
        .create_issue(&ada, project.id, issue_request("Yours", Some(bob_member.id)))
        .await
        .unwrap();
    assert_eq!(env.published_count(), baseline + 1);
    {
        let published = env.transport.published.lock().unwrap();
        let (receiver_user_id, notification) = published.last().unwrap();
        assert_eq!(*receiver_user_id, bob.user_id);
        assert_eq!(
            notification.notification_type,
            NotificationType::AssignedToIssue
        );
    }
}

#[tokio::test]
async fn issue_update_notifies_only_on_assignee_change() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();
    let bob_member = env
        .members
        .get_current_member(bob.user_id, project.id)
        .await
        .unwrap();

    let issue = env
        .issues
        .create_issue(&ada, project.id, issue_request("Work", Some(bob_member.id)))
        .await
        .unwrap();
    let baseline = env.published_count();

    // Same assignee: no new event.
    let update = UpdateIssue {
        title: "Work, retitled".to_string(),
        description: Some("now with details".to_string()),
        assignee_member_id: Some(bob_member.id),
        issue_type: IssueType::Task,
        status: IssueStatus::InProgress,
        priority: IssuePriority::High,
        due_on: None,
    };
    let updated = env
        .issues
        .update_issue(&ada, project.id, issue.id, update)
        .await
        .unwrap();
    assert_eq!(env.published_count(), baseline);
    assert_eq!(updated.status, IssueStatus::InProgress);
    assert!(updated.updated_on.is_some());
}

#[tokio::test]
async fn status_updates_are_unrestricted_transitions() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let vic = env.add_user("Vic", "vic@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("vic@example.com", MemberRole::Viewer)],
            ),
        )
        .await
        .unwrap();
    let issue = env
        .issues
        .create_issue(&ada, project.id, issue_request("Work", None))
        .await
        .unwrap();

    // DONE straight back to TO_DO is fine; there is no transition graph.
    let done = env
        .issues
        .update_status(&ada, project.id, issue.id, IssueStatus::Done)
        .await
        .unwrap();
    assert_eq!(done.status, IssueStatus::Done);
    let reopened = env
        .issues
        .update_status(&ada, project.id, issue.id, IssueStatus::ToDo)
        .await
        .unwrap();
    assert_eq!(reopened.status, IssueStatus::ToDo);

    // Viewers read but never write.
    assert!(env.issues.get_issues_by_project(&vic, project.id).await.is_ok());
    let err = env
        .issues
        .update_status(&vic, project.id, issue.id, IssueStatus::Done)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
}

#[tokio::test]
async fn admin_cannot_touch_owner_or_other_admins() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;
    env.add_user("Cal", "cal@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![
                    invite("bob@example.com", MemberRole::Admin),
                    invite("cal@example.com", MemberRole::Admin),
                ],
            ),
        )
        .await
        .unwrap();

    let ada_member = env
        .members
        .get_current_member(ada.user_id, project.id)
        .await
        .unwrap();
    let cal_member = env
        .members
        .get_current_member(
            env.users.get_user_by_email("cal@example.com").await.unwrap().id,
            project.id,
        )
        .await
        .unwrap();

    let err = env
        .members
        .remove_member(&bob, ada_member.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let err = env
        .members
        .remove_member(&bob, cal_member.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let err = env
        .members
        .update_member_role(&bob, ada_member.id, MemberRole::Viewer)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let err = env
        .members
        .update_member_role(&bob, cal_member.id, MemberRole::Viewer)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
}

#[tokio::test]
async fn role_changes_on_regular_members_succeed() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;
    let cal = env.add_user("Cal", "cal@example.com").await;
    let vic = env.add_user("Vic", "vic@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![
                    invite("bob@example.com", MemberRole::Admin),
                    invite("cal@example.com", MemberRole::Developer),
                    invite("vic@example.com", MemberRole::Viewer),
                ],
            ),
        )
        .await
        .unwrap();

    let cal_member = env
        .members
        .get_current_member(cal.user_id, project.id)
        .await
        .unwrap();
    let vic_member = env
        .members
        .get_current_member(vic.user_id, project.id)
        .await
        .unwrap();

    // The owner demotes a developer; the returned member carries the
    // new role.
    let updated = env
        .members
        .update_member_role(&ada, cal_member.id, MemberRole::Viewer)
        .await
        .unwrap();
    assert_eq!(updated.role, MemberRole::Viewer);

    // An admin promotes that viewer back to developer.
    let updated = env
        .members
        .update_member_role(&bob, cal_member.id, MemberRole::Developer)
        .await
        .unwrap();
    assert_eq!(updated.role, MemberRole::Developer);

    // An admin removes a viewer; the project and the owner survive.
    env.members.remove_member(&bob, vic_member.id).await.unwrap();
    let err = env.members.get_member(vic_member.id).await.unwrap_err();
    assert!(matches!(err, Error::MemberNotFound(_)));

    assert!(env.project_exists(project.id).await);
    assert_eq!(env.owner_count(project.id).await, 1);
}

#[tokio::test]
async fn mutations_commit_without_a_listening_transport() {
    let pool = DbPool::in_memory().await.unwrap();
    let projects = ProjectService::new(pool.clone(), Arc::new(NullTransport));

    let ada = {
        let mut conn = pool.inner().acquire().await.unwrap();
        let id = repo::users::insert(&mut conn, "Ada", "ada@example.com", "fixture-hash", "USER")
            .await
            .unwrap();
        repo::users::insert(&mut conn, "Bob", "bob@example.com", "fixture-hash", "USER")
            .await
            .unwrap();
        Caller::new(id, AccessRole::User)
    };

    let project = projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();

    // The mutation and the notification row are committed even though
    // delivery goes nowhere.
    let mut conn = pool.inner().acquire().await.unwrap();
    assert_eq!(
        repo::members::count_by_project(&mut conn, project.id)
            .await
            .unwrap(),
        2
    );
    let recorded: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE project_id = ?")
        .bind(project.id)
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(recorded.0, 1);
}

#[tokio::test]
async fn owner_grant_demotes_acting_owner_instead_of_promoting_target() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();

    let bob_member = env
        .members
        .get_current_member(bob.user_id, project.id)
        .await
        .unwrap();

    // Granting OWNER demotes the acting owner; the target keeps its role.
    // A second OWNER is never written.
    let returned = env
        .members
        .update_member_role(&ada, bob_member.id, MemberRole::Owner)
        .await
        .unwrap();
    assert_eq!(returned.role, MemberRole::Developer);

    let ada_member = env
        .members
        .get_current_member(ada.user_id, project.id)
        .await
        .unwrap();
    assert_eq!(ada_member.role, MemberRole::Admin);
    assert!(env.owner_count(project.id).await <= 1);
}

#[tokio::test]
async fn owner_cannot_leave_while_others_remain() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Viewer)],
            ),
        )
        .await
        .unwrap();

    let ada_member = env
        .members
        .get_current_member(ada.user_id, project.id)
        .await
        .unwrap();

    let err = env
        .members
        .remove_member(&ada, ada_member.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
    assert!(env.project_exists(project.id).await);
}

#[tokio::test]
async fn sole_owner_leaving_deletes_the_project() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;

    let project = env
        .projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();
    let ada_member = env
        .members
        .get_current_member(ada.user_id, project.id)
        .await
        .unwrap();

    env.members.remove_member(&ada, ada_member.id).await.unwrap();
    assert!(!env.project_exists(project.id).await);

    let mut conn = env.pool.inner().acquire().await.unwrap();
    let leftover: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE project_id = ?")
            .bind(project.id)
            .fetch_one(&mut *conn)
            .await
            .unwrap();
    assert_eq!(leftover.0, 0);
}

#[tokio::test]
async fn member_removal_cascades_their_footprint() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();
    let bob_member = env
        .members
        .get_current_member(bob.user_id, project.id)
        .await
        .unwrap();

    let issue = env
        .issues
        .create_issue(&bob, project.id, issue_request("Bob's", Some(bob_member.id)))
        .await
        .unwrap();
    env.comments
        .create_comment(&bob, project.id, issue.id, "mine")
        .await
        .unwrap();

    env.members.remove_member(&ada, bob_member.id).await.unwrap();

    // Project survives, issue survives with nulled references, comment gone.
    assert!(env.project_exists(project.id).await);
    let issue = env.issues.get_issue(&ada, project.id, issue.id).await.unwrap();
    assert_eq!(issue.assignee_member_id, None);
    assert_eq!(issue.created_by_member_id, None);

    let comments = env
        .comments
        .get_comments(&ada, project.id, issue.id)
        .await
        .unwrap();
    assert!(comments.is_empty());

    let inbox = env
        .notifications
        .get_notifications(&bob, bob.user_id)
        .await
        .unwrap();
    assert!(inbox.is_empty());
}

#[tokio::test]
async fn comment_gate_is_author_only() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;
    let eve = env.add_user("Eve", "eve@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();
    let issue = env
        .issues
        .create_issue(&ada, project.id, issue_request("Work", None))
        .await
        .unwrap();

    let comment = env
        .comments
        .create_comment(&bob, project.id, issue.id, "first")
        .await
        .unwrap();

    // The owner cannot edit or delete someone else's comment.
    let err = env
        .comments
        .edit_comment(&ada, project.id, comment.id, "hijacked")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
    let err = env
        .comments
        .delete_comment(&ada, project.id, comment.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    // Non-members are turned away before the authorship check.
    let err = env
        .comments
        .create_comment(&eve, project.id, issue.id, "hi")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MemberNotFound(_)));

    // The author may do both.
    let edited = env
        .comments
        .edit_comment(&bob, project.id, comment.id, "first, edited")
        .await
        .unwrap();
    assert_eq!(edited.body, "first, edited");
    assert!(edited.last_updated_on.is_some());
    env.comments
        .delete_comment(&bob, project.id, comment.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn overlong_comment_body_is_rejected() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;

    let project = env
        .projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();
    let issue = env
        .issues
        .create_issue(&ada, project.id, issue_request("Work", None))
        .await
        .unwrap();

    let body = "x".repeat(501);
    let err = env
        .comments
        .create_comment(&ada, project.id, issue.id, &body)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn user_deletion_cascades_but_issues_survive() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Developer)],
            ),
        )
        .await
        .unwrap();
    let bob_member = env
        .members
        .get_current_member(bob.user_id, project.id)
        .await
        .unwrap();

    let issue = env
        .issues
        .create_issue(&ada, project.id, issue_request("Work", Some(bob_member.id)))
        .await
        .unwrap();

    env.users.delete_user(&bob, bob.user_id).await.unwrap();

    let mut conn = env.pool.inner().acquire().await.unwrap();
    assert!(repo::users::find_by_id(&mut conn, bob.user_id)
        .await
        .unwrap()
        .is_none());
    assert!(repo::members::list_by_user(&mut conn, bob.user_id)
        .await
        .unwrap()
        .is_empty());

    let surviving = repo::issues::find_by_id(&mut conn, issue.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(surviving.assignee_member_id, None);

    let leftovers: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM notifications WHERE receiver_member_id = ? OR sender_member_id = ?",
    )
    .bind(bob_member.id)
    .bind(bob_member.id)
    .fetch_one(&mut *conn)
    .await
    .unwrap();
    assert_eq!(leftovers.0, 0);
}

#[tokio::test]
async fn notification_inbox_is_self_only() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    env.projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Viewer)],
            ),
        )
        .await
        .unwrap();

    let err = env
        .notifications
        .get_notifications(&ada, bob.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    let inbox = env
        .notifications
        .get_notifications(&bob, bob.user_id)
        .await
        .unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(!inbox[0].read);

    env.notifications
        .toggle_read(&bob, bob.user_id, inbox[0].id)
        .await
        .unwrap();
    let inbox = env
        .notifications
        .get_notifications(&bob, bob.user_id)
        .await
        .unwrap();
    assert!(inbox[0].read);

    env.notifications
        .delete_all_notifications(&bob, bob.user_id)
        .await
        .unwrap();
    assert!(env
        .notifications
        .get_notifications(&bob, bob.user_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn project_visibility_is_scoped_to_participants() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let eve = env.add_user("Eve", "eve@example.com").await;

    let project = env
        .projects
        .create_project(&ada, create_request("Alpha", "PA", vec![]))
        .await
        .unwrap();

    assert!(env.projects.get_project(&ada, project.id).await.is_ok());
    let err = env.projects.get_project(&eve, project.id).await.unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound(_)));

    let err = env
        .projects
        .get_projects_by_user(&eve, ada.user_id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));
}

#[tokio::test]
async fn only_the_owner_deletes_a_project() {
    let env = TestEnv::new().await;
    let ada = env.add_user("Ada", "ada@example.com").await;
    let bob = env.add_user("Bob", "bob@example.com").await;

    let project = env
        .projects
        .create_project(
            &ada,
            create_request(
                "Alpha",
                "PA",
                vec![invite("bob@example.com", MemberRole::Admin)],
            ),
        )
        .await
        .unwrap();

    let err = env
        .projects
        .delete_project(&bob, project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthorized(_)));

    env.projects.delete_project(&ada, project.id).await.unwrap();
    assert!(!env.project_exists(project.id).await);
}
