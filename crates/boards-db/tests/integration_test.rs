use boards_db::models::{IssueRow, NotificationRow};
use boards_db::{repo, DbPool};
use chrono::Utc;
use tempfile::NamedTempFile;

async fn connect_temp() -> (DbPool, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let db_url = format!("sqlite://{}", temp_file.path().to_str().unwrap());
    let pool = DbPool::connect(&db_url).await.unwrap();
    (pool, temp_file)
}

#[tokio::test]
async fn test_migration_and_basic_crud() {
    let (pool, _guard) = connect_temp().await;
    let mut conn = pool.inner().acquire().await.unwrap();

    let user_id = repo::users::insert(&mut conn, "Ada", "ada@example.com", "hash", "USER")
        .await
        .unwrap();
    let user = repo::users::find_by_id(&mut conn, user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.access_role, "USER");

    assert!(repo::users::exists_by_email(&mut conn, "ada@example.com")
        .await
        .unwrap());
    assert!(!repo::users::exists_by_email(&mut conn, "bob@example.com")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_member_lookups_and_counts() {
    let (pool, _guard) = connect_temp().await;
    let mut conn = pool.inner().acquire().await.unwrap();

    let user_id = repo::users::insert(&mut conn, "Ada", "ada@example.com", "hash", "USER")
        .await
        .unwrap();
    let project_id = repo::projects::insert(&mut conn, "Alpha", "PA", None)
        .await
        .unwrap();
    let member_id = repo::members::insert(
        &mut conn,
        user_id,
        project_id,
        "OWNER",
        Utc::now().date_naive(),
    )
    .await
    .unwrap();

    let by_pair = repo::members::find_by_user_and_project(&mut conn, user_id, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_pair.id, member_id);
    assert_eq!(by_pair.role, "OWNER");

    assert_eq!(
        repo::members::count_by_project(&mut conn, project_id)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        repo::members::count_by_project_and_role(&mut conn, project_id, "OWNER")
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_max_key_number_tracks_inserts() {
    let (pool, _guard) = connect_temp().await;
    let mut conn = pool.inner().acquire().await.unwrap();

    let project_id = repo::projects::insert(&mut conn, "Alpha", "PA", None)
        .await
        .unwrap();

    assert_eq!(
        repo::issues::max_key_number(&mut conn, project_id)
            .await
            .unwrap(),
        None
    );

    let issue = IssueRow {
        id: 0,
        project_id,
        key: "PA-100".to_string(),
        key_number: 100,
        title: "Backfill".to_string(),
        description: None,
        assignee_member_id: None,
        issue_type: "TASK".to_string(),
        status: "TO_DO".to_string(),
        priority: "MEDIUM".to_string(),
        created_on: Utc::now(),
        updated_on: None,
        due_on: None,
        created_by_member_id: None,
    };
    repo::issues::insert(&mut conn, &issue).await.unwrap();

    assert_eq!(
        repo::issues::max_key_number(&mut conn, project_id)
            .await
            .unwrap(),
        Some(100)
    );
}

#[tokio::test]
async fn test_notification_scoped_deletes() {
    let (pool, _guard) = connect_temp().await;
    let mut conn = pool.inner().acquire().await.unwrap();

    let u1 = repo::users::insert(&mut conn, "Ada", "ada@example.com", "h", "USER")
        .await
        .unwrap();
    let u2 = repo::users::insert(&mut conn, "Bob", "bob@example.com", "h", "USER")
        .await
        .unwrap();
    let project_id = repo::projects::insert(&mut conn, "Alpha", "PA", None)
        .await
        .unwrap();
    let m1 = repo::members::insert(&mut conn, u1, project_id, "OWNER", Utc::now().date_naive())
        .await
        .unwrap();
    let m2 = repo::members::insert(&mut conn, u2, project_id, "VIEWER", Utc::now().date_naive())
        .await
        .unwrap();

    let notification = NotificationRow {
        id: 0,
        notification_type: "ADDED_TO_PROJECT".to_string(),
        sender_member_id: m1,
        receiver_member_id: m2,
        issue_id: None,
        project_id: Some(project_id),
        timestamp: Utc::now(),
        read: false,
    };
    repo::notifications::insert(&mut conn, &notification)
        .await
        .unwrap();

    let received = repo::notifications::list_by_receiver_user(&mut conn, u2)
        .await
        .unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].notification_type, "ADDED_TO_PROJECT");

    // Member-scoped delete removes it as sender too
    repo::notifications::delete_by_member(&mut conn, m1)
        .await
        .unwrap();
    let received = repo::notifications::list_by_receiver_user(&mut conn, u2)
        .await
        .unwrap();
    assert!(received.is_empty());
}
