use rust_video_backend::api::error::AppError;
use rust_video_backend::entities::users::UserRole;
use rust_video_backend::entities::{categories, users, videos};
use rust_video_backend::infrastructure::database;
use rust_video_backend::repositories::PageRequest;
use rust_video_backend::services::{CategoryService, UserService, VideoService};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

async fn setup_test_db() -> DatabaseConnection {
    // Single connection so every query sees the same in-memory database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    database::run_migrations(&db).await.unwrap();
    db
}

async fn create_category(db: &DatabaseConnection, name: &str) -> categories::Model {
    CategoryService::create(db, name.to_string(), None)
        .await
        .unwrap()
}

async fn create_user(db: &DatabaseConnection, username: &str, email: &str) -> users::Model {
    UserService::create(
        db,
        username.to_string(),
        email.to_string(),
        format!("{} Fullname", username),
        "correct-horse-battery",
        UserRole::User,
    )
    .await
    .unwrap()
}

async fn create_video(
    db: &DatabaseConnection,
    title: &str,
    category_id: i64,
    user_id: i64,
) -> videos::Model {
    VideoService::create(
        db,
        title.to_string(),
        None,
        format!("https://videos.example/{}", title.replace(' ', "-")),
        Some(120),
        category_id,
        user_id,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_create_category_defaults() {
    let db = setup_test_db().await;

    let category = CategoryService::create(
        &db,
        "Music".to_string(),
        Some("All things audible".to_string()),
    )
    .await
    .unwrap();

    assert!(category.id > 0);
    assert!(category.is_active);
    assert_eq!(category.name, "Music");

    let loaded = CategoryService::get_by_id(&db, category.id).await.unwrap();
    assert_eq!(loaded.unwrap().description.as_deref(), Some("All things audible"));
}

#[tokio::test]
async fn test_duplicate_category_name_is_case_insensitive() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;

    let err = CategoryService::create(&db, "music".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateName(_)));

    // Inactive records still block the name
    CategoryService::deactivate(&db, music.id).await.unwrap();
    let err = CategoryService::create(&db, "MUSIC".to_string(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateName(_)));
}

#[tokio::test]
async fn test_update_category_name_rules() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let games = create_category(&db, "Games").await;

    // Taking another record's name fails
    let err = CategoryService::update(&db, games.id, "Music".to_string(), None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateName(_)));

    // Keeping your own name succeeds
    let updated = CategoryService::update(
        &db,
        music.id,
        "Music".to_string(),
        Some("updated".to_string()),
        true,
    )
    .await
    .unwrap();
    assert_eq!(updated.id, music.id);
    assert_eq!(updated.description.as_deref(), Some("updated"));
}

#[tokio::test]
async fn test_update_missing_category_is_not_found() {
    let db = setup_test_db().await;
    let err = CategoryService::update(&db, 9999, "Nothing".to_string(), None, true)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_deactivate_activate_roundtrip() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;

    CategoryService::deactivate(&db, music.id).await.unwrap();
    assert!(CategoryService::get_active_by_id(&db, music.id)
        .await
        .unwrap()
        .is_none());
    // The active-state-blind accessor still resolves it
    assert!(CategoryService::get_by_id(&db, music.id)
        .await
        .unwrap()
        .is_some());

    // Repeating the toggle is a no-op, not an error
    CategoryService::deactivate(&db, music.id).await.unwrap();

    CategoryService::activate(&db, music.id).await.unwrap();
    assert!(CategoryService::get_active_by_id(&db, music.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_hard_delete_is_permanent() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;

    CategoryService::delete(&db, music.id).await.unwrap();
    assert!(CategoryService::get_by_id(&db, music.id)
        .await
        .unwrap()
        .is_none());
    assert!(CategoryService::get_active_by_id(&db, music.id)
        .await
        .unwrap()
        .is_none());

    let err = CategoryService::delete(&db, music.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_category_hard_delete_cascades_to_videos() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;
    let video = create_video(&db, "Song A", music.id, alice.id).await;

    CategoryService::delete(&db, music.id).await.unwrap();

    assert!(VideoService::get_by_id(&db, video.id).await.unwrap().is_none());
    // The uploader is untouched
    assert!(UserService::get_by_id(&db, alice.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_user_hard_delete_cascades_to_videos() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;
    let video = create_video(&db, "Song A", music.id, alice.id).await;

    UserService::delete(&db, alice.id).await.unwrap();

    assert!(VideoService::get_by_id(&db, video.id).await.unwrap().is_none());
    assert!(CategoryService::get_by_id(&db, music.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_paging_totals_and_out_of_range_page() {
    let db = setup_test_db().await;
    for i in 0..25 {
        create_category(&db, &format!("Category {:02}", i)).await;
    }

    let req = PageRequest::new(0, 10, "name", "asc");
    let page = CategoryService::get_all_active_paged(&db, &req).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_items, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items[0].name, "Category 00");

    // Fourth page (zero-based index 3) is past the end: empty, same totals
    let req = PageRequest::new(3, 10, "name", "asc");
    let page = CategoryService::get_all_active_paged(&db, &req).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 25);
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn test_paging_excludes_inactive_records() {
    let db = setup_test_db().await;
    let a = create_category(&db, "Alpha").await;
    create_category(&db, "Beta").await;
    CategoryService::deactivate(&db, a.id).await.unwrap();

    let req = PageRequest::new(0, 10, "name", "asc");
    let page = CategoryService::get_all_active_paged(&db, &req).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "Beta");
}

#[tokio::test]
async fn test_sort_direction_and_unknown_field() {
    let db = setup_test_db().await;
    create_category(&db, "Banana").await;
    create_category(&db, "Apple").await;
    create_category(&db, "Cherry").await;

    let req = PageRequest::new(0, 10, "name", "DESC");
    let page = CategoryService::get_all_active_paged(&db, &req).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Cherry", "Banana", "Apple"]);

    let req = PageRequest::new(0, 10, "popularity", "asc");
    let err = CategoryService::get_all_active_paged(&db, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidSortField(_)));
}

#[tokio::test]
async fn test_search_is_case_insensitive_over_text_fields() {
    let db = setup_test_db().await;
    CategoryService::create(&db, "Rock Music".to_string(), None)
        .await
        .unwrap();
    CategoryService::create(
        &db,
        "Jazz".to_string(),
        Some("smooth music vibes".to_string()),
    )
    .await
    .unwrap();
    create_category(&db, "Gaming").await;

    let req = PageRequest::new(0, 10, "name", "asc");
    let page = CategoryService::search(&db, "MUSIC", &req).await.unwrap();
    assert_eq!(page.total_items, 2);

    let page = CategoryService::search(&db, "gam", &req).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "Gaming");
}

#[tokio::test]
async fn test_user_duplicate_username_and_email_are_distinct_errors() {
    let db = setup_test_db().await;
    create_user(&db, "alice", "alice@example.com").await;

    let err = UserService::create(
        &db,
        "Alice".to_string(),
        "other@example.com".to_string(),
        "Other".to_string(),
        "longenoughpw",
        UserRole::User,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::DuplicateUsername(_)));

    let err = UserService::create(
        &db,
        "bob".to_string(),
        "ALICE@example.com".to_string(),
        "Bob".to_string(),
        "longenoughpw",
        UserRole::User,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail(_)));
}

#[tokio::test]
async fn test_password_is_hashed_and_kept_on_blank_update() {
    let db = setup_test_db().await;
    let alice = create_user(&db, "alice", "alice@example.com").await;

    assert_ne!(alice.password_hash, "correct-horse-battery");
    assert!(alice.password_hash.starts_with("$argon2"));

    // No password supplied: the stored hash stays
    let updated = UserService::update(
        &db,
        alice.id,
        "alice".to_string(),
        "alice@example.com".to_string(),
        "Alice Fullname".to_string(),
        None,
        UserRole::User,
        true,
    )
    .await
    .unwrap();
    assert_eq!(updated.password_hash, alice.password_hash);

    // Empty string behaves like absent
    let updated = UserService::update(
        &db,
        alice.id,
        "alice".to_string(),
        "alice@example.com".to_string(),
        "Alice Fullname".to_string(),
        Some(String::new()),
        UserRole::User,
        true,
    )
    .await
    .unwrap();
    assert_eq!(updated.password_hash, alice.password_hash);

    // A real new password replaces the hash
    let updated = UserService::update(
        &db,
        alice.id,
        "alice".to_string(),
        "alice@example.com".to_string(),
        "Alice Fullname".to_string(),
        Some("a-brand-new-secret".to_string()),
        UserRole::User,
        true,
    )
    .await
    .unwrap();
    assert_ne!(updated.password_hash, alice.password_hash);
    assert!(updated.password_hash.starts_with("$argon2"));
}

#[tokio::test]
async fn test_users_by_role_and_counts() {
    let db = setup_test_db().await;
    UserService::create(
        &db,
        "root".to_string(),
        "root@example.com".to_string(),
        "Root".to_string(),
        "longenoughpw",
        UserRole::Admin,
    )
    .await
    .unwrap();
    create_user(&db, "alice", "alice@example.com").await;
    let bob = create_user(&db, "bob", "bob@example.com").await;

    assert_eq!(UserService::count_by_role(&db, UserRole::User).await.unwrap(), 2);
    assert_eq!(UserService::count_by_role(&db, UserRole::Admin).await.unwrap(), 1);

    UserService::deactivate(&db, bob.id).await.unwrap();
    let users = UserService::get_by_role(&db, UserRole::User).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "alice");
}

#[tokio::test]
async fn test_video_requires_active_references() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;

    CategoryService::deactivate(&db, music.id).await.unwrap();

    let err = VideoService::create(
        &db,
        "Song A".to_string(),
        None,
        "https://videos.example/song-a".to_string(),
        Some(120),
        music.id,
        alice.id,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ReferenceInvalid(_)));

    // Reactivating the category makes the same request succeed
    CategoryService::activate(&db, music.id).await.unwrap();
    let video = create_video(&db, "Song A", music.id, alice.id).await;
    assert!(video.is_active);

    let err = VideoService::create(
        &db,
        "Song B".to_string(),
        None,
        "https://videos.example/song-b".to_string(),
        None,
        music.id,
        4242,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::ReferenceInvalid(_)));
}

#[tokio::test]
async fn test_create_video_scenario_resolves_fresh_references() {
    let db = setup_test_db().await;
    let music = CategoryService::create(&db, "Music".to_string(), Some(String::new()))
        .await
        .unwrap();
    let alice = UserService::create(
        &db,
        "alice".to_string(),
        "a@x.com".to_string(),
        "Alice".to_string(),
        "longenoughpw",
        UserRole::User,
    )
    .await
    .unwrap();

    let video = VideoService::create(
        &db,
        "Song A".to_string(),
        None,
        "https://videos.example/song-a".to_string(),
        Some(120),
        music.id,
        alice.id,
    )
    .await
    .unwrap();

    assert_eq!(video.views, 0);
    assert_eq!(video.likes, 0);
    assert!(video.is_active);
    assert_eq!(video.duration, Some(120));
    assert_eq!(video.category_id, music.id);
    assert_eq!(video.user_id, alice.id);
}

#[tokio::test]
async fn test_increment_counters() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;
    let video = create_video(&db, "Song A", music.id, alice.id).await;

    for _ in 0..5 {
        VideoService::increment_views(&db, video.id).await.unwrap();
    }
    VideoService::increment_likes(&db, video.id).await.unwrap();

    let loaded = VideoService::get_by_id(&db, video.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.views, 5);
    assert_eq!(loaded.likes, 1);

    let err = VideoService::increment_views(&db, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_video_filters_by_category_and_user() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let games = create_category(&db, "Games").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;
    let bob = create_user(&db, "bob", "bob@example.com").await;

    create_video(&db, "Song A", music.id, alice.id).await;
    create_video(&db, "Song B", music.id, bob.id).await;
    create_video(&db, "Speedrun", games.id, alice.id).await;

    assert_eq!(VideoService::get_by_category(&db, music.id).await.unwrap().len(), 2);
    assert_eq!(VideoService::get_by_user(&db, alice.id).await.unwrap().len(), 2);
    let both = VideoService::get_by_category_and_user(&db, music.id, alice.id)
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].title, "Song A");

    assert_eq!(VideoService::count_by_category(&db, music.id).await.unwrap(), 2);
    assert_eq!(VideoService::count_by_user(&db, bob.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_most_viewed_and_most_liked_ordering() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;

    let a = create_video(&db, "Song A", music.id, alice.id).await;
    let b = create_video(&db, "Song B", music.id, alice.id).await;
    let c = create_video(&db, "Song C", music.id, alice.id).await;

    for _ in 0..3 {
        VideoService::increment_views(&db, b.id).await.unwrap();
    }
    VideoService::increment_views(&db, c.id).await.unwrap();
    VideoService::increment_likes(&db, a.id).await.unwrap();

    let page = VideoService::get_most_viewed(&db, 0, 10).await.unwrap();
    let titles: Vec<_> = page.items.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles[0], "Song B");
    assert_eq!(titles[1], "Song C");

    let page = VideoService::get_most_liked(&db, 0, 10).await.unwrap();
    assert_eq!(page.items[0].title, "Song A");
}

#[tokio::test]
async fn test_lookup_helpers() {
    let db = setup_test_db().await;
    create_category(&db, "Music").await;
    create_user(&db, "alice", "alice@example.com").await;

    assert!(CategoryService::exists_by_name(&db, "music").await.unwrap());
    assert!(!CategoryService::exists_by_name(&db, "games").await.unwrap());

    let found = UserService::get_by_username(&db, "alice").await.unwrap();
    assert_eq!(found.unwrap().email, "alice@example.com");
    assert!(UserService::get_by_username(&db, "nobody").await.unwrap().is_none());

    let found = UserService::get_by_email(&db, "alice@example.com").await.unwrap();
    assert_eq!(found.unwrap().username, "alice");

    assert!(UserService::exists_by_username(&db, "ALICE").await.unwrap());
    assert!(UserService::exists_by_email(&db, "Alice@Example.com").await.unwrap());
}

#[tokio::test]
async fn test_dashboard_counts_follow_lifecycle() {
    let db = setup_test_db().await;
    let music = create_category(&db, "Music").await;
    create_category(&db, "Games").await;
    let alice = create_user(&db, "alice", "alice@example.com").await;
    create_video(&db, "Song A", music.id, alice.id).await;

    assert_eq!(CategoryService::count_active(&db).await.unwrap(), 2);
    assert_eq!(UserService::count_active(&db).await.unwrap(), 1);
    assert_eq!(VideoService::count_active(&db).await.unwrap(), 1);

    CategoryService::deactivate(&db, music.id).await.unwrap();
    assert_eq!(CategoryService::count_active(&db).await.unwrap(), 1);
    // Deactivating the category does not touch the video's own flag
    assert_eq!(VideoService::count_active(&db).await.unwrap(), 1);
}
