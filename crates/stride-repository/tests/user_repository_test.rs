//! Integration tests for MySqlUserRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::{create_test_user, TestDatabase};
use stride_core::{StrideError, UserId, UserParticulars, UserUpdate};
use stride_repository::{MySqlUserRepository, UserRepository};

#[tokio::test]
async fn test_insert_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = create_test_user("Alice");
    let saved = repo.insert(&user).await.expect("Failed to insert user");
    assert_eq!(saved.id, user.id);
    assert_eq!(saved.points, 0);

    let found = repo
        .find_by_id(&user.id)
        .await
        .expect("Failed to find user")
        .expect("User not found");

    assert_eq!(found, saved);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo.find_by_id(&UserId::new()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_by_email() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = create_test_user("Bob");
    repo.insert(&user).await.expect("Failed to insert user");

    let found = repo
        .find_by_email("bob@example.com")
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.id, user.id);

    assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.insert(&create_test_user("Carol")).await.unwrap();
    let err = repo.insert(&create_test_user("Carol")).await.unwrap_err();

    assert!(matches!(err, StrideError::Conflict(_)));
}

#[tokio::test]
async fn test_find_ranked_orders_by_points() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    for (name, points) in [("Low", 1), ("High", 10), ("Mid", 5)] {
        let user = repo.insert(&create_test_user(name)).await.unwrap();
        repo.apply(&user.id, &UserUpdate::AddPoints(points)).await.unwrap();
    }

    let ranked = repo.find_ranked().await.unwrap();
    let names: Vec<_> = ranked.iter().map(|u| u.first_name.as_str()).collect();
    assert_eq!(names, vec!["High", "Mid", "Low"]);
}

#[tokio::test]
async fn test_apply_add_points_returns_updated_row() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = repo.insert(&create_test_user("Dan")).await.unwrap();
    let updated = repo
        .apply(&user.id, &UserUpdate::AddPoints(5))
        .await
        .unwrap()
        .expect("User not found");

    assert_eq!(updated.points, 5);
    assert_eq!(updated.first_name, "Dan");
}

#[tokio::test]
async fn test_apply_particulars_keeps_unset_fields() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = repo.insert(&create_test_user("Eve")).await.unwrap();
    let updated = repo
        .apply(
            &user.id,
            &UserUpdate::Particulars(UserParticulars {
                last_name: Some("Ng".to_string()),
                ..UserParticulars::default()
            }),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.first_name, "Eve");
    assert_eq!(updated.last_name, "Ng");
    assert_eq!(updated.email, "eve@example.com");
}

#[tokio::test]
async fn test_apply_to_missing_user_returns_none() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo
        .apply(&UserId::new(), &UserUpdate::Timetable("https://example.com/t".to_string()))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_user() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = repo.insert(&create_test_user("Finn")).await.unwrap();

    assert!(repo.delete(&user.id).await.unwrap());
    assert!(repo.find_by_id(&user.id).await.unwrap().is_none());
    assert!(!repo.delete(&user.id).await.unwrap());
}
