//! Unit tests for SessionRepository.

use crate::session_repo::SessionRepository;

#[tokio::test]
async fn test_find_user_for_known_token() {
    let repo = SessionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    repo.insert_session("tok-123", "alice")
        .await
        .expect("Failed to insert session");

    let user = repo.find_user("tok-123").await.expect("query");
    assert_eq!(user.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_find_user_for_unknown_token() {
    let repo = SessionRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");

    let user = repo.find_user("nope").await.expect("query");
    assert!(user.is_none());
}
