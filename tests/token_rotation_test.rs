//! Token lifecycle tests: issuance, rotation, revocation, and the
//! single-slot invariant (one live refresh token per user).

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{make_user, token_service, MemoryStore};
use vidtube::error::AppError;

/// Consecutive refresh tokens share their claims except for `iat`, so two
/// issues within one second would be byte-identical. Space them out.
async fn next_second() {
    tokio::time::sleep(Duration::from_millis(1100)).await;
}

#[tokio::test]
async fn test_issue_persists_refresh_token() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("alice");
    store.insert(user.clone());

    let pair = svc.issue(&user).await.unwrap();

    assert_eq!(
        store.stored_refresh_token(user.id).as_deref(),
        Some(pair.refresh_token.as_str())
    );
}

#[tokio::test]
async fn test_rotation_preserves_subject() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("bob");
    store.insert(user.clone());

    let pair = svc.issue(&user).await.unwrap();
    next_second().await;

    let (new_pair, rotated_user) = svc.rotate(&pair.refresh_token).await.unwrap();
    assert_eq!(rotated_user.id, user.id);

    let claims = svc.verify_access(&new_pair.access_token).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.username, user.username);
}

#[tokio::test]
async fn test_issue_overwrites_previous_refresh_token() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("carol");
    store.insert(user.clone());

    let first = svc.issue(&user).await.unwrap();
    next_second().await;
    let second = svc.issue(&user).await.unwrap();

    assert_ne!(first.refresh_token, second.refresh_token);
    assert_eq!(
        store.stored_refresh_token(user.id).as_deref(),
        Some(second.refresh_token.as_str())
    );
}

#[tokio::test]
async fn test_stale_refresh_token_rejected() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("dave");
    store.insert(user.clone());

    let first = svc.issue(&user).await.unwrap();
    next_second().await;
    // second login supersedes the first device's token
    let _second = svc.issue(&user).await.unwrap();

    let err = svc.rotate(&first.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_rotation_is_single_use() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("erin");
    store.insert(user.clone());

    let pair = svc.issue(&user).await.unwrap();
    next_second().await;

    let (_new_pair, _) = svc.rotate(&pair.refresh_token).await.unwrap();

    // replaying the consumed token must fail
    let err = svc.rotate(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_rotation_for_deleted_user_is_not_found() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("frank");
    store.insert(user.clone());

    let pair = svc.issue(&user).await.unwrap();
    store.remove(user.id);

    let err = svc.rotate(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_revoked_token_cannot_rotate() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("grace");
    store.insert(user.clone());

    let pair = svc.issue(&user).await.unwrap();
    svc.revoke(user.id).await.unwrap();

    assert_eq!(store.stored_refresh_token(user.id), None);

    let err = svc.rotate(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_garbage_refresh_token_rejected() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store);

    let err = svc.rotate("definitely.not.a.jwt").await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)), "got {err:?}");
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let store = Arc::new(MemoryStore::default());
    let svc = token_service(store.clone());

    let user = make_user("heidi");
    store.insert(user.clone());

    let pair = svc.issue(&user).await.unwrap();

    let err = svc.rotate(&pair.access_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)), "got {err:?}");
}
