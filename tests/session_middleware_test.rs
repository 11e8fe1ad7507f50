//! Session middleware behaviour against a live actix test app: token
//! extraction (cookie and bearer), rejection paths, and identity
//! attachment.

mod common;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{http::StatusCode, test, web, App, HttpResponse};

use common::{make_user, token_service, MemoryStore};
use vidtube::middleware::{CurrentUser, SessionAuth};
use vidtube::security::jwt;

async fn whoami(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().body(user.username)
}

macro_rules! secured_app {
    ($tokens:expr) => {
        test::init_service(
            App::new().service(
                web::scope("/secure")
                    .wrap(SessionAuth::new($tokens))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_request_without_token_is_rejected() {
    let store = Arc::new(MemoryStore::default());
    let tokens = Arc::new(token_service(store));
    let app = secured_app!(tokens);

    let req = test::TestRequest::get().uri("/secure/whoami").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_bearer_token_attaches_identity() {
    let store = Arc::new(MemoryStore::default());
    let tokens = Arc::new(token_service(store.clone()));

    let user = make_user("ivan");
    store.insert(user.clone());
    let pair = tokens.issue(&user).await.unwrap();

    let app = secured_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, "ivan".as_bytes());
}

#[actix_web::test]
async fn test_access_cookie_attaches_identity() {
    let store = Arc::new(MemoryStore::default());
    let tokens = Arc::new(token_service(store.clone()));

    let user = make_user("judy");
    store.insert(user.clone());
    let pair = tokens.issue(&user).await.unwrap();

    let app = secured_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .cookie(Cookie::new("accessToken", pair.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_tampered_token_is_rejected() {
    let store = Arc::new(MemoryStore::default());
    let tokens = Arc::new(token_service(store.clone()));

    let user = make_user("mallory");
    store.insert(user.clone());

    // signed with the wrong secret
    let forged = jwt::encode_access_token(
        user.id,
        &user.email,
        &user.username,
        &user.full_name,
        "attacker-controlled-secret",
        900,
    )
    .unwrap();

    let app = secured_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .insert_header(("Authorization", format!("Bearer {forged}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_token_for_vanished_user_is_rejected() {
    let store = Arc::new(MemoryStore::default());
    let tokens = Arc::new(token_service(store.clone()));

    let user = make_user("niaj");
    store.insert(user.clone());
    let pair = tokens.issue(&user).await.unwrap();

    store.remove(user.id);

    let app = secured_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_refresh_token_rejected_on_session_routes() {
    let store = Arc::new(MemoryStore::default());
    let tokens = Arc::new(token_service(store.clone()));

    let user = make_user("olivia");
    store.insert(user.clone());
    let pair = tokens.issue(&user).await.unwrap();

    let app = secured_app!(tokens);

    let req = test::TestRequest::get()
        .uri("/secure/whoami")
        .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
