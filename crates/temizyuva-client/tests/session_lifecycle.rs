//! Login, refresh, restore and logout against a mock backend

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::*;
use temizyuva_client::{
    AdminClient, ClientError, FileTokenStore, Resolution, RouteGuard, Session, TokenStore,
};
use temizyuva_core::types::UserProfile;

async fn mount_refresh(backend: &TestBackend, old: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/Auth/refresh-token"))
        .and(header("authorization", format!("Bearer {old}").as_str()))
        .respond_with(response)
        .expect(1)
        .mount(&backend.server)
        .await;
}

#[tokio::test]
async fn test_login_persists_session() {
    let backend = TestBackend::start().await;
    let token = live_token();
    backend.mount_login(&token).await;
    let manager = backend.manager();

    let session = manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    assert_eq!(session.user.full_name, "Ayşe Yılmaz");
    assert_eq!(session.user.role, "Admin");
    assert!(session.expiry.is_some());
    assert!(manager.is_authenticated().await);
    assert_eq!(backend.persisted_token(), Some(token));
}

#[tokio::test]
async fn test_rejected_login_leaves_no_session() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/Auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "E-posta veya şifre hatalı"})),
        )
        .mount(&backend.server)
        .await;
    let manager = backend.manager();

    let err = manager.login(ADMIN_EMAIL, "yanlis").await.unwrap_err();

    assert!(matches!(&err, ClientError::LoginFailed { message } if message.contains("hatalı")));
    assert!(!manager.is_authenticated().await);
    assert!(!backend.session_file().exists());
}

#[tokio::test]
async fn test_unsuccessful_login_envelope_is_a_failure() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/Auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": false, "message": "Hesap kilitli"})),
        )
        .mount(&backend.server)
        .await;

    let err = backend.manager().login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap_err();
    assert!(matches!(err, ClientError::LoginFailed { message } if message == "Hesap kilitli"));
}

#[tokio::test]
async fn test_login_without_success_flag_is_a_failure() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/Auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"token": live_token(), "user": admin_user()}})),
        )
        .mount(&backend.server)
        .await;
    let manager = backend.manager();

    let err = manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap_err();

    assert!(matches!(err, ClientError::LoginFailed { .. }));
    assert!(!manager.is_authenticated().await);
    assert!(!backend.session_file().exists());
}

#[tokio::test]
async fn test_refresh_replaces_persisted_token() {
    let backend = TestBackend::start().await;
    let old = token_expiring_in(30);
    let fresh = live_token();
    backend.mount_login(&old).await;
    mount_refresh(&backend, &old, ResponseTemplate::new(200).set_body_json(json!({"token": fresh}))).await;

    let manager = backend.manager().with_refresh_skew(Duration::from_secs(120));
    manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    assert!(manager.refresh_if_needed().await);

    let session = manager.current_session().await.unwrap();
    assert_eq!(session.token, fresh);
    assert_eq!(session.user.full_name, "Ayşe Yılmaz");
    assert_eq!(backend.persisted_token(), Some(fresh));
}

#[tokio::test]
async fn test_failed_refresh_logs_out() {
    let backend = TestBackend::start().await;
    let old = expired_token();
    backend.mount_login(&old).await;
    mount_refresh(&backend, &old, ResponseTemplate::new(401)).await;

    let manager = backend.manager().with_refresh_skew(Duration::from_secs(120));
    manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert!(backend.session_file().exists());

    assert!(!manager.refresh_if_needed().await);
    assert!(!manager.is_authenticated().await);
    assert!(manager.current_session().await.is_none());
    assert!(!backend.session_file().exists());
}

#[tokio::test]
async fn test_failed_early_refresh_keeps_valid_token() {
    let backend = TestBackend::start().await;
    let old = token_expiring_in(30);
    backend.mount_login(&old).await;
    mount_refresh(&backend, &old, ResponseTemplate::new(503)).await;

    let manager = backend.manager().with_refresh_skew(Duration::from_secs(60));
    manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    assert!(manager.refresh_if_needed().await);
    assert!(manager.is_authenticated().await);
    assert_eq!(manager.current_session().await.unwrap().token, old);
    assert_eq!(backend.persisted_token(), Some(old));
}

#[tokio::test]
async fn test_logout_during_refresh_is_not_undone() {
    let backend = TestBackend::start().await;
    let old = expired_token();
    let fresh = live_token();
    backend.mount_login(&old).await;
    mount_refresh(
        &backend,
        &old,
        ResponseTemplate::new(200)
            .set_body_json(json!({"token": fresh}))
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let manager = Arc::new(backend.manager());
    manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let refreshing = {
        let manager = Arc::clone(&manager);
        let old = old.clone();
        tokio::spawn(async move { manager.refresh_token(&old).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    manager.logout().await;

    assert_eq!(refreshing.await.unwrap(), None);
    assert!(!manager.is_authenticated().await);
    assert!(!backend.session_file().exists());
}

#[tokio::test]
async fn test_fresh_token_is_left_alone() {
    let backend = TestBackend::start().await;
    let token = live_token();
    backend.mount_login(&token).await;
    Mock::given(method("POST"))
        .and(path("/Auth/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let manager = backend.manager().with_refresh_skew(Duration::from_secs(120));
    manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    assert!(manager.refresh_if_needed().await);
    assert_eq!(backend.persisted_token(), Some(token));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_before_request() {
    let backend = TestBackend::start().await;
    let old = expired_token();
    let fresh = live_token();
    mount_refresh(
        &backend,
        &old,
        ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"token": fresh}})),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(header("authorization", format!("Bearer {fresh}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isSuccess": true, "users": []})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let client = backend.signed_in(&old).await;
    assert!(!client.session().is_authenticated().await);

    let users = client.users().list().await.unwrap();

    assert!(users.is_empty());
    assert!(client.session().is_authenticated().await);
    assert_eq!(backend.persisted_token(), Some(fresh));
}

#[tokio::test]
async fn test_expired_token_without_refresh_sends_anonymous_request() {
    let backend = TestBackend::start().await;
    let old = expired_token();
    mount_refresh(&backend, &old, ResponseTemplate::new(500)).await;
    backend.mount_get("/admin/users", json!({"isSuccess": true, "users": []})).await;

    let client = backend.signed_in(&old).await;
    client.users().list().await.unwrap();

    assert!(client.session().current_session().await.is_none());
    assert!(!backend.session_file().exists());

    let requests = backend.server.received_requests().await.unwrap();
    let users_request = requests.iter().find(|r| r.url.path() == "/admin/users").unwrap();
    assert!(!users_request.headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_unauthorized_response_destroys_session() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;

    let client = backend.signed_in(&live_token()).await;
    assert_eq!(
        RouteGuard::resolve("/users", client.session().is_authenticated().await),
        Resolution::Render(temizyuva_client::Route::Users)
    );

    let err = client.users().list().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized));
    assert!(err.requires_login());
    assert!(!client.session().is_authenticated().await);
    assert!(!backend.session_file().exists());
    assert_eq!(
        RouteGuard::resolve("/users", client.session().is_authenticated().await),
        Resolution::Redirect("/login".to_string())
    );
}

#[tokio::test]
async fn test_logout_sends_guard_to_login() {
    let backend = TestBackend::start().await;
    let client = backend.signed_in(&live_token()).await;

    client.session().logout().await;

    assert!(!backend.session_file().exists());
    for route in ["/", "/reservations/41", "/blog"] {
        assert_eq!(
            RouteGuard::resolve(route, client.session().is_authenticated().await),
            Resolution::Redirect("/login".to_string())
        );
    }
}

#[tokio::test]
async fn test_restore_refreshes_expired_token_and_loads_profile() {
    let backend = TestBackend::start().await;
    let old = expired_token();
    let fresh = live_token();
    FileTokenStore::new(backend.session_file())
        .save(&Session::new(old.clone(), UserProfile::default()))
        .await
        .unwrap();
    mount_refresh(&backend, &old, ResponseTemplate::new(200).set_body_json(json!({"token": fresh}))).await;
    Mock::given(method("GET"))
        .and(path("/Auth/profile"))
        .and(header("authorization", format!("Bearer {fresh}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "user": admin_user()})))
        .expect(1)
        .mount(&backend.server)
        .await;

    let manager = backend.manager();
    let session = manager.restore().await.unwrap().unwrap();

    assert_eq!(session.token, fresh);
    assert_eq!(session.user.email, ADMIN_EMAIL);
    assert_eq!(session.user.full_name, "Ayşe Yılmaz");
    assert!(manager.is_authenticated().await);
    assert_eq!(backend.persisted_token(), Some(fresh));
}

#[tokio::test]
async fn test_restore_with_failing_profile_logs_out() {
    let backend = TestBackend::start().await;
    FileTokenStore::new(backend.session_file())
        .save(&Session::new(live_token(), UserProfile::default()))
        .await
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/Auth/profile"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let manager = backend.manager();

    assert!(manager.restore().await.unwrap().is_none());
    assert!(!manager.is_authenticated().await);
    assert!(!backend.session_file().exists());
}

#[tokio::test]
async fn test_restore_discards_corrupt_session_file() {
    let backend = TestBackend::start().await;
    std::fs::write(backend.session_file(), "{ not json").unwrap();

    let manager = backend.manager();

    assert!(manager.restore().await.unwrap().is_none());
    assert!(!backend.session_file().exists());
}

#[tokio::test]
async fn test_restore_without_file_is_anonymous() {
    let backend = TestBackend::start().await;
    let client = AdminClient::new(Arc::new(backend.manager()));

    assert!(client.session().restore().await.unwrap().is_none());
    assert!(!client.session().is_authenticated().await);
}
