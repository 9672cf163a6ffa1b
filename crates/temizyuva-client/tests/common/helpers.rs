//! Mock backend and session wiring

use std::path::PathBuf;
use std::sync::{Arc, Once};

use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use temizyuva_client::{AdminClient, FileTokenStore, SessionManager};

use super::fixtures::{ADMIN_EMAIL, ADMIN_PASSWORD, login_response};

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("temizyuva_client=debug")
            .with_test_writer()
            .try_init();
    });
}

/// A mock backend plus a private session file
pub struct TestBackend {
    pub server: MockServer,
    dir: TempDir,
}

impl TestBackend {
    pub async fn start() -> Self {
        init_test_logging();
        Self {
            server: MockServer::start().await,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn session_file(&self) -> PathBuf {
        self.dir.path().join("session.json")
    }

    /// Session manager backed by the session file
    pub fn manager(&self) -> SessionManager {
        SessionManager::new(
            reqwest::Client::new(),
            self.server.uri(),
            Arc::new(FileTokenStore::new(self.session_file())),
        )
    }

    /// Token currently written in the session file, if any
    pub fn persisted_token(&self) -> Option<String> {
        let raw = std::fs::read(self.session_file()).ok()?;
        let json: Value = serde_json::from_slice(&raw).unwrap();
        json.get("token").and_then(Value::as_str).map(str::to_string)
    }

    /// Answer login with `token`
    pub async fn mount_login(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/Auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(login_response(token)))
            .mount(&self.server)
            .await;
    }

    /// Answer a GET on `route` with `body`
    pub async fn mount_get(&self, route: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Log in with `token` and wrap the manager in a client
    pub async fn signed_in(&self, token: &str) -> AdminClient {
        self.mount_login(token).await;
        let manager = Arc::new(self.manager());
        manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        AdminClient::new(manager)
    }
}
