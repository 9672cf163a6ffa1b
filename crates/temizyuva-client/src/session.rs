//! Session lifecycle: login, refresh, restore and logout
//!
//! A [`SessionManager`] is built once at start-up and shared through an
//! `Arc`. It owns the only copy of the bearer token. The invariant it keeps:
//! [`SessionManager::is_authenticated`] is true exactly when a decodable,
//! unexpired token is held.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use temizyuva_core::{Config, Envelope, types::UserProfile};

use crate::client::{backend_message, read_body};
use crate::error::{ClientError, ClientResult};
use crate::store::{FileTokenStore, TokenStore};
use crate::token;

const LOGIN_PATH: &str = "/Auth/login";
const REFRESH_PATH: &str = "/Auth/refresh-token";
const PROFILE_PATH: &str = "/Auth/profile";

/// Token plus the profile of the administrator it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token
    pub token: String,
    /// `exp` claim of the token, `None` if it does not decode
    pub expiry: Option<DateTime<Utc>>,
    /// Signed-in administrator
    pub user: UserProfile,
}

impl Session {
    /// Build a session, reading the expiry from the token
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        let token = token.into();
        Self {
            expiry: token::expiry(&token),
            token,
            user,
        }
    }

    /// Whether the token is still valid at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        token::is_token_valid_at(&self.token, now)
    }
}

/// Owner of the authentication state
#[derive(Debug)]
pub struct SessionManager {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    state: RwLock<Option<Session>>,
    refresh_skew: chrono::Duration,
}

impl SessionManager {
    /// Create a manager talking to `base_url` and persisting into `store`
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            state: RwLock::new(None),
            refresh_skew: chrono::Duration::zero(),
        }
    }

    /// Create a manager from configuration, with a file-backed store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("temizyuva-admin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.api.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let store = Arc::new(FileTokenStore::new(config.session.token_path()));
        Ok(Self::new(builder.build()?, config.api.base_url(), store)
            .with_refresh_skew(config.session.refresh_skew()))
    }

    /// Refresh tokens this long before they expire when the timer fires
    #[must_use]
    pub fn with_refresh_skew(mut self, skew: Duration) -> Self {
        self.refresh_skew = chrono::Duration::from_std(skew).unwrap_or_else(|_| chrono::Duration::zero());
        self
    }

    /// Shared HTTP client
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a backend path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Snapshot of the held session
    pub async fn current_session(&self) -> Option<Session> {
        self.state.read().await.clone()
    }

    /// Whether a valid, unexpired token is held
    pub async fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.is_valid_at(Utc::now()))
    }

    /// Exchange credentials for a session
    ///
    /// On any failure the session is left unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::LoginFailed`] when the backend refuses the
    /// credentials or answers without a token, or a transport error.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        info!(email, "Logging in");
        let result = self.try_login(email, password).await;

        match result {
            Ok(session) => {
                self.install(session.clone()).await;
                info!(user = %session.user.full_name, role = %session.user.role, "Logged in");
                Ok(session)
            }
            Err(e) => {
                warn!(email, error = %e, "Login failed");
                self.logout().await;
                Err(e)
            }
        }
    }

    async fn try_login(&self, email: &str, password: &str) -> ClientResult<Session> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(ClientError::login_failed(
                backend_message(&body).unwrap_or_else(|| format!("backend returned {status}")),
            ));
        }
        let envelope = Envelope::split(body.clone(), &[]);
        if envelope.success != Some(true) {
            return Err(ClientError::login_failed(
                envelope
                    .message
                    .unwrap_or_else(|| "backend did not confirm the login".to_string()),
            ));
        }

        let data = body.get("data").filter(|d| d.is_object()).unwrap_or(&body);
        let token = data
            .get("token")
            .or_else(|| body.get("token"))
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::login_failed("response did not contain a token"))?;
        let user = data
            .get("user")
            .or_else(|| body.get("user"))
            .cloned()
            .unwrap_or_else(|| json!({}));

        Ok(Session::new(token, UserProfile::from_value(&user, email)))
    }

    /// Ask the backend for a fresh token
    ///
    /// The (possibly expired) `token` is sent as bearer. On success the new
    /// token replaces the held and persisted one and is returned. Failure
    /// returns `None` and leaves the state untouched. A logout while the
    /// request is in flight wins: the new token is dropped and `None` is
    /// returned. One attempt, no retry.
    pub async fn refresh_token(&self, token: &str) -> Option<String> {
        let fresh = match self.request_refresh(token).await {
            Ok(fresh) => fresh,
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return None;
            }
        };

        let mut state = self.state.write().await;
        let user = match state.as_ref() {
            Some(current) if current.token == token => current.user.clone(),
            Some(current) => {
                debug!("Session replaced while refreshing, keeping the newer one");
                return Some(current.token.clone());
            }
            None => {
                debug!("Logged out while refreshing, discarding the new token");
                return None;
            }
        };
        let session = Session::new(fresh.clone(), user);
        if let Err(e) = self.store.save(&session).await {
            warn!(error = %e, "Failed to persist session");
        }
        *state = Some(session);
        drop(state);

        info!("Token refreshed");
        Some(fresh)
    }

    async fn request_refresh(&self, token: &str) -> ClientResult<String> {
        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .json(&json!({}))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(ClientError::status(
                status.as_u16(),
                "POST",
                REFRESH_PATH,
                backend_message(&body),
            ));
        }

        let payload: Value = Envelope::split(body, &["token"]).into_checked()?.payload;
        payload
            .as_str()
            .or_else(|| payload.get("token").and_then(Value::as_str))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ClientError::invalid_token("refresh response did not contain a token"))
    }

    /// Periodic check run by the background refresher
    ///
    /// Refreshes when the token is invalid or expires within the configured
    /// skew. A failed refresh logs out only once the held token is no longer
    /// valid. Returns whether a session is still held afterwards.
    pub async fn refresh_if_needed(&self) -> bool {
        let Some(session) = self.current_session().await else {
            debug!("No session to refresh");
            return false;
        };

        if !token::needs_refresh(&session.token, Utc::now(), self.refresh_skew) {
            debug!(expiry = ?session.expiry, "Token still fresh");
            return true;
        }

        if self.refresh_token(&session.token).await.is_some() {
            return true;
        }
        if session.is_valid_at(Utc::now()) {
            warn!(expiry = ?session.expiry, "Early renewal failed, keeping the current token");
            return true;
        }
        warn!("Could not renew session, logging out");
        self.logout().await;
        false
    }

    /// Bearer token to attach to an outgoing protected request
    ///
    /// A valid held token is returned as is. An invalid one is refreshed
    /// once; when that fails the session is destroyed and `None` is
    /// returned, so the request goes out without credentials.
    pub async fn token_for_request(&self) -> Option<String> {
        let session = self.current_session().await?;
        if session.is_valid_at(Utc::now()) {
            return Some(session.token);
        }

        debug!("Held token expired, refreshing before request");
        let refreshed = self.refresh_token(&session.token).await;
        if refreshed.is_none() {
            warn!("Token refresh failed before request, logging out");
            self.logout().await;
        }
        refreshed
    }

    /// React to a 401 from a protected endpoint
    pub async fn handle_unauthorized(&self) {
        warn!("Backend rejected the session token");
        self.logout().await;
    }

    /// Load the persisted session, re-validate it and reload the profile
    ///
    /// An expired token is refreshed once. A failed refresh or a failed
    /// profile request destroys the session.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read at all. An unusable
    /// session is not an error and yields `Ok(None)`.
    pub async fn restore(&self) -> ClientResult<Option<Session>> {
        let stored = match self.store.load().await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                debug!("No persisted session");
                *self.state.write().await = None;
                return Ok(None);
            }
            Err(ClientError::Store { message }) => {
                warn!(%message, "Discarding unreadable session file");
                self.logout().await;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        *self.state.write().await = Some(stored.clone());

        let token = if stored.is_valid_at(Utc::now()) {
            stored.token.clone()
        } else if let Some(fresh) = self.refresh_token(&stored.token).await {
            fresh
        } else {
            info!("Persisted session expired and could not be renewed");
            self.logout().await;
            return Ok(None);
        };

        match self.fetch_profile(&token, &stored.user.email).await {
            Ok(user) => {
                let session = Session::new(token, user);
                self.install(session.clone()).await;
                info!(user = %session.user.full_name, "Session restored");
                Ok(Some(session))
            }
            Err(e) => {
                warn!(error = %e, "Could not load profile, logging out");
                self.logout().await;
                Ok(None)
            }
        }
    }

    async fn fetch_profile(&self, token: &str, fallback_email: &str) -> ClientResult<UserProfile> {
        let response = self
            .http
            .get(self.url(PROFILE_PATH))
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(ClientError::status(
                status.as_u16(),
                "GET",
                PROFILE_PATH,
                backend_message(&body),
            ));
        }

        let payload = Envelope::split(body, &["user"]).into_checked()?.payload;
        if !payload.is_object() {
            return Err(temizyuva_core::Error::UnexpectedResponse("profile is not an object".into()).into());
        }
        Ok(UserProfile::from_value(&payload, fallback_email))
    }

    /// Drop the session from memory and from the store
    ///
    /// Never fails; store errors are logged.
    pub async fn logout(&self) {
        let had_session = self.state.write().await.take().is_some();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to remove persisted session");
        }
        if had_session {
            info!("Logged out");
        }
    }

    async fn install(&self, session: Session) {
        if let Err(e) = self.store.save(&session).await {
            warn!(error = %e, "Failed to persist session");
        }
        *self.state.write().await = Some(session);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryTokenStore;
    use pretty_assertions::assert_eq;

    fn manager(store: Arc<MemoryTokenStore>) -> SessionManager {
        SessionManager::new(reqwest::Client::new(), "http://127.0.0.1:9/api/", store)
    }

    fn live_token() -> String {
        token::unsigned_token(&json!({"exp": (Utc::now() + chrono::Duration::hours(1)).timestamp()}))
    }

    #[test]
    fn test_url_joining() {
        let manager = manager(Arc::new(MemoryTokenStore::new()));
        assert_eq!(manager.base_url(), "http://127.0.0.1:9/api");
        assert_eq!(manager.url("/Auth/login"), "http://127.0.0.1:9/api/Auth/login");
        assert_eq!(manager.url("contactform"), "http://127.0.0.1:9/api/contactform");
    }

    #[test]
    fn test_session_reads_expiry() {
        let session = Session::new(token::unsigned_token(&json!({"exp": 1_900_000_000})), UserProfile::default());
        assert_eq!(session.expiry.unwrap().timestamp(), 1_900_000_000);

        let broken = Session::new("not-a-token", UserProfile::default());
        assert!(broken.expiry.is_none());
        assert!(!broken.is_valid_at(Utc::now()));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let store = Arc::new(MemoryTokenStore::with_session(Session::new(live_token(), UserProfile::default())));
        let manager = manager(Arc::clone(&store));

        manager.logout().await;
        manager.logout().await;

        assert!(store.load().await.unwrap().is_none());
        assert!(!manager.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_valid_token_is_used_without_refresh() {
        let token = live_token();
        let manager = manager(Arc::new(MemoryTokenStore::new()));
        manager.install(Session::new(token.clone(), UserProfile::default())).await;

        assert!(manager.is_authenticated().await);
        assert_eq!(manager.token_for_request().await, Some(token));
    }

    #[tokio::test]
    async fn test_no_session_means_no_token() {
        let manager = manager(Arc::new(MemoryTokenStore::new()));
        assert!(manager.token_for_request().await.is_none());
        assert!(!manager.refresh_if_needed().await);
    }
}
