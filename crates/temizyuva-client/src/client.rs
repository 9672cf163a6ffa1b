//! HTTP client for the protected admin endpoints
//!
//! Every request goes through the same hook: ask the [`SessionManager`] for
//! a usable bearer token (refreshing once if the held one expired), send,
//! and destroy the session when the backend answers 401.

use std::sync::Arc;

use http::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use temizyuva_core::{Envelope, Page, envelope};

use crate::error::{ClientError, ClientResult};
use crate::session::SessionManager;

/// Authenticated client shared by every resource service
#[derive(Debug, Clone)]
pub struct AdminClient {
    session: Arc<SessionManager>,
}

impl AdminClient {
    /// Create a client on top of a session manager
    pub const fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }

    /// The session manager this client authenticates with
    pub const fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Send a request through the token hook and return the raw body
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] on 401 (after destroying the
    /// session), [`ClientError::Status`] on any other non-success status, or
    /// a transport error.
    pub async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let mut request = self.session.http().request(method.clone(), self.session.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }

        match self.session.token_for_request().await {
            Some(token) => request = request.bearer_auth(token),
            None => debug!(%method, path, "Sending request without credentials"),
        }

        debug!(%method, path, "Sending request");
        let response = request.send().await?;
        let (status, body) = read_body(response).await?;

        if status == StatusCode::UNAUTHORIZED {
            self.session.handle_unauthorized().await;
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let message = backend_message(&body);
            warn!(%method, path, status = status.as_u16(), message = message.as_deref(), "Request failed");
            return Err(ClientError::status(status.as_u16(), method.as_str(), path, message));
        }
        Ok(body)
    }

    /// GET a single payload
    ///
    /// `keys` lists resource-named payload keys the endpoint may use
    /// instead of `data`.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::execute`]; also fails on `success: false` or a
    /// payload of the wrong shape.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, keys: &[&str]) -> ClientResult<T> {
        let body = self.execute(Method::GET, path, None).await?;
        Ok(envelope::decode(body, keys)?)
    }

    /// GET a collection; a missing or null payload is an empty list
    ///
    /// # Errors
    ///
    /// See [`AdminClient::get`].
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str, keys: &[&str]) -> ClientResult<Vec<T>> {
        let items: Option<Vec<T>> = self.get(path, keys).await?;
        Ok(items.unwrap_or_default())
    }

    /// GET one page of a server-paged collection
    ///
    /// # Errors
    ///
    /// See [`AdminClient::get`].
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        keys: &[&str],
        page: u32,
        page_size: u32,
    ) -> ClientResult<Page<T>> {
        let body = self.execute(Method::GET, path, None).await?;
        Ok(Envelope::split(body, keys).into_checked()?.into_page(page, page_size)?)
    }

    /// Send a mutation and check the response flag
    ///
    /// # Errors
    ///
    /// See [`AdminClient::execute`]; also fails on `success: false`.
    pub async fn mutate<B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Envelope> {
        let body = body.map(serde_json::to_value).transpose()?;
        let response = self.execute(method, path, body).await?;
        Ok(Envelope::split(response, &[]).into_checked()?)
    }

    /// Send a mutation without a body
    ///
    /// # Errors
    ///
    /// See [`AdminClient::mutate`].
    pub async fn mutate_empty(&self, method: Method, path: &str) -> ClientResult<Envelope> {
        self.mutate::<Value>(method, path, None).await
    }
}

/// Read a response body as JSON, tolerating empty and plain-text bodies
pub(crate) async fn read_body(response: reqwest::Response) -> ClientResult<(StatusCode, Value)> {
    let status = response.status();
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok((status, Value::Null));
    }
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(json) => json,
        Err(_) => Value::String(text),
    };
    Ok((status, body))
}

/// Human-readable reason carried by an error body
pub(crate) fn backend_message(body: &Value) -> Option<String> {
    let text = match body {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => ["message", "title", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str)),
        _ => None,
    };
    text.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
