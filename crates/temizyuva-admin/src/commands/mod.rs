//! Subcommand handlers
//!
//! Each console page is a subcommand group. Before a handler touches the
//! backend, [`Context::enter`] resolves the page's route through the
//! [`RouteGuard`], exactly as navigating to it in the browser would.

use std::sync::Arc;

use anyhow::{Context as _, bail};
use tracing::debug;

use temizyuva_client::{AdminClient, Resolution, Route, RouteGuard, SessionManager};
use temizyuva_core::Config;

use crate::output::OutputFormat;

pub mod blog;
pub mod config;
pub mod contact_forms;
pub mod dashboard;
pub mod notifications;
pub mod ratings;
pub mod reservations;
pub mod services;
pub mod session;
pub mod users;

/// Everything a handler needs
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub client: AdminClient,
    pub output: OutputFormat,
}

impl Context {
    /// Build the session manager and client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: Config, output: OutputFormat) -> anyhow::Result<Self> {
        let session = SessionManager::from_config(&config).context("Failed to create HTTP client")?;
        Ok(Self {
            config,
            client: AdminClient::new(Arc::new(session)),
            output,
        })
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        self.client.session()
    }

    /// Check that `route` may be shown, restoring the persisted session
    /// first for protected routes
    ///
    /// # Errors
    ///
    /// Returns an error when the guard redirects, i.e. a protected page is
    /// requested without a valid session, or the path is unknown.
    pub async fn enter(&self, route: Route) -> anyhow::Result<()> {
        if route.is_protected() {
            self.session()
                .restore()
                .await
                .context("Failed to read the saved session")?;
        }
        let authenticated = self.session().is_authenticated().await;

        match RouteGuard::resolve(&route.path(), authenticated) {
            Resolution::Render(route) => {
                debug!(%route, authenticated, "Route allowed");
                Ok(())
            }
            Resolution::Redirect(to) if to == Route::Login.path() => {
                bail!("{route} requires a session; run `temizyuva-admin login` first")
            }
            Resolution::Redirect(to) => bail!("{route} is not a console page (redirected to {to})"),
        }
    }
}
