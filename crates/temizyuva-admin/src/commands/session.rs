//! login, logout, whoami and keepalive

use anyhow::Context as _;
use serde::Serialize;
use tokio::signal;
use tracing::info;

use temizyuva_client::{Refresher, Route, Session};

use super::Context;
use crate::output::{self, Table};

/// Sign in and persist the session
pub async fn login(ctx: &Context, email: &str, password: &str) -> anyhow::Result<()> {
    ctx.enter(Route::Login).await?;
    let session = ctx.session().login(email, password).await?;
    output::emit(ctx.output, &SessionView::from(&session), session_table)
}

/// Forget the persisted session
pub async fn logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.enter(Route::Login).await?;
    ctx.session().logout().await;
    output::done(ctx.output, "Logged out.")
}

/// Show who the saved session belongs to
pub async fn whoami(ctx: &Context) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard).await?;
    let session = ctx
        .session()
        .current_session()
        .await
        .context("Session disappeared after restore")?;
    output::emit(ctx.output, &SessionView::from(&session), session_table)
}

/// Keep the session alive until interrupted
pub async fn keepalive(ctx: &Context, interval_seconds: Option<u64>) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard).await?;
    let period = interval_seconds.map_or_else(
        || ctx.config.session.refresh_interval(),
        std::time::Duration::from_secs,
    );

    let refresher = Refresher::spawn(ctx.session().clone(), period);
    info!("Keeping the session alive. Press Ctrl+C to stop.");

    signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
    info!("Received Ctrl+C, shutting down gracefully");

    refresher.shutdown().await;
    output::done(ctx.output, "Session keepalive stopped.")
}

/// Session as printed; the token itself is never shown
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
    id: i64,
    full_name: String,
    email: String,
    role: String,
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.user.id,
            full_name: session.user.full_name.clone(),
            email: session.user.email.clone(),
            role: session.user.role.clone(),
            expires_at: session.expiry,
        }
    }
}

fn session_table(view: &SessionView) -> Table {
    Table::fields([
        ("Name", view.full_name.clone()),
        ("Email", view.email.clone()),
        ("Role", view.role.clone()),
        (
            "Expires",
            view.expires_at.map_or_else(|| "unknown".to_string(), output::date_time),
        ),
    ])
}
