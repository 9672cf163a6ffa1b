//! Authenticated HTTP client for the Temiz Yuva admin backend
//!
//! [`SessionManager`] owns the bearer token: login, refresh, persistence
//! and logout. [`AdminClient`] sends every protected request through it and
//! exposes one typed service per admin resource. [`RouteGuard`] decides
//! which console screens are reachable without a session.

#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod refresher;
pub mod routes;
pub mod services;
pub mod session;
pub mod store;
pub mod token;

pub use client::AdminClient;
pub use error::{ClientError, ClientResult};
pub use refresher::{DEFAULT_REFRESH_INTERVAL, Refresher};
pub use routes::{Resolution, Route, RouteGuard};
pub use session::{Session, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
