//! Core types and utilities for the Temiz Yuva admin console
//!
//! Domain records as the backend serializes them, the envelope decoder used
//! on every response, client-side filters and summary statistics, and the
//! configuration and logging bootstrap shared by the client and the CLI.

pub mod config;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use filter::ClientFilter;
pub use types::Page;

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence over `level`. Events go to stderr so command
/// output on stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(level: &str, json: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|e| Error::Other(format!("failed to install logger: {e}")))
}
