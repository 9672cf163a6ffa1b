//! Temiz Yuva admin console
//!
//! Command-line front end for the booking platform's admin area: sign in
//! once, then manage reservations, services, users, contact forms,
//! notification recipients, ratings and blog posts from the terminal.

#![forbid(unsafe_code)]

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use temizyuva_client::ClientError;
use temizyuva_core::Config;

use crate::commands::Context;
use crate::commands::blog::BlogCommand;
use crate::commands::contact_forms::ContactFormsCommand;
use crate::commands::notifications::NotificationsCommand;
use crate::commands::ratings::RatingsCommand;
use crate::commands::reservations::ReservationsCommand;
use crate::commands::services::ServicesCommand;
use crate::commands::users::UsersCommand;
use crate::output::OutputFormat;

/// Command line interface for the admin console
#[derive(Debug, Parser)]
#[command(
    name = "temizyuva-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for the Temiz Yuva cleaning-service platform",
    long_about = "Manage reservations, services, users, contact forms, notification recipients, ratings and blog posts of the Temiz Yuva platform. Sign in once with `login`; the session is kept in a file and refreshed automatically."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "TEMIZYUVA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log format (json, pretty); overrides the config file
    #[arg(long)]
    log_format: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t, global = true)]
    output: OutputFormat,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { self.output }
    }
}

/// Available subcommands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        /// Admin e-mail address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long, env = "TEMIZYUVA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Discard the saved session
    Logout,

    /// Show the signed-in administrator
    Whoami,

    /// Keep the saved session fresh until interrupted
    Keepalive {
        /// Seconds between token checks (overrides config)
        #[arg(long, value_name = "SECONDS")]
        interval: Option<u64>,
    },

    /// Inspect configuration
    Config {
        /// Configuration subcommand
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show dashboard figures
    Dashboard,

    /// Registered users
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },

    /// Cleaning services offered
    Services {
        #[command(subcommand)]
        action: ServicesCommand,
    },

    /// Customer reservations
    Reservations {
        #[command(subcommand)]
        action: ReservationsCommand,
    },

    /// Contact-form inbox
    ContactForms {
        #[command(subcommand)]
        action: ContactFormsCommand,
    },

    /// Notification recipients
    Notifications {
        #[command(subcommand)]
        action: NotificationsCommand,
    },

    /// Customer ratings
    Ratings {
        #[command(subcommand)]
        action: RatingsCommand,
    },

    /// Blog posts
    Blog {
        #[command(subcommand)]
        action: BlogCommand,
    },
}

/// Configuration commands
#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Check the configuration and exit
    Validate,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    let json_logs = cli
        .log_format
        .as_deref()
        .unwrap_or(&config.logging.format)
        .eq_ignore_ascii_case("json");
    if let Err(e) = temizyuva_core::init_logging(&level, json_logs) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Command failed");
            eprintln!("error: {e:#}");
            if needs_login(&e) {
                eprintln!("hint: run `temizyuva-admin login` to start a new session");
            }
            ExitCode::FAILURE
        }
    }
}

fn needs_login(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ClientError>())
        .any(ClientError::requires_login)
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let output = cli.output_format();

    // Configuration commands never touch the backend.
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::Validate => commands::config::validate(&config),
        };
    }

    info!(backend = config.api.base_url(), "Temiz Yuva admin console");
    let ctx = Context::new(config, output).context("Failed to initialize the console")?;

    match cli.command {
        Commands::Login { email, password } => commands::session::login(&ctx, &email, &password).await,
        Commands::Logout => commands::session::logout(&ctx).await,
        Commands::Whoami => commands::session::whoami(&ctx).await,
        Commands::Keepalive { interval } => commands::session::keepalive(&ctx, interval).await,
        Commands::Dashboard => commands::dashboard::show(&ctx).await,
        Commands::Users { action } => commands::users::run(&ctx, action).await,
        Commands::Services { action } => commands::services::run(&ctx, action).await,
        Commands::Reservations { action } => commands::reservations::run(&ctx, action).await,
        Commands::ContactForms { action } => commands::contact_forms::run(&ctx, action).await,
        Commands::Notifications { action } => commands::notifications::run(&ctx, action).await,
        Commands::Ratings { action } => commands::ratings::run(&ctx, action).await,
        Commands::Blog { action } => commands::blog::run(&ctx, action).await,
        Commands::Config { .. } => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_json_flag_overrides_output() {
        let cli = Cli::try_parse_from(["temizyuva-admin", "dashboard", "--json"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Json);

        let cli = Cli::try_parse_from(["temizyuva-admin", "dashboard"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Table);
    }

    #[test]
    fn test_nested_commands_parse() {
        let cli = Cli::try_parse_from([
            "temizyuva-admin",
            "reservations",
            "pay",
            "41",
            "--amount",
            "250.5",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Reservations {
                action: ReservationsCommand::Pay { id: 41, .. }
            }
        ));

        let cli = Cli::try_parse_from(["temizyuva-admin", "blog", "publish", "7", "--keep-date"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Blog {
                action: BlogCommand::Publish { id: 7, keep_date: true }
            }
        ));
    }

    #[test]
    fn test_rejected_session_suggests_login() {
        let rejected = anyhow::Error::new(ClientError::Unauthorized).context("Failed to list ratings");
        assert!(needs_login(&rejected));

        let refused = anyhow::Error::new(ClientError::login_failed("Hatalı şifre"));
        assert!(!needs_login(&refused));
    }

    #[test]
    fn test_login_requires_email() {
        assert!(Cli::try_parse_from(["temizyuva-admin", "login", "--password", "x"]).is_err());
    }
}
