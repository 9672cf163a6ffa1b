//! users list / stats

use chrono::Utc;
use clap::Subcommand;

use temizyuva_client::Route;
use temizyuva_core::filter::UserFilter;
use temizyuva_core::stats::UserStats;
use temizyuva_core::types::User;

use super::Context;
use crate::output::{self, Table, yes_no};

/// User commands
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users
    List {
        /// Name, email or phone fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Only users whose email is (true) or is not (false) confirmed
        #[arg(long)]
        confirmed: Option<bool>,

        /// Only administrators (true) or customers (false)
        #[arg(long)]
        admin: Option<bool>,
    },

    /// Show user counters
    Stats,
}

pub async fn run(ctx: &Context, command: UsersCommand) -> anyhow::Result<()> {
    ctx.enter(Route::Users).await?;
    let users = ctx.client.users();

    match command {
        UsersCommand::List {
            search,
            confirmed,
            admin,
        } => {
            let filter = UserFilter {
                search,
                email_confirmed: confirmed,
                admin,
            };
            let list = users.list_filtered(&filter).await?;
            output::emit(ctx.output, list.as_slice(), users_table)
        }
        UsersCommand::Stats => {
            let stats = users.stats(Utc::now()).await?;
            output::emit(ctx.output, &stats, stats_table)
        }
    }
}

fn users_table(users: &[User]) -> Table {
    let mut table = Table::new(["ID", "NAME", "EMAIL", "PHONE", "CONFIRMED", "ADMIN", "JOINED"]);
    for u in users {
        table.push([
            u.id.to_string(),
            u.full_name(),
            u.email.clone(),
            u.phone_number.clone().unwrap_or_default(),
            yes_no(u.is_email_confirmed).to_string(),
            yes_no(u.is_admin).to_string(),
            output::date_time(u.created_at),
        ]);
    }
    table
}

fn stats_table(stats: &UserStats) -> Table {
    Table::fields([
        ("Total", stats.total),
        ("Administrators", stats.admins),
        ("Email confirmed", stats.confirmed),
        ("Awaiting confirmation", stats.pending),
        ("Joined in the last 7 days", stats.last_week),
    ]
    .map(|(k, v)| (k, v.to_string())))
}
