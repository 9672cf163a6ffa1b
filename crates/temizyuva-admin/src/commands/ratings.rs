//! ratings list / approve / reject / delete / stats

use clap::{Subcommand, ValueEnum};

use temizyuva_client::Route;
use temizyuva_core::filter::RatingFilter;
use temizyuva_core::stats::RatingStats;
use temizyuva_core::types::Rating;

use super::Context;
use crate::output::{self, Table, truncate, yes_no};

/// Moderation tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum RatingTab {
    #[default]
    All,
    Approved,
    Pending,
}

impl From<RatingTab> for RatingFilter {
    fn from(tab: RatingTab) -> Self {
        Self {
            approved: match tab {
                RatingTab::All => None,
                RatingTab::Approved => Some(true),
                RatingTab::Pending => Some(false),
            },
        }
    }
}

/// Rating moderation commands
#[derive(Debug, Subcommand)]
pub enum RatingsCommand {
    /// List ratings
    List {
        /// Which ratings to show
        #[arg(long, value_enum, default_value_t)]
        show: RatingTab,
    },

    /// Publish a rating
    Approve {
        /// Rating ID
        id: i64,
    },

    /// Withdraw a rating
    Reject {
        /// Rating ID
        id: i64,
    },

    /// Remove a rating
    Delete {
        /// Rating ID
        id: i64,
    },

    /// Show moderation counters
    Stats,
}

pub async fn run(ctx: &Context, command: RatingsCommand) -> anyhow::Result<()> {
    ctx.enter(Route::Ratings).await?;
    let ratings = ctx.client.ratings();

    match command {
        RatingsCommand::List { show } => {
            let list = ratings.list_filtered(&show.into()).await?;
            output::emit(ctx.output, list.as_slice(), ratings_table)
        }
        RatingsCommand::Approve { id } => {
            ratings.approve(id).await?;
            output::done(ctx.output, &format!("Rating {id} approved."))
        }
        RatingsCommand::Reject { id } => {
            ratings.reject(id).await?;
            output::done(ctx.output, &format!("Rating {id} withdrawn."))
        }
        RatingsCommand::Delete { id } => {
            ratings.delete(id).await?;
            output::done(ctx.output, &format!("Rating {id} deleted."))
        }
        RatingsCommand::Stats => {
            let stats = ratings.stats().await?;
            output::emit(ctx.output, &stats, stats_table)
        }
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn ratings_table(ratings: &[Rating]) -> Table {
    let mut table = Table::new(["ID", "RESERVATION", "CUSTOMER", "SERVICE", "RATING", "APPROVED", "COMMENT"]);
    for r in ratings {
        table.push([
            r.id.to_string(),
            r.reservation_id.to_string(),
            r.user_full_name.clone(),
            r.service_title.clone(),
            stars(r.rating),
            yes_no(r.is_approved).to_string(),
            truncate(&r.comment, 40),
        ]);
    }
    table
}

fn stats_table(stats: &RatingStats) -> Table {
    Table::fields([
        ("Total", stats.total.to_string()),
        ("Approved", stats.approved.to_string()),
        ("Pending", stats.pending.to_string()),
        ("Average (approved)", format!("{:.1}", stats.average)),
        ("Five stars", stats.five_star.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stars() {
        assert_eq!(stars(4), "★★★★☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(9), "★★★★★");
    }
}
