//! Dashboard overview

use serde::Serialize;

use temizyuva_client::Route;
use temizyuva_core::stats::RatingStats;
use temizyuva_core::types::{DashboardSummary, MonthlyDashboard, Rating};

use super::Context;
use crate::output::{self, Table, money};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Overview {
    summary: DashboardSummary,
    monthly: MonthlyDashboard,
    approved_ratings: Vec<Rating>,
}

/// Print the dashboard counters, the month comparison and published ratings
pub async fn show(ctx: &Context) -> anyhow::Result<()> {
    ctx.enter(Route::Dashboard).await?;
    let dashboard = ctx.client.dashboard();

    let (summary, monthly, approved_ratings) =
        tokio::try_join!(dashboard.summary(), dashboard.monthly(), dashboard.approved_ratings())?;

    let overview = Overview {
        summary,
        monthly,
        approved_ratings,
    };
    output::emit(ctx.output, &overview, overview_table)
}

fn signed_percent(value: f64) -> String {
    format!("{value:+.1}%")
}

fn overview_table(o: &Overview) -> Table {
    let s = &o.summary;
    let current = &o.monthly.current_month;
    let last = &o.monthly.last_month;
    let changes = &o.monthly.changes;
    let ratings = RatingStats::compute(&o.approved_ratings);

    Table::fields([
        ("Reservations", s.total_reservations.to_string()),
        ("  pending", s.pending_reservations.to_string()),
        ("  completed", s.completed_reservations.to_string()),
        ("  canceled", s.canceled_reservations.to_string()),
        ("  last 7 days", s.recent_reservations.to_string()),
        ("Revenue", money(s.total_revenue)),
        ("Outstanding payments", money(s.pending_payments)),
        ("Active services", s.active_services.to_string()),
        ("Users", format!("{} ({} new)", s.total_users, s.new_users)),
        (
            "This month",
            format!(
                "{}: {} reservations, {} earned of {} expected",
                current.month,
                current.total_reservations,
                money(current.actual_revenue),
                money(current.expected_revenue)
            ),
        ),
        (
            "Last month",
            format!("{}: {} reservations, {}", last.month, last.total_reservations, money(last.revenue)),
        ),
        (
            "Change",
            format!(
                "revenue {}, reservations {}, completion {}",
                signed_percent(changes.revenue_change),
                signed_percent(changes.reservation_change),
                signed_percent(changes.completion_rate_change)
            ),
        ),
        (
            "Published ratings",
            format!("{} (average {:.1})", ratings.total, ratings.average),
        ),
    ])
}
