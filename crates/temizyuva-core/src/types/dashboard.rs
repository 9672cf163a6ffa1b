//! Read-only aggregates shown on the dashboard

use serde::{Deserialize, Serialize};

/// Headline counters from `/admin/dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    /// All reservations
    pub total_reservations: u64,
    /// Reservations waiting for a decision
    pub pending_reservations: u64,
    /// Delivered reservations
    pub completed_reservations: u64,
    /// Cancelled reservations
    pub canceled_reservations: u64,
    /// Reservations created recently
    pub recent_reservations: u64,
    /// Revenue collected
    pub total_revenue: f64,
    /// Outstanding payments
    pub pending_payments: f64,
    /// Bookable services
    pub active_services: u64,
    /// Registered users
    pub total_users: u64,
    /// Users who joined recently
    pub new_users: u64,
}

/// Figures for the running month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyFigures {
    /// Month label
    pub month: String,
    /// Revenue of every non-cancelled reservation
    pub expected_revenue: f64,
    /// Revenue actually collected
    pub actual_revenue: f64,
    /// Reservations in the month
    pub total_reservations: u64,
    /// Completed reservations
    pub completed_reservations: u64,
    /// Cancelled reservations
    pub canceled_reservations: u64,
    /// Completed share, percent
    pub completion_rate: f64,
}

/// Figures for the previous month
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LastMonthFigures {
    /// Month label
    pub month: String,
    /// Revenue collected
    pub revenue: f64,
    /// Reservations in the month
    pub total_reservations: u64,
    /// Completed reservations
    pub completed_reservations: u64,
    /// Completed share, percent
    pub completion_rate: f64,
}

/// Month-over-month change, percent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthComparison {
    /// Revenue change
    pub revenue_change: f64,
    /// Reservation count change
    pub reservation_change: f64,
    /// Completion rate change
    pub completion_rate_change: f64,
}

/// Payload of `/admin/monthly-dashboard`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyDashboard {
    /// Running month
    pub current_month: MonthlyFigures,
    /// Previous month
    pub last_month: LastMonthFigures,
    /// Change between the two
    pub changes: MonthComparison,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_monthly_dashboard_shape() {
        let monthly: MonthlyDashboard = serde_json::from_value(json!({
            "currentMonth": {
                "month": "Haziran 2024",
                "expectedRevenue": 42000.0,
                "actualRevenue": 30500.0,
                "totalReservations": 31,
                "completedReservations": 22,
                "canceledReservations": 3,
                "completionRate": 70.97
            },
            "lastMonth": {
                "month": "Mayıs 2024",
                "revenue": 27000.0,
                "totalReservations": 28,
                "completedReservations": 25,
                "completionRate": 89.29
            },
            "changes": {
                "revenueChange": 12.96,
                "reservationChange": 10.71,
                "completionRateChange": -18.32
            }
        }))
        .unwrap();

        assert_eq!(monthly.current_month.total_reservations, 31);
        assert_eq!(monthly.last_month.month, "Mayıs 2024");
        assert!(monthly.changes.completion_rate_change < 0.0);
    }

    #[test]
    fn test_summary_missing_counters_default_to_zero() {
        let summary: DashboardSummary =
            serde_json::from_value(json!({"totalReservations": 12, "totalRevenue": 1500.5})).unwrap();
        assert_eq!(summary.total_reservations, 12);
        assert_eq!(summary.new_users, 0);
    }
}
