//! Dashboard figures

use temizyuva_core::types::{DashboardSummary, MonthlyDashboard, Rating};

use crate::client::AdminClient;
use crate::error::ClientResult;

/// Dashboard endpoints
#[derive(Debug, Clone, Copy)]
pub struct DashboardService<'a> {
    client: &'a AdminClient,
}

impl<'a> DashboardService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// All-time counters
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload has the wrong shape.
    pub async fn summary(&self) -> ClientResult<DashboardSummary> {
        self.client.get("/admin/dashboard", &[]).await
    }

    /// This month against last month
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload has the wrong shape.
    pub async fn monthly(&self) -> ClientResult<MonthlyDashboard> {
        self.client.get("/admin/monthly-dashboard", &[]).await
    }

    /// Ratings currently shown on the site
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a rating list.
    pub async fn approved_ratings(&self) -> ClientResult<Vec<Rating>> {
        let mut ratings = self.client.ratings().list().await?;
        ratings.retain(|r| r.is_approved);
        Ok(ratings)
    }
}
