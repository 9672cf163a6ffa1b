//! Rating moderation

use http::Method;
use tracing::info;

use temizyuva_core::filter::{ClientFilter, RatingFilter};
use temizyuva_core::stats::RatingStats;
use temizyuva_core::types::Rating;

use crate::client::AdminClient;
use crate::error::ClientResult;

/// Rating endpoints
#[derive(Debug, Clone, Copy)]
pub struct RatingsService<'a> {
    client: &'a AdminClient,
}

impl<'a> RatingsService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every rating, approved or not
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a rating list.
    pub async fn list(&self) -> ClientResult<Vec<Rating>> {
        self.client.get_list("/ratings", &[]).await
    }

    /// Ratings passing `filter`
    ///
    /// # Errors
    ///
    /// See [`RatingsService::list`].
    pub async fn list_filtered(&self, filter: &RatingFilter) -> ClientResult<Vec<Rating>> {
        Ok(filter.apply(&self.list().await?))
    }

    /// Publish a rating on the site
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn approve(&self, id: i64) -> ClientResult<()> {
        self.set_approval(id, true).await
    }

    /// Withdraw a rating from the site
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn reject(&self, id: i64) -> ClientResult<()> {
        self.set_approval(id, false).await
    }

    async fn set_approval(&self, id: i64, approve: bool) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::PUT, &format!("/admin/ratings/{id}/approve?approve={approve}"))
            .await?;
        info!(id, approve, "Rating moderated");
        Ok(())
    }

    /// Remove a rating
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::DELETE, &format!("/admin/ratings/{id}"))
            .await?;
        info!(id, "Rating deleted");
        Ok(())
    }

    /// Moderation counters
    ///
    /// # Errors
    ///
    /// See [`RatingsService::list`].
    pub async fn stats(&self) -> ClientResult<RatingStats> {
        Ok(RatingStats::compute(&self.list().await?))
    }
}
