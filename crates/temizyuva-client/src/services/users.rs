//! User accounts (read-only)

use chrono::{DateTime, Utc};

use temizyuva_core::filter::{ClientFilter, UserFilter};
use temizyuva_core::stats::UserStats;
use temizyuva_core::types::User;

use crate::client::AdminClient;
use crate::error::ClientResult;

/// User list endpoints
#[derive(Debug, Clone, Copy)]
pub struct UsersService<'a> {
    client: &'a AdminClient,
}

impl<'a> UsersService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every registered user
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a user list.
    pub async fn list(&self) -> ClientResult<Vec<User>> {
        self.client.get_list("/admin/users", &["users"]).await
    }

    /// Users passing `filter`
    ///
    /// # Errors
    ///
    /// See [`UsersService::list`].
    pub async fn list_filtered(&self, filter: &UserFilter) -> ClientResult<Vec<User>> {
        Ok(filter.apply(&self.list().await?))
    }

    /// Summary counters as of `now`
    ///
    /// # Errors
    ///
    /// See [`UsersService::list`].
    pub async fn stats(&self, now: DateTime<Utc>) -> ClientResult<UserStats> {
        Ok(UserStats::compute(&self.list().await?, now))
    }
}
