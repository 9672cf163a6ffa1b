//! Service catalogue management

use http::Method;
use serde_json::json;
use tracing::info;

use temizyuva_core::filter::{ClientFilter, ServiceFilter};
use temizyuva_core::types::{Service, ServiceInput};

use super::echoed;
use crate::client::AdminClient;
use crate::error::ClientResult;

/// Catalogue endpoints
#[derive(Debug, Clone, Copy)]
pub struct CatalogService<'a> {
    client: &'a AdminClient,
}

impl<'a> CatalogService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every service, active or not
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a service list.
    pub async fn list(&self) -> ClientResult<Vec<Service>> {
        self.client.get_list("/admin/services/all", &["services"]).await
    }

    /// Services passing `filter`
    ///
    /// # Errors
    ///
    /// See [`CatalogService::list`].
    pub async fn list_filtered(&self, filter: &ServiceFilter) -> ClientResult<Vec<Service>> {
        Ok(filter.apply(&self.list().await?))
    }

    /// One service
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service does not exist.
    pub async fn get(&self, id: i64) -> ClientResult<Service> {
        self.client.get(&format!("/admin/services/{id}"), &["service"]).await
    }

    /// Add a service; returns the stored record when the backend echoes it
    ///
    /// # Errors
    ///
    /// Returns a validation error before sending an incomplete form, or the
    /// request error.
    pub async fn create(&self, input: &ServiceInput) -> ClientResult<Option<Service>> {
        input.validate()?;
        let envelope = self
            .client
            .mutate(Method::POST, "/admin/services", Some(input))
            .await?;
        info!(title = %input.title, "Service created");
        Ok(echoed(envelope))
    }

    /// Replace a service
    ///
    /// # Errors
    ///
    /// See [`CatalogService::create`].
    pub async fn update(&self, id: i64, input: &ServiceInput) -> ClientResult<Option<Service>> {
        input.validate()?;
        let envelope = self
            .client
            .mutate(Method::PUT, &format!("/admin/services/{id}"), Some(input))
            .await?;
        info!(id, "Service updated");
        Ok(echoed(envelope))
    }

    /// Switch whether customers can book a service
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn set_active(&self, id: i64, active: bool) -> ClientResult<()> {
        self.client
            .mutate(
                Method::PATCH,
                &format!("/admin/services/{id}/status"),
                Some(&json!({ "isActive": active })),
            )
            .await?;
        info!(id, active, "Service status changed");
        Ok(())
    }

    /// Remove a service
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::DELETE, &format!("/admin/services/{id}"))
            .await?;
        info!(id, "Service deleted");
        Ok(())
    }
}
