//! Notification recipient management

use http::Method;
use tracing::info;

use temizyuva_core::filter::{ClientFilter, NotificationFilter};
use temizyuva_core::types::{NotificationReceiver, NotificationReceiverInput};

use super::echoed;
use crate::client::AdminClient;
use crate::error::ClientResult;

/// Recipient endpoints
#[derive(Debug, Clone, Copy)]
pub struct NotificationsService<'a> {
    client: &'a AdminClient,
}

impl<'a> NotificationsService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every recipient
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a
    /// recipient list.
    pub async fn list(&self) -> ClientResult<Vec<NotificationReceiver>> {
        self.client.get_list("/admin/notifications", &[]).await
    }

    /// Recipients passing `filter`
    ///
    /// # Errors
    ///
    /// See [`NotificationsService::list`].
    pub async fn list_filtered(&self, filter: &NotificationFilter) -> ClientResult<Vec<NotificationReceiver>> {
        Ok(filter.apply(&self.list().await?))
    }

    /// Add a recipient
    ///
    /// # Errors
    ///
    /// Returns a validation error for an incomplete form, or the request error.
    pub async fn create(&self, input: &NotificationReceiverInput) -> ClientResult<Option<NotificationReceiver>> {
        input.validate()?;
        let envelope = self
            .client
            .mutate(Method::POST, "/admin/notifications", Some(input))
            .await?;
        info!(email = %input.email, kind = %input.kind, "Notification recipient added");
        Ok(echoed(envelope))
    }

    /// Replace a recipient
    ///
    /// # Errors
    ///
    /// See [`NotificationsService::create`].
    pub async fn update(&self, id: i64, input: &NotificationReceiverInput) -> ClientResult<Option<NotificationReceiver>> {
        input.validate()?;
        let envelope = self
            .client
            .mutate(Method::PUT, &format!("/admin/notifications/{id}"), Some(input))
            .await?;
        info!(id, "Notification recipient updated");
        Ok(echoed(envelope))
    }

    /// Switch mails for `receiver` on or off
    ///
    /// The backend has no dedicated toggle, so the full record is sent back
    /// with the new flag.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn set_active(&self, receiver: &NotificationReceiver, active: bool) -> ClientResult<()> {
        let input = NotificationReceiverInput {
            is_active: active,
            ..NotificationReceiverInput::from(receiver)
        };
        self.client
            .mutate(Method::PUT, &format!("/admin/notifications/{}", receiver.id), Some(&input))
            .await?;
        info!(id = receiver.id, active, "Notification recipient toggled");
        Ok(())
    }

    /// Remove a recipient
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::DELETE, &format!("/admin/notifications/{id}"))
            .await?;
        info!(id, "Notification recipient removed");
        Ok(())
    }
}
