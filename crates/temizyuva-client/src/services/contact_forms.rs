//! Contact-form inbox

use http::Method;
use tracing::info;

use temizyuva_core::filter::{ClientFilter, ContactFormFilter};
use temizyuva_core::types::ContactForm;

use crate::client::AdminClient;
use crate::error::ClientResult;

/// Inbox endpoints
#[derive(Debug, Clone, Copy)]
pub struct ContactFormsService<'a> {
    client: &'a AdminClient,
}

impl<'a> ContactFormsService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every submitted form
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a form list.
    pub async fn list(&self) -> ClientResult<Vec<ContactForm>> {
        self.client.get_list("/contactform", &[]).await
    }

    /// Forms passing `filter`, in its order
    ///
    /// # Errors
    ///
    /// See [`ContactFormsService::list`].
    pub async fn list_filtered(&self, filter: &ContactFormFilter) -> ClientResult<Vec<ContactForm>> {
        Ok(filter.apply(&self.list().await?))
    }

    /// One form
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the form does not exist.
    pub async fn get(&self, id: i64) -> ClientResult<ContactForm> {
        self.client.get(&format!("/contactform/{id}"), &[]).await
    }

    /// Flag a form as read
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn mark_as_read(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate(
                Method::POST,
                &format!("/contactform/{id}/mark-as-read"),
                Some(&serde_json::json!({})),
            )
            .await?;
        info!(id, "Contact form marked as read");
        Ok(())
    }
}
