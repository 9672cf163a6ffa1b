//! Blog post management

use http::Method;
use serde_json::json;
use tracing::info;

use temizyuva_core::Page;
use temizyuva_core::stats::blog_categories;
use temizyuva_core::types::{BlogPost, BlogPostInput, BlogStatus};

use super::echoed;
use crate::client::AdminClient;
use crate::error::ClientResult;

/// Posts per page when the caller has no preference
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Blog endpoints
#[derive(Debug, Clone, Copy)]
pub struct BlogService<'a> {
    client: &'a AdminClient,
}

impl<'a> BlogService<'a> {
    pub(crate) const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// One page of posts in every status
    ///
    /// Paging is done by the backend; its page counters win over the
    /// requested ones when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is not a post list.
    pub async fn list(&self, page: u32, page_size: u32) -> ClientResult<Page<BlogPost>> {
        let page = page.max(1);
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        self.client
            .get_page(
                &format!("/Blog/admin?page={page}&pageSize={page_size}&status=all"),
                &[],
                page,
                page_size,
            )
            .await
    }

    /// One post
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the post does not exist.
    pub async fn get(&self, id: i64) -> ClientResult<BlogPost> {
        self.client.get(&format!("/Blog/admin/{id}"), &[]).await
    }

    /// Save a new post as a draft
    ///
    /// The status on the form is ignored; posts go live through
    /// [`BlogService::publish`].
    ///
    /// # Errors
    ///
    /// Returns a validation error for a post without a title, or the
    /// request error.
    pub async fn create(&self, input: BlogPostInput) -> ClientResult<Option<BlogPost>> {
        let input = BlogPostInput {
            status: BlogStatus::Draft,
            ..input
        }
        .normalized()?;
        let envelope = self.client.mutate(Method::POST, "/Blog", Some(&input)).await?;
        info!(slug = %input.slug, "Blog post drafted");
        Ok(echoed(envelope))
    }

    /// Replace a post, status included
    ///
    /// # Errors
    ///
    /// See [`BlogService::create`].
    pub async fn update(&self, id: i64, input: BlogPostInput) -> ClientResult<Option<BlogPost>> {
        let input = input.normalized()?;
        let envelope = self
            .client
            .mutate(Method::PUT, &format!("/Blog/{id}"), Some(&input))
            .await?;
        info!(id, status = %input.status, "Blog post updated");
        Ok(echoed(envelope))
    }

    /// Make a post live
    ///
    /// With `update_published_date` the publication date is reset to now;
    /// otherwise a previously archived post keeps its original date.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn publish(&self, id: i64, update_published_date: bool) -> ClientResult<()> {
        self.client
            .mutate(
                Method::POST,
                &format!("/Blog/{id}/publish"),
                Some(&json!({ "updatePublishedDate": update_published_date })),
            )
            .await?;
        info!(id, update_published_date, "Blog post published");
        Ok(())
    }

    /// Withdraw a post from the site
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn archive(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate(Method::POST, &format!("/Blog/{id}/archive"), Some(&json!({})))
            .await?;
        info!(id, "Blog post archived");
        Ok(())
    }

    /// Remove a post
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.client
            .mutate_empty(Method::DELETE, &format!("/Blog/{id}"))
            .await?;
        info!(id, "Blog post deleted");
        Ok(())
    }

    /// Categories used by the posts on one page, sorted
    ///
    /// # Errors
    ///
    /// See [`BlogService::list`].
    pub async fn categories(&self, page: u32, page_size: u32) -> ClientResult<Vec<String>> {
        Ok(blog_categories(&self.list(page, page_size).await?.items))
    }
}
