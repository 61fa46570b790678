//! The authenticated feed workflow: list, read, create, update, delete.

pub mod cursor;

use chrono::Utc;
use reqwest::{Method, StatusCode};

use crate::api::posts::{ListResponse, PostDraft, SingleResponse};
use crate::api::Gateway;
use crate::auth::{CredentialStore, Credentials};
use crate::config::{Config, CredentialPolicy};
use crate::error::{ClientError, ClientResult};
use crate::render::Render;

pub use cursor::PageCursor;

/// Client for the post operations. Owns the pagination cursor for one
/// listing session and pushes everything it fetches into the injected
/// render surface.
pub struct FeedClient<R> {
    gateway: Gateway,
    store: CredentialStore,
    config: Config,
    render: R,
    cursor: PageCursor,
}

impl<R: Render> FeedClient<R> {
    pub fn new(gateway: Gateway, store: CredentialStore, config: Config, render: R) -> Self {
        Self {
            gateway,
            store,
            config,
            render,
            cursor: PageCursor::new(),
        }
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    /// Every operation funnels through this guard before touching the
    /// network. Reads pass the configured policy, writes always pass
    /// `Error`; nothing checks credentials inline.
    fn guard(&self, policy: CredentialPolicy) -> ClientResult<Option<Credentials>> {
        match self.store.credentials() {
            Some(credentials) => Ok(Some(credentials)),
            None => match policy {
                CredentialPolicy::Silent => {
                    tracing::debug!("No stored credentials, skipping");
                    Ok(None)
                }
                CredentialPolicy::Error => Err(ClientError::MissingCredentials),
            },
        }
    }

    /// Fetch one page of the feed and render it. Returns false when the
    /// operation was skipped for lack of credentials under the silent
    /// policy. On success the cursor moves to the fetched page; a last
    /// page disables further advancement.
    pub async fn list(&mut self, page: u32) -> ClientResult<bool> {
        let Some(credentials) = self.guard(self.config.api.missing_credentials)? else {
            return Ok(false);
        };

        let path = format!(
            "social/posts?limit={}&page={}&_tag={}&_author=true",
            self.config.api.page_size, page, self.config.api.tag,
        );
        let body = self
            .gateway
            .send(Method::GET, &path, Some(&credentials), None)
            .await?;
        let response: ListResponse = serde_json::from_value(body)?;

        tracing::debug!(
            "Fetched page {} ({} posts, last: {})",
            page,
            response.data.len(),
            response.meta.is_last_page,
        );

        self.render.render_list(&response.data, page);
        self.cursor.settle(page, response.meta.is_last_page);
        if response.meta.is_last_page {
            self.render.pagination_exhausted();
        }
        Ok(true)
    }

    /// Fetch one post, author and comments included, and render it.
    pub async fn single(&mut self, post_id: &str) -> ClientResult<bool> {
        let Some(credentials) = self.guard(self.config.api.missing_credentials)? else {
            return Ok(false);
        };

        let path = format!("social/posts/{}?_author=true&_comments=true", post_id);
        let body = self
            .gateway
            .send(Method::GET, &path, Some(&credentials), None)
            .await?;
        let response: SingleResponse = serde_json::from_value(body)?;

        self.render.render_single(&response.data);
        Ok(true)
    }

    /// Create a post from the draft, defaults filled in client-side, then
    /// refresh the feed from page 1.
    pub async fn create(&mut self, draft: &PostDraft) -> ClientResult<()> {
        let Some(credentials) = self.guard(CredentialPolicy::Error)? else {
            return Ok(());
        };

        let payload = draft.payload(
            &self.config.defaults,
            &self.config.api.tag,
            Some(Utc::now()),
        );
        self.gateway
            .send(Method::POST, "social/posts", Some(&credentials), Some(&payload))
            .await?;

        self.render.notice("Post created successfully!");
        self.render.reset_editor();
        self.list(1).await?;
        Ok(())
    }

    /// Replace a post's fields, same defaulting as create, then refresh
    /// the feed from page 1.
    pub async fn update(&mut self, post_id: &str, draft: &PostDraft) -> ClientResult<()> {
        let Some(credentials) = self.guard(CredentialPolicy::Error)? else {
            return Ok(());
        };
        if post_id.trim().is_empty() {
            return Err(ClientError::Validation(
                "A post id is required to update.".into(),
            ));
        }

        let payload = draft.payload(&self.config.defaults, &self.config.api.tag, None);
        let path = format!("social/posts/{}", post_id);
        self.gateway
            .send(Method::PUT, &path, Some(&credentials), Some(&payload))
            .await?;

        self.render.notice("Post updated successfully!");
        self.render.reset_editor();
        self.list(1).await?;
        Ok(())
    }

    /// Delete a post. The server signals success with 204 and nothing
    /// else; any other status is a failure and triggers no refresh.
    pub async fn delete(&mut self, post_id: &str) -> ClientResult<()> {
        let Some(credentials) = self.guard(CredentialPolicy::Error)? else {
            return Ok(());
        };

        let path = format!("social/posts/{}", post_id);
        let response = self
            .gateway
            .dispatch(Method::DELETE, &path, Some(&credentials), None)
            .await?;

        if response.status() != StatusCode::NO_CONTENT {
            return Err(ClientError::Request {
                status: response.status().as_u16(),
                message: "Failed to delete post".into(),
            });
        }

        self.render.notice("Post deleted successfully!");
        self.list(1).await?;
        Ok(())
    }
}
