//! Where feed posts come from.

use std::future::Future;
use std::sync::Arc;

use inkpost_shared::{Post, PostListResponse};

use crate::api::ApiClient;
use crate::error::Result;

/// A provider of feed pages and the most-liked list.
///
/// Implemented by the live API and by the bundled dataset, so the composer
/// can run the same pipeline over either.
pub trait PostSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    fn recommended(
        &self,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<PostListResponse>> + Send;

    fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> impl Future<Output = Result<PostListResponse>> + Send;

    /// The top `limit` posts by like count, in source order.
    fn most_liked(&self, limit: u32) -> impl Future<Output = Result<Vec<Post>>> + Send;
}

/// [`PostSource`] backed by the blog API.
#[derive(Debug, Clone)]
pub struct ApiSource {
    api: Arc<ApiClient>,
}

impl ApiSource {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

impl PostSource for ApiSource {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn recommended(&self, page: u32, page_size: u32) -> Result<PostListResponse> {
        self.api.recommended_posts(page_size, page).await
    }

    async fn search(&self, query: &str, page: u32, page_size: u32) -> Result<PostListResponse> {
        self.api.search_posts(query, page_size, page).await
    }

    async fn most_liked(&self, limit: u32) -> Result<Vec<Post>> {
        let mut posts = self.api.most_liked_posts(limit, 1).await?.data;
        posts.truncate(limit as usize);
        Ok(posts)
    }
}
