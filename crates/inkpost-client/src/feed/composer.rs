use inkpost_shared::constants::MOST_LIKED_LIMIT;
use inkpost_shared::pagination::total_pages_for;
use inkpost_shared::Post;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::feed::source::PostSource;

/// Which source produced a [`FeedViewModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedOrigin {
    Live,
    Fallback,
}

/// Everything the home view renders for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedViewModel {
    pub query: String,
    /// Server order, not re-sorted.
    pub posts: Vec<Post>,
    pub most_liked: Vec<Post>,
    pub current_page: u32,
    pub total_pages: u32,
    pub origin: FeedOrigin,
}

impl FeedViewModel {
    pub fn empty(query: &str, origin: FeedOrigin) -> Self {
        Self {
            query: query.to_string(),
            posts: Vec::new(),
            most_liked: Vec::new(),
            current_page: 1,
            total_pages: 1,
            origin,
        }
    }
}

/// Loads feed pages from a primary source, falling back to a second one.
///
/// `primary` is `None` when the backend is switched off, in which case every
/// load goes straight to the fallback.
pub struct FeedComposer<P, F> {
    primary: Option<P>,
    fallback: F,
    asset_origin: String,
}

impl<P: PostSource, F: PostSource> FeedComposer<P, F> {
    pub fn new(primary: Option<P>, fallback: F, asset_origin: impl Into<String>) -> Self {
        Self {
            primary,
            fallback,
            asset_origin: asset_origin.into(),
        }
    }

    /// Load one page of the feed plus the most-liked list.
    ///
    /// A blank `query` loads recommended posts, anything else searches. Never
    /// fails: a primary failure is logged and the fallback is served instead.
    pub async fn load_feed(&self, query: &str, page: u32, page_size: u32) -> FeedViewModel {
        let query = query.trim();
        let page = page.max(1);

        if let Some(primary) = &self.primary {
            match self
                .compose(primary, query, page, page_size, FeedOrigin::Live)
                .await
            {
                Ok(view) => return view,
                Err(e) => warn!(
                    source = primary.name(),
                    error = %e,
                    query,
                    page,
                    "Feed fetch failed, serving bundled posts"
                ),
            }
        }

        match self
            .compose(&self.fallback, query, page, page_size, FeedOrigin::Fallback)
            .await
        {
            Ok(view) => view,
            Err(e) => {
                warn!(source = self.fallback.name(), error = %e, "Fallback feed failed");
                FeedViewModel::empty(query, FeedOrigin::Fallback)
            }
        }
    }

    async fn compose<S: PostSource>(
        &self,
        source: &S,
        query: &str,
        page: u32,
        page_size: u32,
        origin: FeedOrigin,
    ) -> Result<FeedViewModel> {
        let posts = async {
            if query.is_empty() {
                source.recommended(page, page_size).await
            } else {
                source.search(query, page, page_size).await
            }
        };
        let (list, most_liked) = tokio::try_join!(posts, source.most_liked(MOST_LIKED_LIMIT))?;

        let total_pages = total_pages_for(list.total.unwrap_or(0), page_size);
        debug!(
            source = source.name(),
            posts = list.data.len(),
            total = ?list.total,
            total_pages,
            "Feed page loaded"
        );

        Ok(FeedViewModel {
            query: query.to_string(),
            posts: self.normalize(list.data),
            most_liked: self.normalize(most_liked),
            current_page: page,
            total_pages,
            origin,
        })
    }

    fn normalize(&self, posts: Vec<Post>) -> Vec<Post> {
        posts
            .into_iter()
            .map(|p| p.normalized(&self.asset_origin))
            .collect()
    }
}
