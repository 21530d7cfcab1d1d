//! Bundled offline dataset.
//!
//! Served when the backend is disabled or a live fetch fails. Search and
//! pagination are applied locally so the result has the same shape as a
//! live page.

use inkpost_shared::{Post, PostListResponse};

use crate::error::{ClientError, Result};
use crate::feed::source::PostSource;

const RECOMMENDED_JSON: &str = include_str!("../../data/recommended_posts.json");
const MOST_LIKED_JSON: &str = include_str!("../../data/most_liked_posts.json");

/// [`PostSource`] over a fixed, in-memory list of posts.
#[derive(Debug, Clone, Default)]
pub struct FallbackSource {
    recommended: Vec<Post>,
    most_liked: Vec<Post>,
}

impl FallbackSource {
    pub fn new(recommended: Vec<Post>, most_liked: Vec<Post>) -> Self {
        Self {
            recommended,
            most_liked,
        }
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let recommended = serde_json::from_str(RECOMMENDED_JSON)
            .map_err(|e| ClientError::Decode(format!("bundled recommended posts: {e}")))?;
        let most_liked = serde_json::from_str(MOST_LIKED_JSON)
            .map_err(|e| ClientError::Decode(format!("bundled most liked posts: {e}")))?;
        Ok(Self::new(recommended, most_liked))
    }

    pub fn len(&self) -> usize {
        self.recommended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommended.is_empty()
    }

    fn page_of<'a>(
        posts: impl Iterator<Item = &'a Post>,
        page: u32,
        page_size: u32,
    ) -> PostListResponse {
        let matching: Vec<&Post> = posts.collect();
        let total = matching.len() as u64;
        let skip = (page.max(1) as usize - 1).saturating_mul(page_size as usize);

        PostListResponse {
            data: matching
                .into_iter()
                .skip(skip)
                .take(page_size as usize)
                .cloned()
                .collect(),
            total: Some(total),
            page: Some(page),
            last_page: None,
        }
    }
}

impl PostSource for FallbackSource {
    fn name(&self) -> &'static str {
        "bundled"
    }

    async fn recommended(&self, page: u32, page_size: u32) -> Result<PostListResponse> {
        Ok(Self::page_of(self.recommended.iter(), page, page_size))
    }

    async fn search(&self, query: &str, page: u32, page_size: u32) -> Result<PostListResponse> {
        Ok(Self::page_of(
            self.recommended.iter().filter(|p| p.matches_query(query)),
            page,
            page_size,
        ))
    }

    async fn most_liked(&self, limit: u32) -> Result<Vec<Post>> {
        Ok(self
            .most_liked
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
