use inkpost_shared::constants::SEARCH_VIEW_LIMIT;
use inkpost_shared::validation::PostForm;
use inkpost_shared::{parse_tags, LikeAction, NewPost, Post};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{ImageUpload, PostUpdate};
use crate::error::Result;
use crate::state::AppState;

/// A post as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub post: Post,
    pub likes: u64,
    /// Whether this client liked the post during the current view. The API
    /// does not report it, so a freshly opened post always starts unliked.
    pub is_liked: bool,
}

/// Fetch one post for display. `Ok(None)` means it does not exist.
pub async fn get_post(state: &AppState, id: i64) -> Result<Option<PostDetail>> {
    let Some(post) = state.api.post_by_id(id).await? else {
        info!(post_id = id, "Post not found");
        return Ok(None);
    };
    let post = post.normalized(state.asset_origin());
    Ok(Some(PostDetail {
        likes: post.likes,
        is_liked: false,
        post,
    }))
}

/// Like or unlike the post, whichever undoes the current state.
///
/// `detail` is flipped before the request goes out and restored if it
/// fails, so it always reflects what the server last accepted.
pub async fn toggle_like(state: &AppState, detail: &mut PostDetail) -> Result<()> {
    let token = state.require_token()?;

    let before = (detail.likes, detail.is_liked);
    let action = if detail.is_liked {
        LikeAction::Unlike
    } else {
        LikeAction::Like
    };
    detail.is_liked = !detail.is_liked;
    detail.likes = match action {
        LikeAction::Like => detail.likes.saturating_add(1),
        LikeAction::Unlike => detail.likes.saturating_sub(1),
    };

    if let Err(e) = state.api.set_like(&token, detail.post.id, action).await {
        warn!(post_id = detail.post.id, error = %e, "Like update failed, rolling back");
        (detail.likes, detail.is_liked) = before;
        return Err(e);
    }
    detail.post.likes = detail.likes;
    Ok(())
}

/// Publish a new post.
pub async fn create_post(state: &AppState, form: &PostForm) -> Result<Post> {
    form.validate()?;
    let token = state.require_token()?;

    let new_post = NewPost {
        title: form.title.trim().to_string(),
        content: form.content.clone(),
        tags: parse_tags(&form.tags),
        image_url: None,
    };
    let post = state.api.create_post(&token, &new_post).await?;
    info!(post_id = post.id, "Post created");
    Ok(post.normalized(state.asset_origin()))
}

/// Save edits to a post and return it as the server now has it.
pub async fn update_post(
    state: &AppState,
    id: i64,
    form: &PostForm,
    image: Option<ImageUpload>,
) -> Result<Option<Post>> {
    form.validate()?;
    let token = state.require_token()?;

    let update = PostUpdate {
        title: form.title.trim().to_string(),
        content: form.content.clone(),
        tags: parse_tags(&form.tags),
        image,
    };
    state.api.update_post(&token, id, update).await?;
    info!(post_id = id, "Post updated");

    Ok(state
        .api
        .post_by_id(id)
        .await?
        .map(|p| p.normalized(state.asset_origin())))
}

pub async fn delete_post(state: &AppState, id: i64) -> Result<()> {
    let token = state.require_token()?;
    state.api.delete_post(&token, id).await?;
    info!(post_id = id, "Post deleted");
    Ok(())
}

/// Results for the dedicated search view.
///
/// Needs a signed-in user. A blank query or a failed request shows an empty
/// result list rather than an error.
pub async fn search_posts(state: &AppState, query: &str) -> Result<Vec<Post>> {
    state.require_token()?;

    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    match state.api.search_posts(query, SEARCH_VIEW_LIMIT, 1).await {
        Ok(list) => Ok(list
            .data
            .into_iter()
            .map(|p| p.normalized(state.asset_origin()))
            .collect()),
        Err(e) => {
            warn!(query, error = %e, "Search failed");
            Ok(Vec::new())
        }
    }
}
