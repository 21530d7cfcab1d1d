//! Engagement lists shown in a post's statistics dialog.

use inkpost_shared::url::normalize_url_with;
use inkpost_shared::{Comment, Liker};

use crate::error::Result;
use crate::state::AppState;

/// Users who liked the post, avatars resolved for display.
pub async fn likers(state: &AppState, post_id: i64) -> Result<Vec<Liker>> {
    let likers = state.api.post_likers(post_id).await?;
    Ok(likers
        .into_iter()
        .map(|mut liker| {
            liker.avatar_url = Some(normalize_url_with(
                state.asset_origin(),
                liker.avatar_url.as_deref(),
            ));
            liker
        })
        .collect())
}

pub async fn post_comments(state: &AppState, post_id: i64) -> Result<Vec<Comment>> {
    let comments = state.api.post_comments(post_id).await?;
    Ok(comments
        .into_iter()
        .map(|c| c.normalized(state.asset_origin()))
        .collect())
}
