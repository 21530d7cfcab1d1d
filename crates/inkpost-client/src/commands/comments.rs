use inkpost_shared::validation::validate_comment;
use inkpost_shared::Comment;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// The comment list under a post, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    pub post_id: i64,
    pub comments: Vec<Comment>,
    pub count: u64,
}

/// Load the comments of a post. Requires a signed-in user.
pub async fn list_comments(state: &AppState, post_id: i64) -> Result<CommentThread> {
    let token = state.require_token()?;
    let comments: Vec<Comment> = state
        .api
        .comments(&token, post_id)
        .await?
        .into_iter()
        .map(|c| c.normalized(state.asset_origin()))
        .collect();

    Ok(CommentThread {
        post_id,
        count: comments.len() as u64,
        comments,
    })
}

/// Post a comment and put it at the top of `thread`.
pub async fn add_comment(state: &AppState, thread: &mut CommentThread, content: &str) -> Result<()> {
    let content = validate_comment(content)?;
    let token = state.require_token()?;

    let comment = state
        .api
        .add_comment(&token, thread.post_id, &content)
        .await?
        .normalized(state.asset_origin());
    info!(post_id = thread.post_id, comment_id = comment.id, "Comment added");

    thread.comments.insert(0, comment);
    thread.count += 1;
    Ok(())
}
