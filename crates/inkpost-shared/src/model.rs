//! Domain model as served by the blog API.
//!
//! Field names follow the API's camelCase JSON. Every struct derives
//! `Serialize` and `Deserialize` so it can be handed to the view layer
//! unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::url::normalize_url_with;

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

/// The author embedded in every post and comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Raw avatar path until [`Post::normalized`] runs, absolute afterwards.
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Display handle derived from `name`; see [`username_from_name`].
    #[serde(default)]
    pub username: String,
}

impl Author {
    /// Resolve the avatar against `origin` and derive the username.
    pub fn normalized(mut self, origin: &str) -> Self {
        self.avatar_url = Some(normalize_url_with(origin, self.avatar_url.as_deref()));
        self.username = username_from_name(&self.name);
        self
    }
}

/// Display handle for an author: lowercased name with whitespace runs
/// replaced by `-`.
///
/// Two authors with the same display name get the same handle; nothing
/// disambiguates them.
pub fn username_from_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// A published post. Identifiers are always assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// Rich text, HTML formatted.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    pub author: Author,
}

impl Post {
    /// Normalize the embedded author for display.
    pub fn normalized(mut self, origin: &str) -> Self {
        self.author = self.author.normalized(origin);
        self
    }

    /// Case-insensitive substring match on title or content, as used by
    /// the offline search.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

/// One page of posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    #[serde(default)]
    pub data: Vec<Post>,
    /// Total matching posts across all pages, when the API reports it.
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

/// Posts written by one user, together with that user's public profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPostsResponse {
    #[serde(default)]
    pub data: Vec<Post>,
    #[serde(default)]
    pub total: Option<u64>,
    /// Absent when the user does not exist.
    #[serde(default)]
    pub user: Option<Author>,
}

/// New post payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Split a comma-separated tag input into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub author: Author,
}

impl Comment {
    pub fn normalized(mut self, origin: &str) -> Self {
        self.author = self.author.normalized(origin);
        self
    }
}

/// A user who liked a post, as listed in the statistics view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Liker {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Direction of a like toggle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Like,
    Unlike,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A user profile as returned by `/users/by-email/{email}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Denormalized profile kept in local storage for the header and forms.
///
/// Not authoritative: overwritten whenever the server returns a fresher
/// profile. `avatar` duplicates `avatarUrl` for older readers of the key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSnapshot {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub headline: Option<String>,
}

impl From<&UserProfile> for ProfileSnapshot {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone(),
            avatar: profile.avatar_url.clone(),
            avatar_url: profile.avatar_url.clone(),
            email: profile.email.clone(),
            headline: profile.headline.clone(),
        }
    }
}

/// Response body of `/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

/// Error body returned by the API on non-success statuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{API_ORIGIN, DEFAULT_AVATAR_PATH};

    #[test]
    fn username_is_slug_of_name() {
        assert_eq!(username_from_name("John Doe"), "john-doe");
        assert_eq!(username_from_name("  Ada   Lovelace "), "ada-lovelace");
        assert_eq!(username_from_name("solo"), "solo");
    }

    #[test]
    fn same_name_same_username() {
        let a = Author {
            id: 1,
            name: "Sam Lee".into(),
            ..Default::default()
        };
        let b = Author {
            id: 2,
            name: "Sam Lee".into(),
            ..Default::default()
        };
        assert_eq!(
            a.normalized(API_ORIGIN).username,
            b.normalized(API_ORIGIN).username
        );
    }

    #[test]
    fn post_deserializes_with_sparse_fields() {
        let json = r#"{
            "id": 7,
            "title": "Hello",
            "content": "<p>Hi</p>",
            "tags": null,
            "likes": null,
            "createdAt": "2025-05-27T10:00:00.000Z",
            "author": { "id": 3, "name": "Jane Roe", "avatarUrl": "/uploads/j.png" }
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.tags.is_empty());
        assert_eq!(post.likes, 0);
        assert_eq!(post.comments, 0);
        assert!(post.created_at.is_some());

        let post = post.normalized(API_ORIGIN);
        assert_eq!(
            post.author.avatar_url.as_deref(),
            Some(format!("{API_ORIGIN}/uploads/j.png").as_str())
        );
        assert_eq!(post.author.username, "jane-roe");
    }

    #[test]
    fn author_without_avatar_gets_placeholder() {
        let author = Author {
            id: 1,
            name: "X".into(),
            ..Default::default()
        }
        .normalized(API_ORIGIN);
        assert_eq!(author.avatar_url.as_deref(), Some(DEFAULT_AVATAR_PATH));
    }

    #[test]
    fn list_response_total_is_optional() {
        let resp: PostListResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(resp.total, None);
        assert!(resp.data.is_empty());
    }

    #[test]
    fn query_matches_title_or_content() {
        let post = Post {
            id: 1,
            title: "Learning Rust".into(),
            content: "<p>Ownership and borrowing</p>".into(),
            image_url: None,
            tags: vec![],
            created_at: None,
            likes: 0,
            comments: 0,
            author: Author::default(),
        };
        assert!(post.matches_query("rust"));
        assert!(post.matches_query("BORROW"));
        assert!(!post.matches_query("python"));
    }

    #[test]
    fn tags_are_split_and_trimmed() {
        assert_eq!(
            parse_tags("Programming, Frontend ,, Coding"),
            vec!["Programming", "Frontend", "Coding"]
        );
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn like_action_wire_format() {
        assert_eq!(serde_json::to_string(&LikeAction::Unlike).unwrap(), "\"unlike\"");
    }

    #[test]
    fn snapshot_from_profile_duplicates_avatar() {
        let profile = UserProfile {
            id: 9,
            name: "Ann".into(),
            email: "ann@example.com".into(),
            headline: Some("Writer".into()),
            avatar_url: Some("/uploads/ann.png".into()),
        };
        let snap = ProfileSnapshot::from(&profile);
        assert_eq!(snap.avatar, snap.avatar_url);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["avatarUrl"], "/uploads/ann.png");
    }
}
