//! Typed HTTP client for the blog API.
//!
//! One method per endpoint. Methods return raw API records; display
//! normalization (avatars, usernames) happens in the callers that hand data
//! to views.

use inkpost_shared::validation::ChangePasswordForm;
use inkpost_shared::{
    ApiMessage, Comment, LikeAction, Liker, LoginResponse, NewPost, Post, PostListResponse,
    UserPostsResponse, UserProfile,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// An image picked for upload (post cover or avatar).
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?)
    }
}

/// Fields sent when editing a post.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub image: Option<ImageUpload>,
}

/// Fields sent when editing the signed-in user's profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: String,
    pub headline: String,
    pub avatar: Option<ImageUpload>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct LikeRequest {
    action: LikeAction,
}

#[derive(Serialize)]
struct CommentRequest<'a> {
    content: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
    confirm_password: &'a str,
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("inkpost/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let base_url = Url::parse(&config.base_api_url)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = check_status(request.send().await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_discarding_body(&self, request: RequestBuilder) -> Result<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }

    // -- Posts ---------------------------------------------------------------

    pub async fn recommended_posts(&self, limit: u32, page: u32) -> Result<PostListResponse> {
        let url = self.url(&["posts", "recommended"])?;
        debug!(limit, page, "fetching recommended posts");
        self.send(self.http.get(url).query(&[("limit", limit), ("page", page)]))
            .await
    }

    pub async fn search_posts(&self, query: &str, limit: u32, page: u32) -> Result<PostListResponse> {
        let url = self.url(&["posts", "search"])?;
        debug!(query, limit, page, "searching posts");
        let limit = limit.to_string();
        let page = page.to_string();
        self.send(self.http.get(url).query(&[
            ("query", query),
            ("limit", limit.as_str()),
            ("page", page.as_str()),
        ]))
        .await
    }

    pub async fn most_liked_posts(&self, limit: u32, page: u32) -> Result<PostListResponse> {
        let url = self.url(&["posts", "most-liked"])?;
        self.send(self.http.get(url).query(&[("limit", limit), ("page", page)]))
            .await
    }

    /// Fetch one post. A 404 is not an error: the post simply does not exist.
    pub async fn post_by_id(&self, id: i64) -> Result<Option<Post>> {
        let url = self.url(&["posts", &id.to_string()])?;
        match self.send(self.http.get(url)).await {
            Ok(post) => Ok(Some(post)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_post(&self, token: &str, post: &NewPost) -> Result<Post> {
        let url = self.url(&["posts"])?;
        self.send(self.http.post(url).bearer_auth(token).json(post))
            .await
    }

    /// Replace a post's fields. Tags are sent as repeated `tags` parts and
    /// the cover image, when given, as `image`.
    pub async fn update_post(&self, token: &str, id: i64, update: PostUpdate) -> Result<()> {
        let url = self.url(&["posts", &id.to_string()])?;

        let mut form = Form::new()
            .text("title", update.title)
            .text("content", update.content);
        for tag in update.tags {
            form = form.text("tags", tag);
        }
        if let Some(image) = update.image {
            form = form.part("image", image.into_part()?);
        }

        self.send_discarding_body(self.http.patch(url).bearer_auth(token).multipart(form))
            .await
    }

    pub async fn delete_post(&self, token: &str, id: i64) -> Result<()> {
        let url = self.url(&["posts", &id.to_string()])?;
        self.send_discarding_body(self.http.delete(url).bearer_auth(token))
            .await
    }

    pub async fn set_like(&self, token: &str, id: i64, action: LikeAction) -> Result<()> {
        let url = self.url(&["posts", &id.to_string(), "like"])?;
        self.send_discarding_body(
            self.http
                .post(url)
                .bearer_auth(token)
                .json(&LikeRequest { action }),
        )
        .await
    }

    pub async fn post_likers(&self, id: i64) -> Result<Vec<Liker>> {
        let url = self.url(&["posts", &id.to_string(), "likes"])?;
        self.send(self.http.get(url)).await
    }

    /// Comments as listed by the statistics view (no auth).
    pub async fn post_comments(&self, id: i64) -> Result<Vec<Comment>> {
        let url = self.url(&["posts", &id.to_string(), "comments"])?;
        self.send(self.http.get(url)).await
    }

    /// Posts by one user. Works without a token for visited profiles.
    pub async fn posts_by_user(
        &self,
        token: Option<&str>,
        user_id: i64,
        paging: Option<(u32, u32)>,
    ) -> Result<UserPostsResponse> {
        let url = self.url(&["posts", "by-user", &user_id.to_string()])?;
        let mut request = self.http.get(url);
        if let Some((limit, page)) = paging {
            request = request.query(&[("limit", limit), ("page", page)]);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }

    // -- Comments ------------------------------------------------------------

    pub async fn comments(&self, token: &str, post_id: i64) -> Result<Vec<Comment>> {
        let url = self.url(&["comments", &post_id.to_string()])?;
        self.send(self.http.get(url).bearer_auth(token)).await
    }

    pub async fn add_comment(&self, token: &str, post_id: i64, content: &str) -> Result<Comment> {
        let url = self.url(&["comments", &post_id.to_string()])?;
        self.send(
            self.http
                .post(url)
                .bearer_auth(token)
                .json(&CommentRequest { content }),
        )
        .await
    }

    // -- Users ---------------------------------------------------------------

    pub async fn user_by_email(&self, token: &str, email: &str) -> Result<Option<UserProfile>> {
        let url = self.url(&["users", "by-email", email])?;
        match self.send(self.http.get(url).bearer_auth(token)).await {
            Ok(profile) => Ok(Some(profile)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn update_profile(&self, token: &str, update: ProfileUpdate) -> Result<()> {
        let url = self.url(&["users", "profile"])?;

        let mut form = Form::new()
            .text("name", update.name)
            .text("headline", update.headline);
        if let Some(avatar) = update.avatar {
            form = form.part("avatar", avatar.into_part()?);
        }

        self.send_discarding_body(self.http.patch(url).bearer_auth(token).multipart(form))
            .await
    }

    pub async fn change_password(&self, token: &str, form: &ChangePasswordForm) -> Result<()> {
        let url = self.url(&["users", "password"])?;
        self.send_discarding_body(self.http.patch(url).bearer_auth(token).json(
            &PasswordRequest {
                current_password: &form.current_password,
                new_password: &form.new_password,
                confirm_password: &form.confirm_password,
            },
        ))
        .await
    }

    // -- Auth ----------------------------------------------------------------

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let url = self.url(&["auth", "register"])?;
        self.send_discarding_body(self.http.post(url).json(&RegisterRequest {
            name,
            email,
            password,
        }))
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = self.url(&["auth", "login"])?;
        self.send(self.http.post(url).json(&LoginRequest { email, password }))
            .await
    }
}

/// Turn a non-success response into [`ClientError::Api`], keeping the
/// server's `message` when the body carries one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ApiMessage>()
        .await
        .ok()
        .and_then(|body| body.message);

    debug!(status = %status, message = ?message, "API request failed");

    Err(ClientError::Api { status, message })
}
