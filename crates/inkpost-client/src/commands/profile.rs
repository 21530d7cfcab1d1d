use inkpost_shared::constants::PROFILE_POSTS_LIMIT;
use inkpost_shared::url::normalize_url_with;
use inkpost_shared::validation::{ChangePasswordForm, ProfileForm};
use inkpost_shared::{Author, Post, ProfileSnapshot, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{ImageUpload, ProfileUpdate};
use crate::error::{ClientError, Result};
use crate::state::AppState;

/// Shown when a password change fails without a server message.
pub const PASSWORD_CHANGE_FAILED_MESSAGE: &str = "Failed to update password.";

/// The signed-in user's profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyProfile {
    pub profile: UserProfile,
    pub posts: Vec<Post>,
}

/// Another user's public profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitedProfile {
    pub user: Author,
    pub posts: Vec<Post>,
    pub total: u64,
}

/// Load the signed-in user's profile and posts.
///
/// Fails with [`ClientError::NotAuthenticated`] when there is no token, no
/// cached email, or the API rejects the session or no longer knows the
/// user. Other API failures are returned as they are. The cached snapshot
/// is refreshed from the server's copy. A failure listing posts only empties
/// the list.
pub async fn my_profile(state: &AppState) -> Result<MyProfile> {
    let token = state.require_token()?;
    let email = state
        .session
        .user()?
        .map(|u| u.email)
        .filter(|e| !e.is_empty())
        .ok_or(ClientError::NotAuthenticated)?;

    let profile = match state.api.user_by_email(&token, &email).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            warn!(email = %email, "Own profile not found, sending user to login");
            return Err(ClientError::NotAuthenticated);
        }
        Err(e) if e.is_session_rejected() => {
            warn!(email = %email, error = %e, "Session rejected, sending user to login");
            return Err(ClientError::NotAuthenticated);
        }
        Err(e) => return Err(e),
    };
    state.session.set_user(&ProfileSnapshot::from(&profile))?;

    let posts = match state.api.posts_by_user(Some(&token), profile.id, None).await {
        Ok(list) => list.data,
        Err(e) => {
            warn!(user_id = profile.id, error = %e, "Loading own posts failed");
            Vec::new()
        }
    };

    Ok(MyProfile {
        profile: with_display_avatar(profile, state.asset_origin()),
        posts: posts
            .into_iter()
            .map(|p| p.normalized(state.asset_origin()))
            .collect(),
    })
}

/// Load someone's public profile. `Ok(None)` when the user does not exist.
pub async fn visit_profile(state: &AppState, user_id: i64) -> Result<Option<VisitedProfile>> {
    let token = state.session.token()?;
    let response = state
        .api
        .posts_by_user(token.as_deref(), user_id, Some((PROFILE_POSTS_LIMIT, 1)))
        .await?;

    let Some(user) = response.user else {
        info!(user_id, "Visited profile not found");
        return Ok(None);
    };

    Ok(Some(VisitedProfile {
        user: user.normalized(state.asset_origin()),
        total: response.total.unwrap_or(response.data.len() as u64),
        posts: response
            .data
            .into_iter()
            .map(|p| p.normalized(state.asset_origin()))
            .collect(),
    }))
}

/// Save name, headline and optionally a new avatar, then refresh the
/// cached snapshot from the server.
pub async fn update_profile(
    state: &AppState,
    form: &ProfileForm,
    avatar: Option<ImageUpload>,
) -> Result<Option<ProfileSnapshot>> {
    form.validate()?;
    let token = state.require_token()?;

    let update = ProfileUpdate {
        name: form.name.trim().to_string(),
        headline: form.headline.trim().to_string(),
        avatar,
    };
    state.api.update_profile(&token, update).await?;
    info!("Profile updated");

    let Some(email) = state.session.user()?.map(|u| u.email) else {
        return Ok(None);
    };
    let Some(profile) = state.api.user_by_email(&token, &email).await? else {
        return Ok(None);
    };
    let snapshot = ProfileSnapshot::from(&profile);
    state.session.set_user(&snapshot)?;
    Ok(Some(snapshot))
}

pub async fn change_password(state: &AppState, form: &ChangePasswordForm) -> Result<()> {
    form.validate()?;
    let token = state.require_token()?;
    state.api.change_password(&token, form).await?;
    info!("Password changed");
    Ok(())
}

fn with_display_avatar(mut profile: UserProfile, origin: &str) -> UserProfile {
    profile.avatar_url = Some(normalize_url_with(origin, profile.avatar_url.as_deref()));
    profile
}
