use inkpost_shared::validation::{LoginForm, RegisterForm};
use inkpost_shared::ProfileSnapshot;
use tracing::{info, warn};

use crate::error::{ClientError, Result};
use crate::state::AppState;

/// Shown when login fails without a server message.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed.";

/// Shown when registration fails without a server message.
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed.";

/// Sign in and cache the user's profile.
///
/// The token is stored as soon as the API issues it. The profile lookup
/// that follows is best effort: when it fails or the profile has no name,
/// the cached snapshot is removed and `None` is returned.
pub async fn login(state: &AppState, form: &LoginForm) -> Result<Option<ProfileSnapshot>> {
    form.validate()?;
    let email = form.email.trim();

    let response = state.api.login(email, &form.password).await?;
    if response.token.is_empty() {
        return Err(ClientError::Decode("login response carried no token".into()));
    }
    state.session.set_token(&response.token)?;
    info!(email, "Logged in");

    let profile = match state.api.user_by_email(&response.token, email).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!(error = %e, "Profile lookup after login failed");
            None
        }
    };

    match profile.filter(|p| !p.name.is_empty()) {
        Some(profile) => {
            let snapshot = ProfileSnapshot::from(&profile);
            state.session.set_user(&snapshot)?;
            Ok(Some(snapshot))
        }
        None => {
            state.session.clear_user()?;
            Ok(None)
        }
    }
}

/// Create an account. The user logs in separately afterwards.
pub async fn register(state: &AppState, form: &RegisterForm) -> Result<()> {
    form.validate()?;
    let email = form.email.trim();
    state
        .api
        .register(form.full_name.trim(), email, &form.password)
        .await?;
    info!(email, "Registered account");
    Ok(())
}

pub fn logout(state: &AppState) -> Result<()> {
    state.session.logout()?;
    Ok(())
}

/// The cached profile for the header, if signed in.
pub fn current_user(state: &AppState) -> Result<Option<ProfileSnapshot>> {
    if !state.session.is_authenticated()? {
        return Ok(None);
    }
    Ok(state.session.user()?)
}
