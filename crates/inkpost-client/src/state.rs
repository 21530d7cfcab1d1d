//! Application state shared by every command handler.
//!
//! One [`AppState`] is built at startup and handed (by reference or inside
//! an `Arc`) to the views. It owns the API client, the session and the feed
//! controller; nothing else holds mutable application state.

use std::sync::Arc;

use inkpost_store::{Database, Session, SqliteStore};
use tracing::info;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::feed::{ApiSource, FallbackSource, FeedComposer, FeedController};

/// The home feed as wired in the application.
pub type HomeFeed = FeedController<ApiSource, FallbackSource>;

pub struct AppState {
    pub config: Arc<ClientConfig>,
    pub api: Arc<ApiClient>,
    pub session: Session,
    pub feed: HomeFeed,
}

impl AppState {
    /// Open the session database (at `session_db_path`, or the platform data
    /// directory) and wire everything up.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let db = match &config.session_db_path {
            Some(path) => Database::open_at(path)?,
            None => Database::new()?,
        };
        let session = Session::new(Arc::new(SqliteStore::new(db)));
        Self::with_session(config, session)
    }

    /// Build the state around an existing session.
    pub fn with_session(config: ClientConfig, session: Session) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config)?);

        let primary = config
            .backend_available
            .then(|| ApiSource::new(api.clone()));
        let composer = FeedComposer::new(
            primary,
            FallbackSource::bundled()?,
            config.asset_origin.clone(),
        );
        let feed = FeedController::new(composer, config.feed_page_size);

        info!(
            base_url = %api.base_url(),
            backend_available = config.backend_available,
            "Client state initialised"
        );

        Ok(Self {
            config: Arc::new(config),
            api,
            session,
            feed,
        })
    }

    /// The bearer token, or [`ClientError::NotAuthenticated`] when signed out.
    pub fn require_token(&self) -> Result<String> {
        self.session.token()?.ok_or(ClientError::NotAuthenticated)
    }

    pub fn asset_origin(&self) -> &str {
        &self.config.asset_origin
    }
}
