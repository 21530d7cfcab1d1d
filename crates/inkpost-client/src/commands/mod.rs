//! Command handlers invoked by the views.
//!
//! Each sub-module groups related commands by domain. Handlers take the
//! shared [`AppState`](crate::state::AppState) and return
//! [`ClientError`](crate::error::ClientError) on failure; views turn that
//! into text with [`ClientError::user_message`](crate::error::ClientError::user_message).

pub mod auth;
pub mod comments;
pub mod feed;
pub mod posts;
pub mod profile;
pub mod statistics;
