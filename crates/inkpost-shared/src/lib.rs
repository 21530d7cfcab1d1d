//! # inkpost-shared
//!
//! Domain types and pure helpers shared by the Inkpost crates: the post and
//! profile model as the blog API serves it, avatar URL normalization, preview
//! text helpers, the feed paginator and client-side form validation.
//!
//! Nothing in this crate performs I/O.

pub mod constants;
pub mod error;
pub mod model;
pub mod pagination;
pub mod text;
pub mod url;
pub mod validation;

pub use error::ValidationError;
pub use model::*;
pub use pagination::{compute_page_window, PageMarker, PaginationState};
