//! Avatar and image URL normalization.
//!
//! The API returns image paths in several shapes: absolute URLs (CDN
//! uploads), paths under the API's own storage (`/uploads/...`,
//! `/storage/...`) and occasionally nothing at all. Views always want
//! something they can put straight into an `src` attribute.

use crate::constants::{API_ORIGIN, DEFAULT_AVATAR_PATH, STORAGE_PREFIXES};

/// Normalize an image path against the hosted API origin.
pub fn normalize_url(raw: Option<&str>) -> String {
    normalize_url_with(API_ORIGIN, raw)
}

/// Normalize an image path, prefixing storage paths with `origin`.
///
/// - missing or empty → [`DEFAULT_AVATAR_PATH`]
/// - `/uploads/…` or `/storage/…` → `origin` + path
/// - any other value (local static asset or absolute URL) → unchanged
pub fn normalize_url_with(origin: &str, raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return DEFAULT_AVATAR_PATH.to_string();
    };

    if is_storage_path(raw) {
        return format!("{}{}", origin.trim_end_matches('/'), raw);
    }

    raw.to_string()
}

/// Whether `path` points into the API's upload storage.
pub fn is_storage_path(path: &str) -> bool {
    STORAGE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_avatar_uses_placeholder() {
        assert_eq!(normalize_url(None), DEFAULT_AVATAR_PATH);
        assert_eq!(normalize_url(Some("")), DEFAULT_AVATAR_PATH);
    }

    #[test]
    fn storage_paths_get_api_origin() {
        assert_eq!(
            normalize_url(Some("/uploads/avatars/42.png")),
            format!("{API_ORIGIN}/uploads/avatars/42.png")
        );
        assert_eq!(
            normalize_url(Some("/storage/a b.jpg")),
            format!("{API_ORIGIN}/storage/a b.jpg")
        );
    }

    #[test]
    fn local_assets_are_untouched() {
        assert_eq!(normalize_url(Some("/default-avatar.png")), "/default-avatar.png");
        assert_eq!(normalize_url(Some("/images/me.svg")), "/images/me.svg");
        // prefix must match including the trailing slash
        assert_eq!(normalize_url(Some("/uploadsfoo.png")), "/uploadsfoo.png");
    }

    #[test]
    fn absolute_urls_are_untouched() {
        let url = "https://res.cloudinary.com/demo/image/upload/sample.jpg";
        assert_eq!(normalize_url(Some(url)), url);
        assert_eq!(normalize_url(Some("avatar.png")), "avatar.png");
    }

    #[test]
    fn custom_origin_trailing_slash() {
        assert_eq!(
            normalize_url_with("http://localhost:3000/", Some("/uploads/x.png")),
            "http://localhost:3000/uploads/x.png"
        );
    }
}
