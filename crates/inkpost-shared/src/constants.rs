/// Application name
pub const APP_NAME: &str = "Inkpost";

/// Origin of the hosted blog API; also serves uploaded images
pub const API_ORIGIN: &str = "https://blogger-wph-api-production.up.railway.app";

/// Placeholder shown when an author has no avatar
pub const DEFAULT_AVATAR_PATH: &str = "/default-avatar.png";

/// Path prefixes of images hosted by the API's storage
pub const STORAGE_PREFIXES: [&str; 2] = ["/uploads/", "/storage/"];

/// Posts per page on the home feed
pub const FEED_PAGE_SIZE: u32 = 5;

/// Size of the "most liked" sidebar list
pub const MOST_LIKED_LIMIT: u32 = 10;

/// Page size of the dedicated search view
pub const SEARCH_VIEW_LIMIT: u32 = 10;

/// Page size when listing a visited user's posts
pub const PROFILE_POSTS_LIMIT: u32 = 10;

/// Default HTTP request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Minimum password length accepted by the register form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Local storage key holding the bearer token
pub const SESSION_TOKEN_KEY: &str = "token";

/// Local storage key holding the JSON profile snapshot
pub const SESSION_USER_KEY: &str = "user";
