//! Home feed commands. These never fail: the feed degrades to the bundled
//! dataset instead.

use inkpost_shared::PageMarker;

use crate::feed::FeedViewModel;
use crate::state::AppState;

pub async fn load_home(state: &AppState) -> FeedViewModel {
    state.feed.refresh().await
}

pub async fn search_feed(state: &AppState, query: &str) -> FeedViewModel {
    state.feed.search(query).await
}

pub async fn change_page(state: &AppState, page: u32) -> FeedViewModel {
    state.feed.go_to_page(page).await
}

pub fn page_window(state: &AppState) -> Vec<PageMarker> {
    state.feed.page_window()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedOrigin;
    use crate::test_support::{app_state, post_json, serve, UNREACHABLE};
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use inkpost_shared::constants::API_ORIGIN;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn api() -> Router {
        Router::new()
            .route(
                "/posts/recommended",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let page: i64 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
                    let posts: Vec<Value> = (1..=5)
                        .map(|i| post_json((page - 1) * 5 + i, Some("/uploads/a.png")))
                        .collect();
                    Json(json!({ "data": posts, "total": 23 }))
                }),
            )
            .route(
                "/posts/search",
                get(|| async { Json(json!({ "data": [post_json(42, None)] })) }),
            )
            .route(
                "/posts/most-liked",
                get(|| async {
                    let posts: Vec<Value> = (100..112).map(|i| post_json(i, None)).collect();
                    Json(json!({ "data": posts }))
                }),
            )
    }

    #[tokio::test]
    async fn live_feed_first_page() {
        let state = app_state(&serve(api()).await);
        let view = load_home(&state).await;

        assert_eq!(view.origin, FeedOrigin::Live);
        assert_eq!(view.total_pages, 5);
        assert_eq!(view.posts.len(), 5);
        let avatar = format!("{API_ORIGIN}/uploads/a.png");
        assert!(view
            .posts
            .iter()
            .all(|p| p.author.avatar_url.as_deref() == Some(avatar.as_str())));
        assert_eq!(view.most_liked.len(), 10);
        assert_eq!(page_window(&state).len(), 5);
    }

    #[tokio::test]
    async fn live_feed_paging_and_search() {
        let state = app_state(&serve(api()).await);
        load_home(&state).await;

        let view = change_page(&state, 3).await;
        assert_eq!(view.current_page, 3);
        assert_eq!(view.posts[0].id, 11);

        // A search without a reported total is a single page.
        let view = search_feed(&state, "rust").await;
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.posts[0].id, 42);
        assert!(page_window(&state).is_empty());
    }

    #[tokio::test]
    async fn unreachable_backend_serves_bundled_page() {
        let state = app_state(UNREACHABLE);
        let view = load_home(&state).await;

        assert_eq!(view.origin, FeedOrigin::Fallback);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.posts.len(), 5);
        assert!(view.total_pages > 1);
    }

    #[tokio::test]
    async fn server_error_serves_bundled_page() {
        let router = Router::new()
            .route("/posts/recommended", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route("/posts/most-liked", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let state = app_state(&serve(router).await);

        let view = load_home(&state).await;
        assert_eq!(view.origin, FeedOrigin::Fallback);
        assert_eq!(view.posts.len(), 5);
    }
}
