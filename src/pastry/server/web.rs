//! Browser surface: a page listing every snippet, a form to add one, and the
//! stylesheet and icons the page links to.

use super::run_blocking;
use super::templates::{FAVICON_PNG, INDEX_TEMPLATE, LOGO_PNG, STYLESHEET};
use crate::api::PastryApi;
use crate::model::Snippet;
use crate::store::DataStore;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{DateTime, Utc};
use minijinja::{context, AutoEscape, Environment};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static PAGES: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
});

#[derive(Debug, Serialize)]
struct PageEntry {
    index: usize,
    age: String,
    text: String,
}

#[derive(Debug, Deserialize)]
pub struct PasteForm {
    #[serde(default)]
    pub text: String,
}

pub fn router<S: DataStore + 'static>(api: Arc<PastryApi<S>>) -> Router {
    Router::new()
        .route("/", get(show::<S>))
        .route("/paste", post(paste::<S>))
        .route("/style.css", get(stylesheet))
        .route("/favicon.png", get(favicon))
        .route("/logo.png", get(logo))
        .with_state(api)
}

/// Builds the page rows from a newest-first snapshot, keeping each row's
/// store index so it matches what the read port calls it.
fn page_entries(newest_first: Vec<Snippet>, now: DateTime<Utc>) -> Vec<PageEntry> {
    let len = newest_first.len();
    newest_first
        .into_iter()
        .enumerate()
        .map(|(i, snippet)| PageEntry {
            index: len - 1 - i,
            age: snippet.relative_age(now),
            text: snippet.text,
        })
        .collect()
}

fn render_index(entries: &[PageEntry]) -> Result<String, minijinja::Error> {
    PAGES.render_str(INDEX_TEMPLATE, context! { entries => entries })
}

async fn show<S: DataStore + 'static>(State(api): State<Arc<PastryApi<S>>>) -> Response {
    let snapshot = match run_blocking(&api, |api| Ok(api.snapshot())).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "failed to read snippets");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to read snippets").into_response();
        }
    };
    let entries = page_entries(snapshot, Utc::now());
    match render_index(&entries) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render index page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

async fn paste<S: DataStore + 'static>(
    State(api): State<Arc<PastryApi<S>>>,
    Form(form): Form<PasteForm>,
) -> Redirect {
    if form.text.is_empty() {
        tracing::debug!("empty web paste ignored");
    } else if let Err(e) = run_blocking(&api, move |api| Ok(api.append_text(form.text))).await {
        tracing::warn!(error = %e, "web paste failed");
    }
    Redirect::to("/")
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn favicon() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], FAVICON_PNG)
}

async fn logo() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], LOGO_PNG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn api_with(texts: &[&str]) -> Arc<PastryApi<InMemoryStore>> {
        let api = PastryApi::new(InMemoryStore::new());
        for text in texts {
            api.append_text(text.to_string());
        }
        Arc::new(api)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/paste")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_newest_first() {
        let api = api_with(&["older snippet", "newer snippet"]);
        let response = router(api)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let page = body_text(response).await;
        let newer = page.find("newer snippet").unwrap();
        let older = page.find("older snippet").unwrap();
        assert!(newer < older);
        assert!(page.contains("#1"));
        assert!(page.contains("2 snippets"));
    }

    #[tokio::test]
    async fn test_index_escapes_snippet_html() {
        let api = api_with(&["<script>alert(1)</script>"]);
        let response = router(api)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let page = body_text(response).await;
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn test_empty_store_page() {
        let response = router(api_with(&[]))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Nothing pasted yet."));
    }

    #[tokio::test]
    async fn test_paste_appends_and_redirects() {
        let api = api_with(&[]);
        let response = router(Arc::clone(&api))
            .oneshot(form_post("text=hello+web%0Asecond+line"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(api.get(None).unwrap(), "hello web\nsecond line");
        assert_eq!(api.store().save_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_paste_still_redirects() {
        let api = api_with(&[]);
        for body in ["text=", ""] {
            let response = router(Arc::clone(&api)).oneshot(form_post(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }
        assert!(api.is_empty());
    }

    #[tokio::test]
    async fn test_stylesheet() {
        let response = router(api_with(&[]))
            .oneshot(Request::get("/style.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css"));
    }

    #[tokio::test]
    async fn test_icons_are_served_as_png() {
        for path in ["/favicon.png", "/logo.png"] {
            let response = router(api_with(&[]))
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", path);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "{} is not a PNG", path);
        }
    }

    #[tokio::test]
    async fn test_index_links_icons() {
        let response = router(api_with(&[]))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let page = body_text(response).await;
        assert!(page.contains("href=\"/favicon.png\""));
        assert!(page.contains("src=\"/logo.png\""));
    }

    #[test]
    fn test_page_entries_keep_store_indexes() {
        let now = Utc::now();
        let newest_first = vec![Snippet::at("c", now), Snippet::at("b", now), Snippet::at("a", now)];
        let entries = page_entries(newest_first, now);
        let indexes: Vec<_> = entries.iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![2, 1, 0]);
        assert_eq!(entries[2].text, "a");
    }
}
