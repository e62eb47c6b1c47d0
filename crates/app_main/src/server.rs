//! HTTP server: the JSON API and the static icon files

use anyhow::Result;
use app_core::GalleryLocation;
use app_fs::{FsError, IconRecord, IconStore, Metadata};
use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Shared, read-only router state
#[derive(Clone)]
struct ServerState {
    store: Arc<IconStore>,
}

/// Failure payload for API routes: `{"error": "..."}` with status 500
#[derive(Debug)]
pub struct ApiError(String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.0 }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<FsError> for ApiError {
    fn from(e: FsError) -> Self {
        tracing::error!("Store request failed: {}", e);
        ApiError(e.to_string())
    }
}

/// Build the application router over `store`
pub fn router(store: IconStore) -> Router {
    let files = ServeDir::new(store.root());
    let public_route = store.public_route().to_string();
    let state = ServerState {
        store: Arc::new(store),
    };

    let router = Router::new()
        .route("/api/categories", get(categories))
        .route("/api/icons", get(icons))
        .route("/api/metadata", get(metadata))
        .route("/health", get(health));

    let router = if public_route == "/" {
        router.fallback_service(files)
    } else {
        router.nest_service(&public_route, files)
    };

    router.with_state(state).layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl+C
pub async fn serve(store: IconStore, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        "Serving {} on http://{} (icons under {})",
        store.root().display(),
        listener.local_addr()?,
        store.public_route()
    );

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Run store work on the blocking pool
async fn blocking<T, F>(state: &ServerState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&IconStore) -> app_fs::Result<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| ApiError(e.to_string()))?
        .map_err(ApiError::from)
}

async fn categories(State(state): State<ServerState>) -> Result<Json<Vec<String>>, ApiError> {
    let categories = blocking(&state, |store| store.list_categories()).await?;
    tracing::debug!("Returning {} categories", categories.len());
    Ok(Json(categories))
}

/// `?category=` selects one category; the first occurrence wins
async fn icons(
    State(state): State<ServerState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<IconRecord>>, ApiError> {
    let selection = GalleryLocation::from_query(query.as_deref().unwrap_or_default()).selection;
    let category = selection.category().map(str::to_string);

    let icons = blocking(&state, move |store| store.list_icons(category.as_deref())).await?;
    tracing::debug!("Returning {} icons for {}", icons.len(), selection.as_param());
    Ok(Json(icons))
}

async fn metadata(State(state): State<ServerState>) -> Result<Json<Metadata>, ApiError> {
    let metadata = blocking(&state, |store| store.resolve_metadata()).await?;
    Ok(Json(metadata))
}

async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("arrows")).unwrap();
        fs::create_dir_all(root.join("shapes")).unwrap();
        fs::write(root.join("arrows/left.svg"), "<svg id=\"left\"/>").unwrap();
        fs::write(root.join("arrows/right.svg"), "<svg id=\"right\"/>").unwrap();
        fs::write(root.join("arrows/readme.txt"), "not an icon").unwrap();
        fs::write(root.join("shapes/circle.svg"), "<svg id=\"circle\"/>").unwrap();
        fs::write(
            root.join("arrows/metadata.json"),
            r#"{ "categoryName": "箭头", "order": 2, "icons": { "left": { "name": "左" } } }"#,
        )
        .unwrap();
        temp
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_categories() {
        let temp = fixture();
        let (status, json) = get_json(router(IconStore::new(temp.path())), "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!(["arrows", "shapes"]));
    }

    #[tokio::test]
    async fn test_icons_by_category() {
        let temp = fixture();
        let app = router(IconStore::new(temp.path()));

        let (status, json) = get_json(app.clone(), "/api/icons?category=arrows").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!([
                { "name": "left", "path": "/icons/arrows/left.svg", "category": "arrows" },
                { "name": "right", "path": "/icons/arrows/right.svg", "category": "arrows" },
            ])
        );

        let (_, all) = get_json(app.clone(), "/api/icons?category=all").await;
        assert_eq!(all.as_array().unwrap().len(), 3);
        let (_, omitted) = get_json(app.clone(), "/api/icons").await;
        assert_eq!(omitted, all);

        let (status, missing) = get_json(app, "/api/icons?category=nope").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(missing, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_metadata() {
        let temp = fixture();
        let (status, json) = get_json(router(IconStore::new(temp.path())), "/api/metadata").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "arrows": { "categoryName": "箭头", "order": 2, "icons": { "left": { "name": "左" } } },
                "shapes": { "categoryName": "shapes", "icons": {} },
            })
        );
    }

    #[tokio::test]
    async fn test_repeated_category_uses_first() {
        let temp = fixture();
        let app = router(IconStore::new(temp.path()));

        let (status, json) = get_json(app.clone(), "/api/icons?category=shapes&category=arrows").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["name"], "circle");
        assert_eq!(json.as_array().unwrap().len(), 1);

        let (_, spaced) = get_json(app, "/api/icons?category=line+icons&x=1").await;
        assert_eq!(spaced, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_malformed_sidecar_still_succeeds() {
        let temp = fixture();
        fs::create_dir_all(temp.path().join("broken")).unwrap();
        fs::write(temp.path().join("broken/metadata.json"), "{ invalid").unwrap();
        fs::write(temp.path().join("broken/star.svg"), "<svg/>").unwrap();
        let app = router(IconStore::new(temp.path()));

        let (status, json) = get_json(app.clone(), "/api/metadata").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["broken"], serde_json::json!({ "categoryName": "broken", "icons": {} }));
        assert_eq!(json["arrows"]["categoryName"], "箭头");

        let (status, icons) = get_json(app, "/api/icons?category=broken").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(icons[0]["name"], "star");
    }

    #[tokio::test]
    async fn test_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let app = router(IconStore::new(temp.path().join("missing")));

        assert_eq!(get_json(app.clone(), "/api/categories").await, (StatusCode::OK, serde_json::json!([])));
        assert_eq!(get_json(app.clone(), "/api/icons").await, (StatusCode::OK, serde_json::json!([])));
        assert_eq!(get_json(app, "/api/metadata").await, (StatusCode::OK, serde_json::json!({})));
    }

    #[tokio::test]
    async fn test_unreadable_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("icons");
        fs::write(&root, "a file, not a directory").unwrap();
        let app = router(IconStore::new(&root));

        for uri in ["/api/categories", "/api/icons", "/api/metadata"] {
            let (status, json) = get_json(app.clone(), uri).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
            assert!(json["error"].is_string(), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_serves_svg_files() {
        let temp = fixture();
        let app = router(IconStore::new(temp.path()));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/icons/arrows/left.svg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<svg id=\"left\"/>");

        let response = app
            .oneshot(Request::builder().uri("/icons/arrows/ghost.svg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_custom_public_route() {
        let temp = fixture();
        let app = router(IconStore::new(temp.path()).with_public_route("static/svg"));

        let (_, json) = get_json(app.clone(), "/api/icons?category=shapes").await;
        assert_eq!(json[0]["path"], "/static/svg/shapes/circle.svg");

        let response = app
            .oneshot(Request::builder().uri("/static/svg/shapes/circle.svg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let temp = TempDir::new().unwrap();
        let response = router(IconStore::new(temp.path()))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
