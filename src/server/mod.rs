//! Local server with on-demand detail page generation
//!
//! Serves the generated output directory. Requests for `/post/{uid}` routes
//! that were unknown at build time (or whose cached output has gone stale)
//! trigger generation on first request through the route cache.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

use crate::api::{FetchError, HttpContentSource};
use crate::cache::{RouteCache, RouteStatus};
use crate::generator::Generator;
use crate::Caravel;

/// Server state
struct ServerState {
    base_dir: PathBuf,
    public_dir: PathBuf,
    generator: Generator<HttpContentSource>,
    routes: Mutex<RouteCache>,
}

/// Start the server
pub async fn start(caravel: &Caravel, ip: &str, port: u16) -> Result<()> {
    let source = HttpContentSource::new(caravel.config.api_url.clone())?;
    let generator = Generator::new(caravel, source)?;
    let ttl = Duration::from_secs(caravel.config.route_ttl_minutes * 60);
    let routes = Mutex::new(RouteCache::load(&caravel.base_dir, ttl));

    let state = Arc::new(ServerState {
        base_dir: caravel.base_dir.clone(),
        public_dir: caravel.public_dir.clone(),
        generator,
        routes,
    });

    let app = Router::new()
        .route("/post/:uid/", get(post_handler))
        .route("/post/:uid", get(post_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve a detail page, generating it on demand when missing or stale
async fn post_handler(
    AxumPath(uid): AxumPath<String>,
    State(state): State<Arc<ServerState>>,
) -> Response {
    // Identifiers are opaque but must stay a single path segment
    if uid.is_empty() || uid == ".." || uid.contains(['/', '\\']) {
        return (StatusCode::NOT_FOUND, "Post not found").into_response();
    }

    let page_path = state.public_dir.join("post").join(&uid).join("index.html");

    {
        let mut routes = state.routes.lock().await;
        // Build-time pages have no cache entry; they are served as-is.
        // On-demand pages regenerate once their TTL has passed.
        let needs = match routes.status(&uid) {
            None => !page_path.exists(),
            Some(RouteStatus::Stale) => true,
            Some(RouteStatus::Generating) => false,
            Some(RouteStatus::Generated) => !page_path.exists(),
        };
        if needs {
            routes.begin(&uid);
            drop(routes);

            tracing::info!("Generating /post/{} on demand", uid);
            let result = state.generator.generate_post(&uid).await;

            let mut routes = state.routes.lock().await;
            match result {
                Ok(()) => routes.complete(&uid),
                Err(err) => {
                    routes.abort(&uid);
                    if let Err(e) = routes.save(&state.base_dir) {
                        tracing::warn!("Failed to persist route cache: {}", e);
                    }
                    return match err.downcast_ref::<FetchError>() {
                        Some(FetchError::NotFound(_)) => {
                            (StatusCode::NOT_FOUND, "Post not found").into_response()
                        }
                        _ => {
                            tracing::error!("On-demand generation failed: {}", err);
                            (StatusCode::BAD_GATEWAY, "Content source unavailable")
                                .into_response()
                        }
                    };
                }
            }
            if let Err(e) = routes.save(&state.base_dir) {
                tracing::warn!("Failed to persist route cache: {}", e);
            }
        }
    }

    match tokio::fs::read_to_string(&page_path).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Post not found").into_response(),
    }
}

/// Fallback handler serving the generated static files
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}
