use std::net::SocketAddr;
use std::path::Path;

use axum::{Router, http::StatusCode, middleware, routing::get_service};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::api::{self, AppState};
use crate::config::CitycastConfig;
use crate::rate_limit::{self, RateLimiter};
use crate::Result;

const API_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";
const PAGE_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// The full application: rate-limited API under `/api`, index page at `/`,
/// everything else served from the static directory.
pub fn app(config: &CitycastConfig, state: AppState) -> Router {
    let window = config.rate_limit.window();
    let api_limiter = RateLimiter::new(config.rate_limit.api_max_requests, window, API_LIMIT_MESSAGE);
    let page_limiter =
        RateLimiter::new(config.rate_limit.page_max_requests, window, PAGE_LIMIT_MESSAGE);

    let static_dir = Path::new(&config.server.static_dir);

    // Unknown /api paths get their own 404 so the limiter still counts them
    let api = api::router(state)
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(api_limiter, rate_limit::enforce));

    let index = Router::new()
        .route("/", get_service(ServeFile::new(static_dir.join("index.html"))))
        .layer(middleware::from_fn_with_state(page_limiter, rate_limit::enforce));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .merge(index)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
}

pub async fn run(config: &CitycastConfig, state: AppState) -> Result<()> {
    let app = app(config, state);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
