use axum::{extract::Request, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::tmdb::MovieSource;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub movies: Arc<dyn MovieSource>,
}

impl AppState {
    pub fn new(config: Config, movies: Arc<dyn MovieSource>) -> Self {
        Self {
            config: Arc::new(config),
            movies,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/movies", get(crate::api::search_movies))
        .route("/api/candidates", get(crate::api::get_candidates))
        .route("/api/genres", get(crate::api::list_genres))
        .route("/api/platforms", get(crate::api::list_platforms));

    let mut router = Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler);

    if let Some(ref appdir) = state.config.appdir {
        router = router.fallback_service(ServeDir::new(appdir));
    }

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::log_request,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler(req: Request) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
