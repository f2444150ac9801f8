use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use crate::game::GameError;
use crate::tmdb::TmdbError;

/// Error body: `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Tmdb(#[from] TmdbError),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Tmdb(TmdbError::InvalidFilter(_)) => StatusCode::BAD_REQUEST,
            ApiError::Tmdb(_) => StatusCode::BAD_GATEWAY,
            ApiError::Game(GameError::EmptyPool) => StatusCode::NOT_FOUND,
            ApiError::Game(GameError::ZeroCount) => StatusCode::BAD_REQUEST,
            ApiError::Game(_) => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "upstream request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
