use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::ApiError;
use crate::game;
use crate::server::AppState;
use crate::tmdb::{catalog, Movie, MovieFilter};

pub async fn search_movies(
    State(state): State<AppState>,
    Query(filter): Query<MovieFilter>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.movies.search_movies(&filter).await?;
    Ok(Json(movies))
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateQuery {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Seed a round server-side, for frontends that don't pick their own.
pub async fn get_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let filter = MovieFilter {
        genre: params.genre,
        platform: params.platform,
        requires_tagline: true,
    };
    let count = game::check_count(params.count.unwrap_or(state.config.game.candidates))?;
    let pool = state.movies.search_movies(&filter).await?;

    let candidates = game::select_round(&pool, count, &mut rand::thread_rng())?;
    Ok(Json(candidates))
}

pub async fn list_genres() -> Json<Vec<&'static str>> {
    Json(catalog::genre_names())
}

pub async fn list_platforms() -> Json<Vec<&'static str>> {
    Json(catalog::platform_names())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, UpstreamConfig};
    use crate::credentials::ApiKey;
    use crate::server::build_router;
    use crate::tmdb::{MovieSource, TmdbClient, TmdbError, TmdbResult};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StubSource {
        movies: Vec<Movie>,
        seen: Mutex<Vec<MovieFilter>>,
    }

    #[async_trait]
    impl MovieSource for StubSource {
        async fn search_movies(&self, filter: &MovieFilter) -> TmdbResult<Vec<Movie>> {
            self.seen.lock().unwrap().push(filter.clone());
            let mut movies = self.movies.clone();
            if filter.requires_tagline {
                movies.retain(Movie::has_tagline);
            }
            Ok(movies)
        }
    }

    struct FailingSource;

    #[async_trait]
    impl MovieSource for FailingSource {
        async fn search_movies(&self, _filter: &MovieFilter) -> TmdbResult<Vec<Movie>> {
            Err(TmdbError::InvalidFilter("unknown genre 'x'".to_string()))
        }
    }

    fn movie(id: u64, tagline: &str) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            tagline: tagline.to_string(),
            genres: vec![],
            platforms: vec![],
        }
    }

    fn stub(movies: Vec<Movie>) -> Arc<StubSource> {
        Arc::new(StubSource {
            movies,
            seen: Mutex::new(vec![]),
        })
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = build_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_search_movies_passes_filter() {
        let source = stub(vec![movie(1, "x"), movie(2, "")]);
        let state = AppState::new(Config::default(), source.clone());

        let (status, body) = get(state, "/api/movies?genre=comedy&platform=netflix&tagline=true").await;

        assert_eq!(status, StatusCode::OK);
        let movies: Vec<Movie> = serde_json::from_value(body).unwrap();
        assert_eq!(movies, vec![movie(1, "x")]);

        let seen = source.seen.lock().unwrap();
        assert_eq!(
            seen[0],
            MovieFilter {
                genre: Some("comedy".to_string()),
                platform: Some("netflix".to_string()),
                requires_tagline: true,
            }
        );
    }

    #[tokio::test]
    async fn test_search_movies_defaults() {
        let source = stub(vec![movie(1, "x"), movie(2, "")]);
        let state = AppState::new(Config::default(), source.clone());

        let (status, body) = get(state, "/api/movies").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(source.seen.lock().unwrap()[0], MovieFilter::default());
    }

    #[tokio::test]
    async fn test_invalid_filter_is_400() {
        let state = AppState::new(Config::default(), Arc::new(FailingSource));
        let (status, body) = get(state, "/api/movies?genre=x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("unknown genre"));
    }

    #[tokio::test]
    async fn test_candidates() {
        let pool: Vec<Movie> = (1..=10).map(|i| movie(i, "tag")).collect();
        let source = stub(pool);
        let state = AppState::new(Config::default(), source.clone());

        let (status, body) = get(state, "/api/candidates?genre=drama&count=4").await;

        assert_eq!(status, StatusCode::OK);
        let movies: Vec<Movie> = serde_json::from_value(body).unwrap();
        assert_eq!(movies.len(), 4);
        assert!(source.seen.lock().unwrap()[0].requires_tagline);
    }

    #[tokio::test]
    async fn test_candidates_default_count() {
        let pool: Vec<Movie> = (1..=20).map(|i| movie(i, "tag")).collect();
        let mut config = Config::default();
        config.game.candidates = 5;
        let state = AppState::new(config, stub(pool));

        let (_, body) = get(state, "/api/candidates").await;
        assert_eq!(body.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_candidates_empty_pool() {
        let state = AppState::new(Config::default(), stub(vec![movie(1, "")]));
        let (status, body) = get(state, "/api/candidates").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("broaden"));
    }

    #[tokio::test]
    async fn test_candidates_zero_count_is_400() {
        let pool: Vec<Movie> = (1..=10).map(|i| movie(i, "tag")).collect();
        let source = stub(pool);
        let state = AppState::new(Config::default(), source.clone());

        let (status, body) = get(state, "/api/candidates?count=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("count=0"));
        assert!(source.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_endpoints() {
        let state = AppState::new(Config::default(), stub(vec![]));
        let (status, body) = get(state.clone(), "/api/genres").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().iter().any(|g| g == "Comedy"));

        let (_, body) = get(state, "/api/platforms").await;
        assert!(body.as_array().unwrap().iter().any(|p| p == "Netflix"));
    }

    #[tokio::test]
    async fn test_upstream_500_is_502_without_movies() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/3/discover/movie"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let upstream = UpstreamConfig {
            base_url: format!("{}/3", mock_server.uri()),
            ..UpstreamConfig::default()
        };
        let client = TmdbClient::new(&upstream, ApiKey::from("k")).unwrap();
        let state = AppState::new(Config::default(), Arc::new(client));

        let (status, body) = get(state, "/api/movies?genre=comedy").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.is_object());
        assert!(body["error"].as_str().unwrap().contains("500"));
    }
}
