use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::catalog;
use super::types::*;
use crate::config::{AuthMode, UpstreamConfig};
use crate::credentials::ApiKey;

#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Unexpected upstream response: {0}")]
    Parse(String),
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

pub type TmdbResult<T> = Result<T, TmdbError>;

/// Anything that can answer a movie search. The HTTP handlers only see this.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn search_movies(&self, filter: &MovieFilter) -> TmdbResult<Vec<Movie>>;
}

/// Query string for `/discover/movie`, plus the display name of the
/// platform it filters on.
struct DiscoverQuery {
    params: Vec<(&'static str, String)>,
    platform_name: Option<String>,
}

pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    auth: AuthMode,
    watch_region: String,
    fetch_details: bool,
    max_detail_lookups: usize,
}

impl TmdbClient {
    pub fn new(config: &UpstreamConfig, api_key: ApiKey) -> TmdbResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TmdbError::Upstream(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            auth: config.auth,
            watch_region: config.watch_region.clone(),
            fetch_details: config.fetch_details,
            max_detail_lookups: config.max_detail_lookups,
        })
    }

    fn discover_query(&self, filter: &MovieFilter) -> TmdbResult<DiscoverQuery> {
        let mut params = vec![
            ("include_adult", "false".to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", "1".to_string()),
        ];

        if let Some(genre) = filter.genre() {
            let resolved = catalog::resolve_genre(genre)
                .ok_or_else(|| TmdbError::InvalidFilter(format!("unknown genre '{}'", genre)))?;
            params.push(("with_genres", resolved.id.to_string()));
        }

        let mut platform_name = None;
        if let Some(platform) = filter.platform() {
            let resolved = catalog::resolve_platform(platform).ok_or_else(|| {
                TmdbError::InvalidFilter(format!("unknown platform '{}'", platform))
            })?;
            params.push(("with_watch_providers", resolved.id.to_string()));
            params.push(("watch_region", self.watch_region.clone()));
            platform_name = Some(resolved.name);
        }

        Ok(DiscoverQuery {
            params,
            platform_name,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TmdbResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(query);
        request = match self.auth {
            AuthMode::Query => request.query(&[("api_key", self.api_key.expose())]),
            AuthMode::Bearer => request.bearer_auth(self.api_key.expose()),
        };

        // Errors drop the URL: with query auth it carries the key.
        let response = request
            .send()
            .await
            .map_err(|e| TmdbError::Upstream(format!("GET {} failed: {}", path, e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Upstream(format!("GET {} returned {}", path, status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TmdbError::Upstream(format!("GET {} failed: {}", path, e.without_url())))?;

        serde_json::from_slice(&body).map_err(|e| TmdbError::Parse(format!("GET {}: {}", path, e)))
    }

    // One detail request per movie without a tagline, capped by max_detail_lookups.
    async fn complete_taglines(&self, movies: &mut [Movie]) {
        let missing = movies
            .iter_mut()
            .filter(|m| !m.has_tagline())
            .take(self.max_detail_lookups);

        for movie in missing {
            let path = format!("/movie/{}", movie.id);
            match self.get_json::<UpstreamMovie>(&path, &[]).await {
                Ok(detail) => {
                    movie.tagline = detail.tagline.unwrap_or_default().trim().to_string();
                    if movie.genres.is_empty() {
                        movie.genres = detail.genres.into_iter().map(|g| g.name).collect();
                    }
                }
                Err(e) => warn!(movie_id = movie.id, error = %e, "tagline lookup failed"),
            }
        }
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn search_movies(&self, filter: &MovieFilter) -> TmdbResult<Vec<Movie>> {
        let query = self.discover_query(filter)?;
        let page: DiscoverPage = self.get_json("/discover/movie", &query.params).await?;

        debug!(
            genre = ?filter.genre(),
            platform = ?filter.platform(),
            results = page.results.len(),
            total = ?page.total_results,
            "discover"
        );

        let mut movies: Vec<Movie> = page
            .results
            .into_iter()
            .map(|m| m.into_movie(query.platform_name.as_deref()))
            .collect();

        if self.fetch_details {
            self.complete_taglines(&mut movies).await;
        }

        if filter.requires_tagline {
            movies.retain(Movie::has_tagline);
        }

        Ok(movies)
    }
}
