use serde::{Deserialize, Serialize};

use super::catalog;

/// A movie as the proxy hands it to frontends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl Movie {
    pub fn has_tagline(&self) -> bool {
        !self.tagline.trim().is_empty()
    }
}

/// Query parameters of `/api/movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFilter {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default, rename = "tagline")]
    pub requires_tagline: bool,
}

impl MovieFilter {
    pub fn genre(&self) -> Option<&str> {
        non_blank(self.genre.as_deref())
    }

    pub fn platform(&self) -> Option<&str> {
        non_blank(self.platform.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Upstream wire types. Only the fields we use; everything else is ignored.

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverPage {
    pub results: Vec<UpstreamMovie>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamMovie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<UpstreamGenre>,
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamGenre {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

impl UpstreamMovie {
    /// `platform` is what the movies were filtered on, used when the
    /// record carries no platform list of its own.
    pub fn into_movie(self, platform: Option<&str>) -> Movie {
        let genres = if self.genres.is_empty() {
            self.genre_ids
                .iter()
                .map(|id| catalog::genre_name(*id))
                .collect()
        } else {
            self.genres
                .into_iter()
                .map(|g| {
                    if g.name.is_empty() {
                        catalog::genre_name(g.id)
                    } else {
                        g.name
                    }
                })
                .collect()
        };

        let platforms = if self.platforms.is_empty() {
            platform.map(|p| vec![p.to_string()]).unwrap_or_default()
        } else {
            self.platforms
        };

        Movie {
            id: self.id,
            title: self.title,
            tagline: self.tagline.unwrap_or_default().trim().to_string(),
            genres,
            platforms,
        }
    }
}
