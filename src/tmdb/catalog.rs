//! Known upstream genre and watch-provider ids, so frontends can filter by
//! name ("comedy", "netflix") instead of numeric ids.

struct Entry {
    id: u32,
    name: &'static str,
    aliases: &'static [&'static str],
}

const GENRES: &[Entry] = &[
    Entry { id: 28, name: "Action", aliases: &[] },
    Entry { id: 12, name: "Adventure", aliases: &[] },
    Entry { id: 16, name: "Animation", aliases: &["animated"] },
    Entry { id: 35, name: "Comedy", aliases: &[] },
    Entry { id: 80, name: "Crime", aliases: &[] },
    Entry { id: 99, name: "Documentary", aliases: &[] },
    Entry { id: 18, name: "Drama", aliases: &[] },
    Entry { id: 10751, name: "Family", aliases: &[] },
    Entry { id: 14, name: "Fantasy", aliases: &[] },
    Entry { id: 36, name: "History", aliases: &[] },
    Entry { id: 27, name: "Horror", aliases: &[] },
    Entry { id: 10402, name: "Music", aliases: &["musical"] },
    Entry { id: 9648, name: "Mystery", aliases: &[] },
    Entry { id: 10749, name: "Romance", aliases: &[] },
    Entry { id: 878, name: "Science Fiction", aliases: &["scifi"] },
    Entry { id: 10770, name: "TV Movie", aliases: &[] },
    Entry { id: 53, name: "Thriller", aliases: &[] },
    Entry { id: 10752, name: "War", aliases: &[] },
    Entry { id: 37, name: "Western", aliases: &[] },
];

const PLATFORMS: &[Entry] = &[
    Entry { id: 8, name: "Netflix", aliases: &[] },
    Entry { id: 9, name: "Amazon Prime Video", aliases: &["prime", "primevideo", "amazon"] },
    Entry { id: 337, name: "Disney Plus", aliases: &["disney"] },
    Entry { id: 15, name: "Hulu", aliases: &[] },
    Entry { id: 1899, name: "Max", aliases: &["hbomax", "hbo"] },
    Entry { id: 350, name: "Apple TV Plus", aliases: &["appletv"] },
    Entry { id: 531, name: "Paramount Plus", aliases: &["paramount"] },
    Entry { id: 386, name: "Peacock", aliases: &[] },
];

/// A filter value resolved to an upstream id plus its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub id: u32,
    pub name: String,
}

// "Sci-Fi", "sci fi" and "SciFi" all become "scifi"; "Disney+" becomes "disneyplus".
fn normalize(value: &str) -> String {
    value
        .trim()
        .replace('+', "plus")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn resolve(table: &[Entry], value: &str) -> Option<Resolved> {
    let value = value.trim();
    if let Ok(id) = value.parse::<u32>() {
        let name = table
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.to_string())
            .unwrap_or_else(|| id.to_string());
        return Some(Resolved { id, name });
    }

    let wanted = normalize(value);
    if wanted.is_empty() {
        return None;
    }
    table
        .iter()
        .find(|e| normalize(e.name) == wanted || e.aliases.iter().any(|a| *a == wanted))
        .map(|e| Resolved {
            id: e.id,
            name: e.name.to_string(),
        })
}

pub fn resolve_genre(value: &str) -> Option<Resolved> {
    resolve(GENRES, value)
}

pub fn resolve_platform(value: &str) -> Option<Resolved> {
    resolve(PLATFORMS, value)
}

/// Display name for an upstream genre id; unknown ids render as the number.
pub fn genre_name(id: u32) -> String {
    GENRES
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

pub fn genre_names() -> Vec<&'static str> {
    GENRES.iter().map(|e| e.name).collect()
}

pub fn platform_names() -> Vec<&'static str> {
    PLATFORMS.iter().map(|e| e.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_genre() {
        assert_eq!(resolve_genre("comedy").unwrap().id, 35);
        assert_eq!(resolve_genre("Science Fiction").unwrap().id, 878);
        assert_eq!(resolve_genre("sci-fi").unwrap().id, 878);
        assert_eq!(resolve_genre("tv-movie").unwrap().id, 10770);
        assert_eq!(resolve_genre("18").unwrap().name, "Drama");
        assert_eq!(resolve_genre("4242").unwrap().name, "4242");
        assert!(resolve_genre("telenovela").is_none());
        assert!(resolve_genre("--").is_none());
    }

    #[test]
    fn test_resolve_platform() {
        assert_eq!(resolve_platform("NETFLIX").unwrap().id, 8);
        assert_eq!(resolve_platform("Disney+").unwrap().id, 337);
        assert_eq!(resolve_platform("prime").unwrap().name, "Amazon Prime Video");
        assert_eq!(resolve_platform("HBO Max").unwrap().id, 1899);
        assert!(resolve_platform("betamax").is_none());
    }

    #[test]
    fn test_genre_name() {
        assert_eq!(genre_name(28), "Action");
        assert_eq!(genre_name(1), "1");
        assert_eq!(genre_names().len(), GENRES.len());
        assert!(platform_names().contains(&"Hulu"));
    }
}
