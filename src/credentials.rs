use std::fmt;
use std::path::Path;

use crate::config::ConfigError;

pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// The upstream API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// The environment value wins over the file. Empty values count as absent.
    pub fn resolve(env_value: Option<String>, file: &Path) -> Result<Self, ConfigError> {
        if let Some(key) = env_value.as_deref().map(str::trim) {
            if !key.is_empty() {
                return Ok(ApiKey(key.to_string()));
            }
        }

        match std::fs::read_to_string(file) {
            Ok(content) => {
                let key = content.trim();
                if !key.is_empty() {
                    return Ok(ApiKey(key.to_string()));
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::ReadError(file.display().to_string(), e));
            }
        }

        Err(ConfigError::MissingCredential(
            API_KEY_ENV,
            file.display().to_string(),
        ))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        ApiKey(key.to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "from-file").unwrap();
        let key = ApiKey::resolve(Some("from-env".to_string()), file.path()).unwrap();
        assert_eq!(key.expose(), "from-env");
    }

    #[test]
    fn test_file_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  abc123  ").unwrap();
        let key = ApiKey::resolve(None, file.path()).unwrap();
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn test_blank_env_falls_back_to_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "abc123").unwrap();
        let key = ApiKey::resolve(Some("   ".to_string()), file.path()).unwrap();
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn test_missing_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let err = ApiKey::resolve(None, &dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(API_KEY_ENV, _)));
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = ApiKey::resolve(Some(String::new()), file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(..)));
    }

    #[test]
    fn test_never_printed() {
        let key = ApiKey::from("supersecret");
        assert!(!format!("{:?}", key).contains("supersecret"));
        assert!(!key.to_string().contains("supersecret"));
    }
}
