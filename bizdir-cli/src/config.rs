//! Configuration loading
//!
//! Precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`DATABASE_URL`, `BIZDIR_BIND`), including `.env` files
//! 3. Config file (`--config`, `BIZDIR_CONFIG`, or `~/.bizdir/config.toml`)
//! 4. Built-in defaults

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bizdir_server::db::DEFAULT_MAX_CONNECTIONS;
use serde::Deserialize;

/// Contents of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BizdirConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl BizdirConfig {
    /// Load from an explicit path, or from the default path if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file just means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Default config file path: ~/.bizdir/config.toml
    pub fn default_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Pick the database URL from the command line/environment or the file.
    pub fn database_url(&self, from_args: Option<String>) -> Result<String> {
        from_args
            .or_else(|| self.database.url.clone())
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.bizdir/config.toml")
    }
}

/// Get the bizdir config directory path (~/.bizdir)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bizdir"))
}

/// Load environment variables from .env files.
///
/// The current directory is read first, then ~/.bizdir/.env. dotenvy never
/// overwrites variables that are already set. Returns the files loaded.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded.push(env_file);
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = BizdirConfig::default();
        assert_eq!(config.server.bind.port(), 3030);
        assert!(!config.server.cors_permissive);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            [database]
            url = "postgres://db.internal/bizdir"
            "#,
        );

        let config = BizdirConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database.url.as_deref(), Some("postgres://db.internal/bizdir"));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.bind.port(), 3030);
    }

    #[test]
    fn full_file() {
        let file = write_config(
            r#"
            [server]
            bind = "0.0.0.0:8000"
            cors_permissive = true

            [database]
            max_connections = 12
            "#,
        );

        let config = BizdirConfig::from_path(file.path()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert!(config.server.cors_permissive);
        assert_eq!(config.database.max_connections, 12);
    }

    #[test]
    fn unknown_keys_are_errors() {
        let file = write_config("[server]\nport = 80\n");
        let err = BizdirConfig::from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BizdirConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn argument_url_wins_over_file() {
        let mut config = BizdirConfig::default();
        config.database.url = Some("postgres://file/bizdir".into());

        assert_eq!(
            config.database_url(Some("postgres://flag/bizdir".into())).unwrap(),
            "postgres://flag/bizdir"
        );
        assert_eq!(config.database_url(None).unwrap(), "postgres://file/bizdir");
    }

    #[test]
    fn missing_url_is_actionable() {
        let err = BizdirConfig::default().database_url(None).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL not set"));
    }
}
