//! Runtime settings, assembled once at startup and passed down explicitly.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. `shelf.toml` in the working directory, or the file given with `--config`
//! 3. environment variables prefixed with `SHELF_`, nested with `__`
//!    (e.g. `SHELF_GOOGLE_BOOKS__API_KEY`, `SHELF_SERVER__PORT`)

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use shelf_covers::GoogleBooksConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub google_books: GoogleBooksConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, covering cover uploads and CSV imports.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageSettings {
    pub database_path: PathBuf,
    pub covers_dir: PathBuf,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("books.db"),
            covers_dir: PathBuf::from("uploads"),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    ///
    /// An explicit `path` must exist; the implicit `shelf.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("shelf").required(false),
        };

        Self::build(file, Environment::with_prefix("SHELF"))
    }

    fn build(
        file: File<config::FileSourceFile, config::FileFormat>,
        env: Environment,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
