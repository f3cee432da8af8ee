use crate::services::{MemoryProductStore, SharedProductStore, SqliteProductStore, StoreError};
use clap::Parser;
use std::convert::Infallible;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Where products are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    /// A process-local table, emptied on restart.
    Memory,
    /// A private in-memory SQLite database.
    SqliteMemory,
    /// A SQLite database file, created if missing.
    SqliteFile(PathBuf),
}

impl FromStr for Database {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "memory" => Database::Memory,
            "sqlite::memory:" => Database::SqliteMemory,
            path => {
                let path = path.strip_prefix("sqlite://").unwrap_or(path);
                Database::SqliteFile(PathBuf::from(path))
            }
        })
    }
}

impl Database {
    pub fn open(&self) -> Result<SharedProductStore, StoreError> {
        Ok(match self {
            Database::Memory => Arc::new(MemoryProductStore::new()),
            Database::SqliteMemory => Arc::new(SqliteProductStore::open_in_memory()?),
            Database::SqliteFile(path) => Arc::new(SqliteProductStore::open(path)?),
        })
    }
}

/// Service configuration, read from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "grocery_api", version, about = "Grocery list product service")]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "GROCERY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path prefix of the API, e.g. `/v1`.
    #[arg(long, env = "GROCERY_URL_PREFIX", default_value = "/v1")]
    pub url_prefix: String,

    /// `memory`, `sqlite::memory:` or the path of a SQLite database file.
    #[arg(long, env = "GROCERY_DATABASE", default_value = "memory")]
    pub database: Database,

    /// Default log filter, `RUST_LOG` takes precedence.
    #[arg(long, env = "GROCERY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// The URL prefix with a single leading slash and no trailing slash; empty for the root.
    pub fn scope_prefix(&self) -> String {
        let trimmed = self.url_prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}
