use anyhow::{bail, Context, Result};
use processo_core::{default_log_level, open_db, open_db_in_memory, Database};
use std::env;
use std::path::PathBuf;

const MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    fn from_env(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("PROCESSO_DB_PATH must not be empty");
        }
        if trimmed == MEMORY_DB {
            return Ok(Self::Memory);
        }
        Ok(Self::File(PathBuf::from(trimmed)))
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseLocation,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("PROCESSO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = env::var("PROCESSO_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .context("PROCESSO_PORT must be a valid u16")?;

        let database = DatabaseLocation::from_env(
            &env::var("PROCESSO_DB_PATH").unwrap_or_else(|_| "database/db.sqlite3".to_string()),
        )?;

        let log_level =
            env::var("PROCESSO_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());

        let log_dir = env::var("PROCESSO_LOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            host,
            port,
            database,
            log_level,
            log_dir,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Opens and migrates the configured store, creating the parent
    /// directory of a file database when needed.
    pub fn open_database(&self) -> Result<Database> {
        let conn = match &self.database {
            DatabaseLocation::Memory => {
                open_db_in_memory().context("failed to open in-memory database")?
            }
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
                open_db(path).with_context(|| format!("failed to open {}", path.display()))?
            }
        };
        Ok(Database::new(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::DatabaseLocation;
    use std::path::PathBuf;

    #[test]
    fn memory_marker_selects_in_memory_store() {
        assert_eq!(
            DatabaseLocation::from_env(":memory:").unwrap(),
            DatabaseLocation::Memory
        );
    }

    #[test]
    fn other_values_are_file_paths() {
        assert_eq!(
            DatabaseLocation::from_env(" data/db.sqlite3 ").unwrap(),
            DatabaseLocation::File(PathBuf::from("data/db.sqlite3"))
        );
        assert!(DatabaseLocation::from_env("  ").is_err());
    }
}
