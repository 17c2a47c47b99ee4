//! SQLite storage bootstrap, schema migrations and transactional scopes.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the processo store.
//! - Apply schema migrations in deterministic order.
//! - Hand out one transaction per gateway operation.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write processo rows before migrations succeed.
//! - A transaction is committed only when its closure returns `Ok`; the
//!   connection lock is released on every exit path.

use rusqlite::{Connection, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, PoisonError};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Shared handle over one migrated SQLite connection.
///
/// Cloning is cheap; all clones serialize on the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Wraps a connection returned by [`open_db`] or [`open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `op` inside a fresh transaction.
    ///
    /// Commits when `op` returns `Ok`. On `Err` or panic the transaction is
    /// dropped without commit, which rolls it back, so a poisoned lock still
    /// guards a consistent connection and is reclaimed.
    pub fn with_transaction<T, E, F>(&self, op: F) -> Result<T, E>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, E>,
        E: From<DbError>,
    {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        let tx = guard.transaction().map_err(DbError::from)?;
        let value = op(&tx)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{open_db_in_memory, Database, DbError};
    use std::panic::{self, AssertUnwindSafe};

    fn count_rows(db: &Database) -> i64 {
        db.with_transaction(|tx| -> Result<i64, DbError> {
            Ok(tx.query_row("SELECT COUNT(*) FROM processo;", [], |row| row.get(0))?)
        })
        .unwrap()
    }

    #[test]
    fn panic_inside_transaction_rolls_back_and_keeps_connection_usable() {
        let db = Database::new(open_db_in_memory().unwrap());

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            db.with_transaction(|tx| -> Result<(), DbError> {
                tx.execute(
                    "INSERT INTO processo (numero, descricao, data_inicio, data_fim, data_insercao)
                     VALUES ('p-1', 'lost', '2024-01-01', '2024-01-02', '2024-01-01 00:00:00');",
                    [],
                )?;
                panic!("writer crashed mid-transaction");
            })
        }));
        assert!(outcome.is_err());
        assert!(db.conn.is_poisoned());

        assert_eq!(count_rows(&db), 0);
    }
}
