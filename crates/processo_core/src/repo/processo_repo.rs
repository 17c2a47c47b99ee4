//! Processo repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the persistence gateway over the `processo` table.
//! - Keep SQL and row mapping inside the core persistence boundary.
//!
//! # Invariants
//! - Every call runs in its own transaction from [`Database::with_transaction`].
//! - Write paths call `Processo::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `update` never touches `numero`, `pk_processo` or `data_insercao`.

use crate::db::{Database, DbError};
use crate::model::processo::{Processo, ProcessoValidationError};
use rusqlite::{params, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROCESSO_SELECT_SQL: &str = "SELECT
    pk_processo,
    numero,
    descricao,
    data_inicio,
    data_fim,
    data_insercao
FROM processo";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for processo persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProcessoValidationError),
    Db(DbError),
    /// Insert hit the unique constraint on `numero`.
    DuplicateNumero(String),
    /// Update target row no longer exists.
    NotFound(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateNumero(numero) => write!(f, "duplicate processo numero: {numero}"),
            Self::NotFound(numero) => write!(f, "processo not found: {numero}"),
            Self::InvalidData(message) => write!(f, "invalid persisted processo data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateNumero(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ProcessoValidationError> for RepoError {
    fn from(value: ProcessoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistence gateway for processo records.
pub trait ProcessoRepository {
    /// Persists a new record and stores the generated key in `processo.id`.
    fn insert(&self, processo: &mut Processo) -> RepoResult<()>;
    /// Returns every record in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Processo>>;
    /// Returns the record with this `numero`, if any.
    fn find_by_numero(&self, numero: &str) -> RepoResult<Option<Processo>>;
    /// Deletes the record with this `numero`; returns the deleted row count.
    fn delete_by_numero(&self, numero: &str) -> RepoResult<usize>;
    /// Persists the mutable fields of a previously loaded record.
    fn update(&self, processo: &Processo) -> RepoResult<()>;
}

/// SQLite-backed processo repository.
#[derive(Clone)]
pub struct SqliteProcessoRepository {
    db: Database,
}

impl SqliteProcessoRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ProcessoRepository for SqliteProcessoRepository {
    fn insert(&self, processo: &mut Processo) -> RepoResult<()> {
        processo.validate()?;

        let id = self
            .db
            .with_transaction(|tx| -> RepoResult<i64> {
                tx.execute(
                    "INSERT INTO processo (
                        numero,
                        descricao,
                        data_inicio,
                        data_fim,
                        data_insercao
                    ) VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        processo.numero.as_str(),
                        processo.descricao.as_str(),
                        processo.data_inicio,
                        processo.data_fim,
                        processo.data_insercao,
                    ],
                )?;
                Ok(tx.last_insert_rowid())
            })
            .map_err(|err| classify_insert_error(err, &processo.numero))?;

        processo.id = Some(id);
        Ok(())
    }

    fn find_all(&self) -> RepoResult<Vec<Processo>> {
        self.db.with_transaction(|tx| -> RepoResult<_> {
            let mut stmt =
                tx.prepare(&format!("{PROCESSO_SELECT_SQL} ORDER BY pk_processo ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut processos = Vec::new();

            while let Some(row) = rows.next()? {
                processos.push(parse_processo_row(row)?);
            }

            Ok(processos)
        })
    }

    fn find_by_numero(&self, numero: &str) -> RepoResult<Option<Processo>> {
        self.db.with_transaction(|tx| -> RepoResult<_> {
            let mut stmt = tx.prepare(&format!("{PROCESSO_SELECT_SQL} WHERE numero = ?1;"))?;
            let mut rows = stmt.query([numero])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_processo_row(row)?));
            }

            Ok(None)
        })
    }

    fn delete_by_numero(&self, numero: &str) -> RepoResult<usize> {
        self.db.with_transaction(|tx| -> RepoResult<_> {
            let deleted = tx.execute("DELETE FROM processo WHERE numero = ?1;", [numero])?;
            Ok(deleted)
        })
    }

    fn update(&self, processo: &Processo) -> RepoResult<()> {
        processo.validate()?;

        let Some(id) = processo.id else {
            return Err(RepoError::NotFound(processo.numero.clone()));
        };

        self.db.with_transaction(|tx| -> RepoResult<_> {
            let changed = tx.execute(
                "UPDATE processo
                 SET
                    descricao = ?1,
                    data_inicio = ?2,
                    data_fim = ?3
                 WHERE pk_processo = ?4;",
                params![
                    processo.descricao.as_str(),
                    processo.data_inicio,
                    processo.data_fim,
                    id,
                ],
            )?;

            if changed == 0 {
                return Err(RepoError::NotFound(processo.numero.clone()));
            }

            Ok(())
        })
    }
}

fn classify_insert_error(err: RepoError, numero: &str) -> RepoError {
    match err {
        RepoError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(failure, _)))
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateNumero(numero.to_string())
        }
        other => other,
    }
}

fn parse_processo_row(row: &Row<'_>) -> RepoResult<Processo> {
    let id: i64 = row.get("pk_processo")?;

    let data_inicio = row.get("data_inicio").map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid date in processo.data_inicio for pk_processo={id}: {err}"
        ))
    })?;
    let data_fim = row.get("data_fim").map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid date in processo.data_fim for pk_processo={id}: {err}"
        ))
    })?;
    let data_insercao = row.get("data_insercao").map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid timestamp in processo.data_insercao for pk_processo={id}: {err}"
        ))
    })?;

    let processo = Processo {
        id: Some(id),
        numero: row.get("numero")?,
        descricao: row.get("descricao")?,
        data_inicio,
        data_fim,
        data_insercao,
    };
    processo
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("pk_processo={id}: {err}")))?;
    Ok(processo)
}
