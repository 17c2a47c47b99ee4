//! Processo record model.
//!
//! # Responsibility
//! - Define the record shape shared by storage, service and view layers.
//! - Assign the write-once insertion timestamp at construction.
//!
//! # Invariants
//! - `numero` is non-blank and at most [`NUMERO_MAX_CHARS`] characters.
//! - `descricao` is non-blank and at most [`DESCRICAO_MAX_CHARS`] characters.
//! - `id` and `data_insercao` are owned by the system, never by callers.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-generated primary key.
pub type ProcessoId = i64;

pub const NUMERO_MAX_CHARS: usize = 50;
pub const DESCRICAO_MAX_CHARS: usize = 255;

/// Validation failures for processo input and records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessoValidationError {
    /// Required field absent from the input.
    MissingField(&'static str),
    /// Field present but empty after trimming.
    BlankField(&'static str),
    /// Field longer than its column allows.
    FieldTooLong { field: &'static str, max_chars: usize },
    /// Date not in `YYYY-MM-DD` form.
    InvalidDate { field: &'static str, value: String },
    /// Request body could not be decoded at all.
    MalformedBody(String),
}

impl Display for ProcessoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "campo obrigatório ausente: {field}"),
            Self::BlankField(field) => write!(f, "campo obrigatório vazio: {field}"),
            Self::FieldTooLong { field, max_chars } => {
                write!(f, "campo {field} excede {max_chars} caracteres")
            }
            Self::InvalidDate { field, value } => write!(
                f,
                "data inválida em {field}: `{value}` (formato esperado AAAA-MM-DD)"
            ),
            Self::MalformedBody(details) => write!(f, "corpo da requisição inválido: {details}"),
        }
    }
}

impl Error for ProcessoValidationError {}

/// One tracked case/process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processo {
    /// `None` until the record has been inserted.
    pub id: Option<ProcessoId>,
    pub numero: String,
    pub descricao: String,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    /// Local time of creation. Never rewritten by updates.
    pub data_insercao: NaiveDateTime,
}

impl Processo {
    /// Creates an unsaved processo stamped with the current local time.
    pub fn new(
        numero: impl Into<String>,
        descricao: impl Into<String>,
        data_inicio: NaiveDate,
        data_fim: NaiveDate,
    ) -> Self {
        Self::with_data_insercao(
            numero,
            descricao,
            data_inicio,
            data_fim,
            Local::now().naive_local(),
        )
    }

    /// Creates an unsaved processo with an explicit insertion timestamp.
    ///
    /// Used by tests and storage mapping; request handlers never reach it.
    pub fn with_data_insercao(
        numero: impl Into<String>,
        descricao: impl Into<String>,
        data_inicio: NaiveDate,
        data_fim: NaiveDate,
        data_insercao: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            numero: numero.into(),
            descricao: descricao.into(),
            data_inicio,
            data_fim,
            data_insercao,
        }
    }

    /// Checks the non-blank and length invariants of the text fields.
    pub fn validate(&self) -> Result<(), ProcessoValidationError> {
        check_text("numero", &self.numero, NUMERO_MAX_CHARS)?;
        check_text("descricao", &self.descricao, DESCRICAO_MAX_CHARS)?;
        Ok(())
    }
}

pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ProcessoValidationError> {
    if value.trim().is_empty() {
        return Err(ProcessoValidationError::BlankField(field));
    }
    if value.chars().count() > max_chars {
        return Err(ProcessoValidationError::FieldTooLong { field, max_chars });
    }
    Ok(())
}
