//! Input schemas for processo requests.
//!
//! # Responsibility
//! - Describe raw client input independently of any web framework.
//! - Turn raw input into typed, validated values before storage is touched.
//!
//! # Invariants
//! - Raw input types accept absent fields so that "missing" is reported by
//!   validation, not by the deserializer.
//! - Dates are accepted only as `YYYY-MM-DD`.

use crate::model::processo::{
    check_text, Processo, ProcessoValidationError, DESCRICAO_MAX_CHARS, NUMERO_MAX_CHARS,
};
use chrono::NaiveDate;
use serde::Deserialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw body of create/update requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessoFormInput {
    pub numero: Option<String>,
    pub descricao: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
}

/// Validated body of create/update requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessoForm {
    pub numero: String,
    pub descricao: String,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
}

impl ProcessoFormInput {
    /// Checks presence, length and date format of every field.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn validate(self) -> Result<ProcessoForm, ProcessoValidationError> {
        let numero = required_text("numero", self.numero, NUMERO_MAX_CHARS)?;
        let descricao = required_text("descricao", self.descricao, DESCRICAO_MAX_CHARS)?;
        let data_inicio = required_date("data_inicio", self.data_inicio)?;
        let data_fim = required_date("data_fim", self.data_fim)?;

        Ok(ProcessoForm {
            numero,
            descricao,
            data_inicio,
            data_fim,
        })
    }
}

impl ProcessoForm {
    /// Builds a new unsaved record stamped with the current time.
    pub fn into_processo(self) -> Processo {
        Processo::new(self.numero, self.descricao, self.data_inicio, self.data_fim)
    }
}

/// Raw query of lookup/delete requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessoBuscaInput {
    pub numero: Option<String>,
}

/// Validated query of lookup/delete requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessoBusca {
    pub numero: String,
}

impl ProcessoBuscaInput {
    pub fn validate(self) -> Result<ProcessoBusca, ProcessoValidationError> {
        let numero = required_text("numero", self.numero, NUMERO_MAX_CHARS)?;
        Ok(ProcessoBusca { numero })
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    max_chars: usize,
) -> Result<String, ProcessoValidationError> {
    let value = value.ok_or(ProcessoValidationError::MissingField(field))?;
    check_text(field, &value, max_chars)?;
    Ok(value)
}

fn required_date(
    field: &'static str,
    value: Option<String>,
) -> Result<NaiveDate, ProcessoValidationError> {
    let value = value.ok_or(ProcessoValidationError::MissingField(field))?;
    if value.trim().is_empty() {
        return Err(ProcessoValidationError::BlankField(field));
    }

    // chrono accepts unpadded fields and a leading sign; only the canonical
    // rendering round-trips.
    match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
        Ok(date) if date.format(DATE_FORMAT).to_string() == value => Ok(date),
        _ => Err(ProcessoValidationError::InvalidDate { field, value }),
    }
}
