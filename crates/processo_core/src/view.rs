//! External representation of processo records.
//!
//! `id` and `data_insercao` are storage bookkeeping and never leave the core.

use crate::model::processo::Processo;
use chrono::NaiveDate;
use serde::Serialize;

/// Single-record view returned by lookup and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessoView {
    pub numero: String,
    pub descricao: String,
    /// Serialized as `YYYY-MM-DD`.
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
}

/// Collection view returned by list and create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessoListView {
    pub processos: Vec<ProcessoView>,
}

/// Confirmation returned by delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessoRemovidoView {
    pub message: String,
    pub numero: String,
}

pub fn apresenta_processo(processo: &Processo) -> ProcessoView {
    ProcessoView {
        numero: processo.numero.clone(),
        descricao: processo.descricao.clone(),
        data_inicio: processo.data_inicio,
        data_fim: processo.data_fim,
    }
}

pub fn apresenta_lista(processos: &[Processo]) -> ProcessoListView {
    ProcessoListView {
        processos: processos.iter().map(apresenta_processo).collect(),
    }
}

pub fn apresenta_remocao(numero: impl Into<String>) -> ProcessoRemovidoView {
    ProcessoRemovidoView {
        message: "Processo removido".to_string(),
        numero: numero.into(),
    }
}
