//! Processo use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/delete/update entry points for the HTTP layer.
//! - Translate repository outcomes into use-case errors.
//! - Log every outcome with operation and `numero`.
//!
//! # Invariants
//! - Each use-case performs exactly the gateway calls it names; no retries.
//! - Update never changes `numero`, `id` or `data_insercao`.
//! - Update's load and write run in separate transactions (last write wins).

use crate::model::processo::{Processo, ProcessoValidationError};
use crate::repo::processo_repo::{ProcessoRepository, RepoError};
use crate::schema::ProcessoForm;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for processo use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Record failed model validation before reaching storage.
    Validation(ProcessoValidationError),
    /// Another record already owns this `numero`.
    DuplicateNumero(String),
    /// No record carries this `numero`.
    NotFound(String),
    /// Any other storage failure.
    Persistence(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateNumero(numero) => write!(f, "duplicate processo numero: {numero}"),
            Self::NotFound(numero) => write!(f, "processo not found: {numero}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::DuplicateNumero(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateNumero(numero) => Self::DuplicateNumero(numero),
            RepoError::NotFound(numero) => Self::NotFound(numero),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Persistence(other),
        }
    }
}

/// Use-case service wrapper for processo CRUD operations.
pub struct ProcessoService<R: ProcessoRepository> {
    repo: R,
}

impl<R: ProcessoRepository> ProcessoService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new processo and returns it with its generated id.
    pub fn create(&self, form: ProcessoForm) -> ServiceResult<Processo> {
        let mut processo = form.into_processo();
        debug!(
            "event=processo_create module=service status=start numero={} data_inicio={} data_fim={}",
            processo.numero, processo.data_inicio, processo.data_fim
        );

        match self.repo.insert(&mut processo) {
            Ok(()) => {
                debug!(
                    "event=processo_create module=service status=ok numero={} id={}",
                    processo.numero,
                    processo.id.unwrap_or_default()
                );
                Ok(processo)
            }
            Err(err) => {
                let err = ServiceError::from(err);
                let status = if matches!(err, ServiceError::DuplicateNumero(_)) {
                    "conflict"
                } else {
                    "error"
                };
                warn!(
                    "event=processo_create module=service status={} numero={} error={}",
                    status, processo.numero, err
                );
                Err(err)
            }
        }
    }

    /// Lists every processo; an empty store yields an empty vector.
    pub fn list(&self) -> ServiceResult<Vec<Processo>> {
        debug!("event=processo_list module=service status=start");
        let processos = self.repo.find_all().map_err(|err| {
            warn!("event=processo_list module=service status=error error={err}");
            ServiceError::from(err)
        })?;
        debug!(
            "event=processo_list module=service status=ok count={}",
            processos.len()
        );
        Ok(processos)
    }

    /// Looks up one processo by `numero`.
    pub fn get(&self, numero: &str) -> ServiceResult<Processo> {
        debug!("event=processo_get module=service status=start numero={numero}");
        let found = self.repo.find_by_numero(numero).map_err(|err| {
            warn!("event=processo_get module=service status=error numero={numero} error={err}");
            ServiceError::from(err)
        })?;

        match found {
            Some(processo) => {
                debug!("event=processo_get module=service status=ok numero={numero}");
                Ok(processo)
            }
            None => {
                warn!("event=processo_get module=service status=not_found numero={numero}");
                Err(ServiceError::NotFound(numero.to_string()))
            }
        }
    }

    /// Deletes one processo by `numero`.
    pub fn delete(&self, numero: &str) -> ServiceResult<()> {
        debug!("event=processo_delete module=service status=start numero={numero}");
        let deleted = self.repo.delete_by_numero(numero).map_err(|err| {
            warn!("event=processo_delete module=service status=error numero={numero} error={err}");
            ServiceError::from(err)
        })?;

        if deleted == 0 {
            warn!("event=processo_delete module=service status=not_found numero={numero}");
            return Err(ServiceError::NotFound(numero.to_string()));
        }

        debug!("event=processo_delete module=service status=ok numero={numero}");
        Ok(())
    }

    /// Overwrites `descricao`, `data_inicio` and `data_fim` of an existing
    /// processo. Absent `numero` is reported as not found and creates nothing.
    pub fn update(&self, form: ProcessoForm) -> ServiceResult<Processo> {
        let numero = form.numero.as_str();
        debug!("event=processo_update module=service status=start numero={numero}");

        let mut processo = self
            .repo
            .find_by_numero(numero)
            .map_err(|err| {
                warn!(
                    "event=processo_update module=service status=error numero={numero} error={err}"
                );
                ServiceError::from(err)
            })?
            .ok_or_else(|| {
                warn!("event=processo_update module=service status=not_found numero={numero}");
                ServiceError::NotFound(numero.to_string())
            })?;

        processo.descricao = form.descricao.clone();
        processo.data_inicio = form.data_inicio;
        processo.data_fim = form.data_fim;

        self.repo.update(&processo).map_err(|err| {
            warn!("event=processo_update module=service status=error numero={numero} error={err}");
            ServiceError::from(err)
        })?;

        debug!("event=processo_update module=service status=ok numero={numero}");
        Ok(processo)
    }
}
