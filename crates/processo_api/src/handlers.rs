//! Request handlers for the processo routes.
//!
//! Each handler validates its input first, then runs exactly one service
//! use-case on the blocking pool. Rejected input is logged under the
//! handler's operation name before the error response is built.

use crate::{
    error::{ApiError, ApiResult},
    extract::{ProcessoBody, ProcessoQuery},
    openapi::openapi_document,
    state::{AppState, SqliteProcessoService},
};
use axum::{extract::State, response::Redirect, Json};
use log::warn;
use processo_core::{
    apresenta_lista, apresenta_processo, apresenta_remocao, ProcessoBusca, ProcessoForm,
    ProcessoListView, ProcessoRemovidoView, ProcessoView, ServiceResult,
};
use std::sync::Arc;

/// Redirects to the API description.
pub async fn home() -> Redirect {
    Redirect::to("/openapi")
}

pub async fn openapi() -> Json<serde_json::Value> {
    Json(openapi_document())
}

/// `POST /processo`
pub async fn add_processo(
    State(state): State<AppState>,
    body: Result<ProcessoBody, ApiError>,
) -> ApiResult<Json<ProcessoListView>> {
    let form = validate_form("processo_create", body)?;

    let processo = run_blocking(&state, move |service| service.create(form))
        .await?
        .map_err(ApiError::on_create)?;

    Ok(Json(apresenta_lista(std::slice::from_ref(&processo))))
}

/// `GET /processos`
pub async fn get_processos(State(state): State<AppState>) -> ApiResult<Json<ProcessoListView>> {
    let processos = run_blocking(&state, |service| service.list()).await??;
    Ok(Json(apresenta_lista(&processos)))
}

/// `GET /busca_processo?numero=`
pub async fn get_processo(
    State(state): State<AppState>,
    query: Result<ProcessoQuery, ApiError>,
) -> ApiResult<Json<ProcessoView>> {
    let busca = validate_busca("processo_get", query)?;

    let processo = run_blocking(&state, move |service| service.get(&busca.numero)).await??;
    Ok(Json(apresenta_processo(&processo)))
}

/// `DELETE /del_processo?numero=`
pub async fn del_processo(
    State(state): State<AppState>,
    query: Result<ProcessoQuery, ApiError>,
) -> ApiResult<Json<ProcessoRemovidoView>> {
    let busca = validate_busca("processo_delete", query)?;

    let numero = busca.numero.clone();
    run_blocking(&state, move |service| service.delete(&busca.numero)).await??;
    Ok(Json(apresenta_remocao(numero)))
}

/// `PUT /processo/atualizar`
pub async fn update_processo(
    State(state): State<AppState>,
    body: Result<ProcessoBody, ApiError>,
) -> ApiResult<Json<ProcessoView>> {
    let form = validate_form("processo_update", body)?;

    let processo = run_blocking(&state, move |service| service.update(form)).await??;
    Ok(Json(apresenta_processo(&processo)))
}

fn validate_form(
    operation: &'static str,
    body: Result<ProcessoBody, ApiError>,
) -> ApiResult<ProcessoForm> {
    let ProcessoBody(input) = body.map_err(|err| rejected(operation, None, err))?;
    let numero = input.numero.clone();
    input
        .validate()
        .map_err(|err| rejected(operation, numero.as_deref(), err.into()))
}

fn validate_busca(
    operation: &'static str,
    query: Result<ProcessoQuery, ApiError>,
) -> ApiResult<ProcessoBusca> {
    let ProcessoQuery(input) = query.map_err(|err| rejected(operation, None, err))?;
    let numero = input.numero.clone();
    input
        .validate()
        .map_err(|err| rejected(operation, numero.as_deref(), err.into()))
}

fn rejected(operation: &'static str, numero: Option<&str>, err: ApiError) -> ApiError {
    warn!(
        "event={operation} module=api status=invalid numero={} error={err}",
        numero.unwrap_or("-")
    );
    err
}

async fn run_blocking<T, F>(state: &AppState, op: F) -> ApiResult<ServiceResult<T>>
where
    F: FnOnce(&SqliteProcessoService) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    let service = Arc::clone(&state.service);
    tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))
}
