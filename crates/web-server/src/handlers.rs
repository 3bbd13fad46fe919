use crate::error::{AppError, IMOVEL_NOT_FOUND, NO_IMOVEIS};
use crate::links::ImovelResource;
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use core_types::{format_imovel, Imovel, ImovelPayload, NewImovel};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ImovelList {
    pub imoveis: Vec<ImovelResource>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub mensagem: &'static str,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub mensagem: &'static str,
    pub imovel: ImovelResource,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub mensagem: &'static str,
}

/// Integer path ids only; anything else is treated as an unknown imóvel.
fn imovel_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(%rejection, "Non-numeric imóvel id.");
        AppError::NotFound(IMOVEL_NOT_FOUND)
    })
}

/// Filter segments that fail to decode match nothing.
fn filter_value(path: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    path.map(|Path(value)| value).map_err(|rejection| {
        tracing::debug!(%rejection, "Undecodable filter segment.");
        AppError::NotFound(IMOVEL_NOT_FOUND)
    })
}

fn validated(body: Result<Json<ImovelPayload>, JsonRejection>) -> Result<NewImovel, AppError> {
    let Json(payload) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(payload.validate()?)
}

fn listing(state: &AppState, imoveis: Vec<Imovel>, empty: &'static str) -> Result<Json<ImovelList>, AppError> {
    if imoveis.is_empty() {
        return Err(AppError::NotFound(empty));
    }
    let imoveis = imoveis.into_iter().map(|imovel| state.links.listed(imovel)).collect();
    Ok(Json(ImovelList { imoveis }))
}

/// # GET /imoveis
pub async fn list_imoveis(State(state): State<Arc<AppState>>) -> Result<Json<ImovelList>, AppError> {
    let imoveis = state.store.list_imoveis().await?;
    listing(&state, imoveis, NO_IMOVEIS)
}

/// # GET /imoveis/:id
pub async fn get_imovel(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ImovelResource>, AppError> {
    let id = imovel_id(path)?;
    let imovel = state
        .store
        .get_imovel(id)
        .await?
        .ok_or(AppError::NotFound(IMOVEL_NOT_FOUND))?;
    Ok(Json(state.links.single(imovel)))
}

/// # POST /imoveis
pub async fn create_imovel(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ImovelPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let imovel = validated(body)?;
    let id = state.store.insert_imovel(&imovel).await?;
    tracing::info!(id, "Imóvel created.");

    Ok((
        StatusCode::CREATED,
        Json(Created {
            mensagem: "Imóvel adicionado com sucesso",
            id,
        }),
    ))
}

/// # PUT /imoveis/:id
/// Full replace: every writable field must be sent.
pub async fn update_imovel(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ImovelPayload>, JsonRejection>,
) -> Result<Json<Updated>, AppError> {
    let id = imovel_id(path)?;
    let imovel = validated(body)?;

    if !state.store.update_imovel(id, &imovel).await? {
        return Err(AppError::NotFound(IMOVEL_NOT_FOUND));
    }
    tracing::info!(id, "Imóvel updated.");

    let updated = format_imovel(imovel.into_row(id));
    Ok(Json(Updated {
        mensagem: "Imóvel atualizado com sucesso",
        imovel: state.links.single(updated),
    }))
}

/// # DELETE /imoveis/:id
pub async fn delete_imovel(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Deleted>, AppError> {
    let id = imovel_id(path)?;
    if !state.store.delete_imovel(id).await? {
        return Err(AppError::NotFound(IMOVEL_NOT_FOUND));
    }
    tracing::info!(id, "Imóvel deleted.");

    Ok(Json(Deleted {
        mensagem: "Imóvel deletado com sucesso",
    }))
}

/// # GET /imoveis/tipo/:tipo
pub async fn list_by_tipo(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ImovelList>, AppError> {
    let tipo = filter_value(path)?;
    let imoveis = state.store.find_by_tipo(&tipo).await?;
    listing(&state, imoveis, IMOVEL_NOT_FOUND)
}

/// # GET /imoveis/cidade/:cidade
pub async fn list_by_cidade(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ImovelList>, AppError> {
    let cidade = filter_value(path)?;
    let imoveis = state.store.find_by_cidade(&cidade).await?;
    listing(&state, imoveis, IMOVEL_NOT_FOUND)
}
