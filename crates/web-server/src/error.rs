use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use database::DbError;
use serde_json::json;
use thiserror::Error;

pub const CONNECTION_FAILED: &str = "Ocorreu um erro ao conectar com o servidor";
pub const REQUEST_FAILED: &str = "Ocorreu um erro ao processar a requisição";
pub const NO_IMOVEIS: &str = "Nenhum imóvel encontrado";
pub const IMOVEL_NOT_FOUND: &str = "Imóvel não encontrado";
pub const MISSING_FIELDS: &str = "Todos os campos são obrigatórios";
pub const INVALID_BODY: &str = "Corpo da requisição inválido";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Validation error: {0}")]
    Validation(#[from] CoreError),
    #[error("Not found: {0}")]
    NotFound(&'static str),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Driver details are logged and never copied into the response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(DbError::Connection(db_err)) => {
                tracing::error!(error = ?db_err, "Database connection error.");
                (StatusCode::INTERNAL_SERVER_ERROR, CONNECTION_FAILED)
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, REQUEST_FAILED)
            }
            AppError::Validation(CoreError::ValorOutOfRange(valor)) => {
                tracing::debug!(%valor, "Rejected unstorable valor.");
                (StatusCode::BAD_REQUEST, INVALID_BODY)
            }
            AppError::Validation(validation_err) => {
                tracing::debug!(error = %validation_err, "Rejected incomplete imóvel.");
                (StatusCode::BAD_REQUEST, MISSING_FIELDS)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::BadRequest(detail) => {
                tracing::debug!(%detail, "Rejected request body.");
                (StatusCode::BAD_REQUEST, INVALID_BODY)
            }
        };

        let body = Json(json!({ "erro": error_message }));
        (status, body).into_response()
    }
}
