use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Database error")]
    QueryFailed(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmQueryFailed(#[from] sea_orm::DbErr),

    #[error("Database reconnect failed")]
    ReconnectFailed(#[source] sqlx::Error),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidCursor(_) | AppError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            AppError::QueryFailed(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::QueryFailed(sqlx::Error::PoolTimedOut) => StatusCode::GATEWAY_TIMEOUT,
            AppError::QueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OrmQueryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ReconnectFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let message = match &self {
            AppError::QueryFailed(sqlx::Error::RowNotFound) => AppError::NotFound.to_string(),
            _ => self.to_string(),
        };

        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
