use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{forms::FieldError, store::StoreError, tmdb::LookupError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("movie database request failed: {0}")]
    Upstream(#[from] LookupError),

    #[error("invalid input: {}", join_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("movie {id}")),
            err @ StoreError::Conflict(_) => AppError::Conflict(err.to_string()),
            StoreError::Database(err) => AppError::Database(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        // Upstream and storage details stay in the log.
        let message = match &self {
            AppError::Upstream(_) => "The movie database could not be reached. Please try again later.".to_string(),
            AppError::Database(_) | AppError::Internal(_) => "Something went wrong.".to_string(),
            other => other.to_string(),
        };

        let body = crate::templates::error_page(status, &message);
        (status, Html(body)).into_response()
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join(", ")
}

pub type AppResult<T> = Result<T, AppError>;
