use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog::admin::FormError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Product {0} not found")]
    NotFound(u64),

    #[error("Banner {0} not found")]
    BannerNotFound(u64),

    #[error("Invalid form: {0}")]
    InvalidForm(#[from] FormError),

    #[error("Missing or wrong admin token")]
    Unauthorized,

    #[error("Catalog unavailable: {0}")]
    Upstream(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound { .. } | AppError::BannerNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidForm { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
