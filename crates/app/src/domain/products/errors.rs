//! Products service errors.

use thiserror::Error;

use crate::api::{ApiError, RecordError};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("missing required data: {0}")]
    MissingRequiredData(&'static str),

    #[error("invalid price value")]
    InvalidPrice,

    #[error("invalid product record")]
    InvalidRecord(#[from] RecordError),

    #[error("product api request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ProductsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
