//! Categories service errors.

use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("category not found")]
    NotFound,

    #[error("missing required data: {0}")]
    MissingRequiredData(&'static str),

    #[error("category api request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for CategoriesServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
