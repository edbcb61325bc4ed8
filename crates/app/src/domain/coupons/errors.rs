//! Coupons service errors.

use carta::coupons::CouponDefinitionError;
use thiserror::Error;

use crate::api::{ApiError, RecordError};

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("coupon not found")]
    NotFound,

    #[error("invalid coupon")]
    InvalidCoupon(#[from] CouponDefinitionError),

    #[error("invalid coupon record")]
    InvalidRecord(#[from] RecordError),

    #[error("coupon api request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for CouponsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
