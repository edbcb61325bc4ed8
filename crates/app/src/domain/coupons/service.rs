//! Coupons service.

use async_trait::async_trait;
use carta::coupons::{Coupon, CouponId};
use mockall::automock;
use reqwest::Method;

use crate::{
    api::{
        ApiClient,
        records::{CouponPayload, CouponRecord},
    },
    domain::coupons::errors::CouponsServiceError,
};

const COUPONS_PATH: &str = "/api/cupon";

#[derive(Debug, Clone)]
pub struct HttpCouponsService {
    api: ApiClient,
}

impl HttpCouponsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CouponsService for HttpCouponsService {
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let records: Vec<CouponRecord> = self.api.get_json(COUPONS_PATH).await?;

        let coupons = records
            .into_iter()
            .map(Coupon::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(coupons)
    }

    async fn create_coupon(&self, coupon: Coupon) -> Result<(), CouponsServiceError> {
        coupon.validate()?;

        self.api
            .send_json(Method::POST, COUPONS_PATH, &CouponPayload::from(&coupon))
            .await?;

        Ok(())
    }

    async fn update_coupon(
        &self,
        coupon: CouponId,
        update: Coupon,
    ) -> Result<(), CouponsServiceError> {
        update.validate()?;

        self.api
            .send_json(
                Method::PUT,
                &format!("{COUPONS_PATH}/{coupon}"),
                &CouponPayload::from(&update),
            )
            .await?;

        Ok(())
    }

    async fn delete_coupon(&self, coupon: CouponId) -> Result<(), CouponsServiceError> {
        self.api.delete(&format!("{COUPONS_PATH}/{coupon}")).await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Retrieves all coupons, active or not.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Creates a new coupon.
    async fn create_coupon(&self, coupon: Coupon) -> Result<(), CouponsServiceError>;

    /// Replaces the coupon with the given id.
    async fn update_coupon(
        &self,
        coupon: CouponId,
        update: Coupon,
    ) -> Result<(), CouponsServiceError>;

    /// Deletes the coupon with the given id.
    async fn delete_coupon(&self, coupon: CouponId) -> Result<(), CouponsServiceError>;
}
