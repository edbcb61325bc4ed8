//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiClient, ApiConfig, ApiError},
    domain::{
        categories::{CategoriesService, HttpCategoriesService},
        company::{CompanyService, HttpCompanyService},
        coupons::{CouponsService, HttpCouponsService},
        products::{HttpProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build api client")]
    Api(#[source] ApiError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub coupons: Arc<dyn CouponsService>,
    pub company: Arc<dyn CompanyService>,
}

impl AppContext {
    /// Build application context backed by the REST API.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_api_config(config: ApiConfig) -> Result<Self, AppInitError> {
        let api = ApiClient::new(config).map_err(AppInitError::Api)?;

        Ok(Self {
            products: Arc::new(HttpProductsService::new(api.clone())),
            categories: Arc::new(HttpCategoriesService::new(api.clone())),
            coupons: Arc::new(HttpCouponsService::new(api.clone())),
            company: Arc::new(HttpCompanyService::new(api)),
        })
    }
}
