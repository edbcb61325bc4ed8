//! Company profile.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::api::{ApiClient, ApiError, records::CompanyRecord};

const COMPANY_PATH: &str = "/api/empresa";

/// The restaurant's public profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub schedule: Option<String>,
    pub address: Option<String>,
    pub video_url: Option<String>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub tiktok_url: Option<String>,
    pub logo_url: Option<String>,
    pub cover_url: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl From<CompanyRecord> for Company {
    fn from(record: CompanyRecord) -> Self {
        Self {
            name: record.name,
            schedule: present(record.schedule),
            address: present(record.address),
            video_url: present(record.video_url),
            facebook_url: present(record.facebook_url),
            instagram_url: present(record.instagram_url),
            tiktok_url: present(record.tiktok_url),
            logo_url: present(record.logo_url),
            cover_url: present(record.cover_url),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompanyServiceError {
    #[error("company profile not found")]
    NotFound,

    #[error("company api request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for CompanyServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}

#[derive(Debug, Clone)]
pub struct HttpCompanyService {
    api: ApiClient,
}

impl HttpCompanyService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CompanyService for HttpCompanyService {
    async fn get_company(&self) -> Result<Company, CompanyServiceError> {
        let record: CompanyRecord = self.api.get_json(COMPANY_PATH).await?;

        Ok(record.into())
    }
}

#[automock]
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// Retrieves the restaurant profile.
    async fn get_company(&self) -> Result<Company, CompanyServiceError>;
}
