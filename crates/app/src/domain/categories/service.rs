//! Categories service.

use async_trait::async_trait;
use carta::categories::{Category, CategoryId};
use mockall::automock;

use crate::{
    api::{ApiClient, records::CategoryRecord},
    domain::categories::{errors::CategoriesServiceError, models::CategoryDraft},
};

const CATEGORIES_PATH: &str = "/api/categorias";

#[derive(Debug, Clone)]
pub struct HttpCategoriesService {
    api: ApiClient,
}

impl HttpCategoriesService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CategoriesService for HttpCategoriesService {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError> {
        let records: Vec<CategoryRecord> = self.api.get_json(CATEGORIES_PATH).await?;

        Ok(records.into_iter().map(Category::from).collect())
    }

    async fn create_category(&self, category: CategoryDraft) -> Result<(), CategoriesServiceError> {
        let form = category.into_form()?;

        self.api.send_form(CATEGORIES_PATH, form).await?;

        Ok(())
    }

    async fn update_category(
        &self,
        category: CategoryId,
        update: CategoryDraft,
    ) -> Result<(), CategoriesServiceError> {
        let form = update.into_form()?.text("_method", "PUT");

        self.api
            .send_form(&format!("{CATEGORIES_PATH}/{category}"), form)
            .await?;

        Ok(())
    }

    async fn delete_category(&self, category: CategoryId) -> Result<(), CategoriesServiceError> {
        self.api
            .delete(&format!("{CATEGORIES_PATH}/{category}"))
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories.
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(&self, category: CategoryDraft) -> Result<(), CategoriesServiceError>;

    /// Updates the category with the given id.
    async fn update_category(
        &self,
        category: CategoryId,
        update: CategoryDraft,
    ) -> Result<(), CategoriesServiceError>;

    /// Deletes the category with the given id.
    async fn delete_category(&self, category: CategoryId) -> Result<(), CategoriesServiceError>;
}
