//! Products service.

use async_trait::async_trait;
use carta::products::{Product, ProductId};
use mockall::automock;

use crate::{
    api::{ApiClient, records::ProductRecord},
    domain::products::{errors::ProductsServiceError, models::ProductDraft},
};

const PRODUCTS_PATH: &str = "/api/producto";

#[derive(Debug, Clone)]
pub struct HttpProductsService {
    api: ApiClient,
}

impl HttpProductsService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        let records: Vec<ProductRecord> = self.api.get_json(PRODUCTS_PATH).await?;

        let products = records
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    async fn create_product(&self, product: ProductDraft) -> Result<(), ProductsServiceError> {
        let form = product.into_form()?;

        self.api.send_form(PRODUCTS_PATH, form).await?;

        Ok(())
    }

    async fn update_product(
        &self,
        product: ProductId,
        update: ProductDraft,
    ) -> Result<(), ProductsServiceError> {
        // The API only reads multipart bodies on POST.
        let form = update.into_form()?.text("_method", "PUT");

        self.api
            .send_form(&format!("{PRODUCTS_PATH}/{product}"), form)
            .await?;

        Ok(())
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        self.api
            .delete(&format!("{PRODUCTS_PATH}/{product}"))
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: ProductDraft) -> Result<(), ProductsServiceError>;

    /// Updates the product with the given id.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductDraft,
    ) -> Result<(), ProductsServiceError>;

    /// Deletes the product with the given id.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use carta::categories::CategoryId;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, method, path},
    };

    use crate::{api::ApiConfig, domain::uploads::ImageUpload};

    use super::*;

    async fn service() -> TestResult<(MockServer, HttpProductsService)> {
        let server = MockServer::start().await;
        let api = ApiClient::new(ApiConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        })?;

        Ok((server, HttpProductsService::new(api)))
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Ají de Gallina".to_string(),
            description: Some("Con arroz".to_string()),
            price: dec!(24.90),
            category_id: Some(CategoryId::new(2)),
            image: None,
        }
    }

    #[tokio::test]
    async fn list_products_converts_records() -> TestResult {
        let (server, service) = service().await?;

        Mock::given(method("GET"))
            .and(path("/api/producto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id_producto": 1,
                    "nombre": "Lomo Saltado",
                    "precio": "28.50",
                    "id_categoria": 1,
                    "imagen_url": "uploads/lomo.jpg",
                    "estado": 1
                }
            ])))
            .mount(&server)
            .await;

        let products = service.list_products().await?;

        assert_eq!(products.len(), 1);
        assert_eq!(products.first().map(|p| p.price), Some(dec!(28.50)));

        Ok(())
    }

    #[tokio::test]
    async fn update_product_spoofs_put_over_post() -> TestResult {
        let (server, service) = service().await?;

        Mock::given(method("POST"))
            .and(path("/api/producto/5"))
            .and(body_string_contains("_method"))
            .and(body_string_contains("Ají de Gallina"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        service.update_product(ProductId::new(5), draft()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_product_attaches_image() -> TestResult {
        let (server, service) = service().await?;

        Mock::given(method("POST"))
            .and(path("/api/producto"))
            .and(body_string_contains("filename=\"aji.jpg\""))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mut product = draft();
        product.image = Some(ImageUpload {
            file_name: "aji.jpg".to_string(),
            bytes: b"jpeg".to_vec(),
        });

        service.create_product(product).await?;

        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected() -> TestResult {
        let (_server, service) = service().await?;

        let mut product = draft();
        product.name = "  ".to_string();

        let result = service.create_product(product).await;

        assert!(matches!(
            result,
            Err(ProductsServiceError::MissingRequiredData("name"))
        ));

        Ok(())
    }
}
