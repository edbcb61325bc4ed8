//! Product models.

use carta::categories::CategoryId;
use reqwest::multipart::Form;
use rust_decimal::Decimal;

use crate::domain::{products::errors::ProductsServiceError, uploads::ImageUpload};

/// Fields submitted when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Option<CategoryId>,
    pub image: Option<ImageUpload>,
}

impl ProductDraft {
    /// Check the draft and build the multipart form the API expects.
    ///
    /// New and updated products are always published.
    pub(crate) fn into_form(self) -> Result<Form, ProductsServiceError> {
        if self.name.trim().is_empty() {
            return Err(ProductsServiceError::MissingRequiredData("name"));
        }

        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(ProductsServiceError::InvalidPrice);
        }

        let mut form = Form::new()
            .text("nombre", self.name.trim().to_string())
            .text("descripcion", self.description.unwrap_or_default())
            .text("precio", self.price.to_string())
            .text("estado", "1");

        if let Some(category) = self.category_id {
            form = form.text("id_categoria", category.to_string());
        }

        if let Some(image) = self.image {
            form = form.part("imagen", image.into_part());
        }

        Ok(form)
    }
}
