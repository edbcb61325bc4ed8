//! Category models.

use reqwest::multipart::Form;

use crate::domain::{categories::errors::CategoriesServiceError, uploads::ImageUpload};

/// Fields submitted when creating or updating a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

impl CategoryDraft {
    pub(crate) fn into_form(self) -> Result<Form, CategoriesServiceError> {
        if self.name.trim().is_empty() {
            return Err(CategoriesServiceError::MissingRequiredData("name"));
        }

        let mut form = Form::new()
            .text("nombre", self.name.trim().to_string())
            .text("descripcion", self.description.unwrap_or_default())
            .text("estado", "1");

        if let Some(image) = self.image {
            form = form.part("imagen", image.into_part());
        }

        Ok(form)
    }
}
