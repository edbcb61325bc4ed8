//! Categories

use crate::ids::TypedId;

/// Category Id
pub type CategoryId = TypedId<Category>;

/// A menu section such as "Entradas" or "Bebidas".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Optional banner text
    pub description: Option<String>,

    /// Optional image path, relative to the API host
    pub image_url: Option<String>,

    /// Whether the category is published
    pub active: bool,
}

impl Category {
    /// Create an active category with no description or image.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            description: None,
            image_url: None,
            active: true,
        }
    }
}

/// How a category is selected in the storefront header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRef<'a> {
    /// By id.
    Id(CategoryId),

    /// By display name, ignoring case.
    Name(&'a str),
}

/// Find a category by id or by name.
pub fn find_category<'c>(categories: &'c [Category], by: CategoryRef<'_>) -> Option<&'c Category> {
    categories.iter().find(|category| match by {
        CategoryRef::Id(id) => category.id == id,
        CategoryRef::Name(name) => category.name.to_lowercase() == name.trim().to_lowercase(),
    })
}
