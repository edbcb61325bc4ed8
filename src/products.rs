//! Products

use rust_decimal::Decimal;

use crate::{categories::CategoryId, ids::TypedId};

/// Product Id
pub type ProductId = TypedId<Product>;

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Optional long description
    pub description: Option<String>,

    /// Unit price
    pub price: Decimal,

    /// Category the product is listed under
    pub category_id: CategoryId,

    /// Image path, relative to the API host
    pub image_url: String,

    /// Whether the product is published
    pub active: bool,
}

impl Product {
    /// Create an active product with no description or image.
    pub fn new(id: u64, name: impl Into<String>, price: Decimal, category_id: u64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            description: None,
            price,
            category_id: CategoryId::new(category_id),
            image_url: String::new(),
            active: true,
        }
    }
}

/// Which products the menu shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFilter<'a> {
    /// Every product.
    #[default]
    All,

    /// Products listed under one category.
    Category(CategoryId),

    /// Products whose name contains the term, ignoring case.
    Search(&'a str),
}

impl<'a> MenuFilter<'a> {
    /// Build a filter from the optional category selection and search box.
    ///
    /// A non-blank search term wins over the selected category.
    pub fn new(category: Option<CategoryId>, search: Option<&'a str>) -> Self {
        match (search.map(str::trim).filter(|term| !term.is_empty()), category) {
            (Some(term), _) => MenuFilter::Search(term),
            (None, Some(category)) => MenuFilter::Category(category),
            (None, None) => MenuFilter::All,
        }
    }

    /// Check whether the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            MenuFilter::All => true,
            MenuFilter::Category(category) => product.category_id == *category,
            MenuFilter::Search(term) => contains_ignore_case(&product.name, term),
        }
    }
}

/// Products visible under the given filter, in their original order.
pub fn filter_menu<'p>(
    products: &'p [Product],
    filter: MenuFilter<'_>,
) -> impl Iterator<Item = &'p Product> {
    products.iter().filter(move |product| filter.matches(product))
}

/// Case-insensitive substring match used by menu and admin searches.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
