//! Admin
//!
//! Dashboard figures, listings and catalog maintenance for the restaurant staff.

use carta::{
    categories::{Category, CategoryId},
    coupons::{Coupon, CouponId, CouponKind},
    pricing::{PricingError, display_price},
    products::{Product, ProductId, contains_ignore_case},
};
use jiff::civil::Date;
use thiserror::Error;
use tracing::info;

use crate::{
    context::AppContext,
    domain::{
        categories::{CategoriesServiceError, models::CategoryDraft},
        coupons::CouponsServiceError,
        products::{ProductsServiceError, models::ProductDraft},
    },
};

/// Shown where a coupon has no scope, or its scope cannot be resolved.
pub const NO_SCOPE: &str = "—";

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    #[error(transparent)]
    Categories(#[from] CategoriesServiceError),

    #[error(transparent)]
    Coupons(#[from] CouponsServiceError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub products: usize,
    pub categories: usize,
    pub coupons: usize,
    pub active_categories: usize,
}

/// Compute dashboard counts.
pub fn dashboard_stats(
    products: &[Product],
    categories: &[Category],
    coupons: &[Coupon],
) -> DashboardStats {
    DashboardStats {
        products: products.len(),
        categories: categories.len(),
        coupons: coupons.len(),
        active_categories: categories.iter().filter(|category| category.active).count(),
    }
}

/// A coupon joined with the names of what it is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponRow {
    pub id: Option<CouponId>,
    pub code: String,
    pub kind: String,
    pub value: String,
    pub product: String,
    pub category: String,
    pub starts_on: Date,
    pub ends_on: Date,
    pub active: bool,
    pub usage: String,
}

/// Build the coupon listing.
///
/// # Errors
///
/// Returns an error when a fixed amount is too large to display.
pub fn coupon_rows(
    coupons: &[Coupon],
    products: &[Product],
    categories: &[Category],
) -> Result<Vec<CouponRow>, PricingError> {
    coupons
        .iter()
        .map(|coupon| {
            let product = coupon
                .product_id
                .and_then(|id| products.iter().find(|product| product.id == id))
                .map_or(NO_SCOPE, |product| product.name.as_str());

            let category = coupon
                .category_id
                .and_then(|id| categories.iter().find(|category| category.id == id))
                .map_or(NO_SCOPE, |category| category.name.as_str());

            let value = match coupon.kind {
                CouponKind::Percentage => format!("{}%", coupon.value.normalize()),
                CouponKind::FixedAmount => display_price(coupon.value)?,
            };

            Ok(CouponRow {
                id: coupon.id,
                code: coupon.code.clone(),
                kind: coupon.kind.to_string(),
                value,
                product: product.to_string(),
                category: category.to_string(),
                starts_on: coupon.starts_on,
                ends_on: coupon.ends_on,
                active: coupon.active,
                usage: coupon.usage().unwrap_or_else(|| NO_SCOPE.to_string()),
            })
        })
        .collect()
}

/// Categories whose name contains the term.
pub fn search_categories<'c>(categories: &'c [Category], term: &str) -> Vec<&'c Category> {
    categories
        .iter()
        .filter(|category| contains_ignore_case(&category.name, term))
        .collect()
}

/// Products whose name contains the term, optionally limited to one category.
pub fn search_products<'p>(
    products: &'p [Product],
    term: &str,
    category: Option<CategoryId>,
) -> Vec<&'p Product> {
    products
        .iter()
        .filter(|product| category.is_none_or(|category| product.category_id == category))
        .filter(|product| contains_ignore_case(&product.name, term))
        .collect()
}

/// Coupons whose code contains the term.
pub fn search_coupons<'c>(coupons: &'c [Coupon], term: &str) -> Vec<&'c Coupon> {
    coupons
        .iter()
        .filter(|coupon| contains_ignore_case(&coupon.code, term))
        .collect()
}

/// Catalog maintenance backed by the API services.
#[derive(Clone)]
pub struct Admin {
    context: AppContext,
}

impl Admin {
    pub fn new(context: AppContext) -> Self {
        Self { context }
    }

    /// Fetch everything and count it.
    ///
    /// # Errors
    ///
    /// Returns the first service failure.
    pub async fn stats(&self) -> Result<DashboardStats, AdminError> {
        let (products, categories, coupons) = self.load().await?;

        Ok(dashboard_stats(&products, &categories, &coupons))
    }

    /// Fetch the coupon listing, optionally filtered by code.
    ///
    /// # Errors
    ///
    /// Returns the first service failure.
    pub async fn coupon_rows(&self, search: Option<&str>) -> Result<Vec<CouponRow>, AdminError> {
        let (products, categories, coupons) = self.load().await?;

        let coupons: Vec<Coupon> = match search {
            Some(term) => search_coupons(&coupons, term).into_iter().cloned().collect(),
            None => coupons,
        };

        Ok(coupon_rows(&coupons, &products, &categories)?)
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error when the coupon is invalid or the API rejects it.
    pub async fn create_coupon(&self, coupon: Coupon) -> Result<(), AdminError> {
        let code = coupon.code.clone();

        self.context.coupons.create_coupon(coupon).await?;

        info!(%code, "coupon created");

        Ok(())
    }

    /// Replace a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error when the coupon is invalid, missing, or the API rejects it.
    pub async fn update_coupon(&self, id: CouponId, coupon: Coupon) -> Result<(), AdminError> {
        self.context.coupons.update_coupon(id, coupon).await?;

        info!(%id, "coupon updated");

        Ok(())
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error when the coupon is missing or the API rejects the request.
    pub async fn delete_coupon(&self, id: CouponId) -> Result<(), AdminError> {
        self.context.coupons.delete_coupon(id).await?;

        info!(%id, "coupon deleted");

        Ok(())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error when the draft is incomplete or the API rejects it.
    pub async fn create_category(&self, draft: CategoryDraft) -> Result<(), AdminError> {
        self.context.categories.create_category(draft).await?;

        Ok(())
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error when the draft is incomplete, the category is missing, or the API
    /// rejects it.
    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<(), AdminError> {
        self.context.categories.update_category(id, draft).await?;

        Ok(())
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error when the category is missing or the API rejects the request.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), AdminError> {
        self.context.categories.delete_category(id).await?;

        info!(%id, "category deleted");

        Ok(())
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error when the draft is invalid or the API rejects it.
    pub async fn create_product(&self, draft: ProductDraft) -> Result<(), AdminError> {
        self.context.products.create_product(draft).await?;

        Ok(())
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error when the draft is invalid, the product is missing, or the API rejects
    /// it.
    pub async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<(), AdminError> {
        self.context.products.update_product(id, draft).await?;

        Ok(())
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error when the product is missing or the API rejects the request.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), AdminError> {
        self.context.products.delete_product(id).await?;

        info!(%id, "product deleted");

        Ok(())
    }

    async fn load(&self) -> Result<(Vec<Product>, Vec<Category>, Vec<Coupon>), AdminError> {
        let (products, categories, coupons) = tokio::join!(
            self.context.products.list_products(),
            self.context.categories.list_categories(),
            self.context.coupons.list_coupons(),
        );

        Ok((products?, categories?, coupons?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::date;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::domain::{
        categories::MockCategoriesService, company::MockCompanyService,
        coupons::MockCouponsService, products::MockProductsService,
    };

    use super::*;

    fn products() -> Vec<Product> {
        vec![
            Product::new(1, "Lomo Saltado", dec!(28.50), 1),
            Product::new(2, "Chicha Morada", dec!(6.00), 2),
        ]
    }

    fn categories() -> Vec<Category> {
        vec![
            Category::new(1, "Fondos"),
            Category {
                active: false,
                ..Category::new(2, "Bebidas")
            },
        ]
    }

    fn coupons() -> Vec<Coupon> {
        let window = (date(2025, 1, 1), date(2025, 12, 31));

        vec![
            Coupon {
                total_quantity: Some(100),
                used_quantity: Some(12),
                ..Coupon::new("LOMO5", CouponKind::FixedAmount, dec!(5), window.0, window.1)
                    .for_product(ProductId::new(1))
            },
            Coupon::new("BEBIDAS20", CouponKind::Percentage, dec!(20.0), window.0, window.1)
                .for_category(CategoryId::new(2)),
            Coupon::new("FANTASMA", CouponKind::Percentage, dec!(5), window.0, window.1)
                .for_product(ProductId::new(77)),
        ]
    }

    fn context() -> AppContext {
        let mut product_service = MockProductsService::new();
        let mut category_service = MockCategoriesService::new();
        let mut coupon_service = MockCouponsService::new();

        product_service
            .expect_list_products()
            .returning(|| Ok(products()));
        category_service
            .expect_list_categories()
            .returning(|| Ok(categories()));
        coupon_service
            .expect_list_coupons()
            .returning(|| Ok(coupons()));
        coupon_service
            .expect_delete_coupon()
            .with(eq(CouponId::new(3)))
            .times(1)
            .returning(|_| Ok(()));

        AppContext {
            products: Arc::new(product_service),
            categories: Arc::new(category_service),
            coupons: Arc::new(coupon_service),
            company: Arc::new(MockCompanyService::new()),
        }
    }

    #[test]
    fn stats_count_active_categories() {
        let stats = dashboard_stats(&products(), &categories(), &coupons());

        assert_eq!(
            stats,
            DashboardStats {
                products: 2,
                categories: 2,
                coupons: 3,
                active_categories: 1,
            }
        );
    }

    #[test]
    fn coupon_rows_join_names() -> TestResult {
        let rows = coupon_rows(&coupons(), &products(), &categories())?;

        let lomo = rows.first().ok_or("missing row")?;
        assert_eq!(lomo.product, "Lomo Saltado");
        assert_eq!(lomo.category, NO_SCOPE);
        assert_eq!(lomo.value, "S/. 5.00");
        assert_eq!(lomo.usage, "12/100");

        let bebidas = rows.get(1).ok_or("missing row")?;
        assert_eq!(bebidas.product, NO_SCOPE);
        assert_eq!(bebidas.category, "Bebidas");
        assert_eq!(bebidas.value, "20%");
        assert_eq!(bebidas.usage, NO_SCOPE);

        let orphan = rows.get(2).ok_or("missing row")?;
        assert_eq!(orphan.product, NO_SCOPE);

        Ok(())
    }

    #[test]
    fn searches_ignore_case() {
        let products = products();
        let categories = categories();
        let coupons = coupons();

        assert_eq!(search_categories(&categories, "BEB").len(), 1);
        assert_eq!(search_products(&products, "lomo", None).len(), 1);
        assert_eq!(
            search_products(&products, "", Some(CategoryId::new(2)))
                .first()
                .map(|product| product.name.as_str()),
            Some("Chicha Morada")
        );
        assert!(search_products(&products, "lomo", Some(CategoryId::new(2))).is_empty());
        assert_eq!(search_coupons(&coupons, "bebidas").len(), 1);
    }

    #[tokio::test]
    async fn admin_lists_and_filters_coupons() -> TestResult {
        let admin = Admin::new(context());

        let stats = admin.stats().await?;
        assert_eq!(stats.coupons, 3);

        let rows = admin.coupon_rows(Some("lomo")).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.first().map(|row| row.code.as_str()), Some("LOMO5"));

        Ok(())
    }

    #[tokio::test]
    async fn admin_deletes_through_service() -> TestResult {
        let admin = Admin::new(context());

        admin.delete_coupon(CouponId::new(3)).await?;

        Ok(())
    }
}
