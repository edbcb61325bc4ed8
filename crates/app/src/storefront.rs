//! Storefront
//!
//! The customer's browsing session: the catalog as last loaded from the API plus the cart.

use std::{fmt, num::NonZeroU32};

use carta::{
    cart::{Cart, CartError},
    categories::Category,
    coupons::{Coupon, CouponBook},
    discounts::promotional_price,
    order::{CustomerInfo, OrderError, OrderSummary, build_order_summary},
    products::{MenuFilter, Product, ProductId, filter_menu},
};
use jiff::{Zoned, civil::Date};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{context::AppContext, domain::company::Company, messaging::WhatsAppLink};

/// Errors raised by storefront actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// The product is not in the loaded catalog or has been withdrawn from the menu.
    #[error("product {0} is not on the menu")]
    UnknownProduct(ProductId),

    /// A cart mutation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order could not be built.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// A catalog resource fetched from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Categories,
    Coupons,
    Company,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Products => "products",
            Resource::Categories => "categories",
            Resource::Coupons => "coupons",
            Resource::Company => "company",
        })
    }
}

/// The last successfully loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub coupons: CouponBook,
    pub company: Option<Company>,
}

impl CatalogSnapshot {
    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

/// A product as shown on the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<'a> {
    pub product: &'a Product,
    pub promotion: Option<&'a Coupon>,
    pub promotional_price: Option<Decimal>,
}

/// One requested line of an order file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRequestLine {
    pub product: u64,

    #[serde(default = "one")]
    pub quantity: NonZeroU32,

    #[serde(default)]
    pub coupon: Option<String>,
}

fn one() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// An order submitted from a file rather than picked on screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderRequest {
    pub customer: CustomerInfo,
    pub lines: Vec<OrderRequestLine>,
}

/// A finished checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub summary: OrderSummary,
    pub link: String,
}

pub struct Storefront {
    context: AppContext,
    link: WhatsAppLink,
    catalog: CatalogSnapshot,
    cart: Cart,
    today: Option<Date>,
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("link", &self.link)
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Start a session with an empty catalog and cart.
    pub fn new(context: AppContext, link: WhatsAppLink) -> Self {
        Self {
            context,
            link,
            catalog: CatalogSnapshot::default(),
            cart: Cart::new(),
            today: None,
        }
    }

    /// Pin the date used for coupon checks instead of reading the system clock.
    #[must_use]
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = Some(today);
        self
    }

    /// Date coupons are checked against.
    pub fn today(&self) -> Date {
        self.today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Reload every catalog resource.
    ///
    /// A resource that fails to load keeps its previous value. Returns the resources that
    /// failed.
    pub async fn refresh(&mut self) -> Vec<Resource> {
        let (products, categories, coupons, company) = tokio::join!(
            self.context.products.list_products(),
            self.context.categories.list_categories(),
            self.context.coupons.list_coupons(),
            self.context.company.get_company(),
        );

        let mut failed = Vec::new();

        match products {
            Ok(products) => self.catalog.products = products,
            Err(error) => {
                warn!(%error, "failed to load products");
                failed.push(Resource::Products);
            }
        }

        match categories {
            Ok(categories) => self.catalog.categories = categories,
            Err(error) => {
                warn!(%error, "failed to load categories");
                failed.push(Resource::Categories);
            }
        }

        match coupons {
            Ok(coupons) => self.catalog.coupons = CouponBook::new(coupons),
            Err(error) => {
                warn!(%error, "failed to load coupons");
                failed.push(Resource::Coupons);
            }
        }

        match company {
            Ok(company) => self.catalog.company = Some(company),
            Err(error) => {
                warn!(%error, "failed to load company profile");
                failed.push(Resource::Company);
            }
        }

        info!(
            products = self.catalog.products.len(),
            categories = self.catalog.categories.len(),
            coupons = self.catalog.coupons.len(),
            "catalog refreshed"
        );

        failed
    }

    /// Loaded catalog
    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    /// Current cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Published products passing the filter, with their advertised promotion.
    pub fn menu(&self, filter: MenuFilter<'_>) -> Vec<MenuEntry<'_>> {
        let today = self.today();

        filter_menu(&self.catalog.products, filter)
            .filter(|product| product.active)
            .map(|product| {
                let promotion = self.catalog.coupons.promotion_for(product, today);

                MenuEntry {
                    product,
                    promotion,
                    promotional_price: promotion.map(|coupon| promotional_price(product, coupon)),
                }
            })
            .collect()
    }

    /// Add `quantity` units of a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::UnknownProduct`]: the product is not in the loaded catalog or is
    ///   not published.
    pub fn add_to_cart(
        &mut self,
        product: ProductId,
        quantity: NonZeroU32,
    ) -> Result<u32, StorefrontError> {
        let product = self
            .catalog
            .product(product)
            .filter(|product| product.active)
            .ok_or(StorefrontError::UnknownProduct(product))?;

        Ok(self.cart.add_items(product, quantity))
    }

    /// Add one unit to a cart line.
    pub fn increment(&mut self, product: ProductId) -> Option<u32> {
        self.cart.increment(product)
    }

    /// Take one unit off a cart line, never below one.
    pub fn decrement(&mut self, product: ProductId) -> Option<u32> {
        self.cart.decrement(product)
    }

    /// Remove a cart line.
    pub fn remove_from_cart(&mut self, product: ProductId) -> bool {
        self.cart.remove_item(product).is_some()
    }

    /// Apply a coupon code to a cart line using today's date.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Cart`]: the coupon is unknown, inactive, out of date, out of
    ///   scope, or the product is not in the cart.
    pub fn apply_coupon(&mut self, code: &str, product: ProductId) -> Result<Decimal, StorefrontError> {
        let today = self.today();

        Ok(self
            .cart
            .apply_coupon(code, product, &self.catalog.coupons, today)?)
    }

    /// Fill the cart from an order request.
    ///
    /// Lines for unknown products and coupons that cannot be applied are skipped and
    /// returned; the rest of the request still goes through.
    pub fn load_order(&mut self, request: &OrderRequest) -> Vec<StorefrontError> {
        let mut rejected = Vec::new();

        for line in &request.lines {
            let product = ProductId::new(line.product);

            if let Err(error) = self.add_to_cart(product, line.quantity) {
                warn!(%error, "skipping order line");
                rejected.push(error);
                continue;
            }

            let Some(code) = line.coupon.as_deref() else {
                continue;
            };

            if let Err(error) = self.apply_coupon(code, product) {
                warn!(%error, "coupon not applied");
                rejected.push(error);
            }
        }

        rejected
    }

    /// Build the order message and the link that sends it.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Order`]: the customer details are incomplete or the cart is empty.
    pub fn checkout(&self, customer: &CustomerInfo) -> Result<Checkout, StorefrontError> {
        let summary = build_order_summary(&self.cart, customer)?;
        let link = self.link.for_message(&summary.to_string());

        info!(lines = self.cart.len(), "order ready");

        Ok(Checkout { summary, link })
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use carta::coupons::{CouponError, CouponKind};
    use jiff::civil::date;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use crate::{
        api::ApiError,
        domain::{
            categories::{CategoriesServiceError, MockCategoriesService},
            company::{CompanyServiceError, MockCompanyService},
            coupons::{CouponsServiceError, MockCouponsService},
            products::{MockProductsService, ProductsServiceError},
        },
    };

    use super::*;

    fn today() -> Date {
        date(2025, 9, 20)
    }

    fn menu_products() -> Vec<Product> {
        vec![
            Product::new(1, "Lomo Saltado", dec!(28.50), 1),
            Product::new(2, "Chicha Morada", dec!(6.00), 2),
            Product {
                active: false,
                ..Product::new(3, "Arroz Chaufa", dec!(22.00), 1)
            },
        ]
    }

    fn session_coupons() -> Vec<Coupon> {
        vec![
            Coupon::new(
                "BEBIDAS20",
                CouponKind::Percentage,
                dec!(20),
                date(2025, 9, 1),
                date(2025, 9, 30),
            )
            .for_category(carta::categories::CategoryId::new(2)),
            Coupon::new(
                "X10",
                CouponKind::Percentage,
                dec!(10),
                date(2025, 9, 19),
                date(2025, 9, 21),
            ),
        ]
    }

    fn unavailable() -> ApiError {
        ApiError::UnexpectedResponse {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: String::new(),
        }
    }

    fn context(fail: bool) -> AppContext {
        let mut products = MockProductsService::new();
        let mut categories = MockCategoriesService::new();
        let mut coupons = MockCouponsService::new();
        let mut company = MockCompanyService::new();

        if fail {
            products
                .expect_list_products()
                .returning(|| Err(ProductsServiceError::Api(unavailable())));
            categories
                .expect_list_categories()
                .returning(|| Err(CategoriesServiceError::Api(unavailable())));
            coupons
                .expect_list_coupons()
                .returning(|| Err(CouponsServiceError::Api(unavailable())));
            company
                .expect_get_company()
                .returning(|| Err(CompanyServiceError::NotFound));
        } else {
            products.expect_list_products().returning(|| Ok(menu_products()));
            categories.expect_list_categories().returning(|| {
                Ok(vec![
                    Category::new(1, "Fondos"),
                    Category::new(2, "Bebidas"),
                ])
            });
            coupons.expect_list_coupons().returning(|| Ok(session_coupons()));
            company.expect_get_company().returning(|| {
                Ok(Company {
                    name: "Ricotón".to_string(),
                    ..Company::default()
                })
            });
        }

        AppContext {
            products: Arc::new(products),
            categories: Arc::new(categories),
            coupons: Arc::new(coupons),
            company: Arc::new(company),
        }
    }

    async fn loaded() -> Storefront {
        let mut storefront =
            Storefront::new(context(false), WhatsAppLink::new("51934629203")).with_today(today());

        storefront.refresh().await;

        storefront
    }

    #[tokio::test]
    async fn refresh_loads_every_resource() {
        let storefront = loaded().await;

        assert_eq!(storefront.catalog().products.len(), 3);
        assert_eq!(storefront.catalog().categories.len(), 2);
        assert_eq!(storefront.catalog().coupons.len(), 2);
        assert_eq!(
            storefront.catalog().company.as_ref().map(|c| c.name.as_str()),
            Some("Ricotón")
        );
    }

    #[tokio::test]
    async fn failed_refresh_starts_empty() {
        let mut storefront =
            Storefront::new(context(true), WhatsAppLink::new("51934629203")).with_today(today());

        let failed = storefront.refresh().await;

        assert_eq!(
            failed,
            [
                Resource::Products,
                Resource::Categories,
                Resource::Coupons,
                Resource::Company
            ]
        );
        assert!(storefront.catalog().products.is_empty());
        assert!(storefront.catalog().coupons.is_empty());
        assert!(storefront.catalog().company.is_none());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_catalog() {
        let mut storefront = loaded().await;

        storefront.context = context(true);

        let failed = storefront.refresh().await;

        assert_eq!(failed.len(), 4);
        assert_eq!(storefront.catalog().products.len(), 3);
        assert_eq!(storefront.catalog().coupons.len(), 2);
    }

    #[tokio::test]
    async fn menu_hides_unpublished_and_advertises_scoped_coupons() {
        let storefront = loaded().await;

        let menu = storefront.menu(MenuFilter::All);

        let names: Vec<_> = menu.iter().map(|entry| entry.product.name.as_str()).collect();
        assert_eq!(names, ["Lomo Saltado", "Chicha Morada"]);

        let lomo = menu.first();
        assert!(lomo.and_then(|entry| entry.promotion).is_none());

        let chicha = menu.get(1);
        assert_eq!(
            chicha.and_then(|entry| entry.promotion).map(|c| c.code.as_str()),
            Some("BEBIDAS20")
        );
        assert_eq!(
            chicha.and_then(|entry| entry.promotional_price),
            Some(dec!(4.80))
        );
    }

    #[tokio::test]
    async fn cart_actions_use_catalog_and_today() -> TestResult {
        let mut storefront = loaded().await;
        let lomo = ProductId::new(1);

        storefront.add_to_cart(lomo, NonZeroU32::MIN)?;
        assert_eq!(storefront.increment(lomo), Some(2));
        assert_eq!(storefront.decrement(lomo), Some(1));

        assert_eq!(storefront.apply_coupon("X10", lomo)?, dec!(2.850));
        assert_eq!(storefront.cart().subtotal(), dec!(25.650));

        assert_eq!(
            storefront.add_to_cart(ProductId::new(99), NonZeroU32::MIN),
            Err(StorefrontError::UnknownProduct(ProductId::new(99)))
        );

        assert!(storefront.remove_from_cart(lomo));
        assert!(storefront.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn load_order_skips_rejected_lines() -> TestResult {
        let mut storefront = loaded().await;

        let request: OrderRequest = serde_norway::from_str(
            r"
customer:
  nombre: Ana
  telefono: '987654321'
lines:
  - product: 1
    quantity: 2
    coupon: NOEXISTE
  - product: 2
    coupon: BEBIDAS20
  - product: 42
",
        )?;

        let rejected = storefront.load_order(&request);

        assert_eq!(
            rejected,
            [
                StorefrontError::Cart(CartError::Coupon(CouponError::InvalidOrInactive(
                    "NOEXISTE".to_string()
                ))),
                StorefrontError::UnknownProduct(ProductId::new(42)),
            ]
        );
        assert_eq!(storefront.cart().len(), 2);
        assert_eq!(storefront.cart().subtotal(), dec!(61.80));

        Ok(())
    }

    #[tokio::test]
    async fn withdrawn_products_cannot_be_ordered() -> TestResult {
        let mut storefront = loaded().await;

        let result = storefront.add_to_cart(ProductId::new(3), NonZeroU32::MIN);

        assert_eq!(result, Err(StorefrontError::UnknownProduct(ProductId::new(3))));
        assert!(storefront.cart().is_empty());

        let request: OrderRequest = serde_norway::from_str(
            r"
customer:
  nombre: Ana
  telefono: '987654321'
lines:
  - product: 3
  - product: 2
",
        )?;

        let rejected = storefront.load_order(&request);

        assert_eq!(rejected, [StorefrontError::UnknownProduct(ProductId::new(3))]);
        assert_eq!(storefront.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_builds_link() -> TestResult {
        let mut storefront = loaded().await;

        storefront.add_to_cart(ProductId::new(2), NonZeroU32::MIN)?;

        let checkout = storefront.checkout(&CustomerInfo::new("Ana", "987654321"))?;

        assert!(checkout.link.starts_with("https://wa.me/51934629203?text=*Nuevo%20Pedido*%0A%0A"));
        assert!(checkout.link.ends_with("Total%3A%20S%2F.%206.00"));
        assert_eq!(format!("{}", checkout.summary).lines().count(), 11);

        Ok(())
    }

    #[tokio::test]
    async fn checkout_requires_customer_details() {
        let storefront = loaded().await;

        let result = storefront.checkout(&CustomerInfo::default());

        assert_eq!(
            result.err(),
            Some(StorefrontError::Order(OrderError::MissingField("name")))
        );
    }
}
