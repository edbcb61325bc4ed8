//! Cart
//!
//! The in-memory cart for one browsing session. Lines are unique by product and kept in the
//! order they were added.

use std::num::NonZeroU32;

use jiff::civil::Date;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    categories::CategoryId,
    coupons::{Coupon, CouponBook, CouponError},
    discounts::{Discountable, resolve_discount},
    products::{Product, ProductId},
};

/// Errors raised by cart mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),

    /// The coupon could not be applied.
    #[error(transparent)]
    Coupon(#[from] CouponError),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    product_id: ProductId,
    category_id: CategoryId,
    name: String,
    unit_price: Decimal,
    quantity: NonZeroU32,
    image_url: String,
    discount: Decimal,
    coupon: Option<Coupon>,
}

impl CartLine {
    fn new(product: &Product, quantity: NonZeroU32) -> Self {
        Self {
            product_id: product.id,
            category_id: product.category_id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image_url: product.image_url.clone(),
            discount: Decimal::ZERO,
            coupon: None,
        }
    }

    /// Id of the product on this line
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Category of the product on this line
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    /// Product name at the time it was added
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of one unit
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Number of units, always at least one
    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Image path, relative to the API host
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Coupon applied to this line, if any
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Price of all units before any discount.
    pub fn gross(&self) -> Decimal {
        self.unit_price
            .saturating_mul(Decimal::from(self.quantity.get()))
    }

    /// Discount taken off this line, clamped to `[0, gross]`.
    pub fn discount_amount(&self) -> Decimal {
        self.discount.clamp(Decimal::ZERO, self.gross().max(Decimal::ZERO))
    }

    /// Amount payable for this line.
    pub fn total(&self) -> Decimal {
        self.gross().saturating_sub(self.discount_amount())
    }
}

impl Discountable for CartLine {
    fn product_id(&self) -> ProductId {
        self.product_id
    }

    fn category_id(&self) -> CategoryId {
        self.category_id
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of the product.
    ///
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, product: &Product) -> u32 {
        self.add_items(product, NonZeroU32::MIN)
    }

    /// Add `quantity` units of the product, merging into its existing line if there is one.
    ///
    /// Returns the line's new quantity.
    pub fn add_items(&mut self, product: &Product, quantity: NonZeroU32) -> u32 {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity.get());

            return line.quantity.get();
        }

        self.lines.push(CartLine::new(product, quantity));

        quantity.get()
    }

    /// Add one unit to an existing line.
    ///
    /// Returns the new quantity, or `None` if the product is not in the cart.
    pub fn increment(&mut self, product_id: ProductId) -> Option<u32> {
        let line = self.line_mut(product_id)?;

        line.quantity = line.quantity.saturating_add(1);

        Some(line.quantity.get())
    }

    /// Take one unit off an existing line, never going below one.
    ///
    /// Returns the new quantity, or `None` if the product is not in the cart.
    pub fn decrement(&mut self, product_id: ProductId) -> Option<u32> {
        let line = self.line_mut(product_id)?;

        if let Some(quantity) = NonZeroU32::new(line.quantity.get() - 1) {
            line.quantity = quantity;
        }

        Some(line.quantity.get())
    }

    /// Remove a line, returning it if it was present.
    pub fn remove_item(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)?;

        Some(self.lines.remove(index))
    }

    /// Apply a coupon code to the line holding `product_id`.
    ///
    /// Replaces any coupon already on the line. Returns the discount now taken off the line.
    ///
    /// # Errors
    ///
    /// - [`CouponError::InvalidOrInactive`]: unknown code or switched-off coupon.
    /// - [`CouponError::OutsideValidity`]: `today` is outside the coupon's window.
    /// - [`CouponError::ScopeMismatch`]: the coupon is restricted to another product or
    ///   category.
    /// - [`CartError::LineNotFound`]: the product is not in the cart.
    pub fn apply_coupon(
        &mut self,
        code: &str,
        product_id: ProductId,
        coupons: &CouponBook,
        today: Date,
    ) -> Result<Decimal, CartError> {
        let coupon = coupons.lookup(code)?;

        let line = self
            .line_mut(product_id)
            .ok_or(CartError::LineNotFound(product_id))?;

        let amount = resolve_discount(coupon, line, today)?;

        line.discount = amount;
        line.coupon = Some(coupon.clone());

        Ok(line.discount_amount())
    }

    /// Sum of line totals at full precision.
    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| acc.saturating_add(line.total()))
    }

    /// Sum of line discounts at full precision.
    pub fn total_discount(&self) -> Decimal {
        self.lines
            .iter()
            .fold(Decimal::ZERO, |acc, line| {
                acc.saturating_add(line.discount_amount())
            })
    }

    /// Get the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }
}
