//! Discounts
//!
//! Resolves how much a coupon takes off a product's unit price. Amounts are kept at full
//! decimal precision; rounding happens only when a value is displayed.

use jiff::civil::Date;
use rust_decimal::Decimal;

use crate::{
    categories::CategoryId,
    coupons::{Coupon, CouponError, CouponKind},
    products::{Product, ProductId},
};

/// Something a coupon can be applied to.
pub trait Discountable {
    /// Id of the product being discounted.
    fn product_id(&self) -> ProductId;

    /// Category of the product being discounted.
    fn category_id(&self) -> CategoryId;

    /// Price of a single unit.
    fn unit_price(&self) -> Decimal;
}

impl Discountable for Product {
    fn product_id(&self) -> ProductId {
        self.id
    }

    fn category_id(&self) -> CategoryId {
        self.category_id
    }

    fn unit_price(&self) -> Decimal {
        self.price
    }
}

/// The raw amount a coupon takes off the given unit price.
///
/// Percentage coupons take `unit_price × value / 100`; fixed-amount coupons take `value` as
/// is, even when it exceeds the price. Callers clamp against the line total.
pub fn discount_amount(coupon: &Coupon, unit_price: Decimal) -> Decimal {
    match coupon.kind {
        CouponKind::Percentage => unit_price.saturating_mul(coupon.value) / Decimal::ONE_HUNDRED,
        CouponKind::FixedAmount => coupon.value,
    }
}

/// Check eligibility, then resolve the discount for one unit of the target.
///
/// # Errors
///
/// Returns a [`CouponError`] when the coupon is inactive, outside its validity window, or
/// restricted to another product or category.
pub fn resolve_discount<T>(coupon: &Coupon, target: &T, today: Date) -> Result<Decimal, CouponError>
where
    T: Discountable + ?Sized,
{
    coupon.check_eligibility(target, today)?;

    Ok(discount_amount(coupon, target.unit_price()))
}

/// The price shown on a product card once its advertised coupon is taken off.
///
/// Never drops below zero.
pub fn promotional_price(product: &Product, coupon: &Coupon) -> Decimal {
    product
        .price
        .saturating_sub(discount_amount(coupon, product.price))
        .max(Decimal::ZERO)
}
