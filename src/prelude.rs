//! Carta prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    categories::{Category, CategoryId, CategoryRef, find_category},
    coupons::{
        Coupon, CouponBook, CouponDefinitionError, CouponError, CouponId, CouponKind, CouponScope,
    },
    discounts::{Discountable, discount_amount, promotional_price, resolve_discount},
    ids::TypedId,
    order::{
        CustomerInfo, Fulfilment, OrderError, OrderLine, OrderSummary, PaymentMethod,
        build_order_summary,
    },
    pricing::{PricingError, Soles, display_price, format_amount, round_amount, to_soles},
    products::{MenuFilter, Product, ProductId, contains_ignore_case, filter_menu},
};
