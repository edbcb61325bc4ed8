//! Carta
//!
//! Carta is the cart and discount engine behind a restaurant's online menu. It keeps the
//! customer's cart, resolves coupon discounts at exact decimal precision and renders the order
//! message sent to the restaurant. It performs no I/O.

pub mod cart;
pub mod categories;
pub mod coupons;
pub mod discounts;
pub mod ids;
pub mod order;
pub mod prelude;
pub mod pricing;
pub mod products;
