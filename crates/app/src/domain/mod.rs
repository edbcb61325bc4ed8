//! Catalog Domain Concerns

pub mod categories;
pub mod company;
pub mod coupons;
pub mod products;
pub mod uploads;
