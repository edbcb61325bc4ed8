//! Storefront application: REST API access, catalog services, the customer session and admin
//! maintenance.

pub mod admin;
pub mod api;
pub mod config;
pub mod context;
pub mod domain;
pub mod messaging;
pub mod observability;
pub mod storefront;
