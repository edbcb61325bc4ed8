//! REST API access.

mod client;
pub mod records;

pub use client::*;
pub use records::RecordError;
