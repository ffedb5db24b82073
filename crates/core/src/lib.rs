//! Core domain logic for the hearth listings service.
//!
//! This crate has no internal dependencies and no I/O: browse parameter
//! normalization, price bucket parsing, and the image codec are all pure
//! transforms so they can be used by the API layer, the repository layer,
//! and any future CLI tooling alike.

pub mod browse;
pub mod error;
pub mod imaging;
pub mod pricing;
pub mod types;
