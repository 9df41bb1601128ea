//! Shared domain logic for the Vendor & Inventory Management Platform
//!
//! This crate holds the pure inventory core: stock status policy,
//! document-number formatting, and the line-item reconciler. It has no
//! database or HTTP dependencies so the diff and status rules can be
//! exercised directly in tests.

pub mod reconcile;
pub mod sequence;
pub mod stock;
pub mod validation;

pub use reconcile::*;
pub use sequence::*;
pub use stock::*;
pub use validation::*;
