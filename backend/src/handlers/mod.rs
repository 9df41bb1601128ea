//! HTTP request handlers

pub mod auth;
pub mod bills;
pub mod customers;
pub mod items;
pub mod purchase_orders;
pub mod vendors;

pub use auth::*;
pub use bills::*;
pub use customers::*;
pub use items::*;
pub use purchase_orders::*;
pub use vendors::*;
