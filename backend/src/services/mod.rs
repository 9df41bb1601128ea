//! Business logic services

pub mod auth;
pub mod bills;
pub mod customers;
pub mod documents;
pub mod items;
pub mod purchase_orders;
pub mod sequence;
pub mod stock;
pub mod vendors;

pub use auth::AuthService;
pub use bills::BillService;
pub use customers::CustomerService;
pub use items::ItemService;
pub use purchase_orders::PurchaseOrderService;
pub use vendors::VendorService;
