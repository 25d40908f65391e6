//! Data model
//!
//! Documents mirror the collections written by the customer-facing app, so
//! field names stay camelCase on the wire.

pub mod category;
pub mod menu_item;
pub mod order;
pub mod user;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderLine, OrderStatus};
pub use user::User;
