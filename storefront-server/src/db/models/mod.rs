//! Database Models
//!
//! Plain row structs plus the API-facing projections built from them.

pub mod order;
pub mod product;
pub mod user;

pub use order::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderWithItems, ShippingAddress,
};
pub use product::{Product, ProductDetail, ProductSummary, Variant, VariantRow};
pub use user::User;
