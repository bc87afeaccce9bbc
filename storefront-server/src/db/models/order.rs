//! Order Models
//!
//! 订单主表 + 订单行。订单行是下单时刻的快照 (商品名、变体、单价)，
//! 与在售目录解耦，目录变更不影响历史订单。

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order status — closed set, stored as TEXT
///
/// `Pending` (initial) → `Confirmed` | `Rejected`. No transition-legality
/// machine is enforced beyond membership in this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized shipping address, JSON-encoded into the `orders.address` column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl ShippingAddress {
    /// 导出镜像里的单行地址: "street, city, state - pincode"
    pub fn flat_line(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.street, self.city, self.state, self.pincode
        )
    }
}

/// Order header row
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_email: String,
    pub total_amount: f64,
    pub status: OrderStatus,
    /// JSON-encoded [`ShippingAddress`]
    pub address: String,
    pub payment_id: String,
    pub created_at: String,
}

/// Order line row — snapshot at purchase time
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_name: String,
    /// `"{color}/{size}"`, either side may be empty
    pub variant_info: String,
    pub quantity: i64,
    pub price: f64,
}

/// Create DTO for the order header
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_email: String,
    pub total_amount: f64,
    /// JSON-encoded [`ShippingAddress`]
    pub address: String,
    pub payment_id: String,
}

/// Create DTO for one order line
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_name: String,
    pub variant_info: String,
    pub quantity: i64,
    pub price: f64,
}

/// Order joined with its items and display-only fields for the admin console
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    /// Profile name from the users table, when the email still resolves
    pub user_name: Option<String>,
    /// Checkout-address phone first, profile phone second, else "N/A"
    pub final_phone: String,
    pub items: Vec<OrderItem>,
}
