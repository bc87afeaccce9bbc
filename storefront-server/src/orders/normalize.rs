//! Checkout Normalizer
//!
//! 把前端结账提交归一化为规范的地址记录和定价行项目。字段别名
//! (`cart`/`items`, `name`/`product_name`, `total`/`total_amount`) 和缺省值
//! 都在这里消化掉：缺数字给默认值，缺字符串给空串 — 宽容处理，
//! 不做强校验。唯一的校验失败是空购物车。
//!
//! 订单总额始终由服务端按 Σ(单价 × 数量) 重算，提交里的 total
//! 只接收不使用，防止客户端篡改。

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::Deserialize;
use thiserror::Error;

use crate::db::models::{NewOrderItem, ShippingAddress};

/// 无身份下单时使用的占位邮箱
pub const GUEST_EMAIL: &str = "guest";

/// Raw checkout submission, exactly as the storefront posts it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutPayload {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
    /// Street line (the client calls it `address`)
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    /// Older clients post `cart`, newer ones `items`; `cart` wins
    pub cart: Option<Vec<RawCartItem>>,
    pub items: Option<Vec<RawCartItem>>,
    /// Accepted for wire compatibility, ignored: the total is recomputed
    pub total: Option<f64>,
    /// Accepted for wire compatibility, ignored: the total is recomputed
    pub total_amount: Option<f64>,
    #[serde(rename = "paymentId")]
    pub payment_id: Option<String>,
}

/// One raw cart line
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCartItem {
    pub name: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Canonical checkout, ready for persistence
#[derive(Debug, Clone)]
pub struct NormalizedCheckout {
    pub email: String,
    pub address: ShippingAddress,
    pub items: Vec<NewOrderItem>,
    /// Server-recomputed Σ(price × quantity)
    pub total: f64,
    pub payment_id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
}

/// Normalize a raw submission into a canonical checkout
pub fn normalize(payload: CheckoutPayload) -> Result<NormalizedCheckout, CheckoutError> {
    let raw_items = payload
        .cart
        .or(payload.items)
        .unwrap_or_default();
    if raw_items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let email = payload
        .email
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| GUEST_EMAIL.to_string());

    let address = ShippingAddress {
        name: payload
            .user_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Guest".to_string()),
        phone: payload.phone.unwrap_or_default(),
        street: payload.address.unwrap_or_default(),
        city: payload.city.unwrap_or_default(),
        state: payload.state.unwrap_or_default(),
        pincode: payload.pincode.unwrap_or_default(),
    };

    let items: Vec<NewOrderItem> = raw_items.into_iter().map(normalize_item).collect();

    let total = items
        .iter()
        .map(|item| {
            Decimal::from_f64(item.price).unwrap_or_default() * Decimal::from(item.quantity)
        })
        .sum::<Decimal>()
        .to_f64()
        .unwrap_or(0.0);

    let payment_id = payload
        .payment_id
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "COD".to_string());

    Ok(NormalizedCheckout {
        email,
        address,
        items,
        total,
        payment_id,
    })
}

fn normalize_item(raw: RawCartItem) -> NewOrderItem {
    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .or(raw.product_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Item".to_string());

    // "{color}/{size}" — either side may be empty
    let variant_info = format!(
        "{}/{}",
        raw.color.unwrap_or_default(),
        raw.size.unwrap_or_default()
    );

    NewOrderItem {
        product_name: name,
        variant_info,
        quantity: raw.quantity.filter(|q| *q > 0).unwrap_or(1),
        price: raw.price.unwrap_or(0.0),
    }
}
