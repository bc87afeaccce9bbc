//! 支付网关客户端
//!
//! 在网关侧预创建支付单 (金额转最小货币单位)，返回网关订单号给
//! 前端收银台。密钥未配置时客户端整体关闭。

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Config;

/// Gateway-side payment order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in minor units (paise)
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Serialize)]
struct CreateOrderBody {
    /// Minor units: ₹ × 100
    amount: i64,
    currency: &'static str,
    receipt: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Payment gateway REST client
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl GatewayClient {
    /// Build from config; returns None when the key pair is absent
    pub fn from_config(config: &Config) -> Option<Self> {
        let key_id = config.payment_key_id.clone()?;
        let key_secret = config.payment_key_secret.clone()?;
        Some(Self {
            http: reqwest::Client::new(),
            base_url: config.payment_api_base.trim_end_matches('/').to_string(),
            key_id,
            key_secret,
        })
    }

    /// Create a gateway order for the given rupee amount
    pub async fn create_order(&self, amount_rupees: f64) -> Result<GatewayOrder, GatewayError> {
        let body = CreateOrderBody {
            amount: to_minor_units(amount_rupees),
            currency: "INR",
            receipt: format!("receipt_{}", Utc::now().timestamp_millis()),
        };

        let order = self
            .http
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GatewayOrder>()
            .await?;

        tracing::info!(gateway_order = %order.id, amount = order.amount, "Payment order created");
        Ok(order)
    }
}

/// ₹ → paise, rounded to the nearest unit with decimal arithmetic
fn to_minor_units(amount_rupees: f64) -> i64 {
    let rupees = Decimal::from_f64(amount_rupees).unwrap_or_default();
    (rupees * Decimal::from(100)).round().to_i64().unwrap_or(0)
}
