//! Payment API Handlers

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::core::ServerState;
use crate::payment::GatewayOrder;
use crate::utils::{AppError, AppResult};

/// Create-order request body (amount in rupees)
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: f64,
}

/// POST /api/payment/create-order - 网关预下单
pub async fn create_order(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<GatewayOrder>> {
    let gateway = state
        .payments
        .as_ref()
        .ok_or_else(|| AppError::upstream("payment gateway not configured"))?;

    let order = gateway
        .create_order(payload.amount)
        .await
        .map_err(|e| AppError::upstream(format!("payment order failed: {e}")))?;

    Ok(Json(order))
}
