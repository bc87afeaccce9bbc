//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{OrderStatus, OrderWithItems};
use crate::orders::CheckoutPayload;
use crate::utils::AppResult;

/// Response for a placed order
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub message: &'static str,
    #[serde(rename = "orderId")]
    pub order_id: i64,
}

/// POST /api/orders - 下单
///
/// 空购物车返回 400 `{"error":"Cart is empty"}`；成功返回 201 和新订单号。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutPayload>,
) -> AppResult<(StatusCode, Json<PlaceOrderResponse>)> {
    let order_id = state.orders.place_order(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            message: "Order Placed Successfully",
            order_id,
        }),
    ))
}

/// GET /api/orders - 全部订单，最新在前，含订单行和 final_phone
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderWithItems>>> {
    let orders = state.orders.list_orders().await?;
    Ok(Json(orders))
}

/// Status update request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Simple message acknowledgment
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// PUT /api/orders/{id} - 状态迁移
///
/// 未知订单号返回 404；`Confirmed` 额外触发确认邮件 (fire-and-forget)。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.orders.update_status(id, payload.status).await?;
    Ok(Json(MessageResponse {
        message: "Status Updated",
    }))
}

/// DELETE /api/orders/{id} - 删除订单 (订单行、主表、镜像行)
pub async fn delete_order(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.orders.delete_order(id).await?;
    Ok(Json(MessageResponse {
        message: "Order Deleted",
    }))
}
