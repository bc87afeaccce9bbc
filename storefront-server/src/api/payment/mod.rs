//! Payment API Module
//!
//! 收银台预下单：在网关侧创建支付单，返回网关订单号。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Payment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payment", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/create-order", post(handler::create_order))
}
