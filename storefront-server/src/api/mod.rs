//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品目录只读接口
//! - [`orders`] - 订单生命周期接口
//! - [`payment`] - 支付网关预下单接口

pub mod health;
pub mod orders;
pub mod payment;
pub mod products;

use axum::{Router, middleware};

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::AppResult;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(payment::router())
}

/// HTTP 请求日志中间件
pub async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}
