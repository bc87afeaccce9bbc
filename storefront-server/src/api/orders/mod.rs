//! Order API Module
//!
//! 订单生命周期接口。所有变更都经过 OrdersManager：数据库主写 +
//! 导出镜像/邮件旁路扇出。

mod handler;

use axum::{
    Router,
    routing::{post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", put(handler::update_status).delete(handler::delete_order))
}
