//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`AppResult`] - 处理器的 Result 类型别名
//!
//! # 错误分类
//!
//! | 分类 | HTTP 状态码 | 对外信息 |
//! |------|-------------|----------|
//! | Validation | 400 | 原始消息 |
//! | NotFound | 404 | 原始消息 |
//! | Database | 500 | 通用消息 (详情只写日志) |
//! | Upstream | 500 | 通用消息 (详情只写日志) |
//! | Internal | 500 | 通用消息 (详情只写日志) |
//!
//! 5xx 错误不向调用方暴露底层细节，原始错误通过 tracing 记录。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 验证失败 (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// 资源不存在 (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// 数据库错误 (500)
    #[error("Database error: {0}")]
    Database(String),

    /// 上游服务错误 (500) — 支付网关、邮件、导出等
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// 内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// 错误响应体: `{"error": "..."}`
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Upstream(msg) => {
                error!(target: "upstream", error = %msg, "Upstream service error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upstream service error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
