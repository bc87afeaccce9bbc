use thiserror::Error;

/// 服务器生命周期错误 - 启动、绑定、初始化阶段
///
/// API 层的错误使用 [`crate::utils::AppError`]；这里只覆盖进程级失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("启动失败: {0}")]
    Startup(String),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器生命周期的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
