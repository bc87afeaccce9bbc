//! Storefront Server - 电商店面单进程 HTTP 后端
//!
//! # 架构概述
//!
//! 本模块是店面后端的主入口，提供以下核心功能：
//!
//! - **订单生命周期** (`orders`): 创建、列表、状态迁移、删除，
//!   以及向导出镜像和邮件通知的扇出
//! - **数据库** (`db`): 嵌入式 SQLite 存储 (sqlx, WAL)
//! - **导出镜像** (`ledger`): 订单表的 CSV 对账旁路
//! - **邮件通知** (`notify`): 订单确认邮件 (fire-and-forget)
//! - **支付网关** (`payment`): 收银台预下单客户端
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! storefront-server/src/
//! ├── core/          # 配置、状态、服务器、错误
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repository)
//! ├── orders/        # 订单域 (归一化 + 生命周期)
//! ├── ledger/        # 订单导出镜像 (CSV)
//! ├── notify/        # 邮件通知
//! ├── payment/       # 支付网关客户端
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod ledger;
pub mod notify;
pub mod orders;
pub mod payment;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use core::{Config, Server, ServerState};
pub use orders::OrdersManager;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境: dotenv + 日志
///
/// 日志级别来自 `LOG_LEVEL`，可选文件输出目录来自 `LOG_DIR`
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 不存在不算错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
