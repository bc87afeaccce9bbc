use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::UserRepository;
use crate::ledger::LedgerExporter;
use crate::notify::EmailNotifier;
use crate::orders::OrdersManager;
use crate::payment::GatewayClient;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是店面后端的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | ledger | Arc<LedgerExporter> | 订单导出镜像 (CSV) |
/// | notifier | Arc<EmailNotifier> | 订单确认邮件通知 |
/// | payments | Option<GatewayClient> | 支付网关客户端 (未配置时为 None) |
/// | orders | OrdersManager | 订单生命周期管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 订单导出镜像
    pub ledger: Arc<LedgerExporter>,
    /// 邮件通知
    pub notifier: Arc<EmailNotifier>,
    /// 支付网关客户端
    pub payments: Option<GatewayClient>,
    /// 订单生命周期管理器
    pub orders: OrdersManager,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database/, export/, logs/)
    /// 2. 数据库 (work_dir/database/storefront.db, 自动迁移)
    /// 3. 种子管理员记录
    /// 4. 各服务 (Ledger, Notifier, Payments, OrdersManager)
    pub async fn initialize(config: &Config) -> Result<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure()?;

        // 1. Initialize DB
        let db_path = config.database_path();
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Startup(format!("database init failed: {e}")))?;
        let pool = db_service.pool;

        // 2. Seed administrator record — the only way an admin account exists
        let users = UserRepository::new(pool.clone());
        users
            .ensure_seed_admin(&config.admin_email, &config.admin_password)
            .await
            .map_err(|e| ServerError::Startup(format!("admin seed failed: {e}")))?;
        if config.is_production() && config.admin_password == "admin123" {
            tracing::warn!("ADMIN_PASSWORD is still the bootstrap default in production");
        }

        // 3. Initialize Services
        let ledger = Arc::new(LedgerExporter::new(config.export_path()));
        let notifier = Arc::new(EmailNotifier::from_config(config));
        let payments = GatewayClient::from_config(config);
        if payments.is_none() {
            tracing::info!("payment gateway keys not configured, /api/payment disabled");
        }

        let orders = OrdersManager::new(pool.clone(), ledger.clone(), notifier.clone());

        Ok(Self {
            config: config.clone(),
            pool,
            ledger,
            notifier,
            payments,
            orders,
        })
    }

    /// 获取数据库连接池
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }
}
