use std::path::PathBuf;

/// 服务器配置 - 店面后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、导出文件、日志) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | ADMIN_EMAIL | admin@storefront.local | 种子管理员邮箱 |
/// | ADMIN_PASSWORD | admin123 | 种子管理员初始密码 |
/// | SMTP_HOST / SMTP_USER / SMTP_PASS | (无) | 邮件通知；缺省时通知关闭 |
/// | MAIL_FROM | SMTP_USER | 通知发件人 |
/// | PAYMENT_API_BASE | https://api.razorpay.com/v1 | 支付网关地址 |
/// | PAYMENT_KEY_ID / PAYMENT_KEY_SECRET | (无) | 网关密钥；缺省时网关关闭 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/storefront HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、导出文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 种子管理员 ===
    /// 管理员邮箱 (启动时确保存在)
    pub admin_email: String,
    /// 管理员初始密码 (仅在首次创建时使用)
    pub admin_password: String,

    // === 邮件通知 ===
    pub smtp_host: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    /// 发件人地址，缺省时回落到 SMTP_USER
    pub mail_from: Option<String>,

    // === 支付网关 ===
    /// 网关 API 基础地址
    pub payment_api_base: String,
    pub payment_key_id: Option<String>,
    pub payment_key_secret: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@storefront.local".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),

            smtp_host: std::env::var("SMTP_HOST").ok(),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_pass: std::env::var("SMTP_PASS").ok(),
            mail_from: std::env::var("MAIL_FROM").ok(),

            payment_api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".into()),
            payment_key_id: std::env::var("PAYMENT_KEY_ID").ok(),
            payment_key_secret: std::env::var("PAYMENT_KEY_SECRET").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    // ========== 工作目录布局 ==========

    /// 数据库目录: work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 数据库文件: work_dir/database/storefront.db
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join("storefront.db")
    }

    /// 导出目录: work_dir/export
    pub fn export_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("export")
    }

    /// 订单导出镜像文件: work_dir/export/orders.csv
    pub fn export_path(&self) -> PathBuf {
        self.export_dir().join("orders.csv")
    }

    /// 日志目录: work_dir/logs
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.export_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
