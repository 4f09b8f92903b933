use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AdminCredentials, SessionStore};
use crate::core::{Config, Result};
use crate::db::Database;
use crate::orders::OrderService;
use crate::reporting::ReportService;
use crate::utils::time::{Clock, SystemClock};

/// 过期会话清理间隔
const SESSION_PURGE_INTERVAL_SECS: u64 = 60;

/// 服务器状态 - 持有所有服务的引用
///
/// ServerState 是订餐服务的核心，包含：
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 服务器配置 |
/// | db | Database | JSON 文件存储 |
/// | sessions | SessionStore | 内存会话 |
/// | clock | `Arc<dyn Clock>` | 当前时间来源 (截止时间判断) |
/// | admin | AdminCredentials | 管理员凭证 |
///
/// # 使用示例
///
/// ```ignore
/// let state = ServerState::initialize(&config)?;
/// let orders = state.order_service();
/// ```
///
/// 所有字段都可廉价克隆 (`Arc` / 共享句柄)。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 数据存储
    pub db: Database,
    /// 会话存储
    pub sessions: SessionStore,
    /// 时间来源
    pub clock: Arc<dyn Clock>,
    /// 管理员凭证
    pub admin: AdminCredentials,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 打开数据目录 (缺失的数据文件写入种子数据)，使用系统时钟。
    pub fn initialize(config: &Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock::new(config.timezone)))
    }

    /// 使用指定时钟初始化 (测试时注入固定时间)
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let db = Database::open(&config.data_dir)?;
        tracing::info!(
            data_dir = %config.data_dir.display(),
            timezone = config.timezone.map(|tz| tz.name()).unwrap_or("local"),
            "Data store ready"
        );

        Ok(Self {
            config: config.clone(),
            db,
            sessions: SessionStore::new(config.session_idle),
            clock,
            admin: config.admin.clone(),
        })
    }

    /// 启动后台任务
    ///
    /// 必须在 tokio 运行时内调用
    ///
    /// 启动的任务：
    /// - 过期会话清理
    pub fn start_background_tasks(&self) {
        self.sessions
            .start_purge_task(Duration::from_secs(SESSION_PURGE_INTERVAL_SECS));
    }

    /// 订单服务
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.clock.clone())
    }

    /// 报表服务
    pub fn report_service(&self) -> ReportService {
        ReportService::new(self.db.clone())
    }
}
