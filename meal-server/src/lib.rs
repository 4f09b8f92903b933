//! Meal Server - 员工订餐服务
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，员工自助订午餐/晚餐，管理员维护部门、员工、订餐窗口并查看报表：
//!
//! - **数据存储** (`db`): 四个 JSON 文档 (部门、员工、订餐窗口、订单)
//! - **订单** (`orders`): 截止时间规则、订餐/取消/修改、周视图
//! - **报表** (`reporting`): 区间查询、份数统计、员工统计、CSV 导出
//! - **认证** (`auth`): cookie 会话，员工 / 管理员两种角色
//! - **HTTP API** (`api`): JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! meal-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 会话、凭证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装和 tower 中间件
//! ├── db/            # JSON 存储和仓储
//! ├── orders/        # 订单业务规则
//! ├── reporting/     # 报表
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reporting;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use auth::{Session, SessionStore};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use reporting::ReportService;
pub use routes::build_app;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env 并按配置初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
    __  ___           __
   /  |/  /__  ____ _/ /
  / /|_/ / _ \/ __ `/ /
 / /  / /  __/ /_/ / /
/_/  /_/\___/\__,_/_/
   ____           __
  / __ \_________/ /__  _____
 / / / / ___/ __  / _ \/ ___/
/ /_/ / /  / /_/ /  __/ /
\____/_/   \__,_/\___/_/
    "#
    );
}
