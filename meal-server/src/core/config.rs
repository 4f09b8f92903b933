use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;

use crate::auth::AdminCredentials;
use crate::auth::credentials::{DEFAULT_ADMIN_ACCOUNT, DEFAULT_ADMIN_PASSWORD};
use crate::utils::time::parse_timezone;

/// 服务器配置 - 订餐服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | ./data | JSON 数据文件目录 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | BIND_ADDR | 127.0.0.1 | 监听地址 |
/// | TIMEZONE | (系统本地时间) | 截止时间使用的 IANA 时区 |
/// | SESSION_IDLE_MINUTES | 30 | 会话闲置超时(分钟) |
/// | ADMIN_ACCOUNT | admin | 管理员账号 |
/// | ADMIN_PASSWORD | 1234 | 管理员密码 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 滚动日志目录 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/srv/meal HTTP_PORT=8080 TIMEZONE=Asia/Taipei cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，存放 departments/employees/windows/orders.json
    pub data_dir: PathBuf,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 监听地址
    pub bind_addr: String,
    /// 业务时区，`None` 表示服务器本地时间
    pub timezone: Option<Tz>,
    /// 会话闲置超时
    pub session_idle: Duration,
    /// 管理员凭证
    pub admin: AdminCredentials,
    /// 日志级别 / 过滤指令
    pub log_level: String,
    /// 滚动日志目录
    pub log_dir: Option<String>,
    /// JSON 格式日志
    pub log_json: bool,
    /// 运行环境: development | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".into()),
            timezone: std::env::var("TIMEZONE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .and_then(|v| parse_timezone(&v)),
            session_idle: Duration::from_secs(
                std::env::var("SESSION_IDLE_MINUTES")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .filter(|m| *m > 0)
                    .unwrap_or(30)
                    * 60,
            ),
            admin: AdminCredentials::new(
                std::env::var("ADMIN_ACCOUNT").unwrap_or_else(|_| DEFAULT_ADMIN_ACCOUNT.into()),
                std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.into()),
            ),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|v| !v.trim().is_empty()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(data_dir: impl Into<PathBuf>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.data_dir = data_dir.into();
        config.http_port = http_port;
        config
    }

    /// 监听地址 `bind_addr:http_port`
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides() {
        let config = Config::with_overrides("/tmp/meal-test", 18080);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/meal-test"));
        assert_eq!(config.http_port, 18080);
        assert!(config.listen_addr().ends_with(":18080"));
    }
}
