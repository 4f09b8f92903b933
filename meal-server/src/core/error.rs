use thiserror::Error;

use crate::db::StoreError;

/// 服务启动/运行错误 (HTTP 请求错误见 [`crate::AppError`])
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据存储错误: {0}")]
    Store(#[from] StoreError),

    #[error("监听 {addr} 失败: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 服务层的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
