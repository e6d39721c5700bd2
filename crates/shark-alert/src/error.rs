use crate::model::Channel;
use thiserror::Error;

/// 告警监控错误类型
#[derive(Error, Debug)]
pub enum MonitorError {
    /// 配置无效
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// 同一通道存在多个告警定义
    #[error("Duplicate alert definition for channel: {0}")]
    DuplicateChannel(Channel),

    /// 阈值无效（NaN 或无穷大）
    #[error("Invalid threshold for alert {id}: {threshold}")]
    InvalidThreshold { id: String, threshold: f64 },

    /// 数据源错误
    #[error("Reading source error: {0}")]
    Source(String),

    /// 数据源已耗尽
    #[error("Reading source exhausted")]
    SourceExhausted,

    /// 后台任务错误
    #[error("Monitor task error: {0}")]
    Task(String),

    /// 指标错误
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// 告警监控结果类型
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// 创建配置错误
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        MonitorError::InvalidConfig(msg.into())
    }

    /// 创建数据源错误
    pub fn source(msg: impl Into<String>) -> Self {
        MonitorError::Source(msg.into())
    }
}
