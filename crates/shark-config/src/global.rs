use serde::{Deserialize, Serialize};
use shark_alert::{
    default_definitions, AlertDefinition, SimulationProfile, DEFAULT_REFRESH_PERIOD,
    DEFAULT_WINDOW_CAPACITY,
};
use shark_logging::LoggingConfig;
use std::time::Duration;

/// 全局配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SharkConfig {
    pub system: SystemConfig,
    pub monitor: MonitorSettings,
    pub simulation: SimulationProfile,
    pub logging: LoggingConfig,
    pub alerts: Vec<AlertDefinition>,
}

/// 系统配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub name: String,
    pub version: String,
}

/// 监控器配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// 刷新周期（秒）
    pub refresh_interval_secs: u64,
    pub window_capacity: usize,
    /// 启动时回填 24 小时历史
    pub backfill_on_start: bool,
}

impl MonitorSettings {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            system: SystemConfig::default(),
            monitor: MonitorSettings::default(),
            simulation: SimulationProfile::default(),
            logging: LoggingConfig::default(),
            alerts: default_definitions(),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            name: "ClaimShark IoT Monitor".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_PERIOD.as_secs(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            backfill_on_start: true,
        }
    }
}
