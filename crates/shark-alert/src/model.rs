use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 传感器通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Temperature,
    Humidity,
    Electricity,
}

impl Channel {
    /// 全部通道，按展示顺序
    pub const ALL: [Channel; 3] = [Channel::Temperature, Channel::Humidity, Channel::Electricity];

    /// 显示单位
    pub fn unit(&self) -> &'static str {
        match self {
            Channel::Temperature => "°C",
            Channel::Humidity => "%",
            Channel::Electricity => "V",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature",
            Channel::Humidity => "Humidity",
            Channel::Electricity => "Electricity",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 告警严重程度（有序：Low < Moderate < High < Critical）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 传感器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: String,
    pub name: String,
    pub location: String,
}

impl Sensor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
        }
    }
}

/// 告警定义
///
/// 每个定义绑定一个读数通道；除 `count` 外在一个刷新周期内保持不变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDefinition {
    pub id: String,
    pub channel: Channel,
    pub threshold: f64,
    pub severity: Severity,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    /// 随机告警数上限（不含）
    #[serde(default = "default_max_count")]
    pub max_count: u32,
    /// 当前活动告警数，每次刷新重新生成
    #[serde(default)]
    pub count: u32,
}

fn default_max_count() -> u32 {
    10
}

impl AlertDefinition {
    pub fn new(id: impl Into<String>, channel: Channel, threshold: f64, severity: Severity) -> Self {
        Self {
            id: id.into(),
            channel,
            threshold,
            severity,
            description: String::new(),
            address: String::new(),
            sensors: Vec::new(),
            max_count: default_max_count(),
            count: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.push(sensor);
        self
    }

    pub fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }
}

/// 传感器读数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub electricity: f64,
}

impl SensorReading {
    pub fn new(timestamp: DateTime<Utc>, temperature: f64, humidity: f64, electricity: f64) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            electricity,
        }
    }

    /// 读取指定通道的值
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Humidity => self.humidity,
            Channel::Electricity => self.electricity,
        }
    }
}

/// 告警状态，由阈值判断派生，不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Normal,
    AboveThreshold,
}

impl AlertStatus {
    pub fn from_breach(over_threshold: bool) -> Self {
        if over_threshold {
            AlertStatus::AboveThreshold
        } else {
            AlertStatus::Normal
        }
    }

    /// 表格徽标文字
    pub fn label(&self) -> &'static str {
        match self {
            AlertStatus::Normal => "Normal",
            AlertStatus::AboveThreshold => "Critical",
        }
    }

    /// 详情视图文字
    pub fn description(&self) -> &'static str {
        match self {
            AlertStatus::Normal => "Normal",
            AlertStatus::AboveThreshold => "Above threshold",
        }
    }

    pub fn is_breach(&self) -> bool {
        matches!(self, AlertStatus::AboveThreshold)
    }
}
