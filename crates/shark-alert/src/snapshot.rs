use crate::evaluate;
use crate::model::{AlertDefinition, AlertStatus, Channel, SensorReading};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 监控状态快照，交给渲染层使用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    pub definitions: Vec<AlertDefinition>,
    /// 从旧到新
    pub readings: Vec<SensorReading>,
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl MonitorSnapshot {
    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.last()
    }

    pub fn latest_reading(&self, channel: Channel) -> Option<f64> {
        evaluate::latest_value(self.latest(), channel)
    }

    pub fn definition(&self, channel: Channel) -> Option<&AlertDefinition> {
        evaluate::find_definition(&self.definitions, channel)
    }

    pub fn is_over_threshold(&self, channel: Channel) -> bool {
        evaluate::is_over_threshold(&self.definitions, self.latest(), channel)
    }

    pub fn status(&self, channel: Channel) -> AlertStatus {
        evaluate::status(&self.definitions, self.latest(), channel)
    }

    /// 所有定义的活动告警数之和
    pub fn active_alert_total(&self) -> u32 {
        self.definitions.iter().map(|def| def.count).sum()
    }

    /// 当前超过阈值的通道
    pub fn breaches(&self) -> Vec<Channel> {
        self.definitions
            .iter()
            .map(|def| def.channel)
            .filter(|channel| self.is_over_threshold(*channel))
            .collect()
    }
}
