//! 阈值判断与展示值计算，监控器和快照共用。

use crate::model::{AlertDefinition, AlertStatus, Channel, SensorReading};

/// 无数据时的显示文字
pub const NO_DATA: &str = "N/A";

pub fn latest_value(latest: Option<&SensorReading>, channel: Channel) -> Option<f64> {
    latest.map(|reading| reading.value(channel))
}

pub fn find_definition(definitions: &[AlertDefinition], channel: Channel) -> Option<&AlertDefinition> {
    definitions.iter().find(|def| def.channel == channel)
}

/// 最新读数严格大于阈值时为 true；缺少定义或读数时为 false
pub fn is_over_threshold(
    definitions: &[AlertDefinition],
    latest: Option<&SensorReading>,
    channel: Channel,
) -> bool {
    let Some(definition) = find_definition(definitions, channel) else {
        return false;
    };
    match latest_value(latest, channel) {
        Some(value) => value > definition.threshold,
        None => false,
    }
}

pub fn status(
    definitions: &[AlertDefinition],
    latest: Option<&SensorReading>,
    channel: Channel,
) -> AlertStatus {
    AlertStatus::from_breach(is_over_threshold(definitions, latest, channel))
}

/// 进度条百分比：读数取整后除以阈值
pub fn progress_percent(value: Option<f64>, threshold: f64) -> Option<f64> {
    let value = value?;
    if threshold.is_nan() || threshold <= 0.0 {
        return None;
    }
    Some(value.trunc() / threshold * 100.0)
}

/// 格式化读数，保留一位小数并带单位
pub fn format_reading(value: Option<f64>, channel: Channel) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, channel.unit()),
        None => NO_DATA.to_string(),
    }
}
