use crate::catalog::RECOMMENDATIONS;
use crate::evaluate;
use crate::model::{AlertDefinition, AlertStatus, Channel, Severity};
use crate::snapshot::MonitorSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 徽标样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Destructive,
    Secondary,
}

impl BadgeTone {
    pub fn for_status(status: AlertStatus) -> Self {
        if status.is_breach() {
            BadgeTone::Destructive
        } else {
            BadgeTone::Secondary
        }
    }

    pub fn for_severity(severity: Severity) -> Self {
        if severity == Severity::Critical {
            BadgeTone::Destructive
        } else {
            BadgeTone::Secondary
        }
    }
}

/// 告警卡片
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCard {
    pub id: String,
    pub channel: Channel,
    pub count: u32,
    pub latest: String,
    pub threshold: f64,
    pub progress_percent: Option<f64>,
    pub over_threshold: bool,
}

/// 告警表格行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    pub id: String,
    pub channel: Channel,
    pub count: u32,
    pub status: &'static str,
    pub status_tone: BadgeTone,
    pub severity: Severity,
    pub severity_tone: BadgeTone,
}

/// 告警分布柱状图数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub count: u32,
}

/// 24 小时历史曲线数据点
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub time: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub electricity: f64,
}

/// 告警详情
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertDetail {
    pub id: String,
    pub channel: Channel,
    pub status: AlertStatus,
    pub status_text: &'static str,
    pub latest: String,
    pub threshold: f64,
    pub severity: Severity,
    pub description: String,
    pub address: String,
    pub sensors: Vec<String>,
    pub recommendations: Vec<&'static str>,
}

impl AlertDetail {
    pub fn for_channel(snapshot: &MonitorSnapshot, channel: Channel) -> Option<Self> {
        let definition = snapshot.definition(channel)?;
        let status = snapshot.status(channel);

        Some(Self {
            id: definition.id.clone(),
            channel,
            status,
            status_text: status.description(),
            latest: evaluate::format_reading(snapshot.latest_reading(channel), channel),
            threshold: definition.threshold,
            severity: definition.severity,
            description: definition.description.clone(),
            address: definition.address.clone(),
            sensors: definition
                .sensors
                .iter()
                .map(|sensor| format!("{} - {}", sensor.name, sensor.location))
                .collect(),
            recommendations: RECOMMENDATIONS.to_vec(),
        })
    }
}

/// 仪表盘视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub total_active_alerts: u32,
    pub breaches: Vec<Channel>,
    pub cards: Vec<AlertCard>,
    pub rows: Vec<AlertRow>,
    pub chart: Vec<ChartBar>,
    pub history: Vec<HistoryPoint>,
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &MonitorSnapshot) -> Self {
        let definitions = &snapshot.definitions;

        Self {
            generation: snapshot.generation,
            refreshed_at: snapshot.refreshed_at,
            total_active_alerts: snapshot.active_alert_total(),
            breaches: snapshot.breaches(),
            cards: definitions.iter().map(|def| card(snapshot, def)).collect(),
            rows: definitions.iter().map(|def| row(snapshot, def)).collect(),
            chart: definitions
                .iter()
                .map(|def| ChartBar {
                    label: def.channel.label(),
                    count: def.count,
                })
                .collect(),
            history: snapshot
                .readings
                .iter()
                .map(|reading| HistoryPoint {
                    time: reading.timestamp.format("%H:%M").to_string(),
                    timestamp: reading.timestamp,
                    temperature: reading.temperature,
                    humidity: reading.humidity,
                    electricity: reading.electricity,
                })
                .collect(),
        }
    }
}

fn card(snapshot: &MonitorSnapshot, definition: &AlertDefinition) -> AlertCard {
    let latest = snapshot.latest_reading(definition.channel);
    AlertCard {
        id: definition.id.clone(),
        channel: definition.channel,
        count: definition.count,
        latest: evaluate::format_reading(latest, definition.channel),
        threshold: definition.threshold,
        progress_percent: evaluate::progress_percent(latest, definition.threshold),
        over_threshold: snapshot.is_over_threshold(definition.channel),
    }
}

fn row(snapshot: &MonitorSnapshot, definition: &AlertDefinition) -> AlertRow {
    let status = snapshot.status(definition.channel);
    AlertRow {
        id: definition.id.clone(),
        channel: definition.channel,
        count: definition.count,
        status: status.label(),
        status_tone: BadgeTone::for_status(status),
        severity: definition.severity,
        severity_tone: BadgeTone::for_severity(definition.severity),
    }
}
