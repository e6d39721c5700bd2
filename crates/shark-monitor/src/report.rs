use shark_alert::evaluate::format_reading;
use shark_alert::{AlertStatus, Channel, MonitorSnapshot};
use std::collections::HashMap;
use tracing::{info, warn};

/// 通道状态变化
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub channel: Channel,
    pub previous: Option<AlertStatus>,
    pub current: AlertStatus,
    pub reading: String,
    pub threshold: f64,
}

impl StatusChange {
    pub fn log(&self) {
        match self.current {
            AlertStatus::AboveThreshold => warn!(
                channel = %self.channel,
                reading = %self.reading,
                threshold = self.threshold,
                "Threshold breach"
            ),
            AlertStatus::Normal if self.previous.is_some() => info!(
                channel = %self.channel,
                reading = %self.reading,
                threshold = self.threshold,
                "Channel back to normal"
            ),
            AlertStatus::Normal => info!(
                channel = %self.channel,
                reading = %self.reading,
                "Channel normal"
            ),
        }
    }
}

/// 记录每个通道上一次的状态，只报告变化
#[derive(Debug, Default)]
pub struct StatusTracker {
    last: HashMap<Channel, AlertStatus>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, snapshot: &MonitorSnapshot) -> Vec<StatusChange> {
        if snapshot.latest().is_none() {
            return Vec::new();
        }

        let mut changes = Vec::new();
        for definition in &snapshot.definitions {
            let channel = definition.channel;
            let current = snapshot.status(channel);
            let previous = self.last.insert(channel, current);

            if previous != Some(current) {
                changes.push(StatusChange {
                    channel,
                    previous,
                    current,
                    reading: format_reading(snapshot.latest_reading(channel), channel),
                    threshold: definition.threshold,
                });
            }
        }
        changes
    }
}

/// 单行摘要，例如 "#3 Temperature=31.2°C(!) Humidity=60.0% Electricity=210.0V alerts=7"
pub fn summary_line(snapshot: &MonitorSnapshot) -> String {
    let channels = snapshot
        .definitions
        .iter()
        .map(|def| {
            let marker = if snapshot.is_over_threshold(def.channel) {
                "(!)"
            } else {
                ""
            };
            format!(
                "{}={}{}",
                def.channel,
                format_reading(snapshot.latest_reading(def.channel), def.channel),
                marker
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "#{} {} alerts={}",
        snapshot.generation,
        channels,
        snapshot.active_alert_total()
    )
}
