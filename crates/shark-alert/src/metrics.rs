use crate::error::Result;
use crate::model::Channel;
use crate::snapshot::MonitorSnapshot;
use prometheus::{Encoder, GaugeVec, IntCounter, IntGaugeVec, Opts, Registry, TextEncoder};

/// 监控指标
pub struct MonitorMetrics {
    refreshes_total: IntCounter,
    latest_reading: GaugeVec,
    alert_count: IntGaugeVec,
    threshold_breach: IntGaugeVec,
    last_generation: Option<u64>,
    registry: Registry,
}

impl MonitorMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let refreshes_total =
            IntCounter::new("shark_refreshes_total", "Total number of monitor refreshes")?;
        registry.register(Box::new(refreshes_total.clone()))?;

        let latest_reading = GaugeVec::new(
            Opts::new("shark_latest_reading", "Latest sensor reading per channel"),
            &["channel"],
        )?;
        registry.register(Box::new(latest_reading.clone()))?;

        let alert_count = IntGaugeVec::new(
            Opts::new("shark_alert_count", "Active alert count per channel"),
            &["channel"],
        )?;
        registry.register(Box::new(alert_count.clone()))?;

        let threshold_breach = IntGaugeVec::new(
            Opts::new(
                "shark_threshold_breach",
                "1 when the latest reading exceeds the channel threshold",
            ),
            &["channel"],
        )?;
        registry.register(Box::new(threshold_breach.clone()))?;

        Ok(Self {
            refreshes_total,
            latest_reading,
            alert_count,
            threshold_breach,
            last_generation: None,
            registry,
        })
    }

    /// 根据快照更新指标
    pub fn observe(&mut self, snapshot: &MonitorSnapshot) {
        let previous = self.last_generation.unwrap_or(0);
        if snapshot.generation > previous {
            self.refreshes_total.inc_by(snapshot.generation - previous);
        }
        self.last_generation = Some(snapshot.generation);

        for definition in &snapshot.definitions {
            let label = channel_label(definition.channel);
            self.alert_count
                .with_label_values(&[label])
                .set(i64::from(definition.count));
            self.threshold_breach
                .with_label_values(&[label])
                .set(i64::from(snapshot.is_over_threshold(definition.channel)));
        }

        if let Some(latest) = snapshot.latest() {
            for channel in Channel::ALL {
                self.latest_reading
                    .with_label_values(&[channel_label(channel)])
                    .set(latest.value(channel));
            }
        }
    }

    /// 导出文本格式指标
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn channel_label(channel: Channel) -> &'static str {
    match channel {
        Channel::Temperature => "temperature",
        Channel::Humidity => "humidity",
        Channel::Electricity => "electricity",
    }
}
