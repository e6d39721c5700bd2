use crate::error::{MonitorError, Result};
use crate::evaluate;
use crate::model::{AlertDefinition, AlertStatus, Channel, SensorReading};
use crate::snapshot::MonitorSnapshot;
use crate::source::ReadingSource;
use crate::window::{ReadingWindow, DEFAULT_WINDOW_CAPACITY};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use tracing::{debug, info};

/// 告警监控器
///
/// 持有告警定义和读数窗口，每次刷新重新生成告警数并追加一条读数。
/// 阈值状态不单独保存，查询时由最新读数派生。
pub struct AlertMonitor {
    /// 告警定义
    definitions: Vec<AlertDefinition>,

    /// 读数窗口
    window: ReadingWindow,

    /// 数据源
    source: Box<dyn ReadingSource>,

    /// 成功刷新次数
    generation: u64,

    /// 最近一次刷新时间
    refreshed_at: Option<DateTime<Utc>>,
}

impl AlertMonitor {
    /// 创建监控器
    ///
    /// # 错误
    /// * `DuplicateChannel` - 同一通道出现多个定义
    /// * `InvalidThreshold` - 阈值不是有限数
    pub fn new(definitions: Vec<AlertDefinition>, source: Box<dyn ReadingSource>) -> Result<Self> {
        validate_definitions(&definitions)?;

        info!(
            definitions = definitions.len(),
            source = source.name(),
            "Alert monitor created"
        );

        Ok(Self {
            definitions,
            window: ReadingWindow::new(DEFAULT_WINDOW_CAPACITY)?,
            source,
            generation: 0,
            refreshed_at: None,
        })
    }

    /// 设置窗口容量，会清空已有读数
    pub fn with_window_capacity(mut self, capacity: usize) -> Result<Self> {
        self.window = ReadingWindow::new(capacity)?;
        Ok(self)
    }

    /// 刷新：重新生成告警数并追加一条读数
    ///
    /// 数据源失败时状态保持不变。
    pub async fn refresh(&mut self) -> Result<()> {
        let now = Utc::now();
        let reading = self.source.sample(now).await?;

        for definition in self.definitions.iter_mut() {
            definition.count = self.source.alert_count(definition);
        }

        if let Some(evicted) = self.window.push(reading) {
            debug!(timestamp = %evicted.timestamp, "Evicted oldest reading");
        }
        self.generation += 1;
        self.refreshed_at = Some(now);

        debug!(
            generation = self.generation,
            readings = self.window.len(),
            "Alert monitor refreshed"
        );
        Ok(())
    }

    /// 按小时间隔回填窗口，最后一条为一小时前，当前读数留给下一次刷新
    pub async fn backfill(&mut self) -> Result<()> {
        let now = Utc::now();
        let capacity = self.window.capacity();
        let mut readings = Vec::with_capacity(capacity);

        for i in 0..capacity {
            let hours_ago = (capacity - i) as i64;
            readings.push(self.source.sample(now - Duration::hours(hours_ago)).await?);
        }

        self.window.clear();
        for reading in readings {
            self.window.push(reading);
        }

        info!(readings = self.window.len(), "Reading window backfilled");
        Ok(())
    }

    /// 写入外部读数
    pub fn ingest(&mut self, reading: SensorReading) {
        self.window.push(reading);
        debug!(timestamp = %reading.timestamp, "Reading ingested");
    }

    /// 指定通道的最新读数，窗口为空时返回 None
    pub fn latest_reading(&self, channel: Channel) -> Option<f64> {
        evaluate::latest_value(self.window.latest(), channel)
    }

    pub fn is_over_threshold(&self, channel: Channel) -> bool {
        evaluate::is_over_threshold(&self.definitions, self.window.latest(), channel)
    }

    pub fn status(&self, channel: Channel) -> AlertStatus {
        evaluate::status(&self.definitions, self.window.latest(), channel)
    }

    pub fn definitions(&self) -> &[AlertDefinition] {
        &self.definitions
    }

    pub fn definition(&self, channel: Channel) -> Option<&AlertDefinition> {
        evaluate::find_definition(&self.definitions, channel)
    }

    pub fn readings(&self) -> &ReadingWindow {
        &self.window
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            definitions: self.definitions.clone(),
            readings: self.window.to_vec(),
            generation: self.generation,
            refreshed_at: self.refreshed_at,
        }
    }
}

/// 校验告警定义：阈值为有限数，通道不重复
pub fn validate_definitions(definitions: &[AlertDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for definition in definitions {
        if !definition.threshold.is_finite() {
            return Err(MonitorError::InvalidThreshold {
                id: definition.id.clone(),
                threshold: definition.threshold,
            });
        }
        if !seen.insert(definition.channel) {
            return Err(MonitorError::DuplicateChannel(definition.channel));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_definitions;
    use crate::model::Severity;
    use crate::source::{RandomSource, SequenceSource, SimulationProfile};

    fn sequence_monitor(source: SequenceSource) -> AlertMonitor {
        AlertMonitor::new(default_definitions(), Box::new(source)).unwrap()
    }

    #[tokio::test]
    async fn test_counts_within_range_after_refresh() {
        let source = RandomSource::new(SimulationProfile::default()).unwrap();
        let mut monitor = AlertMonitor::new(default_definitions(), Box::new(source)).unwrap();

        for _ in 0..50 {
            monitor.refresh().await.unwrap();
            for def in monitor.definitions() {
                assert!(def.count < def.max_count);
            }
        }
    }

    #[tokio::test]
    async fn test_window_evicts_after_25_refreshes() {
        let readings = (0..25).map(|i| (i as f64, 60.0, 210.0));
        let mut monitor = sequence_monitor(SequenceSource::new().with_readings(readings));

        for _ in 0..24 {
            monitor.refresh().await.unwrap();
        }
        assert_eq!(monitor.readings().len(), 24);
        assert_eq!(monitor.readings().oldest().unwrap().temperature, 0.0);

        monitor.refresh().await.unwrap();
        assert_eq!(monitor.readings().len(), 24);
        assert_eq!(monitor.readings().oldest().unwrap().temperature, 1.0);
        assert_eq!(monitor.latest_reading(Channel::Temperature), Some(24.0));
        assert_eq!(monitor.generation(), 25);
    }

    #[tokio::test]
    async fn test_empty_window_returns_no_data() {
        let monitor = sequence_monitor(SequenceSource::new());

        assert_eq!(monitor.latest_reading(Channel::Temperature), None);
        assert!(!monitor.is_over_threshold(Channel::Temperature));
        assert_eq!(monitor.status(Channel::Electricity), AlertStatus::Normal);
        assert!(monitor.refreshed_at().is_none());
    }

    #[tokio::test]
    async fn test_temperature_threshold() {
        let source = SequenceSource::new()
            .with_reading(31.2, 60.0, 210.0)
            .with_reading(29.9, 60.0, 210.0);
        let mut monitor = sequence_monitor(source);

        monitor.refresh().await.unwrap();
        assert!(monitor.is_over_threshold(Channel::Temperature));
        assert_eq!(monitor.status(Channel::Temperature), AlertStatus::AboveThreshold);

        monitor.refresh().await.unwrap();
        assert!(!monitor.is_over_threshold(Channel::Temperature));
    }

    #[test]
    fn test_electricity_injection() {
        let mut monitor = sequence_monitor(SequenceSource::new());

        monitor.ingest(SensorReading::new(Utc::now(), 25.0, 60.0, 221.0));
        assert!(monitor.is_over_threshold(Channel::Electricity));

        monitor.ingest(SensorReading::new(Utc::now(), 25.0, 60.0, 219.9));
        assert!(!monitor.is_over_threshold(Channel::Electricity));
    }

    #[tokio::test]
    async fn test_latest_reading_idempotent() {
        let mut monitor = sequence_monitor(SequenceSource::new().with_reading(22.5, 55.0, 215.0));
        monitor.refresh().await.unwrap();

        let first = monitor.latest_reading(Channel::Humidity);
        let second = monitor.latest_reading(Channel::Humidity);
        assert_eq!(first, Some(55.0));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_state() {
        let source = SequenceSource::new()
            .with_reading(22.0, 55.0, 215.0)
            .with_counts([1, 2, 3]);
        let mut monitor = sequence_monitor(source);

        monitor.refresh().await.unwrap();
        let before = monitor.snapshot();

        assert!(matches!(
            monitor.refresh().await,
            Err(MonitorError::SourceExhausted)
        ));
        assert_eq!(monitor.snapshot(), before);
        assert_eq!(monitor.generation(), 1);
    }

    #[tokio::test]
    async fn test_backfill_fills_window_hourly() {
        let source = RandomSource::new(SimulationProfile {
            seed: Some(1),
            ..Default::default()
        })
        .unwrap();
        let mut monitor = AlertMonitor::new(default_definitions(), Box::new(source)).unwrap();

        monitor.backfill().await.unwrap();
        let readings = monitor.readings().to_vec();
        assert_eq!(readings.len(), 24);
        assert!(readings
            .windows(2)
            .all(|w| w[1].timestamp - w[0].timestamp == Duration::hours(1)));
        assert_eq!(monitor.generation(), 0);
        assert!(readings[23].timestamp <= Utc::now() - Duration::hours(1));
    }

    #[tokio::test]
    async fn test_refresh_after_backfill_starts_new_hour() {
        let source = RandomSource::new(SimulationProfile {
            seed: Some(2),
            ..Default::default()
        })
        .unwrap();
        let mut monitor = AlertMonitor::new(default_definitions(), Box::new(source)).unwrap();

        monitor.backfill().await.unwrap();
        monitor.refresh().await.unwrap();

        let readings = monitor.readings().to_vec();
        assert_eq!(readings.len(), 24);
        let gap = readings[23].timestamp - readings[22].timestamp;
        assert!(gap >= Duration::hours(1));
        assert!(gap < Duration::hours(1) + Duration::minutes(1));
    }

    #[test]
    fn test_duplicate_channel_rejected() {
        let defs = vec![
            AlertDefinition::new("1", Channel::Humidity, 70.0, Severity::Moderate),
            AlertDefinition::new("2", Channel::Humidity, 80.0, Severity::High),
        ];
        let result = AlertMonitor::new(defs, Box::new(SequenceSource::new()));
        assert!(matches!(
            result,
            Err(MonitorError::DuplicateChannel(Channel::Humidity))
        ));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let defs = vec![AlertDefinition::new(
            "1",
            Channel::Temperature,
            f64::NAN,
            Severity::High,
        )];
        let result = AlertMonitor::new(defs, Box::new(SequenceSource::new()));
        assert!(matches!(result, Err(MonitorError::InvalidThreshold { .. })));
    }

    #[test]
    fn test_custom_capacity() {
        let mut monitor = sequence_monitor(SequenceSource::new())
            .with_window_capacity(2)
            .unwrap();
        for v in [1.0, 2.0, 3.0] {
            monitor.ingest(SensorReading::new(Utc::now(), v, 50.0, 200.0));
        }
        assert_eq!(monitor.readings().len(), 2);
        assert!(sequence_monitor(SequenceSource::new())
            .with_window_capacity(0)
            .is_err());
    }
}
