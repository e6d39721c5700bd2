use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shark_alert::{
    default_definitions, AlertDefinition, AlertDetail, AlertMonitor, AlertStatus, Channel,
    DashboardView, MonitorError, MonitorMetrics, ReadingSource, SensorReading, SequenceSource,
};
use std::time::Duration;
use tokio::time::sleep;
use tokio_test::assert_ok;

/// 电压按固定步长上升的测试数据源
struct RampSource {
    electricity: f64,
    step: f64,
}

#[async_trait]
impl ReadingSource for RampSource {
    fn name(&self) -> &str {
        "ramp"
    }

    async fn sample(&mut self, at: DateTime<Utc>) -> shark_alert::Result<SensorReading> {
        let reading = SensorReading::new(at, 25.0, 60.0, self.electricity);
        self.electricity += self.step;
        Ok(reading)
    }

    fn alert_count(&mut self, definition: &AlertDefinition) -> u32 {
        definition.max_count.saturating_sub(1)
    }
}

/// 测试电压阈值场景：220 阈值，221.0 超限，219.9 正常
#[tokio::test]
async fn test_electricity_threshold_scenario() {
    let source = SequenceSource::new()
        .with_reading(25.0, 60.0, 221.0)
        .with_reading(25.0, 60.0, 219.9);
    let mut monitor = AlertMonitor::new(default_definitions(), Box::new(source)).unwrap();

    assert_ok!(monitor.refresh().await);
    assert!(monitor.is_over_threshold(Channel::Electricity));
    assert_eq!(monitor.latest_reading(Channel::Electricity), Some(221.0));

    assert_ok!(monitor.refresh().await);
    assert!(!monitor.is_over_threshold(Channel::Electricity));
    assert_eq!(monitor.status(Channel::Electricity), AlertStatus::Normal);

    assert!(matches!(
        monitor.refresh().await,
        Err(MonitorError::SourceExhausted)
    ));
}

/// 测试监控器完整生命周期：启动、周期刷新、视图、停止
#[tokio::test(start_paused = true)]
async fn test_monitor_lifecycle() {
    let source = RampSource {
        electricity: 218.0,
        step: 1.0,
    };
    let monitor = AlertMonitor::new(default_definitions(), Box::new(source)).unwrap();
    let handle = monitor.spawn(Duration::from_secs(5)).unwrap();
    let mut rx = handle.subscribe();

    // 1. 启动即刷新：218V
    rx.changed().await.unwrap();
    assert!(!rx.borrow_and_update().is_over_threshold(Channel::Electricity));

    // 2. 两个周期后：220V，仍未超过
    sleep(Duration::from_secs(11)).await;
    let snapshot = handle.current();
    assert_eq!(snapshot.generation, 3);
    assert!(!snapshot.is_over_threshold(Channel::Electricity));

    // 3. 再一个周期：221V，超限
    sleep(Duration::from_secs(5)).await;
    let snapshot = handle.current();
    assert!(snapshot.is_over_threshold(Channel::Electricity));

    let view = DashboardView::from_snapshot(&snapshot);
    assert_eq!(view.breaches, vec![Channel::Electricity]);
    assert_eq!(view.total_active_alerts, 9 + 7 + 4);
    assert_eq!(view.history.len(), 4);

    let detail = AlertDetail::for_channel(&snapshot, Channel::Electricity).unwrap();
    assert_eq!(detail.latest, "221.0V");
    assert_eq!(detail.status_text, "Above threshold");

    let mut metrics = MonitorMetrics::new().unwrap();
    metrics.observe(&snapshot);
    assert!(metrics
        .export()
        .unwrap()
        .contains("shark_threshold_breach{channel=\"electricity\"} 1"));

    // 4. 停止后取回监控器
    let monitor = handle.shutdown().await.unwrap();
    assert_eq!(monitor.generation(), 4);
}

/// 测试 25 次刷新后窗口淘汰最旧读数
#[tokio::test(start_paused = true)]
async fn test_window_rolls_over_in_task() {
    let source = RampSource {
        electricity: 200.0,
        step: 0.5,
    };
    let monitor = AlertMonitor::new(default_definitions(), Box::new(source)).unwrap();
    let handle = monitor.spawn(Duration::from_secs(5)).unwrap();

    // t=0..=120s 共 25 次刷新
    sleep(Duration::from_secs(122)).await;
    let snapshot = handle.current();
    assert_eq!(snapshot.generation, 25);
    assert_eq!(snapshot.readings.len(), 24);
    assert_eq!(snapshot.readings[0].electricity, 200.5);
    assert_eq!(snapshot.latest_reading(Channel::Electricity), Some(212.0));

    handle.shutdown().await.unwrap();
}
