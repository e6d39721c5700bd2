use crate::error::{MonitorError, Result};
use crate::monitor::AlertMonitor;
use crate::snapshot::MonitorSnapshot;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

/// 默认刷新周期
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(5);

/// 刷新任务句柄
///
/// 任务独占监控器，通过 watch 通道发布快照。调用 `shutdown` 停止任务并取回监控器；
/// 句柄被丢弃时任务会被中止。
pub struct MonitorHandle {
    snapshot_rx: watch::Receiver<MonitorSnapshot>,
    shutdown_tx: watch::Sender<bool>,
    join_handle: Option<JoinHandle<AlertMonitor>>,
}

impl MonitorHandle {
    /// 订阅快照更新
    pub fn subscribe(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshot_rx.clone()
    }

    /// 最新快照
    pub fn current(&self) -> MonitorSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join_handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }

    /// 停止刷新任务并取回监控器
    pub async fn shutdown(mut self) -> Result<AlertMonitor> {
        let _ = self.shutdown_tx.send(true);
        let join_handle = self
            .join_handle
            .take()
            .ok_or_else(|| MonitorError::Task("monitor task already detached".to_string()))?;

        join_handle
            .await
            .map_err(|e| MonitorError::Task(e.to_string()))
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(join_handle) = self.join_handle.take() {
            join_handle.abort();
        }
    }
}

impl AlertMonitor {
    /// 启动周期刷新任务
    ///
    /// 启动时立即刷新一次，之后每个 `period` 刷新一次。
    pub fn spawn(self, period: Duration) -> Result<MonitorHandle> {
        if period.is_zero() {
            return Err(MonitorError::invalid_config(
                "refresh period must be greater than 0",
            ));
        }

        let (snapshot_tx, snapshot_rx) = watch::channel(self.snapshot());
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let mut monitor = self;

        let join_handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(period = ?period, "Alert monitor task started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match monitor.refresh().await {
                            Ok(()) => {
                                snapshot_tx.send_replace(monitor.snapshot());
                            }
                            Err(e) => {
                                warn!(error = %e, "Alert monitor refresh failed");
                            }
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!(generation = monitor.generation(), "Alert monitor task stopped");
            monitor
        });

        Ok(MonitorHandle {
            snapshot_rx,
            shutdown_tx,
            join_handle: Some(join_handle),
        })
    }
}
