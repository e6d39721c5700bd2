use crate::error::{MonitorError, Result};
use crate::model::SensorReading;
use std::collections::VecDeque;

/// 默认窗口容量（24 小时历史）
pub const DEFAULT_WINDOW_CAPACITY: usize = 24;

/// 固定容量的读数窗口
///
/// 按时间顺序保存最近的读数，写满后淘汰最旧的一条（FIFO）。
#[derive(Debug, Clone)]
pub struct ReadingWindow {
    readings: VecDeque<SensorReading>,
    capacity: usize,
}

impl ReadingWindow {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MonitorError::invalid_config(
                "reading window capacity must be greater than 0",
            ));
        }

        Ok(Self {
            readings: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// 追加读数，返回被淘汰的最旧读数
    pub fn push(&mut self, reading: SensorReading) -> Option<SensorReading> {
        let evicted = if self.readings.len() == self.capacity {
            self.readings.pop_front()
        } else {
            None
        };
        self.readings.push_back(reading);
        evicted
    }

    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.back()
    }

    pub fn oldest(&self) -> Option<&SensorReading> {
        self.readings.front()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 从旧到新遍历
    pub fn iter(&self) -> impl Iterator<Item = &SensorReading> {
        self.readings.iter()
    }

    pub fn to_vec(&self) -> Vec<SensorReading> {
        self.readings.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.readings.clear();
    }
}

impl Default for ReadingWindow {
    fn default() -> Self {
        Self {
            readings: VecDeque::with_capacity(DEFAULT_WINDOW_CAPACITY),
            capacity: DEFAULT_WINDOW_CAPACITY,
        }
    }
}
