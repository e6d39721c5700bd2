use crate::error::{MonitorError, Result};
use crate::model::{AlertDefinition, SensorReading};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 读数数据源
///
/// 监控器通过该接口获取读数和告警数，测试中可替换为确定性的实现。
#[async_trait]
pub trait ReadingSource: Send {
    fn name(&self) -> &str;

    /// 采集一条读数，时间戳由调用方给出
    async fn sample(&mut self, at: DateTime<Utc>) -> Result<SensorReading>;

    /// 为告警定义生成当前告警数
    fn alert_count(&mut self, definition: &AlertDefinition) -> u32;
}

/// 数值区间（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// 模拟参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationProfile {
    pub temperature: ValueRange,
    pub humidity: ValueRange,
    pub electricity: ValueRange,
    /// 固定种子，用于复现
    pub seed: Option<u64>,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            temperature: ValueRange::new(20.0, 35.0),
            humidity: ValueRange::new(50.0, 80.0),
            electricity: ValueRange::new(200.0, 240.0),
            seed: None,
        }
    }
}

impl SimulationProfile {
    pub fn validate(&self) -> Result<()> {
        for (name, range) in [
            ("temperature", &self.temperature),
            ("humidity", &self.humidity),
            ("electricity", &self.electricity),
        ] {
            if !range.is_valid() {
                return Err(MonitorError::invalid_config(format!(
                    "invalid {} range: {}..={}",
                    name, range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// 随机模拟数据源
pub struct RandomSource {
    profile: SimulationProfile,
    rng: StdRng,
}

impl RandomSource {
    pub fn new(profile: SimulationProfile) -> Result<Self> {
        profile.validate()?;

        let rng = match profile.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { profile, rng })
    }

    pub fn profile(&self) -> &SimulationProfile {
        &self.profile
    }

    fn draw(&mut self, range: ValueRange) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }
}

#[async_trait]
impl ReadingSource for RandomSource {
    fn name(&self) -> &str {
        "random"
    }

    async fn sample(&mut self, at: DateTime<Utc>) -> Result<SensorReading> {
        let SimulationProfile {
            temperature,
            humidity,
            electricity,
            ..
        } = self.profile;
        let temperature = self.draw(temperature);
        let humidity = self.draw(humidity);
        let electricity = self.draw(electricity);
        Ok(SensorReading::new(at, temperature, humidity, electricity))
    }

    fn alert_count(&mut self, definition: &AlertDefinition) -> u32 {
        if definition.max_count == 0 {
            return 0;
        }
        self.rng.gen_range(0..definition.max_count)
    }
}

/// 预设序列数据源
///
/// 按顺序回放预设读数，读数耗尽后 `sample` 返回 `SourceExhausted`。
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    readings: VecDeque<(f64, f64, f64)>,
    counts: VecDeque<u32>,
    default_count: u32,
}

impl SequenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条读数（温度、湿度、电压）
    pub fn with_reading(mut self, temperature: f64, humidity: f64, electricity: f64) -> Self {
        self.readings.push_back((temperature, humidity, electricity));
        self
    }

    pub fn with_readings<I>(mut self, readings: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        self.readings.extend(readings);
        self
    }

    /// 追加告警数，按定义顺序依次消费
    pub fn with_counts<I>(mut self, counts: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.counts.extend(counts);
        self
    }

    /// 预设告警数耗尽后使用的值
    pub fn with_default_count(mut self, count: u32) -> Self {
        self.default_count = count;
        self
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

#[async_trait]
impl ReadingSource for SequenceSource {
    fn name(&self) -> &str {
        "sequence"
    }

    async fn sample(&mut self, at: DateTime<Utc>) -> Result<SensorReading> {
        let (temperature, humidity, electricity) = self
            .readings
            .pop_front()
            .ok_or(MonitorError::SourceExhausted)?;
        Ok(SensorReading::new(at, temperature, humidity, electricity))
    }

    fn alert_count(&mut self, _definition: &AlertDefinition) -> u32 {
        self.counts.pop_front().unwrap_or(self.default_count)
    }
}
