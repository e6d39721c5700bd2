pub mod catalog;
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod model;
pub mod monitor;
pub mod snapshot;
pub mod source;
pub mod task;
pub mod view;
pub mod window;

pub use catalog::{default_definitions, RECOMMENDATIONS};
pub use error::{MonitorError, Result};
pub use metrics::MonitorMetrics;
pub use model::{AlertDefinition, AlertStatus, Channel, Sensor, SensorReading, Severity};
pub use monitor::{validate_definitions, AlertMonitor};
pub use snapshot::MonitorSnapshot;
pub use source::{RandomSource, ReadingSource, SequenceSource, SimulationProfile, ValueRange};
pub use task::{MonitorHandle, DEFAULT_REFRESH_PERIOD};
pub use view::{AlertCard, AlertDetail, AlertRow, BadgeTone, ChartBar, DashboardView, HistoryPoint};
pub use window::{ReadingWindow, DEFAULT_WINDOW_CAPACITY};
