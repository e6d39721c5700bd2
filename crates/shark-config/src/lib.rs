pub mod global;
pub mod loader;

pub use global::{MonitorSettings, SharkConfig, SystemConfig};
pub use loader::{ConfigLoader, CONFIG_FILE_NAME, ENV_PREFIX};
