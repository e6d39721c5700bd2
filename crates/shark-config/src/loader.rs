use anyhow::{anyhow, Result};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::SharkConfig;

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "monitor.toml";

/// 环境变量前缀，例如 SHARK__MONITOR__REFRESH_INTERVAL_SECS
pub const ENV_PREFIX: &str = "SHARK";

/// 配置加载器
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// 创建配置加载器
    pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// 加载配置：默认值 < monitor.toml < 环境变量
    pub fn load(&self) -> Result<SharkConfig> {
        let config_path = self.config_path();
        let path_str = config_path
            .to_str()
            .ok_or_else(|| anyhow!("Invalid config path"))?;

        if !config_path.exists() {
            info!(path = %config_path.display(), "Config file not found, using defaults");
        }

        let config = Config::builder()
            .add_source(File::new(path_str, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// 加载并校验配置
    pub fn load_validated(&self) -> Result<SharkConfig> {
        let config = self.load()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(config: &SharkConfig) -> Result<()> {
        if config.monitor.refresh_interval_secs == 0 {
            return Err(anyhow!("refresh_interval_secs must be greater than 0"));
        }

        if config.monitor.window_capacity == 0 {
            return Err(anyhow!("window_capacity must be greater than 0"));
        }

        config.simulation.validate()?;
        shark_alert::validate_definitions(&config.alerts)?;

        Ok(())
    }
}
