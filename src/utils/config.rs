use crate::models::types::BotConfig;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct ConfigManager {
    pub config: BotConfig,
    config_path: String,
}

impl ConfigManager {
    /// 設定檔不存在時寫出預設值
    pub fn new(config_path: &str) -> Result<Self, ConfigError> {
        let mut manager = Self {
            config: BotConfig::default(),
            config_path: config_path.to_string(),
        };

        manager.load_config()?;
        Ok(manager)
    }

    pub fn load_config(&mut self) -> Result<(), ConfigError> {
        if Path::new(&self.config_path).exists() {
            let content = fs::read_to_string(&self.config_path)?;
            self.config = serde_json::from_str(&content)?;
        } else {
            self.save_config()?;
        }

        Ok(())
    }

    pub fn save_config(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn selection_timeout(&self) -> Duration {
        Duration::from_secs(self.config.selection_timeout_secs.max(1))
    }

    pub fn into_config(self) -> BotConfig {
        self.config
    }
}
