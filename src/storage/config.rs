//! 应用配置持久化

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{load_toml, save_toml};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 任务校验策略
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TasksConfig {
    /// 是否允许空名称（默认拒绝）
    #[serde(default)]
    pub allow_empty_name: bool,
}

/// 获取配置文件路径
fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// 加载配置（不存在或无法解析则返回默认值）
pub fn load_config(data_dir: &Path) -> Config {
    let path = config_path(data_dir);
    if !path.exists() {
        return Config::default();
    }
    match load_toml(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// 保存配置
pub fn save_config(data_dir: &Path, config: &Config) -> io::Result<()> {
    save_toml(&config_path(data_dir), config)
}
