//! 日志初始化
//!
//! stdout/stderr 属于 TUI 和 CLI，日志写入 {data_dir}/duelist.log。
//! 过滤级别读取 `DUELIST_LOG`（默认 info）。

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// 日志级别环境变量
pub const LOG_ENV: &str = "DUELIST_LOG";

/// 日志文件路径
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("duelist.log")
}

/// 初始化全局 subscriber；日志文件打不开时静默跳过
pub fn init(data_dir: &Path) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(data_dir))
    {
        Ok(f) => f,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
