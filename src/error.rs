//! Duelist 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。

use std::io;
use thiserror::Error;

/// Duelist 错误类型
#[derive(Debug, Error)]
pub enum TaskError {
    /// I/O 错误（终端、日志文件等，不含任务持久化）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 持久化失败：读写 tasks.toml 出错或文件内容无法解码
    #[error("Storage error: {0}")]
    Storage(String),

    /// 任务不存在（id 已删除或从未存在）
    #[error("Task not found: {0}")]
    NotFound(u64),

    /// 输入校验失败
    #[error("Invalid task: {0}")]
    Validation(String),

    /// 无法解析的日期文本
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Duelist Result 类型别名
pub type Result<T> = std::result::Result<T, TaskError>;

impl TaskError {
    /// 创建 Storage 错误
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// 创建 Validation 错误
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// 创建 InvalidDate 错误
    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskError::NotFound(5);
        assert_eq!(err.to_string(), "Task not found: 5");

        let err = TaskError::storage("disk full");
        assert_eq!(err.to_string(), "Storage error: disk full");

        let err = TaskError::validation("name must not be empty");
        assert_eq!(err.to_string(), "Invalid task: name must not be empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: TaskError = io_err.into();
        assert!(matches!(err, TaskError::Io(_)));
    }
}
