pub mod config;
pub mod tasks;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 默认数据目录 ~/.duelist/
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".duelist")
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 将数据序列化后原子性写入 TOML 文件
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let content =
        toml::to_string_pretty(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_atomic(path, content.as_bytes())
}

/// 先写临时文件再 rename，读者永远看不到写了一半的文件
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("toml.tmp");
    if let Err(e) = write_synced(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    // 原子替换
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// 写入并刷到磁盘，rename 之后不会暴露空文件
fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.toml");

        save_toml(&path, &Sample { value: 7 }).unwrap();
        let loaded: Sample = load_toml(&path).unwrap();
        assert_eq!(loaded, Sample { value: 7 });
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.toml");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_atomic_failure_leaves_old_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.toml");
        write_atomic(&path, b"first").unwrap();

        // 临时文件路径被目录占用，写入失败
        fs::create_dir(path.with_extension("toml.tmp")).unwrap();
        assert!(write_atomic(&path, b"second").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_load_toml_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "value = \"not a number\"").unwrap();

        let err = load_toml::<Sample>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
