//! 系统深浅色检测

use std::process::Command;

/// 检测终端/系统是否为深色
///
/// 优先读取终端的 `COLORFGBG`（"前景;背景"），其次询问 macOS 系统设置。
pub fn detect_system_theme() -> bool {
    if let Ok(value) = std::env::var("COLORFGBG") {
        if let Some(dark) = parse_colorfgbg(&value) {
            return dark;
        }
    }

    // AppleInterfaceStyle 不存在（命令失败）即浅色模式，非 macOS 同理
    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|output| {
            output.status.success()
                && String::from_utf8_lossy(&output.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
        })
        .unwrap_or(false)
}

/// 背景色 0-6 或 8 视为深色
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg <= 6 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("default"), None);
    }

    #[test]
    fn test_detect_system_theme() {
        // 只是确保函数不会 panic
        let _is_dark = detect_system_theme();
    }
}
