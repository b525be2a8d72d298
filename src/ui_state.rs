//! UI 状态管理
//!
//! 管理与显示相关的状态：主题、颜色、Toast。

use std::time::{Duration, Instant};

use crate::theme::{get_theme_colors, Theme, ThemeColors};

/// Toast 显示时长
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
/// 存储失败提示停留更久
pub const WARNING_TOAST_DURATION: Duration = Duration::from_secs(6);

/// Toast 级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel, duration: Duration) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// UI 状态
#[derive(Debug)]
pub struct UiState {
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
}

impl UiState {
    pub fn new(theme: Theme, colors: ThemeColors) -> Self {
        Self {
            toast: None,
            theme,
            colors,
        }
    }

    /// 显示普通提示
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, ToastLevel::Info, TOAST_DURATION));
    }

    /// 显示警告（修改未能保存到磁盘）
    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(
            message,
            ToastLevel::Warning,
            WARNING_TOAST_DURATION,
        ));
    }

    /// 显示错误
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, ToastLevel::Error, TOAST_DURATION));
    }

    /// 清除过期的 Toast
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// 切换到下一个主题
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.colors = get_theme_colors(self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> UiState {
        UiState::new(Theme::Dark, get_theme_colors(Theme::Dark))
    }

    #[test]
    fn test_show_toast_levels() {
        let mut state = state();
        assert!(state.toast.is_none());

        state.show_toast("Added");
        assert_eq!(state.toast.as_ref().unwrap().level, ToastLevel::Info);

        state.show_warning("not saved");
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Warning);
        assert_eq!(toast.message, "not saved");
    }

    #[test]
    fn test_clear_expired_toast() {
        let mut state = state();
        state.toast = Some(Toast::new("x", ToastLevel::Info, Duration::from_millis(1)));
        std::thread::sleep(Duration::from_millis(2));
        state.clear_expired_toast();
        assert!(state.toast.is_none());

        state.show_toast("fresh");
        state.clear_expired_toast();
        assert!(state.toast.is_some());
    }

    #[test]
    fn test_cycle_theme() {
        let mut state = state();
        state.cycle_theme();
        assert_eq!(state.theme, Theme::Light);
    }
}
