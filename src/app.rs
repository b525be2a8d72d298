use std::path::PathBuf;

use chrono::NaiveDate;
use ratatui::widgets::TableState;
use tracing::warn;

use crate::date::{self, to_due_date};
use crate::dialogs::{ConfirmAction, DialogState, FormMode, TaskForm};
use crate::error::TaskError;
use crate::operations::tasks::{Applied, TaskService};
use crate::storage::config::{self, Config};
use crate::storage::tasks::Task;
use crate::theme::{get_theme_colors, Theme};
use crate::ui_state::UiState;

const NOT_SAVED: &str = "Not saved to disk, changes may not survive a restart";

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务服务（唯一可修改任务列表的入口）
    pub service: TaskService,
    /// 列表选择状态
    pub list_state: TableState,
    /// 对话框状态
    pub dialogs: DialogState,
    /// UI 状态
    pub ui: UiState,
    /// 今天（用于默认日期和逾期判断）
    pub today: NaiveDate,
    config: Config,
    data_dir: PathBuf,
}

impl App {
    pub fn new(service: TaskService, config: Config, data_dir: PathBuf) -> Self {
        let theme = Theme::from_name(&config.theme.name);
        let colors = get_theme_colors(theme);

        let mut app = Self {
            should_quit: false,
            service,
            list_state: TableState::default(),
            dialogs: DialogState::default(),
            ui: UiState::new(theme, colors),
            today: date::today(),
            config,
            data_dir,
        };
        app.ensure_selection();
        app
    }

    pub fn tasks(&self) -> &[Task] {
        self.service.tasks()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|i| self.service.tasks().get(i))
    }

    pub fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|t| t.is_completed).count()
    }

    /// 确保选中项在范围内
    pub fn ensure_selection(&mut self) {
        let len = self.tasks().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((current + 1) % len));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let len = self.tasks().len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let prev = if current == 0 { len - 1 } else { current - 1 };
        self.list_state.select(Some(prev));
    }

    /// 打开新建任务弹窗
    pub fn open_new_task_dialog(&mut self) {
        self.dialogs.task_form = Some(TaskForm::new_task(self.today));
    }

    /// 打开编辑弹窗（编辑当前选中任务）
    pub fn open_edit_dialog(&mut self) {
        if let Some(task) = self.selected_task() {
            self.dialogs.task_form = Some(TaskForm::edit(task));
        }
    }

    /// 提交任务表单；失败时表单保持打开并显示原因
    pub fn submit_task_form(&mut self) {
        let Some(form) = self.dialogs.task_form.as_mut() else {
            return;
        };

        let due = match form.parsed_due(self.today) {
            Ok(d) => to_due_date(d),
            Err(e) => {
                form.error = Some(e.to_string());
                return;
            }
        };
        let name = form.name.clone();
        let mode = form.mode;

        let result = match mode {
            FormMode::Add => self.service.add_task(&name, due).map(|applied| {
                let id = applied.value.id;
                (applied.storage_error, Some(id), "Task added")
            }),
            FormMode::Edit(id) => self
                .service
                .edit_task(id, &name, due)
                .map(|applied| (applied.storage_error, None, "Task updated")),
        };

        match result {
            Ok((storage_error, new_id, message)) => {
                self.dialogs.task_form = None;
                if let Some(id) = new_id {
                    self.select_id(id);
                }
                self.notify(storage_error, message);
            }
            Err(TaskError::NotFound(id)) => {
                // 任务已被删除：关闭表单，不复活
                self.dialogs.task_form = None;
                self.ensure_selection();
                self.ui.show_error(format!("Task {} no longer exists", id));
            }
            Err(e) => {
                if let Some(form) = self.dialogs.task_form.as_mut() {
                    form.error = Some(e.to_string());
                }
            }
        }
    }

    /// 切换选中任务的完成状态
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id) else {
            return;
        };
        match self.service.toggle_complete(id) {
            Ok(applied) => {
                let message = if applied.value {
                    "Marked completed"
                } else {
                    "Marked not completed"
                };
                self.notify(applied.storage_error, message);
            }
            Err(e) => self.ui.show_error(e.to_string()),
        }
    }

    /// 请求删除选中任务（弹出确认）
    pub fn request_delete_selected(&mut self) {
        if let Some(task) = self.selected_task() {
            self.dialogs.confirm = Some(ConfirmAction::DeleteTask {
                id: task.id,
                name: task.name.clone(),
            });
        }
    }

    /// 请求删除所有已完成任务
    pub fn request_delete_completed(&mut self) {
        let count = self.completed_count();
        if count == 0 {
            self.ui.show_toast("No completed tasks");
            return;
        }
        self.dialogs.confirm = Some(ConfirmAction::DeleteCompleted { count });
    }

    /// 执行确认弹窗中的操作
    pub fn confirm(&mut self) {
        let Some(action) = self.dialogs.confirm.take() else {
            return;
        };
        match action {
            ConfirmAction::DeleteTask { id, .. } => {
                let applied = self.service.delete_task(id);
                let message = if applied.value {
                    "Task deleted"
                } else {
                    "Task was already gone"
                };
                self.finish(applied, message);
            }
            ConfirmAction::DeleteCompleted { .. } => {
                let applied = self.service.delete_completed();
                let message = format!("Deleted {} completed task(s)", applied.value);
                self.finish(applied, &message);
            }
        }
        self.ensure_selection();
    }

    pub fn cancel_dialog(&mut self) {
        self.dialogs.close_all();
    }

    /// 切换主题并写回配置
    pub fn cycle_theme(&mut self) {
        self.ui.cycle_theme();
        self.config.theme.name = self.ui.theme.label().to_string();
        match config::save_config(&self.data_dir, &self.config) {
            Ok(()) => self
                .ui
                .show_toast(format!("Theme: {}", self.ui.theme.label())),
            Err(e) => {
                warn!(error = %e, "failed to save config");
                self.ui.show_warning(format!("Theme not saved: {}", e));
            }
        }
    }

    /// 更新 Toast / 日期（每次事件循环调用）
    pub fn tick(&mut self) {
        self.ui.clear_expired_toast();
        self.today = date::today();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    fn select_id(&mut self, id: u64) {
        let index = self.tasks().iter().position(|t| t.id == id);
        self.list_state.select(index);
    }

    fn finish<T>(&mut self, applied: Applied<T>, message: &str) {
        self.notify(applied.storage_error, message);
    }

    fn notify(&mut self, storage_error: Option<TaskError>, message: &str) {
        match storage_error {
            None => self.ui.show_toast(message),
            Some(e) => {
                warn!(error = %e, "change kept in memory only");
                self.ui.show_warning(NOT_SAVED);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::tasks::ValidationPolicy;
    use crate::ui_state::ToastLevel;
    use std::path::Path;

    fn app_in(dir: &Path) -> App {
        let service = TaskService::open(dir, ValidationPolicy::default()).unwrap();
        let mut config = Config::default();
        config.theme.name = "Dark".to_string();
        let mut app = App::new(service, config, dir.to_path_buf());
        app.today = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
        app
    }

    fn add_via_form(app: &mut App, name: &str, due: &str) {
        app.open_new_task_dialog();
        let form = app.dialogs.task_form.as_mut().unwrap();
        form.name = name.to_string();
        form.due_input = due.to_string();
        app.submit_task_form();
    }

    #[test]
    fn test_add_selects_new_task() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        assert!(app.selected_task().is_none());

        add_via_form(&mut app, "Buy milk", "10/01/2024");
        add_via_form(&mut app, "Pay rent", "15/01/2024");

        assert!(app.dialogs.task_form.is_none());
        assert_eq!(app.tasks().len(), 2);
        assert_eq!(app.selected_task().unwrap().name, "Pay rent");
        assert_eq!(app.ui.toast.as_ref().unwrap().level, ToastLevel::Info);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());

        add_via_form(&mut app, "", "10/01/2024");
        let form = app.dialogs.task_form.as_ref().unwrap();
        assert!(form.error.as_ref().unwrap().contains("empty"));

        add_via_form(&mut app, "x", "99/99/2024");
        assert!(app.dialogs.task_form.as_ref().unwrap().error.is_some());
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn test_edit_selected() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        add_via_form(&mut app, "Draft", "10/01/2024");

        app.open_edit_dialog();
        let form = app.dialogs.task_form.as_mut().unwrap();
        assert_eq!(form.due_input, "10/01/2024");
        form.name = "Final".to_string();
        app.submit_task_form();

        assert_eq!(app.tasks()[0].name, "Final");
        assert_eq!(app.tasks()[0].id, 0);
    }

    #[test]
    fn test_edit_of_deleted_task_does_not_resurrect() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        add_via_form(&mut app, "Gone soon", "10/01/2024");
        app.open_edit_dialog();

        let _ = app.service.delete_task(0);
        app.submit_task_form();

        assert!(app.tasks().is_empty());
        assert!(app.dialogs.task_form.is_none());
        assert_eq!(app.ui.toast.as_ref().unwrap().level, ToastLevel::Error);
    }

    #[test]
    fn test_toggle_and_clear_completed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        add_via_form(&mut app, "Buy milk", "10/01/2024");
        add_via_form(&mut app, "Pay rent", "15/01/2024");

        app.list_state.select(Some(0));
        app.toggle_selected();
        assert_eq!(app.completed_count(), 1);

        app.request_delete_completed();
        assert_eq!(
            app.dialogs.confirm,
            Some(ConfirmAction::DeleteCompleted { count: 1 })
        );
        app.confirm();

        assert_eq!(app.tasks().len(), 1);
        assert_eq!(app.tasks()[0].name, "Pay rent");
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_delete_last_task_clears_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        add_via_form(&mut app, "Only", "10/01/2024");

        app.request_delete_selected();
        app.confirm();
        assert!(app.tasks().is_empty());
        assert_eq!(app.list_state.selected(), None);

        // 无已完成任务时不弹窗
        app.request_delete_completed();
        assert!(app.dialogs.confirm.is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        for name in ["a", "b", "c"] {
            add_via_form(&mut app, name, "today");
        }
        app.list_state.select(Some(2));
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn test_storage_failure_shows_warning() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut app = app_in(&blocker);

        add_via_form(&mut app, "volatile", "10/01/2024");
        assert_eq!(app.tasks().len(), 1);
        let toast = app.ui.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Warning);
        assert_eq!(toast.message, NOT_SAVED);
    }

    #[test]
    fn test_cycle_theme_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.cycle_theme();
        assert_eq!(app.ui.theme, Theme::Light);
        assert_eq!(config::load_config(dir.path()).theme.name, "Light");
    }
}
