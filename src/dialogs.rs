//! 对话框状态管理
//!
//! 任务表单（新建与编辑共用）和确认弹窗的数据。

use chrono::{Duration, NaiveDate};

use crate::date::{format_due_date, parse_due_date, DISPLAY_FORMAT};
use crate::error::Result;
use crate::storage::tasks::Task;

/// 表单当前焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    DueDate,
}

/// 表单用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(u64),
}

/// 任务表单
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub mode: FormMode,
    pub name: String,
    /// 截止日期输入框内容 (dd/mm/yyyy)
    pub due_input: String,
    pub focus: FormField,
    /// 上次提交失败的原因
    pub error: Option<String>,
}

impl TaskForm {
    /// 新建任务，截止日期默认今天
    pub fn new_task(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            due_input: today.format(DISPLAY_FORMAT).to_string(),
            focus: FormField::Name,
            error: None,
        }
    }

    /// 编辑已有任务，预填当前值
    pub fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            name: task.name.clone(),
            due_input: format_due_date(&task.due_date),
            focus: FormField::Name,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => " Add Task ",
            FormMode::Edit(_) => " Edit Task ",
        }
    }

    pub fn switch_field(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::DueDate,
            FormField::DueDate => FormField::Name,
        };
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::DueDate => &mut self.due_input,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
        self.error = None;
    }

    /// 日期选择：在当前输入的日期上加减天数（输入无效时从今天开始）
    pub fn shift_days(&mut self, days: i64, today: NaiveDate) {
        let base = self.parsed_due(today).unwrap_or(today);
        let shifted = base + Duration::days(days);
        self.due_input = shifted.format(DISPLAY_FORMAT).to_string();
        self.error = None;
    }

    pub fn parsed_due(&self, today: NaiveDate) -> Result<NaiveDate> {
        parse_due_date(&self.due_input, today)
    }
}

/// 确认弹窗类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// 删除单个任务
    DeleteTask { id: u64, name: String },
    /// 删除所有已完成任务
    DeleteCompleted { count: usize },
}

impl ConfirmAction {
    pub fn title(&self) -> &'static str {
        match self {
            ConfirmAction::DeleteTask { .. } => " Delete ",
            ConfirmAction::DeleteCompleted { .. } => " Clear Completed ",
        }
    }
}

/// 对话框状态
#[derive(Debug, Default)]
pub struct DialogState {
    /// 新建/编辑任务表单
    pub task_form: Option<TaskForm>,
    /// 确认弹窗
    pub confirm: Option<ConfirmAction>,
}

impl DialogState {
    /// 关闭所有对话框
    pub fn close_all(&mut self) {
        self.task_form = None;
        self.confirm = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::to_due_date;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_new_task_defaults() {
        let form = TaskForm::new_task(today());
        assert_eq!(form.mode, FormMode::Add);
        assert_eq!(form.due_input, "31/01/2024");
        assert_eq!(form.focus, FormField::Name);
        assert_eq!(form.title(), " Add Task ");
    }

    #[test]
    fn test_edit_prefills() {
        let task = Task {
            id: 4,
            name: "Pay rent".to_string(),
            due_date: to_due_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            is_completed: true,
        };
        let form = TaskForm::edit(&task);
        assert_eq!(form.mode, FormMode::Edit(4));
        assert_eq!(form.name, "Pay rent");
        assert_eq!(form.due_input, "15/01/2024");
        assert_eq!(form.title(), " Edit Task ");
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = TaskForm::new_task(today());
        form.input_char('h');
        form.input_char('i');
        form.switch_field();
        form.backspace();
        assert_eq!(form.name, "hi");
        assert_eq!(form.due_input, "31/01/202");
        assert!(form.parsed_due(today()).is_err());
    }

    #[test]
    fn test_shift_days_crosses_month() {
        let mut form = TaskForm::new_task(today());
        form.shift_days(1, today());
        assert_eq!(form.due_input, "01/02/2024");
        form.shift_days(-7, today());
        assert_eq!(form.due_input, "25/01/2024");

        form.due_input = "garbage".to_string();
        form.shift_days(1, today());
        assert_eq!(form.due_input, "01/02/2024");
    }

    #[test]
    fn test_dialog_state() {
        let mut dialogs = DialogState::default();
        dialogs.task_form = Some(TaskForm::new_task(today()));
        dialogs.confirm = Some(ConfirmAction::DeleteCompleted { count: 2 });
        assert_eq!(dialogs.confirm.as_ref().unwrap().title(), " Clear Completed ");

        dialogs.close_all();
        assert!(dialogs.task_form.is_none());
        assert!(dialogs.confirm.is_none());
    }
}
