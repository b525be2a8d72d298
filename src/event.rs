use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::dialogs::FormField;

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 更新 Toast 状态
    app.tick();

    // 轮询事件（100ms 超时）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            handle_key(app, key);
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    // 优先处理弹窗事件
    if app.dialogs.confirm.is_some() {
        handle_confirm_key(app, key);
        return;
    }

    if app.dialogs.task_form.is_some() {
        handle_task_form_key(app, key);
        return;
    }

    handle_list_key(app, key);
}

/// 任务列表
fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('n') => app.open_new_task_dialog(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_dialog(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('d') => app.request_delete_selected(),
        KeyCode::Char('D') => app.request_delete_completed(),
        KeyCode::Char('t') => app.cycle_theme(),
        _ => {}
    }
}

/// 确认弹窗
fn handle_confirm_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_dialog(),
        _ => {}
    }
}

/// 新建/编辑表单
fn handle_task_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.cancel_dialog();
            return;
        }
        KeyCode::Enter => {
            app.submit_task_form();
            return;
        }
        _ => {}
    }

    let today = app.today;
    let Some(form) = app.dialogs.task_form.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => form.switch_field(),
        KeyCode::Backspace => form.backspace(),
        // 日期选择：↑/↓ 一天，+/- 一周
        KeyCode::Up if form.focus == FormField::DueDate => form.shift_days(1, today),
        KeyCode::Down if form.focus == FormField::DueDate => form.shift_days(-1, today),
        KeyCode::Char('+') if form.focus == FormField::DueDate => form.shift_days(7, today),
        KeyCode::Char('-') if form.focus == FormField::DueDate => form.shift_days(-7, today),
        KeyCode::Char(c) => form.input_char(c),
        _ => {}
    }
}
