use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::App;

use super::components::{confirm_dialog, empty_state, footer, header, task_dialog, task_list, toast};

/// 渲染任务页面
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.ui.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let store = app.service.store();
    let tasks = store.tasks();
    let tasks_path = store.path().to_string_lossy().to_string();
    header::render(
        frame,
        header_area,
        store.len(),
        app.completed_count(),
        &tasks_path,
        colors,
    );

    if store.is_empty() {
        empty_state::render(frame, list_area, colors);
    } else {
        task_list::render(
            frame,
            list_area,
            tasks,
            app.list_state.selected(),
            app.today,
            colors,
        );
    }

    footer::render(frame, footer_area, !tasks.is_empty(), colors);

    // 弹窗
    if let Some(form) = &app.dialogs.task_form {
        task_dialog::render(frame, form, colors);
    }
    if let Some(action) = &app.dialogs.confirm {
        confirm_dialog::render(frame, action, colors);
    }

    // Toast 在最上层
    if let Some(t) = &app.ui.toast {
        toast::render(frame, t, colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::tasks::{TaskService, ValidationPolicy};
    use crate::storage::config::Config;
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_in(dir: &std::path::Path) -> App {
        let service = TaskService::open(dir, ValidationPolicy::default()).unwrap();
        let mut config = Config::default();
        config.theme.name = "Dark".to_string();
        let mut app = App::new(service, config, dir.to_path_buf());
        app.today = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        app
    }

    #[test]
    fn test_render_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(dir.path());
        let text = screen_text(&app);
        assert!(text.contains("No tasks yet"));
        assert!(text.contains("0 tasks"));
    }

    #[test]
    fn test_render_tasks_and_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        let due = crate::date::to_due_date(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        let _ = app.service.add_task("Buy milk", due).unwrap();
        app.ensure_selection();

        let text = screen_text(&app);
        assert!(text.contains("Buy milk"));
        assert!(text.contains("10/01/2024"));
        assert!(text.contains("[ ]"));

        app.open_edit_dialog();
        let text = screen_text(&app);
        assert!(text.contains("Edit Task"));
    }
}
