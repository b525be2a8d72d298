use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::date::{format_due_date, is_overdue};
use crate::storage::tasks::Task;
use crate::theme::ThemeColors;

/// 渲染任务列表（插入顺序，不排序）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected_index: Option<usize>,
    today: NaiveDate,
    colors: &ThemeColors,
) {
    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from(""), // 复选框
        Cell::from("TASK"),
        Cell::from("DUE"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected { "❯" } else { " " };
            let checkbox = if task.is_completed { "[x]" } else { "[ ]" };

            let name_style = if task.is_completed {
                Style::default()
                    .fg(colors.muted)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(colors.text)
            };

            let due_style = if is_overdue(task, today) {
                Style::default().fg(colors.error)
            } else {
                Style::default().fg(colors.muted)
            };

            let checkbox_style = if task.is_completed {
                Style::default().fg(colors.done)
            } else {
                Style::default().fg(colors.muted)
            };

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(checkbox).style(checkbox_style),
                Cell::from(task.name.clone()).style(name_style),
                Cell::from(format_due_date(&task.due_date)).style(due_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Length(4),  // 复选框
        Constraint::Fill(1),    // TASK (flex)
        Constraint::Length(12), // DUE
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::RIGHT)
                .border_style(Style::default().fg(colors.border)),
        )
        .row_highlight_style(
            Style::default()
                .bg(colors.bg_secondary)
                .add_modifier(Modifier::BOLD),
        );

    // 渲染表格（使用 TableState）
    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}
