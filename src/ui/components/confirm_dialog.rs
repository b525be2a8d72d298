//! 确认弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::truncate;
use crate::dialogs::ConfirmAction;
use crate::theme::ThemeColors;

fn message(action: &ConfirmAction) -> Vec<String> {
    match action {
        ConfirmAction::DeleteTask { name, .. } => vec![
            format!("Task: {}", truncate(name, 30)),
            "Delete this task?".to_string(),
        ],
        ConfirmAction::DeleteCompleted { count } => {
            vec![format!("Delete {} completed task(s)?", count)]
        }
    }
}

/// 渲染确认弹窗
pub fn render(frame: &mut Frame, action: &ConfirmAction, colors: &ThemeColors) {
    let area = frame.area();

    let message_lines = message(action);
    let popup_width = 40u16.min(area.width);
    let popup_height = ((message_lines.len() as u16) + 5).min(area.height); // 边框 + 内容 + 提示

    // 居中显示
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // 清除背景
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(action.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.warning))
        .style(Style::default().bg(colors.bg));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let [content_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner_area);

    let styled_lines: Vec<Line> = message_lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(colors.text))))
        .collect();

    frame.render_widget(
        Paragraph::new(styled_lines).alignment(Alignment::Center),
        content_area,
    );

    let key_style = Style::default()
        .fg(colors.highlight)
        .add_modifier(Modifier::BOLD);
    let hint = Paragraph::new(Line::from(vec![
        Span::styled("Y", key_style),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" confirm  ", Style::default().fg(colors.muted)),
        Span::styled("N", key_style),
        Span::styled("/", Style::default().fg(colors.muted)),
        Span::styled("Esc", Style::default().fg(colors.highlight)),
        Span::styled(" cancel", Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}
