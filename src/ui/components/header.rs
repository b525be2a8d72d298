use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

/// Header 高度：上下边框 + 1 行
pub const HEADER_HEIGHT: u16 = 3;

/// 渲染顶部标题栏（标题 + 计数 + 数据文件）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    total: usize,
    completed: usize,
    tasks_path: &str,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let line = Line::from(vec![
        Span::styled(
            " To-Do List",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   {} tasks · {} done", total, completed),
            Style::default().fg(colors.text),
        ),
        Span::styled(
            format!("   {}", shorten_path(tasks_path)),
            Style::default().fg(colors.muted),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Replace home directory prefix with ~
fn shorten_path(path: &str) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Some(home_str) = home.to_str() {
            if let Some(stripped) = path.strip_prefix(home_str) {
                return format!("~{}", stripped);
            }
        }
    }
    path.to_string()
}
