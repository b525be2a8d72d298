//! 新建/编辑任务弹窗组件

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::dialogs::{FormField, TaskForm};
use crate::theme::ThemeColors;

/// 渲染任务表单弹窗
pub fn render(frame: &mut Frame, form: &TaskForm, colors: &ThemeColors) {
    let area = frame.area();

    // 计算弹窗尺寸
    let popup_width = 60u16.min(area.width.saturating_sub(4));
    let popup_height = 10u16.min(area.height);

    // 居中显示
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // 清除背景
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(form.title())
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.highlight))
        .style(Style::default().bg(colors.bg));

    let inner_area = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    // 空行 + 名称 + 日期 + 空行 + 错误行 + 空行 + 提示行
    let [_, name_area, due_area, _, error_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    frame.render_widget(
        Paragraph::new(field_line(
            "  Task Name: ",
            &form.name,
            form.focus == FormField::Name,
            colors,
        )),
        name_area,
    );
    frame.render_widget(
        Paragraph::new(field_line(
            "  Due Date:  ",
            &form.due_input,
            form.focus == FormField::DueDate,
            colors,
        )),
        due_area,
    );

    if let Some(error) = &form.error {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("  {}", error),
                Style::default().fg(colors.error),
            )),
            error_area,
        );
    }

    // 日期字段聚焦时显示日期选择按键
    let mut hint = vec![
        Span::styled("Enter", Style::default().fg(colors.highlight)),
        Span::styled(" save  ", Style::default().fg(colors.muted)),
        Span::styled("Tab", Style::default().fg(colors.highlight)),
        Span::styled(" field  ", Style::default().fg(colors.muted)),
    ];
    if form.focus == FormField::DueDate {
        hint.push(Span::styled("↑↓", Style::default().fg(colors.highlight)));
        hint.push(Span::styled(" day  ", Style::default().fg(colors.muted)));
        hint.push(Span::styled("+/-", Style::default().fg(colors.highlight)));
        hint.push(Span::styled(" week  ", Style::default().fg(colors.muted)));
    }
    hint.push(Span::styled("Esc", Style::default().fg(colors.highlight)));
    hint.push(Span::styled(" cancel", Style::default().fg(colors.muted)));

    frame.render_widget(
        Paragraph::new(Line::from(hint)).alignment(Alignment::Center),
        hint_area,
    );
}

/// "  Label: {value}█"，光标只在聚焦字段显示
fn field_line<'a>(
    label: &'a str,
    value: &'a str,
    focused: bool,
    colors: &ThemeColors,
) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(colors.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted)
    };

    let mut spans = vec![
        Span::styled(label, label_style),
        Span::styled(value, Style::default().fg(colors.text)),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }
    Line::from(spans)
}
