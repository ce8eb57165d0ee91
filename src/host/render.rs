// Rendering for the simulated device screen
//
// One status bar row on top, the active screen below. The terminal body is
// green-on-black text kept scrolled so the cursor line stays visible.

use super::screen::HostScreen;
use crate::terminal::{TerminalView, ViewId};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the device screen; returns the body area for touch mapping
pub fn draw(
    f: &mut Frame,
    screen: &HostScreen,
    view: &TerminalView,
    commands: &[String],
) -> Rect {
    let [status, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(f.area());

    draw_status_bar(f, status, screen);

    match screen.active() {
        ViewId::Terminal => draw_terminal(f, body, view),
        ViewId::OptionsMenu => draw_options_menu(f, body, commands),
    }

    body
}

fn draw_status_bar(f: &mut Frame, area: Rect, screen: &HostScreen) {
    let label = screen
        .status_label()
        .unwrap_or_else(|| screen.active().as_str().to_string());

    let hint = match screen.active() {
        ViewId::Terminal => "click:touch  ↑↓:scroll  Enter:stop  q:quit",
        ViewId::OptionsMenu => "t:terminal  q:quit",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(hint, Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn draw_terminal(f: &mut Frame, area: Rect, view: &TerminalView) {
    let Some(context) = view.context() else {
        return;
    };

    let visible = usize::from(area.height.max(1));
    let offset = context.buffer.cursor_line().saturating_sub(visible - 1);

    let paragraph = Paragraph::new(context.buffer.text())
        .style(Style::default().fg(Color::Green).bg(Color::Black))
        .scroll((offset.min(usize::from(u16::MAX)) as u16, 0));

    f.render_widget(paragraph, area);
}

fn draw_options_menu(f: &mut Frame, area: Rect, commands: &[String]) {
    let mut lines = vec![
        Line::styled(" Options", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw(" Emergency stop issued:"),
    ];
    lines.extend(commands.iter().map(|command| {
        Line::styled(
            format!("   > {command}"),
            Style::default().fg(Color::Yellow),
        )
    }));

    f.render_widget(Paragraph::new(lines), area);
}
