use super::Frame;
use crate::state::{AddressFocus, State, Tab};
use crate::ui::widgets::spinner;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Return the control hints for the current tab and focus.
///
fn hints_for(state: &State) -> &'static str {
    match state.current_tab() {
        Tab::Events => {
            if state.is_text_entry_active() {
                " Tab: next field, Ctrl+S: save, Esc: cancel"
            } else {
                " j/k: navigate, n: new event, x: delete, d: logs, 1/2/3: tabs, q: quit"
            }
        }
        Tab::Address => match state.address_focus() {
            AddressFocus::Search => " Type to search, Enter: predictions, Ctrl+O: manual form",
            AddressFocus::Predictions => " j/k: navigate, Enter: select, Esc: back to search",
            AddressFocus::Form => " Tab: next field, Ctrl+S: save, Esc: back to search",
        },
        Tab::Modals => {
            if state.overlay().is_shown() {
                " j/k: navigate, Enter: select, Esc/click outside: close one level"
            } else {
                " o/Enter: open overlay, 1/2/3: tabs, q: quit"
            }
        }
    }
}

/// Render footer widget.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();

    let (label, label_bg) = if state.is_debug_mode() {
        ("DEBUG:", theme.footer_debug.to_color())
    } else if state.current_tab() == Tab::Events && state.has_delete_confirmation() {
        ("DELETE:", theme.footer_delete.to_color())
    } else if state.is_text_entry_active() {
        ("INPUT:", theme.footer_form.to_color())
    } else {
        ("NORMAL:", theme.footer_normal.to_color())
    };

    let hints = if state.is_debug_mode() {
        " j/k: navigate logs, y: copy, Esc: exit"
    } else if state.current_tab() == Tab::Events && state.has_delete_confirmation() {
        " Enter: confirm delete, Esc: cancel"
    } else {
        hints_for(state)
    };

    let mut spans = vec![
        Span::styled(
            label,
            Style::default()
                .fg(theme.text.to_color())
                .bg(label_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hints, Style::default().fg(theme.warning.to_color())),
    ];
    if let Some(status) = state.get_status() {
        spans.push(Span::styled(
            format!("  {}", status),
            Style::default().fg(theme.info.to_color()),
        ));
    }
    let controls_widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Left);

    let right_content = if state.is_loading() {
        Line::from(vec![Span::styled(
            format!("{} ", spinner::frame(state.get_spinner_index())),
            Style::default().fg(theme.accent.to_color()),
        )])
    } else {
        Line::from(vec![Span::styled(
            format!(" {}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.secondary.to_color()),
        )])
    };

    let right_content_width = right_content.width();
    let right_widget = Paragraph::new(right_content).alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(right_content_width.try_into().unwrap_or(0)),
        ])
        .split(size);

    frame.render_widget(controls_widget, columns[0]);
    frame.render_widget(right_widget, columns[1]);
}
