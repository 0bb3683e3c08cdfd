use super::{centered_rect, event_form, Frame};
use crate::state::{EventsView, State};
use crate::ui::widgets::styling;
use crate::utils::text_processing::{display_path, truncate_text};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Render the events tab according to state.
///
pub fn events(frame: &mut Frame, size: Rect, state: &mut State) {
    if state.current_events_view() == EventsView::Create {
        event_form::event_form(frame, size, state);
        return;
    }

    let theme = state.get_theme().clone();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(size);

    // Titles get whatever fits in the list column next to the markers.
    let title_width = (state.get_terminal_size().width as usize * 2 / 5)
        .saturating_sub(12)
        .max(12);
    let items: Vec<ListItem> = state
        .get_events()
        .iter()
        .map(|record| {
            let mut spans = vec![Span::styled(
                truncate_text(&record.title, title_width),
                styling::normal_text_style(&theme),
            )];
            for attachment in &record.attachments {
                spans.push(Span::styled(
                    format!(" [{}]", attachment.kind.marker()),
                    styling::muted_text_style(&theme),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let count = items.len();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Events ({})", count))
                .border_style(styling::active_block_border_style(&theme)),
        )
        .highlight_style(styling::highlight_style(&theme))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, columns[0], state.get_events_list_state());

    detail(frame, columns[1], state);

    if state.has_delete_confirmation() {
        let title = state
            .delete_confirmation_title()
            .unwrap_or("this event")
            .to_string();
        delete_confirmation(frame, size, &title, state);
    }
}

/// Render the detail pane for the selected event record.
///
fn detail(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Detail")
        .border_style(styling::normal_block_border_style(theme));

    let lines = match state.selected_event() {
        Some(record) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    record.title.clone(),
                    Style::default()
                        .fg(theme.primary.to_color())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    record.created_at.clone(),
                    styling::muted_text_style(theme),
                )),
                Line::from(""),
            ];
            for text_line in record.description.lines() {
                lines.push(Line::from(Span::styled(
                    text_line.to_string(),
                    styling::normal_text_style(theme),
                )));
            }
            if !record.attachments.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Attachments ({})", record.attachments.len()),
                    Style::default()
                        .fg(theme.secondary.to_color())
                        .add_modifier(Modifier::BOLD),
                )));
                for attachment in &record.attachments {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!(" [{}] ", attachment.kind.marker()),
                            Style::default().fg(theme.accent.to_color()),
                        ),
                        Span::styled(
                            display_path(&attachment.path),
                            styling::normal_text_style(theme),
                        ),
                    ]));
                }
            }
            lines
        }
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "No events yet. Press n to create one.",
                styling::muted_text_style(theme),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, size);
}

/// Render the delete confirmation dialog on top of the tab.
///
fn delete_confirmation(frame: &mut Frame, size: Rect, title: &str, state: &State) {
    let popup_area = centered_rect(60, 25, size);
    frame.render_widget(Clear, popup_area);

    let theme = state.get_theme();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete event: \"{}\"?", truncate_text(title, 45)),
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default()
                .fg(theme.warning.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: confirm, Esc: cancel",
            styling::muted_text_style(theme),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(
                    Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}
