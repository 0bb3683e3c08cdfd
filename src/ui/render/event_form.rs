use super::Frame;
use crate::state::{EventFormField, State};
use crate::ui::widgets::styling;
use crate::utils::text_processing::display_path;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Border style for a form field block by whether it is focused.
///
fn field_border(state: &State, field: EventFormField) -> Style {
    let theme = state.get_theme();
    if state.event_form().field == field {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    }
}

/// Render the create event form.
///
pub fn event_form(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
        ])
        .split(size);

    let title = Paragraph::new(state.event_form().title.as_str())
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title")
                .border_style(field_border(state, EventFormField::Title)),
        );
    frame.render_widget(title, rows[0]);

    let description_block = Block::default()
        .borders(Borders::ALL)
        .title("Description")
        .border_style(field_border(state, EventFormField::Description));
    let description_area = description_block.inner(rows[1]);
    frame.render_widget(description_block, rows[1]);
    frame.render_widget(state.event_form().description.widget(), description_area);

    attachments(frame, rows[2], state);
}

/// Render the attachments field: the path input plus the list of added
/// attachments.
///
fn attachments(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let form = state.event_form();

    let mut lines = vec![Line::from(vec![
        Span::styled("Path: ", styling::muted_text_style(theme)),
        Span::styled(
            form.attachment_input.as_str(),
            styling::normal_text_style(theme),
        ),
    ])];
    for attachment in &form.attachments {
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

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(
                "Attachments ({}) - Enter: add, Del: remove last",
                form.attachments.len()
            ))
            .border_style(field_border(state, EventFormField::Attachments)),
    );
    frame.render_widget(paragraph, size);
}
