use super::Frame;
use crate::state::{AddressField, AddressFocus, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the address tab according to state.
///
pub fn address(frame: &mut Frame, size: Rect, state: &State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(size);

    search_box(frame, rows[0], state);

    if !state.get_predictions().is_empty() {
        predictions(frame, rows[1], state);
    } else {
        form(frame, rows[1], state);
    }
}

/// Render the autocomplete search input.
///
fn search_box(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let border = if state.address_focus() == AddressFocus::Search {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let search = Paragraph::new(state.get_search_query())
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search address")
                .border_style(border),
        );
    frame.render_widget(search, size);
}

/// Render the prediction list below the search input.
///
fn predictions(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let items: Vec<ListItem> = state
        .get_predictions()
        .iter()
        .map(|prediction| {
            ListItem::new(Line::from(Span::styled(
                prediction.description.clone(),
                styling::normal_text_style(theme),
            )))
        })
        .collect();

    let border = if state.address_focus() == AddressFocus::Predictions {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Predictions ({})", state.get_predictions().len()))
                .border_style(border),
        )
        .highlight_style(styling::highlight_style(theme))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.get_predictions_index()));
    frame.render_stateful_widget(list, size, &mut list_state);
}

/// Render the manual form grid, or a usage hint when the form is closed.
///
fn form(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    if !state.is_manual_form_open() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Type at least 3 characters to search for an address,",
                styling::muted_text_style(theme),
            )),
            Line::from(Span::styled(
                "or press Ctrl+O to fill the form manually.",
                styling::muted_text_style(theme),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Address")
                .border_style(styling::normal_block_border_style(theme)),
        );
        frame.render_widget(hint, size);
        return;
    }

    let mut constraints = vec![Constraint::Length(3); 3];
    constraints.insert(0, Constraint::Length(1));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(size);

    let resolved = state.get_resolved_address().unwrap_or("");
    let resolved_line = Paragraph::new(Line::from(vec![
        Span::styled(" Resolved: ", styling::muted_text_style(theme)),
        Span::styled(
            resolved,
            Style::default()
                .fg(theme.secondary.to_color())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(resolved_line, rows[0]);

    for (i, pair) in AddressField::ALL.chunks(2).enumerate() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[i + 1]);
        for (j, which) in pair.iter().enumerate() {
            field(frame, columns[j], state, *which);
        }
    }
}

/// Render a single labeled form field.
///
fn field(frame: &mut Frame, size: Rect, state: &State, which: AddressField) {
    let theme = state.get_theme();
    let focused =
        state.address_focus() == AddressFocus::Form && state.address_form().field == which;
    let border = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let paragraph = Paragraph::new(state.address_form().buffer(which))
        .style(styling::normal_text_style(theme))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(which.label())
                .border_style(border),
        );
    frame.render_widget(paragraph, size);
}
