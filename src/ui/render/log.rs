use super::Frame;
use crate::state::State;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render log widget according to state.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let title = if state.is_debug_mode() {
        "Log (DEBUG MODE: j/k: navigate, y: copy, Esc: exit)"
    } else {
        "Log (Press d to enter debug mode)"
    };

    let theme = state.get_theme();
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));

    if state.is_debug_mode() {
        let items: Vec<ListItem> = state
            .get_debug_entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == state.get_debug_index() {
                    styling::active_list_item_style(theme)
                } else {
                    styling::normal_text_style(theme)
                };
                ListItem::new(Line::from(vec![Span::styled(entry.clone(), style)]))
            })
            .collect();

        let list = List::new(items)
            .style(styling::normal_text_style(theme))
            .highlight_style(styling::active_list_item_style(theme))
            .block(block);

        let mut list_state = ListState::default();
        list_state.select(Some(state.get_debug_index()));
        frame.render_stateful_widget(list, size, &mut list_state);
    } else {
        // Show only the newest entries that fit.
        let visible = size.height.saturating_sub(2) as usize;
        let entries = state.get_debug_entries();
        let start = entries.len().saturating_sub(visible);
        let items: Vec<ListItem> = entries[start..]
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![Span::styled(
                    entry.clone(),
                    styling::normal_text_style(theme),
                )]))
            })
            .collect();

        let list = List::new(items)
            .style(styling::normal_text_style(theme))
            .block(block);

        frame.render_widget(list, size);
    }
}
