use super::Frame;
use crate::state::{OverlayVisibility, PanelState, State, DEMO_ITEM_COUNT};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

const DEMO_ITEMS: [&str; DEMO_ITEM_COUNT] = [
    "Quarterly review",
    "Team offsite",
    "Release retrospective",
];

/// Render the modals tab: the host screen, and on top of it the bottom
/// sheet while the overlay is mounted. The sheet is one physical surface;
/// exactly one body is projected into it at a time, keyed by the panel
/// state.
///
pub fn modals(frame: &mut Frame, size: Rect, state: &mut State) {
    host_screen(frame, size, state);

    if !state.overlay().is_mounted() {
        state.set_overlay_surface_area(None);
        return;
    }

    let theme = state.get_theme().clone();
    let fade = state.overlay().fade();
    let slide = state.overlay().slide();

    // Restyle the cells under the sheet without erasing their glyphs.
    let backdrop = Block::default().style(Style::default().bg(theme.backdrop.dimmed(fade * 0.6)));
    frame.render_widget(backdrop, size);

    let sheet_height = (size.height / 2).max(8).min(size.height);
    let offset = (slide * sheet_height as f32).round() as u16;
    let visible = sheet_height.saturating_sub(offset);
    if visible == 0 {
        state.set_overlay_surface_area(None);
        return;
    }

    let margin = size.width / 10;
    let sheet = Rect {
        x: size.x + margin,
        y: size.y + size.height - visible,
        width: size.width.saturating_sub(margin * 2),
        height: visible,
    };
    state.set_overlay_surface_area(Some(sheet));
    frame.render_widget(Clear, sheet);

    match state.panel_state() {
        PanelState::None => root_body(frame, sheet, state, &theme, fade),
        PanelState::ItemDetail => item_detail(frame, sheet, state, &theme),
        PanelState::Confirm => confirm(frame, sheet, &theme),
    }
}

/// Render the screen behind the overlay.
///
fn host_screen(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "This tab hosts a bottom sheet with stacked panels.",
            styling::normal_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "o/Enter: open overlay",
            styling::muted_text_style(theme),
        )),
    ];
    if let Some(index) = state.get_selected_demo_item() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Last selected: ", styling::muted_text_style(theme)),
            Span::styled(
                DEMO_ITEMS[index],
                Style::default()
                    .fg(theme.secondary.to_color())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    let host = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Modals")
            .border_style(styling::normal_block_border_style(theme)),
    );
    frame.render_widget(host, size);
}

/// Render the root body: the demo item list. The border tracks the fade so
/// the sheet reads as translucent while animating.
///
fn root_body(frame: &mut Frame, sheet: Rect, state: &State, theme: &crate::ui::Theme, fade: f32) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(sheet);

    let at_rest = state.overlay().visibility() == OverlayVisibility::Visible;
    let items: Vec<ListItem> = DEMO_ITEMS
        .iter()
        .map(|item| {
            ListItem::new(Line::from(Span::styled(
                *item,
                styling::normal_text_style(theme),
            )))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Items")
                .border_style(Style::default().fg(theme.border_active.dimmed(1.0 - fade))),
        )
        .highlight_style(if at_rest {
            styling::highlight_style(theme)
        } else {
            styling::normal_text_style(theme)
        })
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.get_demo_item_index()));
    frame.render_stateful_widget(list, rows[0], &mut list_state);

    let hint = Paragraph::new(Span::styled(
        " j/k: move, Enter: select, Esc: close",
        styling::muted_text_style(theme),
    ));
    frame.render_widget(hint, rows[1]);
}

/// Render the detail body for the selected item.
///
fn item_detail(frame: &mut Frame, sheet: Rect, state: &State, theme: &crate::ui::Theme) {
    let name = state
        .get_selected_demo_item()
        .map(|index| DEMO_ITEMS[index])
        .unwrap_or("");
    let detail = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            name,
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: continue, Esc: back",
            styling::muted_text_style(theme),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Detail")
            .border_style(styling::active_block_border_style(theme)),
    );
    frame.render_widget(detail, sheet);
}

/// Render the confirmation body.
///
fn confirm(frame: &mut Frame, sheet: Rect, theme: &crate::ui::Theme) {
    let prompt = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Confirm this selection?",
            styling::normal_text_style(theme),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/y: confirm, b: back, Esc: back",
            styling::muted_text_style(theme),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm")
            .border_style(Style::default().fg(theme.warning.to_color())),
    );
    frame.render_widget(prompt, sheet);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn shown_state() -> State {
        let t0 = Instant::now();
        let mut state = State::default();
        state.open_overlay(t0);
        state.tick(t0 + Duration::from_millis(crate::state::DEFAULT_OPEN_MS));
        state
    }

    fn render_to_text(state: &mut State) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| modals(frame, frame.size(), state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_resting_sheet_shows_only_root_body() {
        let mut state = shown_state();
        let text = render_to_text(&mut state);
        assert!(text.contains("Items"));
        assert!(text.contains("Quarterly review"));
        assert!(!text.contains("Enter: continue"));
        assert!(!text.contains("Confirm this selection?"));
    }

    #[test]
    fn test_detail_replaces_root_body() {
        let mut state = shown_state();
        state.select_item();
        let text = render_to_text(&mut state);
        assert!(text.contains("Detail"));
        assert!(text.contains("Enter: continue"));
        // The root list body must not be mounted underneath.
        assert!(!text.contains("Items"));
        assert!(!text.contains("j/k: move"));
    }

    #[test]
    fn test_confirm_is_the_only_mounted_body() {
        let mut state = shown_state();
        state.select_item();
        state.open_next();
        let text = render_to_text(&mut state);
        assert!(text.contains("Confirm this selection?"));
        assert!(!text.contains("Enter: continue"));
        assert!(!text.contains("Items"));
    }

    #[test]
    fn test_hidden_overlay_renders_host_screen_only() {
        let mut state = State::default();
        let text = render_to_text(&mut state);
        assert!(text.contains("o/Enter: open overlay"));
        assert!(!text.contains("Items"));
    }
}
