use super::{address, events, footer, log, modals, Frame};
use crate::state::{State, Tab};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
};

/// Render the full application frame according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let size = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(size);

    header(frame, rows[0], state);

    if state.is_log_shown() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[1]);
        main(frame, split[0], state);
        log::log(frame, split[1], state);
    } else {
        main(frame, rows[1], state);
    }

    footer::footer(frame, rows[2], state);
}

/// Render the tab header.
///
fn header(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(concat!(" ", env!("CARGO_PKG_NAME"), " "))
                .border_style(styling::normal_block_border_style(theme)),
        )
        .style(styling::normal_text_style(theme))
        .highlight_style(
            Style::default()
                .fg(theme.primary.to_color())
                .add_modifier(Modifier::BOLD),
        )
        .select(state.current_tab().index());
    frame.render_widget(tabs, size);
}

/// Render the active tab body.
///
fn main(frame: &mut Frame, size: Rect, state: &mut State) {
    match state.current_tab() {
        Tab::Events => events::events(frame, size, state),
        Tab::Address => address::address(frame, size, state),
        Tab::Modals => modals::modals(frame, size, state),
    }
}
