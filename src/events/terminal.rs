use crate::state::{AddressFocus, EventFormField, PanelState, State, Tab};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use log::*;
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event {
    Input(KeyEvent),
    Click(MouseEvent),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                match event::read().unwrap() {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        tx_clone.send(Event::Input(key)).unwrap();
                    }
                    CrosstermEvent::Mouse(mouse) => {
                        tx_clone.send(Event::Click(mouse)).unwrap();
                    }
                    _ => {}
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => {
                return self.handle_key(key, state);
            }
            Event::Click(mouse) => {
                self.handle_mouse(mouse, state);
            }
            Event::Tick => {
                state.tick(Instant::now());
            }
        }
        Ok(true)
    }

    /// Handle a key press by routing it to the current mode, tab, and focus.
    ///
    fn handle_key(&self, key: KeyEvent, state: &mut State) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            debug!("Processing exit terminal event '{:?}'...", key);
            return Ok(false);
        }

        if state.is_debug_mode() {
            self.handle_debug_key(key, state);
            return Ok(true);
        }

        if key.code == KeyCode::Char('l') && key.modifiers == KeyModifiers::CONTROL {
            debug!("Processing toggle log pane event '{:?}'...", key);
            state.toggle_log();
            return Ok(true);
        }

        // Pending delete confirmation swallows everything but its answer.
        if state.current_tab() == Tab::Events && state.has_delete_confirmation() {
            match key.code {
                KeyCode::Enter => {
                    debug!("Processing confirm delete event '{:?}'...", key);
                    state.delete_selected_event();
                }
                KeyCode::Esc => {
                    debug!("Processing cancel delete confirmation event '{:?}'...", key);
                    state.cancel_delete_confirmation();
                }
                _ => {}
            }
            return Ok(true);
        }

        if state.is_text_entry_active() {
            match state.current_tab() {
                Tab::Events => self.handle_event_form_key(key, state),
                Tab::Address => self.handle_address_key(key, state),
                Tab::Modals => {}
            }
            return Ok(true);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => {
                debug!("Processing exit terminal event '{:?}'...", key);
                return Ok(false);
            }
            (KeyCode::Char('d'), KeyModifiers::NONE)
                if state.current_tab() != Tab::Events =>
            {
                debug!("Processing enter debug mode event '{:?}'...", key);
                state.enter_debug_mode();
            }
            (KeyCode::Left, KeyModifiers::NONE) => state.previous_tab(),
            (KeyCode::Right, KeyModifiers::NONE) => state.next_tab(),
            (KeyCode::Char('1'), KeyModifiers::NONE) => state.set_tab(Tab::Events),
            (KeyCode::Char('2'), KeyModifiers::NONE) => state.set_tab(Tab::Address),
            (KeyCode::Char('3'), KeyModifiers::NONE) => state.set_tab(Tab::Modals),
            _ => match state.current_tab() {
                Tab::Events => self.handle_events_tab_key(key, state),
                Tab::Address => self.handle_address_key(key, state),
                Tab::Modals => self.handle_modals_tab_key(key, state),
            },
        }
        Ok(true)
    }

    /// Handle keys while the log pane has focus.
    ///
    fn handle_debug_key(&self, key: KeyEvent, state: &mut State) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                state.next_debug();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.previous_debug();
            }
            KeyCode::Char('y') => {
                debug!("Processing copy log entry event '{:?}'...", key);
                if let Some(entry) = state.get_current_debug() {
                    match ClipboardContext::new() {
                        Ok(mut ctx) => match ctx.set_contents(entry.to_string()) {
                            Ok(_) => info!("Log entry copied to clipboard."),
                            Err(e) => warn!("Failed to copy to clipboard: {}", e),
                        },
                        Err(e) => warn!("Failed to initialize clipboard: {}", e),
                    }
                }
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('d') => {
                debug!("Processing exit debug mode event '{:?}'...", key);
                state.exit_debug_mode();
            }
            _ => {}
        }
    }

    /// Handle keys on the events tab list view.
    ///
    fn handle_events_tab_key(&self, key: KeyEvent, state: &mut State) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.next_event_index(),
            KeyCode::Char('k') | KeyCode::Up => state.previous_event_index(),
            KeyCode::Char('n') => {
                debug!("Processing open create form event '{:?}'...", key);
                state.open_event_form();
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                debug!("Processing delete event request '{:?}'...", key);
                state.delete_selected_event();
            }
            KeyCode::Char('d') => {
                debug!("Processing enter debug mode event '{:?}'...", key);
                state.enter_debug_mode();
            }
            _ => {
                debug!("Skipping processing of terminal event '{:?}'...", key);
            }
        }
    }

    /// Handle keys on the events tab create form.
    ///
    fn handle_event_form_key(&self, key: KeyEvent, state: &mut State) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                debug!("Processing close create form event '{:?}'...", key);
                state.close_event_form();
            }
            (KeyCode::Tab, _) => state.next_event_form_field(),
            (KeyCode::BackTab, _) => state.previous_event_form_field(),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                debug!("Processing submit create form event '{:?}'...", key);
                state.submit_event_form();
            }
            _ => match state.event_form().field {
                EventFormField::Title => match key.code {
                    KeyCode::Char(c) => state.event_form_mut().title.push(c),
                    KeyCode::Backspace => {
                        state.event_form_mut().title.pop();
                    }
                    KeyCode::Enter => state.next_event_form_field(),
                    _ => {}
                },
                EventFormField::Description => {
                    state.event_form_mut().description.input(key);
                }
                EventFormField::Attachments => match key.code {
                    KeyCode::Char(c) => state.event_form_mut().attachment_input.push(c),
                    KeyCode::Backspace => {
                        state.event_form_mut().attachment_input.pop();
                    }
                    KeyCode::Enter => state.add_form_attachment(),
                    KeyCode::Delete => state.remove_last_form_attachment(),
                    _ => {}
                },
            },
        }
    }

    /// Handle keys on the address tab, routed by focus.
    ///
    fn handle_address_key(&self, key: KeyEvent, state: &mut State) {
        match state.address_focus() {
            AddressFocus::Search => match (key.code, key.modifiers) {
                (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                    debug!("Processing open manual form event '{:?}'...", key);
                    state.open_manual_form();
                }
                (KeyCode::Char(c), KeyModifiers::NONE)
                | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                    state.add_search_char(c, Instant::now());
                }
                (KeyCode::Backspace, _) => state.remove_search_char(Instant::now()),
                (KeyCode::Down, _) | (KeyCode::Enter, _) | (KeyCode::Tab, _) => {
                    if !state.get_predictions().is_empty() {
                        state.set_address_focus(AddressFocus::Predictions);
                    } else if state.is_manual_form_open() {
                        state.set_address_focus(AddressFocus::Form);
                    }
                }
                _ => {}
            },
            AddressFocus::Predictions => match key.code {
                KeyCode::Char('j') | KeyCode::Down => state.next_prediction(),
                KeyCode::Char('k') | KeyCode::Up => state.previous_prediction(),
                KeyCode::Enter => {
                    debug!("Processing select prediction event '{:?}'...", key);
                    state.select_prediction();
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    state.set_address_focus(AddressFocus::Search);
                }
                _ => {}
            },
            AddressFocus::Form => match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => state.set_address_focus(AddressFocus::Search),
                (KeyCode::Tab, _) | (KeyCode::Enter, KeyModifiers::NONE) => {
                    let form = state.address_form_mut();
                    form.field = form.field.next();
                }
                (KeyCode::BackTab, _) => {
                    let form = state.address_form_mut();
                    form.field = form.field.previous();
                }
                (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                    debug!("Processing save address event '{:?}'...", key);
                    state.save_address();
                }
                (KeyCode::Char(c), KeyModifiers::NONE)
                | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                    state.address_form_mut().active_buffer().push(c);
                }
                (KeyCode::Backspace, _) => {
                    state.address_form_mut().active_buffer().pop();
                }
                _ => {}
            },
        }
    }

    /// Handle keys on the modals tab. Routing depends on whether the overlay
    /// is up and which panel is projected.
    ///
    fn handle_modals_tab_key(&self, key: KeyEvent, state: &mut State) {
        if !state.overlay().is_shown() {
            match key.code {
                KeyCode::Char('o') | KeyCode::Enter => {
                    debug!("Processing open overlay event '{:?}'...", key);
                    state.open_overlay(Instant::now());
                }
                _ => {}
            }
            return;
        }
        match state.panel_state() {
            PanelState::None => match key.code {
                KeyCode::Char('j') | KeyCode::Down => state.next_demo_item(),
                KeyCode::Char('k') | KeyCode::Up => state.previous_demo_item(),
                KeyCode::Enter => {
                    debug!("Processing select item event '{:?}'...", key);
                    state.select_item();
                }
                KeyCode::Esc => state.request_close(Instant::now()),
                _ => {}
            },
            PanelState::ItemDetail => match key.code {
                KeyCode::Enter | KeyCode::Char('n') => {
                    debug!("Processing open next panel event '{:?}'...", key);
                    state.open_next();
                }
                KeyCode::Esc => state.request_close(Instant::now()),
                _ => {}
            },
            PanelState::Confirm => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    debug!("Processing confirm event '{:?}'...", key);
                    state.confirm_and_close_all(Instant::now());
                }
                KeyCode::Char('b') => state.go_back(),
                KeyCode::Esc => state.request_close(Instant::now()),
                _ => {}
            },
        }
    }

    /// Handle a mouse event. Only backdrop clicks on the modals tab are
    /// meaningful; clicks on the sheet itself are ignored.
    ///
    fn handle_mouse(&self, mouse: MouseEvent, state: &mut State) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if state.current_tab() == Tab::Modals && state.is_backdrop_hit(mouse.column, mouse.row) {
            debug!("Processing backdrop click at ({}, {})...", mouse.column, mouse.row);
            state.request_close(Instant::now());
        }
    }
}
