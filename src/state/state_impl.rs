use crate::app::WorkerSender;
use crate::events::worker::Event as WorkerEvent;
use crate::places::{address_fields_from, PlaceDetails, Prediction, MIN_QUERY_LEN};
use crate::store::{Attachment, EventRecord, NewEventRecord};
use crate::ui::{Theme, SPINNER_FRAME_COUNT};
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use super::form::{AddressForm, EventForm};
use super::navigation::{AddressFocus, EventsView, Tab};
use super::overlay::Overlay;
use super::panel::{PanelStack, PanelState};

/// Idle time after the last keystroke before an autocomplete request fires.
const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Number of items in the modals demo root body.
pub const DEMO_ITEM_COUNT: usize = 3;

/// Houses data representative of application state.
///
pub struct State {
    worker_sender: Option<WorkerSender>,
    terminal_size: Rect,
    spinner_index: usize,
    loading: bool,
    theme: Theme,
    tab: Tab,
    status: Option<String>,
    // Log pane
    show_log: bool,
    debug_mode: bool,
    debug_index: usize,
    debug_entries: Vec<String>,
    // Events tab
    events: Vec<EventRecord>,
    events_list_state: ListState,
    events_view: EventsView,
    event_form: EventForm,
    delete_confirmation: Option<i64>, // id pending deletion confirmation
    // Address tab
    address_focus: AddressFocus,
    search_query: String,
    searched_query: String,
    last_search_input: Option<Instant>,
    predictions: Vec<Prediction>,
    predictions_index: usize,
    address_form: AddressForm,
    manual_form_open: bool,
    resolved_address: Option<String>,
    // Modals tab
    overlay: Overlay,
    panels: PanelStack,
    demo_item_index: usize,
    selected_demo_item: Option<usize>,
    overlay_surface_area: Option<Rect>,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            worker_sender: None,
            terminal_size: Rect::default(),
            spinner_index: 0,
            loading: false,
            theme: Theme::default(),
            tab: Tab::Events,
            status: None,
            show_log: false,
            debug_mode: false,
            debug_index: 0,
            debug_entries: vec![],
            events: vec![],
            events_list_state: ListState::default(),
            events_view: EventsView::List,
            event_form: EventForm::default(),
            delete_confirmation: None,
            address_focus: AddressFocus::Search,
            search_query: String::new(),
            searched_query: String::new(),
            last_search_input: None,
            predictions: vec![],
            predictions_index: 0,
            address_form: AddressForm::default(),
            manual_form_open: false,
            resolved_address: None,
            overlay: Overlay::default(),
            panels: PanelStack::default(),
            demo_item_index: 0,
            selected_demo_item: None,
            overlay_surface_area: None,
        }
    }
}

impl State {
    pub fn new(worker_sender: WorkerSender, theme: Theme, overlay: Overlay) -> Self {
        State {
            worker_sender: Some(worker_sender),
            theme,
            overlay,
            ..State::default()
        }
    }

    /// Send an event to the worker thread for asynchronous processing.
    ///
    pub fn dispatch(&mut self, event: WorkerEvent) {
        if let Some(sender) = &self.worker_sender {
            self.loading = true;
            if let Err(e) = sender.send(event) {
                error!("Failed to dispatch worker event: {}", e);
                self.loading = false;
            }
        } else {
            warn!("Skipping dispatch without worker channel.");
        }
    }

    // Terminal / chrome -----------------------------------------------------

    pub fn set_terminal_size(&mut self, size: Rect) {
        self.terminal_size = size;
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    pub fn advance_spinner_index(&mut self) {
        self.spinner_index = (self.spinner_index + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn get_spinner_index(&self) -> usize {
        self.spinner_index
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: String) {
        info!("{}", message);
        self.status = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // Tabs ------------------------------------------------------------------

    pub fn current_tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            debug!("Switching to {} tab...", tab.title());
            self.tab = tab;
            self.clear_status();
        }
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.set_tab(self.tab.previous());
    }

    /// Whether keystrokes should currently be routed to a text buffer
    /// instead of being interpreted as navigation shortcuts.
    ///
    pub fn is_text_entry_active(&self) -> bool {
        match self.tab {
            Tab::Events => self.events_view == EventsView::Create,
            Tab::Address => matches!(
                self.address_focus,
                AddressFocus::Search | AddressFocus::Form
            ),
            Tab::Modals => false,
        }
    }

    // Log pane --------------------------------------------------------------

    pub fn is_log_shown(&self) -> bool {
        self.show_log
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
        if !self.show_log {
            self.debug_mode = false;
        }
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn enter_debug_mode(&mut self) {
        self.show_log = true;
        self.debug_mode = true;
        self.debug_index = self.debug_entries.len().saturating_sub(1);
    }

    pub fn exit_debug_mode(&mut self) {
        self.debug_mode = false;
    }

    pub fn add_debug_entry(&mut self, entry: String) {
        self.debug_entries.push(entry);
    }

    pub fn get_debug_entries(&self) -> &[String] {
        &self.debug_entries
    }

    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    pub fn next_debug(&mut self) {
        if self.debug_index + 1 < self.debug_entries.len() {
            self.debug_index += 1;
        }
    }

    pub fn previous_debug(&mut self) {
        self.debug_index = self.debug_index.saturating_sub(1);
    }

    pub fn get_current_debug(&self) -> Option<&String> {
        self.debug_entries.get(self.debug_index)
    }

    // Events tab ------------------------------------------------------------

    pub fn get_events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn set_events(&mut self, events: Vec<EventRecord>) {
        self.loading = false;
        self.events = events;
        if self.events.is_empty() {
            self.events_list_state.select(None);
        } else if self.events_list_state.selected().is_none() {
            self.events_list_state.select(Some(0));
        }
    }

    pub fn event_created(&mut self, record: EventRecord) {
        self.loading = false;
        self.events.insert(0, record);
        self.events_list_state.select(Some(0));
    }

    pub fn event_deleted(&mut self, id: i64) {
        self.loading = false;
        self.events.retain(|record| record.id != id);
        if self.events.is_empty() {
            self.events_list_state.select(None);
        } else if let Some(selected) = self.events_list_state.selected() {
            self.events_list_state
                .select(Some(selected.min(self.events.len() - 1)));
        }
    }

    pub fn get_events_list_state(&mut self) -> &mut ListState {
        &mut self.events_list_state
    }

    pub fn selected_event(&self) -> Option<&EventRecord> {
        self.events_list_state
            .selected()
            .and_then(|index| self.events.get(index))
    }

    pub fn next_event_index(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let next = match self.events_list_state.selected() {
            Some(index) => (index + 1) % self.events.len(),
            None => 0,
        };
        self.events_list_state.select(Some(next));
    }

    pub fn previous_event_index(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let previous = match self.events_list_state.selected() {
            Some(0) | None => self.events.len() - 1,
            Some(index) => index - 1,
        };
        self.events_list_state.select(Some(previous));
    }

    pub fn current_events_view(&self) -> EventsView {
        self.events_view
    }

    pub fn open_event_form(&mut self) {
        self.event_form.clear();
        self.events_view = EventsView::Create;
    }

    pub fn close_event_form(&mut self) {
        self.event_form.clear();
        self.events_view = EventsView::List;
    }

    pub fn event_form(&self) -> &EventForm {
        &self.event_form
    }

    pub fn event_form_mut(&mut self) -> &mut EventForm {
        &mut self.event_form
    }

    pub fn next_event_form_field(&mut self) {
        self.event_form.field = self.event_form.field.next();
    }

    pub fn previous_event_form_field(&mut self) {
        self.event_form.field = self.event_form.field.previous();
    }

    /// Add the typed attachment path to the form, inferring its kind from
    /// the extension.
    ///
    pub fn add_form_attachment(&mut self) {
        let path = self.event_form.attachment_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        match Attachment::from_path(&path) {
            Some(attachment) => {
                debug!("Adding {} attachment '{}'...", attachment.kind.marker(), path);
                self.event_form.attachments.push(attachment);
                self.event_form.attachment_input.clear();
            }
            None => {
                self.set_status(format!("Unsupported attachment type: {}", path));
            }
        }
    }

    pub fn remove_last_form_attachment(&mut self) {
        if self.event_form.attachments.pop().is_some() {
            debug!("Removed last form attachment.");
        }
    }

    /// Validate and submit the create form. Returns true when the form was
    /// dispatched and closed.
    ///
    pub fn submit_event_form(&mut self) -> bool {
        if self.event_form.title.trim().is_empty() {
            self.set_status("A title is required to create an event.".to_string());
            return false;
        }
        let record = NewEventRecord {
            title: self.event_form.title.trim().to_string(),
            description: self.event_form.description_text(),
            attachments: self.event_form.attachments.clone(),
        };
        self.dispatch(WorkerEvent::CreateEvent { record });
        self.close_event_form();
        true
    }

    pub fn has_delete_confirmation(&self) -> bool {
        self.delete_confirmation.is_some()
    }

    pub fn cancel_delete_confirmation(&mut self) {
        self.delete_confirmation = None;
    }

    /// First call arms the confirmation for the selected record; the second
    /// call dispatches the delete.
    ///
    pub fn delete_selected_event(&mut self) {
        match self.delete_confirmation.take() {
            Some(id) => {
                self.dispatch(WorkerEvent::DeleteEvent { id });
            }
            None => {
                if let Some(record) = self.selected_event() {
                    self.delete_confirmation = Some(record.id);
                }
            }
        }
    }

    pub fn delete_confirmation_title(&self) -> Option<&str> {
        let id = self.delete_confirmation?;
        self.events
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.title.as_str())
    }

    // Address tab -----------------------------------------------------------

    pub fn address_focus(&self) -> AddressFocus {
        self.address_focus
    }

    pub fn set_address_focus(&mut self, focus: AddressFocus) {
        self.address_focus = focus;
    }

    pub fn get_search_query(&self) -> &str {
        &self.search_query
    }

    pub fn add_search_char(&mut self, c: char, now: Instant) {
        self.search_query.push(c);
        self.last_search_input = Some(now);
    }

    pub fn remove_search_char(&mut self, now: Instant) {
        self.search_query.pop();
        self.last_search_input = Some(now);
        if self.search_query.is_empty() {
            self.predictions.clear();
            self.searched_query.clear();
        }
    }

    pub fn get_predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn get_predictions_index(&self) -> usize {
        self.predictions_index
    }

    pub fn set_predictions(&mut self, query: String, predictions: Vec<Prediction>) {
        self.loading = false;
        // A stale response for an abandoned query must not clobber newer input.
        if query != self.search_query {
            debug!("Discarding predictions for stale query '{}'.", query);
            return;
        }
        self.predictions = predictions;
        self.predictions_index = 0;
        if !self.predictions.is_empty() {
            self.address_focus = AddressFocus::Predictions;
        }
    }

    pub fn next_prediction(&mut self) {
        if !self.predictions.is_empty() {
            self.predictions_index = (self.predictions_index + 1) % self.predictions.len();
        }
    }

    pub fn previous_prediction(&mut self) {
        if !self.predictions.is_empty() {
            self.predictions_index = match self.predictions_index {
                0 => self.predictions.len() - 1,
                index => index - 1,
            };
        }
    }

    /// Request details for the highlighted prediction.
    ///
    pub fn select_prediction(&mut self) {
        if let Some(prediction) = self.predictions.get(self.predictions_index) {
            let place_id = prediction.place_id.clone();
            self.resolved_address = Some(prediction.description.clone());
            self.dispatch(WorkerEvent::GetPlaceDetails { place_id });
        }
    }

    /// Fold resolved place details into the manual form and surface it.
    ///
    pub fn apply_place_details(&mut self, details: PlaceDetails) {
        self.loading = false;
        self.address_form.apply(&address_fields_from(&details));
        if !details.formatted_address.is_empty() {
            self.resolved_address = Some(details.formatted_address);
        }
        self.predictions.clear();
        self.search_query.clear();
        self.searched_query.clear();
        self.manual_form_open = true;
        self.address_focus = AddressFocus::Form;
    }

    pub fn is_manual_form_open(&self) -> bool {
        self.manual_form_open
    }

    pub fn open_manual_form(&mut self) {
        self.manual_form_open = true;
        self.address_focus = AddressFocus::Form;
    }

    pub fn get_resolved_address(&self) -> Option<&str> {
        self.resolved_address.as_deref()
    }

    pub fn address_form(&self) -> &AddressForm {
        &self.address_form
    }

    pub fn address_form_mut(&mut self) -> &mut AddressForm {
        &mut self.address_form
    }

    /// Validate the manual form; on success, surface a saved confirmation.
    ///
    pub fn save_address(&mut self) {
        let missing = self.address_form.missing_required();
        if missing.is_empty() {
            let summary = format!(
                "Saved address: {} {}, {}",
                self.address_form.street, self.address_form.number, self.address_form.city
            );
            self.set_status(summary);
        } else {
            let labels: Vec<&str> = missing.iter().map(|field| field.label()).collect();
            self.set_status(format!("Missing required fields: {}", labels.join(", ")));
        }
    }

    // Modals tab ------------------------------------------------------------

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn panel_state(&self) -> PanelState {
        self.panels.active()
    }

    pub fn get_demo_item_index(&self) -> usize {
        self.demo_item_index
    }

    pub fn get_selected_demo_item(&self) -> Option<usize> {
        self.selected_demo_item
    }

    pub fn next_demo_item(&mut self) {
        self.demo_item_index = (self.demo_item_index + 1) % DEMO_ITEM_COUNT;
    }

    pub fn previous_demo_item(&mut self) {
        self.demo_item_index = match self.demo_item_index {
            0 => DEMO_ITEM_COUNT - 1,
            index => index - 1,
        };
    }

    /// Mount the overlay surface and start its entrance animation.
    ///
    pub fn open_overlay(&mut self, now: Instant) {
        self.overlay.open(now);
    }

    /// Close one level: pop a panel if one is projected, otherwise start the
    /// overlay exit animation. Backdrop taps and Esc both land here.
    ///
    pub fn request_close(&mut self, now: Instant) {
        if !self.overlay.is_mounted() {
            return;
        }
        if self.panels.pop() {
            debug!("Popped one panel level; overlay untouched.");
        } else {
            self.overlay.close(now);
        }
    }

    /// Project the item detail panel for the highlighted root-body item.
    ///
    pub fn select_item(&mut self) {
        if !self.overlay.is_shown() {
            return;
        }
        if self.panels.is_resting() {
            self.selected_demo_item = Some(self.demo_item_index);
        }
        self.panels.select_item();
    }

    /// Advance from the item detail panel to the confirmation panel.
    ///
    pub fn open_next(&mut self) {
        if self.overlay.is_shown() {
            self.panels.open_next();
        }
    }

    /// Step back from the confirmation panel to the item detail panel.
    ///
    pub fn go_back(&mut self) {
        if self.overlay.is_shown() {
            self.panels.go_back();
        }
    }

    /// Confirm: clear all panels at once, then close the overlay after the
    /// confirm delay.
    ///
    pub fn confirm_and_close_all(&mut self, now: Instant) {
        if self.panels.active() != PanelState::Confirm {
            return;
        }
        self.panels.clear();
        self.overlay.schedule_close(now);
    }

    /// Remember where the sheet was laid out, so backdrop clicks can be told
    /// apart from clicks on the surface.
    ///
    pub fn set_overlay_surface_area(&mut self, area: Option<Rect>) {
        self.overlay_surface_area = area;
    }

    /// Whether a click at the given position landed on the dimmed backdrop
    /// rather than the sheet.
    ///
    pub fn is_backdrop_hit(&self, column: u16, row: u16) -> bool {
        if !self.overlay.is_mounted() {
            return false;
        }
        match self.overlay_surface_area {
            Some(area) => {
                !(column >= area.x
                    && column < area.x + area.width
                    && row >= area.y
                    && row < area.y + area.height)
            }
            None => true,
        }
    }

    // Time ------------------------------------------------------------------

    /// Advance time-derived state: the overlay animation, the scheduled
    /// close, the search debounce, and the spinner.
    ///
    pub fn tick(&mut self, now: Instant) {
        if self.overlay.tick(now) {
            // Fully closed: nothing about the previous open may leak out.
            self.panels.clear();
            self.selected_demo_item = None;
            self.demo_item_index = 0;
            self.overlay_surface_area = None;
        }

        if let Some(last_input) = self.last_search_input {
            let settled = now.saturating_duration_since(last_input)
                >= Duration::from_millis(SEARCH_DEBOUNCE_MS);
            if settled {
                self.last_search_input = None;
                let query = self.search_query.clone();
                if query.chars().count() >= MIN_QUERY_LEN && query != self.searched_query {
                    self.searched_query = query.clone();
                    self.dispatch(WorkerEvent::SearchPlaces { query });
                } else if query.chars().count() < MIN_QUERY_LEN {
                    self.predictions.clear();
                }
            }
        }

        if self.loading {
            self.advance_spinner_index();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::overlay::{
        OverlayVisibility, CONFIRM_CLOSE_DELAY_MS, DEFAULT_CLOSE_MS, DEFAULT_OPEN_MS,
    };
    use fake::{Fake, Faker};

    fn after(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    fn shown_state(t0: Instant) -> State {
        let mut state = State::default();
        state.open_overlay(t0);
        state.tick(after(t0, DEFAULT_OPEN_MS));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);
        state
    }

    #[test]
    fn test_open_overlay_animates_to_visible() {
        let t0 = Instant::now();
        let mut state = State::default();
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Hidden);
        assert_eq!(state.panel_state(), PanelState::None);

        state.open_overlay(t0);
        assert_eq!(state.overlay().visibility(), OverlayVisibility::AnimatingIn);
        assert_eq!(state.panel_state(), PanelState::None);

        state.tick(after(t0, DEFAULT_OPEN_MS));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);
        assert_eq!(state.panel_state(), PanelState::None);
    }

    #[test]
    fn test_select_item_projects_detail_panel() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);

        state.next_demo_item();
        state.select_item();
        assert_eq!(state.panel_state(), PanelState::ItemDetail);
        assert_eq!(state.get_selected_demo_item(), Some(1));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);
    }

    #[test]
    fn test_open_next_advances_to_confirm() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();

        state.open_next();
        assert_eq!(state.panel_state(), PanelState::Confirm);
    }

    #[test]
    fn test_go_back_leaves_overlay_untouched() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();
        state.open_next();

        state.go_back();
        assert_eq!(state.panel_state(), PanelState::ItemDetail);
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);
    }

    #[test]
    fn test_confirm_and_close_all_closes_after_delay() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();
        state.open_next();

        let t1 = after(t0, 1000);
        state.confirm_and_close_all(t1);
        assert_eq!(state.panel_state(), PanelState::None);
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);

        state.tick(after(t1, CONFIRM_CLOSE_DELAY_MS));
        assert_eq!(
            state.overlay().visibility(),
            OverlayVisibility::AnimatingOut
        );

        state.tick(after(t1, CONFIRM_CLOSE_DELAY_MS + DEFAULT_CLOSE_MS));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Hidden);
        assert_eq!(state.panel_state(), PanelState::None);
        assert_eq!(state.get_selected_demo_item(), None);
    }

    #[test]
    fn test_request_close_pops_before_hiding() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();

        // Close acts as back before it acts as hide.
        state.request_close(after(t0, 1000));
        assert_eq!(state.panel_state(), PanelState::None);
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);

        state.request_close(after(t0, 1100));
        assert_eq!(
            state.overlay().visibility(),
            OverlayVisibility::AnimatingOut
        );
    }

    #[test]
    fn test_request_close_from_confirm_pops_one_level() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();
        state.open_next();

        state.request_close(after(t0, 1000));
        assert_eq!(state.panel_state(), PanelState::ItemDetail);
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);
    }

    #[test]
    fn test_panel_transitions_noop_while_hidden() {
        let mut state = State::default();
        state.select_item();
        state.open_next();
        assert_eq!(state.panel_state(), PanelState::None);
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Hidden);
    }

    #[test]
    fn test_close_resets_panel_state_for_next_open() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();
        state.open_next();
        state.confirm_and_close_all(after(t0, 1000));
        state.tick(after(t0, 1000 + CONFIRM_CLOSE_DELAY_MS + DEFAULT_CLOSE_MS));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Hidden);

        let t1 = after(t0, 5000);
        state.open_overlay(t1);
        state.tick(after(t1, DEFAULT_OPEN_MS));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Visible);
        assert_eq!(state.panel_state(), PanelState::None);
        assert_eq!(state.get_demo_item_index(), 0);
    }

    #[test]
    fn test_panel_is_never_shown_without_overlay() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.select_item();

        // Walk the overlay through a full close and verify the invariant at
        // each step: a projected panel implies a mounted surface.
        for ms in [0u64, 50, 100, 150, 200, 250, 300, 400] {
            state.tick(after(t0, 1000 + ms));
            if state.panel_state() != PanelState::None {
                assert!(state.overlay().is_shown());
            }
        }
        state.request_close(after(t0, 2000));
        state.request_close(after(t0, 2001));
        state.tick(after(t0, 2001 + DEFAULT_CLOSE_MS as u64));
        assert_eq!(state.overlay().visibility(), OverlayVisibility::Hidden);
        assert_eq!(state.panel_state(), PanelState::None);
    }

    #[test]
    fn test_backdrop_hit_detection() {
        let t0 = Instant::now();
        let mut state = shown_state(t0);
        state.set_overlay_surface_area(Some(Rect::new(10, 5, 40, 10)));

        assert!(!state.is_backdrop_hit(15, 7));
        assert!(state.is_backdrop_hit(5, 7));
        assert!(state.is_backdrop_hit(15, 2));

        let mut hidden = State::default();
        assert!(!hidden.is_backdrop_hit(0, 0));
        hidden.set_overlay_surface_area(None);
    }

    #[test]
    fn test_demo_item_navigation_wraps() {
        let mut state = State::default();
        state.previous_demo_item();
        assert_eq!(state.get_demo_item_index(), DEMO_ITEM_COUNT - 1);
        state.next_demo_item();
        assert_eq!(state.get_demo_item_index(), 0);
    }

    #[test]
    fn test_event_list_navigation() {
        let mut state = State::default();
        let mut events: Vec<EventRecord> = vec![];
        for id in 0..3 {
            let mut record: EventRecord = Faker.fake();
            record.id = id;
            events.push(record);
        }
        state.set_events(events);
        assert_eq!(state.events_list_state.selected(), Some(0));

        state.next_event_index();
        assert_eq!(state.events_list_state.selected(), Some(1));
        state.previous_event_index();
        state.previous_event_index();
        assert_eq!(state.events_list_state.selected(), Some(2));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = State::default();
        let record: EventRecord = Faker.fake();
        let id = record.id;
        state.set_events(vec![record]);

        state.delete_selected_event();
        assert!(state.has_delete_confirmation());
        // Until confirmed, the record stays.
        assert_eq!(state.get_events().len(), 1);

        state.cancel_delete_confirmation();
        assert!(!state.has_delete_confirmation());

        state.delete_selected_event();
        state.delete_selected_event();
        assert!(!state.has_delete_confirmation());
        state.event_deleted(id);
        assert!(state.get_events().is_empty());
    }

    #[test]
    fn test_submit_event_form_requires_title() {
        let mut state = State::default();
        state.open_event_form();
        assert!(!state.submit_event_form());
        assert_eq!(state.current_events_view(), EventsView::Create);
        assert!(state.get_status().unwrap().contains("title"));
    }

    #[test]
    fn test_attachment_input_rejects_unknown_kind() {
        let mut state = State::default();
        state.open_event_form();
        state.event_form_mut().attachment_input = "notes.txt".to_string();
        state.add_form_attachment();
        assert!(state.event_form().attachments.is_empty());
        assert!(state.get_status().unwrap().contains("Unsupported"));

        state.event_form_mut().attachment_input = "notes.pdf".to_string();
        state.add_form_attachment();
        assert_eq!(state.event_form().attachments.len(), 1);
        assert!(state.event_form().attachment_input.is_empty());
    }

    #[test]
    fn test_search_debounce_waits_for_idle() {
        let t0 = Instant::now();
        let mut state = State::default();
        state.add_search_char('m', t0);
        state.add_search_char('a', after(t0, 100));
        state.add_search_char('i', after(t0, 200));

        // Not settled yet: no query marked as searched.
        state.tick(after(t0, 400));
        assert!(state.searched_query.is_empty());

        // Settled past the debounce window. Without a worker channel the
        // dispatch is skipped, but the query is marked.
        state.tick(after(t0, 200 + SEARCH_DEBOUNCE_MS));
        assert_eq!(state.searched_query, "mai");
    }

    #[test]
    fn test_short_query_never_searches() {
        let t0 = Instant::now();
        let mut state = State::default();
        state.add_search_char('m', t0);
        state.tick(after(t0, SEARCH_DEBOUNCE_MS * 2));
        assert!(state.searched_query.is_empty());
    }

    #[test]
    fn test_stale_predictions_are_discarded() {
        let t0 = Instant::now();
        let mut state = State::default();
        state.add_search_char('m', t0);
        state.add_search_char('a', t0);

        state.set_predictions(
            "m".to_string(),
            vec![Prediction {
                description: "Maple Ave".to_string(),
                place_id: "p1".to_string(),
            }],
        );
        assert!(state.get_predictions().is_empty());

        state.set_predictions(
            "ma".to_string(),
            vec![Prediction {
                description: "Maple Ave".to_string(),
                place_id: "p1".to_string(),
            }],
        );
        assert_eq!(state.get_predictions().len(), 1);
        assert_eq!(state.address_focus(), AddressFocus::Predictions);
    }

    #[test]
    fn test_apply_place_details_fills_form() {
        let mut state = State::default();
        state.add_search_char('m', Instant::now());
        let details = PlaceDetails {
            formatted_address: "123 Main St, Springfield".to_string(),
            address_components: vec![
                crate::places::AddressComponent {
                    long_name: "123".to_string(),
                    types: vec!["street_number".to_string()],
                },
                crate::places::AddressComponent {
                    long_name: "Main St".to_string(),
                    types: vec!["route".to_string()],
                },
            ],
        };
        state.apply_place_details(details);
        assert!(state.is_manual_form_open());
        assert_eq!(state.address_form().number, "123");
        assert_eq!(state.address_form().street, "Main St");
        assert_eq!(state.address_focus(), AddressFocus::Form);
        assert!(state.get_search_query().is_empty());
        assert_eq!(
            state.get_resolved_address(),
            Some("123 Main St, Springfield")
        );
    }

    #[test]
    fn test_save_address_validates_required_fields() {
        let mut state = State::default();
        state.open_manual_form();
        state.save_address();
        assert!(state.get_status().unwrap().contains("Missing required"));

        state.address_form_mut().street = "Main St".to_string();
        state.address_form_mut().number = "123".to_string();
        state.address_form_mut().city = "Springfield".to_string();
        state.save_address();
        assert!(state.get_status().unwrap().starts_with("Saved address"));
    }
}
