use crate::places::Places;
use crate::state::State;
use crate::store::{NewEventRecord, Store};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different worker event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadEvents,
    CreateEvent { record: NewEventRecord },
    DeleteEvent { id: i64 },
    SearchPlaces { query: String },
    GetPlaceDetails { place_id: String },
}

/// Specify struct for managing state with worker events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    store: &'a Store,
    places: Option<&'a Places>,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, store: &'a Store, places: Option<&'a Places>) -> Self {
        Handler {
            state,
            store,
            places,
        }
    }

    /// Handle worker events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing worker event '{:?}'...", event);
        match event {
            Event::LoadEvents => self.load_events().await?,
            Event::CreateEvent { record } => self.create_event(record).await?,
            Event::DeleteEvent { id } => self.delete_event(id).await?,
            Event::SearchPlaces { query } => self.search_places(query).await?,
            Event::GetPlaceDetails { place_id } => self.get_place_details(place_id).await?,
        }
        Ok(())
    }

    /// Update state with all stored event records.
    ///
    async fn load_events(&mut self) -> Result<()> {
        info!("Loading stored event records...");
        let records = self.store.list()?;
        info!("Loaded {} event records.", records.len());
        let mut state = self.state.lock().await;
        state.set_events(records);
        Ok(())
    }

    /// Persist a new event record and update state with the stored copy.
    ///
    async fn create_event(&mut self, record: NewEventRecord) -> Result<()> {
        info!("Creating event '{}'...", record.title);
        match self.store.insert(record) {
            Ok(stored) => {
                info!("Event created with id {}.", stored.id);
                let mut state = self.state.lock().await;
                state.set_status(format!("Created event '{}'.", stored.title));
                state.event_created(stored);
                Ok(())
            }
            Err(e) => {
                error!("Failed to create event: {}", e);
                let mut state = self.state.lock().await;
                state.set_status(format!("Failed to create event: {}", e));
                state.set_events(self.store.list().unwrap_or_default());
                Ok(())
            }
        }
    }

    /// Delete a stored event record.
    ///
    async fn delete_event(&mut self, id: i64) -> Result<()> {
        info!("Deleting event {}...", id);
        match self.store.delete(id) {
            Ok(()) => {
                info!("Event {} deleted.", id);
                let mut state = self.state.lock().await;
                state.event_deleted(id);
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete event {}: {}", id, e);
                let mut state = self.state.lock().await;
                state.set_status(format!("Failed to delete event: {}", e));
                state.set_events(self.store.list().unwrap_or_default());
                Ok(())
            }
        }
    }

    /// Update state with address predictions for a search query.
    ///
    async fn search_places(&mut self, query: String) -> Result<()> {
        let places = match self.places {
            Some(places) => places,
            None => {
                warn!("Skipping address search without a configured API key.");
                let mut state = self.state.lock().await;
                state.set_status("Set places_api_key in the config to search addresses.".to_string());
                state.set_predictions(query, vec![]);
                return Ok(());
            }
        };
        info!("Searching addresses for '{}'...", query);
        match places.autocomplete(&query).await {
            Ok(predictions) => {
                info!("Received {} predictions for '{}'.", predictions.len(), query);
                let mut state = self.state.lock().await;
                state.set_predictions(query, predictions);
                Ok(())
            }
            Err(e) => {
                error!("Address search for '{}' failed: {}", query, e);
                let mut state = self.state.lock().await;
                state.set_status(format!("Address search failed: {}", e));
                state.set_predictions(query, vec![]);
                Ok(())
            }
        }
    }

    /// Resolve a prediction into full place details and fold them into state.
    ///
    async fn get_place_details(&mut self, place_id: String) -> Result<()> {
        let places = match self.places {
            Some(places) => places,
            None => {
                warn!("Skipping place details without a configured API key.");
                return Ok(());
            }
        };
        info!("Fetching place details for '{}'...", place_id);
        match places.details(&place_id).await {
            Ok(details) => {
                let mut state = self.state.lock().await;
                state.apply_place_details(details);
                info!("Place details loaded.");
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch place details for '{}': {}", place_id, e);
                let mut state = self.state.lock().await;
                state.set_status(format!("Failed to fetch place details: {}", e));
                Ok(())
            }
        }
    }
}
