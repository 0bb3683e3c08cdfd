use crate::config::Config;
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::events::worker::{Event as WorkerEvent, Handler as WorkerEventHandler};
use crate::logger::CapturedLogs;
use crate::places::Places;
use crate::state::{Overlay, State};
use crate::store::Store;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub type WorkerSender = std::sync::mpsc::Sender<WorkerEvent>;
type WorkerReceiver = std::sync::mpsc::Receiver<WorkerEvent>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, logs: CapturedLogs) -> Result<()> {
        info!("Starting application...");
        let (tx, rx) = std::sync::mpsc::channel::<WorkerEvent>();
        let theme = Theme::from_name(&config.theme_name);
        let overlay = Overlay::new(
            Duration::from_millis(config.overlay_open_ms),
            Duration::from_millis(config.overlay_close_ms),
        );
        let app = App {
            state: Arc::new(Mutex::new(State::new(tx.clone(), theme, overlay))),
            config,
        };
        app.start_worker(rx)?;
        app.start_ui(tx, logs).await?;
        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_worker(&self, receiver: WorkerReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous work...");
        let cloned_state = Arc::clone(&self.state);
        let data_dir = self.config.resolve_data_dir()?;
        let api_key = self.config.places_api_key.clone();
        std::thread::spawn(move || {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
                .block_on(async {
                    let store = match Store::open(&data_dir) {
                        Ok(store) => store,
                        Err(e) => {
                            error!("Failed to open event store: {}", e);
                            return;
                        }
                    };
                    let places = api_key.as_deref().map(Places::new);
                    let mut worker_event_handler =
                        WorkerEventHandler::new(&cloned_state, &store, places.as_ref());
                    while let Ok(worker_event) = receiver.recv() {
                        match worker_event_handler.handle(worker_event).await {
                            Ok(_) => (),
                            Err(e) => error!("Failed to handle worker event: {}", e),
                        }
                    }
                })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self, worker_sender: WorkerSender, logs: CapturedLogs) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        worker_sender.send(WorkerEvent::LoadEvents)?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self.state.lock().await;
            for entry in logs.drain() {
                state.add_debug_entry(entry);
            }
            if let Ok(size) = terminal.backend().size() {
                state.set_terminal_size(size);
            };
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        Ok(())
    }
}
