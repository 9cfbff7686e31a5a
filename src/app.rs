use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::{self, LogBuffer};
use crate::state::State;
use crate::storage::Storage;
use anyhow::{anyhow, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::{mpsc, Arc, Mutex};

pub type StateSaveSender = mpsc::Sender<()>;
type StateSaveReceiver = mpsc::Receiver<()>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    storage: Arc<Storage>,
}

impl App {
    /// Start a new application against the state document in the given data
    /// directory (or the default one). Returns the result of the application
    /// execution.
    ///
    pub fn start(data_dir: Option<&str>) -> Result<()> {
        let log_buffer = logger::init(LevelFilter::Info)?;
        info!("Starting application...");

        let mut storage = Storage::new();
        let mut store = storage.load(data_dir)?;
        // Streaks are recomputed once on startup so a missed day shows up
        // before any logging happens.
        store.update_streaks();

        let (save_tx, save_rx) = mpsc::channel::<()>();
        let app = App {
            state: Arc::new(Mutex::new(State::new(save_tx, store))),
            storage: Arc::new(storage),
        };
        app.start_state_saver(save_rx);
        app.start_ui(log_buffer)?;

        // Save state on exit
        {
            let state = app
                .state
                .lock()
                .map_err(|_| anyhow!("State lock poisoned"))?;
            if let Err(e) = app.storage.save(state.get_store()) {
                error!("Failed to save state on exit: {}", e);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a thread that persists the store whenever a state mutation
    /// requests it.
    ///
    fn start_state_saver(&self, receiver: StateSaveReceiver) {
        let state = Arc::clone(&self.state);
        let storage = Arc::clone(&self.storage);
        std::thread::spawn(move || {
            while receiver.recv().is_ok() {
                match state.lock() {
                    Ok(state_guard) => {
                        if let Err(e) = storage.save(state_guard.get_store()) {
                            error!("Failed to save state: {}", e);
                        }
                    }
                    Err(_) => {
                        error!("State lock poisoned, skipping save");
                    }
                }
            }
        });
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    fn start_ui(&self, log_buffer: LogBuffer) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let terminal_event_handler = TerminalEventHandler::new();
        loop {
            let mut state = self
                .state
                .lock()
                .map_err(|_| anyhow!("State lock poisoned"))?;
            state.push_debug_entries(log_buffer.drain());
            terminal.draw(|frame| crate::ui::render(frame, &mut state))?;
            if !terminal_event_handler.handle_next(&mut state)? {
                debug!("Received application exit request.");
                break;
            }
            if state.take_export_request() {
                match self.storage.export(state.get_store(), None) {
                    Ok(path) => info!("Backup written to {:?}", path),
                    Err(e) => error!("Failed to export backup: {}", e),
                }
            }
        }

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

        Ok(())
    }
}
