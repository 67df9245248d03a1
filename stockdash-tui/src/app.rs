//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use stockdash_core::present::has_peers;
use stockdash_core::ticker::normalize_input;
use stockdash_core::{save_peer_csv, FetchAction, FetchError, FetchState, Phase};

use crate::theme::{Theme, ThemeMode};
use crate::worker::{WorkerCommand, WorkerResponse};

/// Error history length.
pub const MAX_ERRORS: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Export,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Export => "CSV",
        }
    }

    pub fn of(err: &FetchError) -> Self {
        match err.category() {
            "data" => ErrorCategory::Data,
            _ => ErrorCategory::Network,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Dashboard
    pub input: String,
    pub fetch: FetchState,
    pub theme_mode: ThemeMode,
    pub export_dir: PathBuf,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            running: true,
            input: String::new(),
            fetch: FetchState::new(),
            theme_mode: ThemeMode::default(),
            export_dir,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(MAX_ERRORS),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    pub fn toggle_theme(&mut self) {
        self.theme_mode = self.theme_mode.toggle();
        self.set_status(format!("Theme: {}", self.theme_mode.label()));
    }

    /// Append typed text to the ticker input, upper-cased.
    pub fn type_char(&mut self, c: char) {
        self.input.push_str(&normalize_input(&c.to_string()));
    }

    /// Submit the current input. Blank input is ignored.
    pub fn submit(&mut self) {
        let (next, request) = std::mem::take(&mut self.fetch)
            .reduce(FetchAction::Submit(self.input.clone()));
        self.fetch = next;

        let Some(request) = request else {
            return;
        };
        let context = request.ticker.to_string();
        let command = WorkerCommand::Fetch {
            seq: request.seq,
            ticker: request.ticker,
        };
        if self.worker_tx.send(command).is_err() {
            // Keep loading from sticking when the worker has died.
            let err = FetchError::Client("background worker is not running".into());
            self.apply_response(WorkerResponse::Fetched {
                seq: request.seq,
                outcome: Err(err),
            });
            return;
        }
        self.set_status(format!("Fetching {context}..."));
    }

    /// Feed a worker response through the controller.
    pub fn apply_response(&mut self, resp: WorkerResponse) {
        let WorkerResponse::Fetched { seq, outcome } = resp;
        let current = seq == self.fetch.seq() && self.fetch.is_loading();
        let category = outcome.as_ref().err().map(ErrorCategory::of);

        let (next, _) =
            std::mem::take(&mut self.fetch).reduce(FetchAction::Resolve { seq, outcome });
        self.fetch = next;

        if !current {
            return;
        }
        match self.fetch.phase() {
            Phase::Loaded { ticker, .. } => {
                let msg = format!("Loaded {ticker}");
                self.set_status(msg);
            }
            Phase::Empty { ticker } => {
                let msg = format!("{ticker}: no data found");
                self.set_warning(msg);
            }
            Phase::Failed { ticker, message } => {
                let (message, context) = (message.clone(), ticker.to_string());
                self.push_error(category.unwrap_or(ErrorCategory::Network), message, context);
            }
            Phase::Idle | Phase::Loading { .. } => {}
        }
    }

    /// Write the peer CSV for the loaded snapshot.
    pub fn export_peers(&mut self) {
        let (Some(snapshot), Some(ticker)) = (self.fetch.snapshot(), self.fetch.ticker()) else {
            self.set_warning("Nothing to export: load a ticker first");
            return;
        };
        if !has_peers(Some(snapshot)) {
            self.set_warning("No peer data to export");
            return;
        }

        match save_peer_csv(&self.export_dir, ticker, snapshot.peers()) {
            Ok(Some(path)) => self.set_status(format!("Exported {}", path.display())),
            Ok(None) => self.set_warning("No peer data to export"),
            Err(e) => {
                let context = ticker.to_string();
                self.push_error(ErrorCategory::Export, format!("Export failed: {e}"), context);
            }
        }
    }

    /// Push an error to the history, capping at [`MAX_ERRORS`].
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > MAX_ERRORS {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
