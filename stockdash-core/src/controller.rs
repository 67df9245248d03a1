//! Fetch controller — the request lifecycle for one ticker query.
//!
//! State is an immutable value moved through [`FetchState::reduce`]. Every
//! submit gets a fresh sequence number; a response that does not carry the
//! sequence of the current in-flight request is stale and dropped, so a slow
//! earlier query can never overwrite a newer one.
//!
//! ```text
//! Idle ──submit──▶ Loading ──resolve──▶ Loaded | Empty | Failed
//!                     ▲                         │
//!                     └─────────submit──────────┘
//! ```

use crate::data::{FetchError, SnapshotProvider};
use crate::snapshot::StockSnapshot;
use crate::ticker::Ticker;

/// Message shown when the request succeeded but returned nothing usable.
pub const EMPTY_RESULT_MESSAGE: &str = "No data found.";

/// User-facing text for a failed fetch.
pub fn failure_message(err: &FetchError) -> String {
    format!("Failed to fetch data: {err}")
}

/// Where the current query is in its lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Loading {
        ticker: Ticker,
    },
    Loaded {
        ticker: Ticker,
        snapshot: Box<StockSnapshot>,
    },
    Empty {
        ticker: Ticker,
    },
    Failed {
        ticker: Ticker,
        message: String,
    },
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading { .. } => "loading",
            Phase::Loaded { .. } => "loaded",
            Phase::Empty { .. } => "empty",
            Phase::Failed { .. } => "failed",
        }
    }
}

/// One outbound request the caller must issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub ticker: Ticker,
}

/// Inputs to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchAction {
    /// The user pressed fetch with the given raw input.
    Submit(String),
    /// A request finished.
    Resolve {
        seq: u64,
        outcome: Result<Option<StockSnapshot>, FetchError>,
    },
}

/// Controller state: the current phase plus the last issued sequence number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    seq: u64,
    phase: Phase,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action. Returns the next state and, for an accepted submit,
    /// the request to issue.
    pub fn reduce(self, action: FetchAction) -> (Self, Option<FetchRequest>) {
        match action {
            FetchAction::Submit(query) => self.submit(&query),
            FetchAction::Resolve { seq, outcome } => (self.resolve(seq, outcome), None),
        }
    }

    fn submit(self, query: &str) -> (Self, Option<FetchRequest>) {
        let Some(ticker) = Ticker::parse(query) else {
            return (self, None);
        };

        let seq = self.seq + 1;
        if let Phase::Loading { ticker: previous } = &self.phase {
            tracing::debug!(%previous, seq, "superseding in-flight request");
        }
        tracing::info!(%ticker, seq, "fetch submitted");

        let request = FetchRequest {
            seq,
            ticker: ticker.clone(),
        };
        let next = Self {
            seq,
            phase: Phase::Loading { ticker },
        };
        (next, Some(request))
    }

    fn resolve(self, seq: u64, outcome: Result<Option<StockSnapshot>, FetchError>) -> Self {
        let ticker = match &self.phase {
            Phase::Loading { ticker } if seq == self.seq => ticker.clone(),
            _ => {
                tracing::debug!(seq, current = self.seq, phase = self.phase.label(), "dropping stale response");
                return self;
            }
        };

        let phase = match outcome {
            Ok(Some(snapshot)) => {
                tracing::info!(%ticker, seq, "fetch succeeded");
                Phase::Loaded {
                    ticker,
                    snapshot: Box::new(snapshot),
                }
            }
            Ok(None) => {
                tracing::info!(%ticker, seq, "fetch returned no data");
                Phase::Empty { ticker }
            }
            Err(err) => {
                tracing::warn!(%ticker, seq, error = %err, category = err.category(), "fetch failed");
                Phase::Failed {
                    ticker,
                    message: failure_message(&err),
                }
            }
        };
        Self { seq: self.seq, phase }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Sequence number of the most recent accepted submit.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// User-facing error text, if the last query ended in error.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Empty { .. } => Some(EMPTY_RESULT_MESSAGE),
            Phase::Failed { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Option<&StockSnapshot> {
        match &self.phase {
            Phase::Loaded { snapshot, .. } => Some(&**snapshot),
            _ => None,
        }
    }

    /// Ticker of the current or last query.
    pub fn ticker(&self) -> Option<&Ticker> {
        match &self.phase {
            Phase::Idle => None,
            Phase::Loading { ticker }
            | Phase::Loaded { ticker, .. }
            | Phase::Empty { ticker }
            | Phase::Failed { ticker, .. } => Some(ticker),
        }
    }
}

/// Run one submit/resolve cycle synchronously against `provider`.
///
/// A blank query returns the idle state without touching the provider.
pub fn fetch_once<P>(provider: &P, query: &str) -> FetchState
where
    P: SnapshotProvider + ?Sized,
{
    let (state, request) = FetchState::new().reduce(FetchAction::Submit(query.to_string()));
    match request {
        Some(req) => {
            let outcome = provider.fetch(&req.ticker);
            state
                .reduce(FetchAction::Resolve {
                    seq: req.seq,
                    outcome,
                })
                .0
        }
        None => state,
    }
}
