//! Command definitions for the query controller actor model.

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::errors::SearchError;
use crate::scroll::ViewportMetrics;
use crate::types::{FetchRequest, MediaTypeFilter, MoviePage, MovieSummary, SearchFilters, SearchMode};

/// Commands that can be sent to the query controller actor.
///
/// Each user-facing command carries a response channel; the internal
/// variants are posted by the controller's own timer and fetch tasks.
/// Message passing keeps the state machine single-writer with no locks.
pub enum QueryControllerCommand {
    /// Replace the free-text query input.
    SetQueryText {
        text: String,
        responder: oneshot::Sender<()>,
    },
    /// Set or clear the media type filter.
    SetMediaType {
        media_type: Option<MediaTypeFilter>,
        responder: oneshot::Sender<()>,
    },
    /// Set or clear the release year filter.
    SetYear {
        year: Option<String>,
        responder: oneshot::Sender<()>,
    },
    /// Report a scroll position. Responds with whether the next page was
    /// requested.
    ReportScroll {
        metrics: ViewportMetrics,
        responder: oneshot::Sender<bool>,
    },
    /// Reset query text, filters, and results, then refetch Discovery
    /// content.
    Clear { responder: oneshot::Sender<()> },
    /// Get a point-in-time view of the search state.
    GetSnapshot {
        responder: oneshot::Sender<SearchSnapshot>,
    },
    /// Shutdown the controller actor gracefully.
    Shutdown { responder: oneshot::Sender<()> },
    /// Internal notification that the debounce interval elapsed for a
    /// text revision.
    DebounceElapsed { generation: u64 },
    /// Internal notification that an in-flight fetch settled.
    FetchSettled {
        seq: u64,
        request: FetchRequest,
        outcome: Result<MoviePage, SearchError>,
    },
}

/// Lifecycle phase of the controller.
///
/// Errored is terminal per-request only; any new input re-enters the
/// cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ControllerPhase {
    Idle,
    AwaitingDebounce,
    Fetching,
    Errored,
}

/// Point-in-time view of the search state.
///
/// This is the single source of truth the presentation layer renders
/// from: accumulated results, pagination position, and fetch status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSnapshot {
    /// Raw user input.
    pub query_text: String,
    /// Mode derived from `query_text`.
    pub mode: SearchMode,
    /// Active result filters.
    pub filters: SearchFilters,
    /// Current 1-based page number.
    pub page: u32,
    /// Total-pages ceiling from the last successful response.
    pub total_pages: u32,
    /// Accumulated results in response order.
    pub results: Vec<MovieSummary>,
    /// True while the latest issued fetch is outstanding.
    pub loading: bool,
    /// User-facing error from the last settled fetch, if any.
    pub error: Option<String>,
    /// Controller lifecycle phase.
    pub phase: ControllerPhase,
}

impl SearchSnapshot {
    /// True once the controller has nothing pending: no armed debounce
    /// and no outstanding fetch.
    pub fn is_settled(&self) -> bool {
        !self.loading && self.phase != ControllerPhase::AwaitingDebounce
    }
}
