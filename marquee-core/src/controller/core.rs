//! Core query controller implementation for the actor model.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::commands::{ControllerPhase, QueryControllerCommand, SearchSnapshot};
use crate::config::MarqueeConfig;
use crate::debounce::DebounceTimer;
use crate::errors::SearchError;
use crate::keywords::KeywordPicker;
use crate::pagination::PaginationTracker;
use crate::provider::MetadataSearchProvider;
use crate::scroll::{ScrollMonitor, ViewportMetrics};
use crate::types::{FetchRequest, MediaTypeFilter, MoviePage, MovieSummary, SearchFilters, SearchMode};

/// The central search state machine.
///
/// This is the private implementation that runs inside the actor. It owns
/// the entire search state and processes one command at a time; fetches
/// run in spawned tasks and settle back through the internal channel.
/// Every fetch carries a monotonically increasing sequence number, and a
/// settlement is applied only when it belongs to the latest issued fetch,
/// so overlapping requests can never let a stale response overwrite newer
/// state.
pub struct QueryController {
    /// Metadata client performing the actual lookups
    provider: Arc<dyn MetadataSearchProvider>,
    /// Configuration
    config: MarqueeConfig,
    /// Raw user input
    query_text: String,
    /// Mode derived from the query text
    mode: SearchMode,
    /// Active result filters
    filters: SearchFilters,
    /// Accumulated results in response order
    results: Vec<MovieSummary>,
    /// True while the latest issued fetch is outstanding
    loading: bool,
    /// User-facing error from the last settled fetch
    error: Option<String>,
    /// Page accounting and merge semantics
    pagination: PaginationTracker,
    /// Scroll threshold and gates
    scroll: ScrollMonitor,
    /// Discovery keyword source
    keywords: KeywordPicker,
    /// Single-slot timer for the free-text path
    debounce: DebounceTimer,
    /// Revision counter guarding debounce expiries against raced aborts
    debounce_generation: u64,
    /// True from arming the timer until its expiry is processed or the
    /// pending action is superseded by a non-debounced path
    debounce_pending: bool,
    /// Sequence number of the most recently issued fetch
    latest_seq: u64,
    /// Effective query of the last replace fetch; append fetches reuse it
    /// so Discovery pages past the first continue page 1's keyword
    lineage_query: String,
    /// Channel for internal timer and fetch notifications
    internal_sender: mpsc::UnboundedSender<QueryControllerCommand>,
}

impl QueryController {
    /// Creates a new controller in Discovery mode with empty results.
    pub fn new(
        config: MarqueeConfig,
        provider: Arc<dyn MetadataSearchProvider>,
        internal_sender: mpsc::UnboundedSender<QueryControllerCommand>,
    ) -> Self {
        let pagination = PaginationTracker::new(config.search.page_size);
        let scroll = ScrollMonitor::new(config.search.scroll_threshold);
        Self {
            provider,
            config,
            query_text: String::new(),
            mode: SearchMode::Discovery,
            filters: SearchFilters::default(),
            results: Vec::new(),
            loading: false,
            error: None,
            pagination,
            scroll,
            keywords: KeywordPicker::new(),
            debounce: DebounceTimer::new(),
            debounce_generation: 0,
            debounce_pending: false,
            latest_seq: 0,
            lineage_query: String::new(),
            internal_sender,
        }
    }

    /// Issues the initial Discovery fetch. Called once by the actor
    /// before processing any command.
    pub(super) fn start(&mut self) {
        let keyword = self.keywords.pick().to_string();
        self.issue_replace_fetch(keyword);
    }

    /// Applies a free-text change: recomputes the mode, rewinds to page 1,
    /// and either fetches immediately (Discovery) or arms the debounce
    /// timer (Search).
    pub fn set_query_text(&mut self, text: String) {
        self.query_text = text;
        self.mode = SearchMode::from_query_text(&self.query_text);
        self.pagination.reset_page();
        self.debounce_generation += 1;

        match self.mode {
            SearchMode::Discovery => {
                self.debounce.cancel();
                self.debounce_pending = false;
                let keyword = self.keywords.pick().to_string();
                self.issue_replace_fetch(keyword);
            }
            SearchMode::Search => {
                let generation = self.debounce_generation;
                let sender = self.internal_sender.clone();
                self.debounce_pending = true;
                self.debounce
                    .schedule(self.config.search.debounce_delay, move || {
                        let _ = sender.send(QueryControllerCommand::DebounceElapsed { generation });
                    });
            }
        }
    }

    /// Sets or clears the media type filter and refetches page 1.
    pub fn set_media_type(&mut self, media_type: Option<MediaTypeFilter>) {
        self.filters.media_type = media_type;
        self.refetch_for_filters();
    }

    /// Sets or clears the year filter and refetches page 1. A malformed
    /// year is kept in the state but omitted from requests.
    pub fn set_year(&mut self, year: Option<String>) {
        self.filters.year = year;
        self.refetch_for_filters();
    }

    /// Handles a scroll report. Returns true when the next page was
    /// requested; the signal is a no-op away from the bottom, while
    /// loading, or on the last known page.
    pub fn report_scroll(&mut self, metrics: &ViewportMetrics) -> bool {
        if !self
            .scroll
            .should_request_next(metrics, self.loading, self.pagination.has_more())
        {
            return false;
        }

        let page = self.pagination.advance();
        let request = FetchRequest {
            effective_query: self.lineage_query.clone(),
            page,
            filters: self.filters.clone(),
            append: true,
        };
        self.issue_fetch(request);
        true
    }

    /// Explicit clear: resets text, filters, results, and error, then
    /// issues a Discovery fetch with a freshly drawn keyword.
    pub fn clear(&mut self) {
        self.query_text.clear();
        self.mode = SearchMode::Discovery;
        self.filters = SearchFilters::default();
        self.results.clear();
        self.error = None;
        self.pagination.reset();
        self.debounce.cancel();
        self.debounce_generation += 1;
        self.debounce_pending = false;

        let keyword = self.keywords.pick().to_string();
        self.issue_replace_fetch(keyword);
    }

    /// Point-in-time view of the search state.
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query_text: self.query_text.clone(),
            mode: self.mode,
            filters: self.filters.clone(),
            page: self.pagination.page(),
            total_pages: self.pagination.total_pages(),
            results: self.results.clone(),
            loading: self.loading,
            error: self.error.clone(),
            phase: self.phase(),
        }
    }

    /// Lifecycle phase, derived from the pending-work flags. Kept as a
    /// pure function of controller state so a snapshot between a timer
    /// expiry and its processing still reports the pending work.
    fn phase(&self) -> ControllerPhase {
        if self.debounce_pending {
            ControllerPhase::AwaitingDebounce
        } else if self.loading {
            ControllerPhase::Fetching
        } else if self.error.is_some() {
            ControllerPhase::Errored
        } else {
            ControllerPhase::Idle
        }
    }

    /// Handles a debounce expiry. Expiries from superseded revisions are
    /// ignored: aborting the timer task is not atomic with an already
    /// delivered message, so the generation check is the authoritative
    /// guard.
    pub(super) fn debounce_elapsed(&mut self, generation: u64) {
        if generation != self.debounce_generation {
            tracing::debug!(
                generation,
                current = self.debounce_generation,
                "ignoring superseded debounce expiry"
            );
            return;
        }
        self.debounce_pending = false;
        let query = self.query_text.clone();
        self.issue_replace_fetch(query);
    }

    /// Applies a fetch settlement. Settlements of superseded fetches are
    /// discarded wholesale; in particular they do not clear `loading`
    /// while a newer fetch is still in flight.
    pub(super) fn fetch_settled(
        &mut self,
        seq: u64,
        request: FetchRequest,
        outcome: Result<MoviePage, SearchError>,
    ) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale fetch response");
            return;
        }

        self.loading = false;
        match outcome {
            Ok(page) => {
                self.pagination
                    .apply_success(&mut self.results, request.page, request.append, page);
                self.error = None;
                tracing::debug!(
                    seq,
                    results = self.results.len(),
                    total_pages = self.pagination.total_pages(),
                    "fetch settled"
                );
            }
            Err(error @ SearchError::NoMatches { .. }) => {
                let surfaced =
                    self.pagination
                        .apply_error(&mut self.results, request.page, request.append);
                if surfaced {
                    self.error = Some(error.user_message());
                }
                // Otherwise an append continuation ran past the real
                // result count; the accumulated pages stay visible.
            }
            Err(error) => {
                tracing::warn!(seq, %error, "metadata fetch failed");
                if !request.append {
                    self.results.clear();
                }
                self.error = Some(error.user_message());
            }
        }
    }

    /// Page-1 refetch shared by the filter setters. Uses the typed text
    /// in Search mode and a fresh keyword draw in Discovery mode; a
    /// pending debounce stays armed and the sequence guard resolves the
    /// overlap.
    fn refetch_for_filters(&mut self) {
        self.pagination.reset_page();
        let query = match self.mode {
            SearchMode::Search => self.query_text.clone(),
            SearchMode::Discovery => self.keywords.pick().to_string(),
        };
        self.issue_replace_fetch(query);
    }

    fn issue_replace_fetch(&mut self, effective_query: String) {
        self.lineage_query.clone_from(&effective_query);
        let request = FetchRequest {
            effective_query,
            page: self.pagination.page(),
            filters: self.filters.clone(),
            append: false,
        };
        self.issue_fetch(request);
    }

    fn issue_fetch(&mut self, request: FetchRequest) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.loading = true;
        self.error = None;

        tracing::debug!(
            seq,
            query = %request.effective_query,
            page = request.page,
            append = request.append,
            "issuing metadata fetch"
        );

        let provider = Arc::clone(&self.provider);
        let sender = self.internal_sender.clone();
        let deadline = self.config.network.request_timeout;
        tokio::spawn(async move {
            let outcome =
                match tokio::time::timeout(deadline, provider.search_page(&request)).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(SearchError::Timeout {
                        seconds: deadline.as_secs(),
                    }),
                };
            let _ = sender.send(QueryControllerCommand::FetchSettled {
                seq,
                request,
                outcome,
            });
        });
    }
}

impl std::fmt::Debug for QueryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("mode", &self.mode)
            .field("page", &self.pagination.page())
            .field("results", &self.results.len())
            .field("loading", &self.loading)
            .field("phase", &self.phase())
            .finish()
    }
}
