//! Marquee Core - Query orchestration for movie metadata search
//!
//! This crate provides the building blocks of the search front end: the
//! query controller state machine and its actor, pagination and scroll
//! handling, debounced input, the Discovery keyword fallback, and the
//! provider seam the metadata client plugs into.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod errors;
pub mod keywords;
pub mod pagination;
pub mod provider;
pub mod scroll;
pub mod tracing_setup;
pub mod types;

// Re-export main types for convenient access
pub use config::MarqueeConfig;
pub use controller::{ControllerPhase, QueryControllerHandle, SearchSnapshot, spawn_query_controller};
pub use debounce::DebounceTimer;
pub use errors::SearchError;
pub use keywords::KeywordPicker;
pub use pagination::PaginationTracker;
pub use provider::{MetadataSearchProvider, MockMetadataProvider};
pub use scroll::{ScrollMonitor, ViewportMetrics};
pub use types::{
    FetchRequest, MediaTypeFilter, MoviePage, MovieSummary, SearchFilters, SearchMode,
};

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Search(e) => e.user_message(),
            MarqueeError::Configuration { reason } => format!("Configuration error: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
