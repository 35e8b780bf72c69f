//! Data types for query orchestration.

use serde::{Deserialize, Serialize};

/// Placeholder image used when a result carries no usable poster.
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Query mode, fully determined by the current query text.
///
/// Discovery substitutes a randomly drawn keyword for the missing search
/// term; Search uses the user's text verbatim.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchMode {
    Discovery,
    Search,
}

impl SearchMode {
    /// Resolves the mode from raw query text. Blank or whitespace-only
    /// text means Discovery.
    pub fn from_query_text(text: &str) -> Self {
        if text.trim().is_empty() {
            SearchMode::Discovery
        } else {
            SearchMode::Search
        }
    }
}

/// Media type filter accepted by the metadata service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum MediaTypeFilter {
    Movie,
    Series,
    Episode,
}

impl MediaTypeFilter {
    /// Wire value for the `type` request parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            MediaTypeFilter::Movie => "movie",
            MediaTypeFilter::Series => "series",
            MediaTypeFilter::Episode => "episode",
        }
    }
}

/// User-selected result filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    /// Restrict results to a single media type.
    pub media_type: Option<MediaTypeFilter>,
    /// Raw year input. Only sent upstream when it is exactly four digits.
    pub year: Option<String>,
}

impl SearchFilters {
    /// Year value to send upstream, or None when the input is absent or
    /// malformed. A malformed year is silently omitted rather than
    /// surfaced as an error.
    pub fn effective_year(&self) -> Option<&str> {
        self.year
            .as_deref()
            .filter(|y| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// Single movie entry as accumulated in the result list.
///
/// Identity key is `id` (the IMDb identifier).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    pub media_type: String,
    /// Poster URL, None when the service reported no usable image.
    pub poster_url: Option<String>,
}

impl MovieSummary {
    /// Poster URL for display, substituting the placeholder when absent.
    pub fn display_poster(&self) -> &str {
        match self.poster_url.as_deref() {
            Some(url) => resolve_poster(url),
            None => PLACEHOLDER_POSTER_URL,
        }
    }
}

/// Substitutes the placeholder for missing or sentinel poster values.
///
/// Idempotent: the placeholder resolves to itself, so a failed placeholder
/// load never re-triggers substitution.
pub fn resolve_poster(url: &str) -> &str {
    if url.is_empty() || url == "N/A" {
        PLACEHOLDER_POSTER_URL
    } else {
        url
    }
}

/// One page of results from the metadata service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoviePage {
    /// Entries in response order.
    pub movies: Vec<MovieSummary>,
    /// Total matches across all pages, as reported by the service.
    pub total_results: u32,
}

/// Fully-resolved parameters for a single metadata fetch.
///
/// Ephemeral: built per fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Search term after mode resolution.
    pub effective_query: String,
    /// 1-based page number.
    pub page: u32,
    /// Filters active when the fetch was issued.
    pub filters: SearchFilters,
    /// Whether results concatenate onto the accumulated list.
    pub append: bool,
}
