//! Metadata provider seam between orchestration and transport.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::SearchError;
use crate::types::{FetchRequest, MoviePage, MovieSummary};

/// Trait for movie metadata search providers.
///
/// Implementations perform the actual lookup for a fully-resolved request
/// (real HTTP client, scripted mock for tests).
#[async_trait]
pub trait MetadataSearchProvider: Send + Sync + std::fmt::Debug {
    /// Fetches one result page for the request.
    ///
    /// # Errors
    /// - `SearchError::NoMatches` - valid response, zero matches or invalid query
    /// - `SearchError::Network` - transport failure
    /// - `SearchError::Parse` - undecodable response
    async fn search_page(&self, request: &FetchRequest) -> Result<MoviePage, SearchError>;
}

/// Scripted provider for tests and offline development.
///
/// Outcomes are consumed in push order; an optional per-outcome delay
/// simulates slow responses for overlap scenarios. Every incoming request
/// is recorded in arrival order. With the script exhausted it answers
/// with the service's standard not-found response.
#[derive(Debug, Default)]
pub struct MockMetadataProvider {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<FetchRequest>>,
}

#[derive(Debug)]
struct ScriptedResponse {
    delay: Option<Duration>,
    outcome: Result<MoviePage, SearchError>,
}

impl MockMetadataProvider {
    /// Creates a provider with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful page.
    pub fn push_page(&self, page: MoviePage) {
        self.responses.lock().push_back(ScriptedResponse {
            delay: None,
            outcome: Ok(page),
        });
    }

    /// Queues a successful page delivered after `delay`.
    pub fn push_page_delayed(&self, page: MoviePage, delay: Duration) {
        self.responses.lock().push_back(ScriptedResponse {
            delay: Some(delay),
            outcome: Ok(page),
        });
    }

    /// Queues a failing outcome.
    pub fn push_error(&self, error: SearchError) {
        self.responses.lock().push_back(ScriptedResponse {
            delay: None,
            outcome: Err(error),
        });
    }

    /// Queues a failing outcome delivered after `delay`.
    pub fn push_error_delayed(&self, error: SearchError, delay: Duration) {
        self.responses.lock().push_back(ScriptedResponse {
            delay: Some(delay),
            outcome: Err(error),
        });
    }

    /// Requests received so far, in arrival order.
    pub fn recorded_requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Builds a realistic page of `count` entries with ids unique across
    /// page numbers, for scripting multi-page scenarios.
    pub fn sample_page(prefix: &str, page: u32, count: u32, total_results: u32) -> MoviePage {
        let movies = (0..count)
            .map(|index| {
                let ordinal = (page - 1) * count + index + 1;
                MovieSummary {
                    id: format!("tt{page:02}{index:05}"),
                    title: format!("{prefix} {ordinal}"),
                    year: "2020".to_string(),
                    media_type: "movie".to_string(),
                    poster_url: None,
                }
            })
            .collect();
        MoviePage {
            movies,
            total_results,
        }
    }
}

#[async_trait]
impl MetadataSearchProvider for MockMetadataProvider {
    async fn search_page(&self, request: &FetchRequest) -> Result<MoviePage, SearchError> {
        self.requests.lock().push(request.clone());

        let scripted = self.responses.lock().pop_front();
        match scripted {
            Some(response) => {
                if let Some(delay) = response.delay {
                    tokio::time::sleep(delay).await;
                }
                response.outcome
            }
            None => Err(SearchError::NoMatches {
                message: "Movie not found!".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchFilters;

    fn request(query: &str, page: u32) -> FetchRequest {
        FetchRequest {
            effective_query: query.to_string(),
            page,
            filters: SearchFilters::default(),
            append: page > 1,
        }
    }

    #[tokio::test]
    async fn test_mock_replays_script_in_order() {
        let provider = MockMetadataProvider::new();
        provider.push_page(MockMetadataProvider::sample_page("batman", 1, 10, 42));
        provider.push_error(SearchError::no_results());

        let page = provider.search_page(&request("batman", 1)).await.unwrap();
        assert_eq!(page.movies.len(), 10);
        assert_eq!(page.total_results, 42);

        let err = provider.search_page(&request("batman", 2)).await.unwrap_err();
        assert!(matches!(err, SearchError::NoMatches { .. }));

        let requests = provider.recorded_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].effective_query, "batman");
        assert!(requests[1].append);
    }

    #[tokio::test]
    async fn test_mock_defaults_to_not_found_when_exhausted() {
        let provider = MockMetadataProvider::new();
        let err = provider.search_page(&request("zzz", 1)).await.unwrap_err();
        assert_eq!(
            err,
            SearchError::NoMatches {
                message: "Movie not found!".to_string()
            }
        );
    }

    #[test]
    fn test_sample_page_ids_unique_across_pages() {
        let first = MockMetadataProvider::sample_page("batman", 1, 10, 42);
        let second = MockMetadataProvider::sample_page("batman", 2, 10, 42);
        for movie in &second.movies {
            assert!(!first.movies.iter().any(|m| m.id == movie.id));
        }
        assert_eq!(second.movies[0].title, "batman 11");
    }
}
