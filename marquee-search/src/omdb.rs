//! OMDb search client implementing the metadata provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use marquee_core::MarqueeError;
use marquee_core::config::NetworkConfig;
use marquee_core::errors::SearchError;
use marquee_core::provider::MetadataSearchProvider;
use marquee_core::types::{FetchRequest, MoviePage, MovieSummary};

/// Public OMDb search endpoint.
const DEFAULT_API_BASE: &str = "https://www.omdbapi.com/";

/// OMDb-backed metadata search provider.
///
/// Performs the network call for a fully-resolved fetch request and maps
/// the wire response onto the core result types.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Creates a client against the public OMDb endpoint.
    ///
    /// # Errors
    /// - `SearchError::Network` - The HTTP client could not be constructed
    pub fn new(api_key: String, network: &NetworkConfig) -> Result<Self, SearchError> {
        Self::with_config(DEFAULT_API_BASE.to_string(), api_key, network)
    }

    /// Creates a client with an explicit base URL, for tests and proxies.
    ///
    /// # Errors
    /// - `SearchError::Network` - The HTTP client could not be constructed
    pub fn with_config(
        base_url: String,
        api_key: String,
        network: &NetworkConfig,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(network.request_timeout)
            .user_agent(network.user_agent)
            .build()
            .map_err(|e| SearchError::Network {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Creates a client keyed from the `OMDB_API_KEY` environment
    /// variable.
    ///
    /// # Errors
    /// - `MarqueeError::Configuration` - The variable is not set
    /// - `MarqueeError::Search` - The HTTP client could not be constructed
    pub fn from_env(network: &NetworkConfig) -> marquee_core::Result<Self> {
        let api_key = std::env::var("OMDB_API_KEY").map_err(|_| MarqueeError::Configuration {
            reason: "OMDB_API_KEY is not set".to_string(),
        })?;
        Ok(Self::new(api_key, network)?)
    }

    /// Assembles the request URL. `apikey`, `s`, and `page` are always
    /// present; `type` and `y` only when their filters apply, with a
    /// malformed year silently omitted.
    fn request_url(&self, request: &FetchRequest) -> String {
        let mut url = format!(
            "{}?apikey={}&s={}&page={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(&request.effective_query),
            request.page
        );

        if let Some(media_type) = request.filters.media_type {
            url.push_str(&format!("&type={}", media_type.as_param()));
        }
        if let Some(year) = request.filters.effective_year() {
            url.push_str(&format!("&y={year}"));
        }

        url
    }
}

#[async_trait]
impl MetadataSearchProvider for OmdbClient {
    async fn search_page(&self, request: &FetchRequest) -> Result<MoviePage, SearchError> {
        let url = self.request_url(request);
        tracing::debug!(
            query = %request.effective_query,
            page = request.page,
            "querying OMDb"
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::Network {
                reason: format!("HTTP request failed: {e}"),
            })?;

        let body: OmdbSearchResponse =
            response.json().await.map_err(|e| SearchError::Parse {
                reason: format!("JSON decoding failed: {e}"),
            })?;

        body.into_page()
    }
}

/// Response from the OMDb search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbSearchResponse {
    /// API response status, "True" or "False"
    #[serde(rename = "Response")]
    pub response: Option<String>,
    /// Result entries, present on success
    #[serde(rename = "Search")]
    pub search: Option<Vec<OmdbSummary>>,
    /// Total matches as a numeric string, present on success
    #[serde(rename = "totalResults")]
    pub total_results: Option<String>,
    /// Error message, present on failure
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

/// Single search entry as returned by OMDb.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbSummary {
    /// Title of the media item
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year as string
    #[serde(rename = "Year")]
    pub year: String,
    /// IMDb identifier
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Media type (movie, series, episode)
    #[serde(rename = "Type")]
    pub media_type: String,
    /// URL to poster image, or the "N/A" sentinel
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

impl OmdbSearchResponse {
    /// Converts the wire response into a result page.
    ///
    /// # Errors
    /// - `SearchError::NoMatches` - The service answered `Response:"False"`,
    ///   carrying the service text or the "No results found" default
    /// - `SearchError::Parse` - `totalResults` was not a numeric string
    pub fn into_page(self) -> Result<MoviePage, SearchError> {
        if self.response.as_deref() != Some("True") {
            return Err(match self.error {
                Some(message) => SearchError::NoMatches { message },
                None => SearchError::no_results(),
            });
        }

        let total_results = self
            .total_results
            .as_deref()
            .unwrap_or("0")
            .trim()
            .parse::<u32>()
            .map_err(|_| SearchError::Parse {
                reason: format!("invalid totalResults: {:?}", self.total_results),
            })?;

        let movies = self
            .search
            .unwrap_or_default()
            .into_iter()
            .map(OmdbSummary::into_summary)
            .collect();

        Ok(MoviePage {
            movies,
            total_results,
        })
    }
}

impl OmdbSummary {
    /// Maps the wire entry onto the core summary type, turning the "N/A"
    /// poster sentinel into an absent poster.
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            media_type: self.media_type,
            poster_url: self.poster.filter(|p| p != "N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use marquee_core::types::{MediaTypeFilter, SearchFilters};

    use super::*;

    fn client() -> OmdbClient {
        OmdbClient::with_config(
            "https://omdb.test/".to_string(),
            "test-key".to_string(),
            &NetworkConfig::default(),
        )
        .unwrap()
    }

    fn request(query: &str, filters: SearchFilters) -> FetchRequest {
        FetchRequest {
            effective_query: query.to_string(),
            page: 1,
            filters,
            append: false,
        }
    }

    #[test]
    fn test_url_carries_mandatory_params() {
        let url = client().request_url(&request("batman", SearchFilters::default()));
        assert_eq!(url, "https://omdb.test/?apikey=test-key&s=batman&page=1");
    }

    #[test]
    fn test_url_percent_encodes_query() {
        let url = client().request_url(&request("the dark knight", SearchFilters::default()));
        assert!(url.contains("&s=the%20dark%20knight&"));
    }

    #[test]
    fn test_url_includes_type_filter_when_set() {
        let filters = SearchFilters {
            media_type: Some(MediaTypeFilter::Series),
            year: None,
        };
        let url = client().request_url(&request("batman", filters));
        assert!(url.ends_with("&type=series"));
    }

    #[test]
    fn test_url_omits_malformed_year() {
        let filters = SearchFilters {
            media_type: None,
            year: Some("202".to_string()),
        };
        let url = client().request_url(&request("batman", filters));
        assert!(!url.contains("&y="));

        let filters = SearchFilters {
            media_type: None,
            year: Some("2020".to_string()),
        };
        let url = client().request_url(&request("batman", filters));
        assert!(url.ends_with("&y=2020"));
    }

    #[test]
    fn test_successful_response_maps_to_page() {
        let body = r#"{
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://example.com/bb.jpg"},
                {"Title": "Batman Returns", "Year": "1992", "imdbID": "tt0103776", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "42",
            "Response": "True"
        }"#;
        let response: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        let page = response.into_page().unwrap();

        assert_eq!(page.total_results, 42);
        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].id, "tt0372784");
        assert_eq!(
            page.movies[0].poster_url.as_deref(),
            Some("https://example.com/bb.jpg")
        );
        assert_eq!(page.movies[1].poster_url, None);
    }

    #[test]
    fn test_negative_response_carries_service_message() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let response: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_page().unwrap_err(),
            SearchError::NoMatches {
                message: "Movie not found!".to_string()
            }
        );
    }

    #[test]
    fn test_negative_response_without_message_gets_default() {
        let body = r#"{"Response": "False"}"#;
        let response: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_page().unwrap_err(),
            SearchError::NoMatches {
                message: "No results found".to_string()
            }
        );
    }

    #[test]
    fn test_unparseable_total_results_is_a_parse_error() {
        let body = r#"{"Search": [], "totalResults": "many", "Response": "True"}"#;
        let response: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_page().unwrap_err(),
            SearchError::Parse { .. }
        ));
    }

    #[tokio::test]
    async fn test_live_search_batman() {
        // Requires internet and OMDB_API_KEY; otherwise does nothing.
        let Ok(api_key) = std::env::var("OMDB_API_KEY") else {
            return;
        };
        let client = OmdbClient::new(api_key, &NetworkConfig::default()).unwrap();

        if let Ok(page) = client
            .search_page(&request("batman", SearchFilters::default()))
            .await
        {
            assert!(!page.movies.is_empty());
            assert!(page.total_results >= page.movies.len() as u32);
        }
        // Don't fail the suite on network trouble or API limits.
    }
}
