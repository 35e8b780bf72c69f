//! Page accounting and result-set merge semantics.

use crate::types::{MoviePage, MovieSummary};

/// Owns the current page number and the total-pages ceiling derived from
/// the last successful response, and decides whether a page's results
/// replace or extend the accumulated result set.
#[derive(Debug, Clone)]
pub struct PaginationTracker {
    page: u32,
    total_pages: u32,
    page_size: u32,
}

impl PaginationTracker {
    /// Creates a tracker at page 1 with the given page size.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            total_pages: 1,
            page_size,
        }
    }

    /// Current 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total-pages ceiling from the last successful response.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// True while further pages remain to be fetched.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }

    /// Rewinds to page 1 for a new query or filter set. The total-pages
    /// ceiling stays until the next response overwrites it.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Rewinds to page 1 and forgets the ceiling, for the explicit clear
    /// action.
    pub fn reset(&mut self) {
        self.page = 1;
        self.total_pages = 1;
    }

    /// Advances to the next page and returns it.
    pub fn advance(&mut self) -> u32 {
        self.page += 1;
        self.page
    }

    /// Merges a successful response page into `results`.
    ///
    /// Append-mode pages past the first concatenate in arrival order,
    /// skipping entries whose id is already accumulated; anything else
    /// replaces the result set wholesale. The ceiling is recomputed from
    /// the reported total.
    pub fn apply_success(
        &mut self,
        results: &mut Vec<MovieSummary>,
        request_page: u32,
        append: bool,
        page: MoviePage,
    ) {
        if append && request_page > 1 {
            for movie in page.movies {
                if !results.iter().any(|existing| existing.id == movie.id) {
                    results.push(movie);
                }
            }
        } else {
            *results = page.movies;
        }
        self.total_pages = self.total_pages_for(page.total_results);
    }

    /// Applies the error path for a failed or empty response.
    ///
    /// Returns true when the error should surface: a replace-path failure
    /// clears the accumulated results and resets the ceiling. An append
    /// continuation leaves everything visible and reports nothing — the
    /// service simply had no more results.
    pub fn apply_error(
        &mut self,
        results: &mut Vec<MovieSummary>,
        request_page: u32,
        append: bool,
    ) -> bool {
        if !append || request_page == 1 {
            results.clear();
            self.total_pages = 1;
            true
        } else {
            false
        }
    }

    fn total_pages_for(&self, total_results: u32) -> u32 {
        total_results.div_ceil(self.page_size).max(1)
    }
}
