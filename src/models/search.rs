//! Search and pagination state with its transitions.
//!
//! [`SearchState`] is mutated only through the methods here, which the query
//! controller calls from inside a single critical section. Every accepted user
//! action issues a [`FetchKey`]; a fetch outcome is applied only when its key is
//! still the latest one issued.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, FetchError};

use super::{Movie, MoviePage};

/// Pagination ceiling enforced by the catalog
pub const MAX_TOTAL_PAGES: u32 = 500;

/// Lifecycle of the active fetch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one issued fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub seq: u64,
    pub query: String,
    pub page: u32,
}

/// How a fetch outcome was reconciled against the current state
#[derive(Debug)]
pub enum Settlement {
    /// Superseded by a later action; nothing changed
    Stale,
    /// Results displayed
    Loaded { count: usize },
    /// Zero matches
    Empty,
    /// Fetch failed; state moved to `Error`
    Failed(FetchError),
}

/// Snapshot of the search session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub page: u32,
    pub status: SearchStatus,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
    pub selected_movie: Option<Movie>,
    pub error: Option<String>,
    pub request_seq: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            status: SearchStatus::Idle,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
            selected_movie: None,
            error: None,
            request_seq: 0,
        }
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Commits a new query and resets pagination
    ///
    /// Returns `None` when the trimmed input is empty; state is left untouched.
    pub fn begin_search(&mut self, text: &str) -> Option<FetchKey> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        self.query = query.to_string();
        self.page = 1;
        self.total_pages = 0;
        self.total_results = 0;
        Some(self.begin_fetch())
    }

    pub fn begin_page(&mut self, page: u32) -> AppResult<FetchKey> {
        if !self.has_query() {
            return Err(AppError::InvalidInput(
                "No search has been submitted yet".to_string(),
            ));
        }
        if page < 1 || page > self.total_pages {
            return Err(AppError::InvalidInput(format!(
                "Page {} is outside 1..={}",
                page, self.total_pages
            )));
        }

        self.page = page;
        Ok(self.begin_fetch())
    }

    /// Re-issues the fetch for the current query and page
    pub fn begin_retry(&mut self) -> AppResult<FetchKey> {
        if !self.has_query() {
            return Err(AppError::InvalidInput(
                "No search has been submitted yet".to_string(),
            ));
        }
        Ok(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> FetchKey {
        self.request_seq += 1;
        self.status = SearchStatus::Loading;
        self.results.clear();
        self.error = None;

        FetchKey {
            seq: self.request_seq,
            query: self.query.clone(),
            page: self.page,
        }
    }

    pub fn is_current(&self, key: &FetchKey) -> bool {
        key.seq == self.request_seq && key.query == self.query && key.page == self.page
    }

    /// Applies a fetch outcome if `key` is still current
    pub fn settle(&mut self, key: &FetchKey, outcome: Result<MoviePage, FetchError>) -> Settlement {
        if !self.is_current(key) {
            return Settlement::Stale;
        }

        match outcome {
            Ok(page) if page.is_empty() => {
                self.status = SearchStatus::Success;
                self.results.clear();
                self.total_pages = 0;
                self.total_results = 0;
                Settlement::Empty
            }
            Ok(page) => {
                let count = page.results.len();
                self.status = SearchStatus::Success;
                self.results = page.results;
                self.total_pages = page.total_pages.min(MAX_TOTAL_PAGES);
                self.total_results = page.total_results;
                Settlement::Loaded { count }
            }
            Err(e) => {
                self.status = SearchStatus::Error;
                self.results.clear();
                self.error = Some(e.user_message().to_string());
                Settlement::Failed(e)
            }
        }
    }

    /// Opens the detail view for a movie on the current page
    pub fn select(&mut self, movie_id: u64) -> AppResult<&Movie> {
        let movie = self
            .results
            .iter()
            .find(|m| m.id == movie_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Movie {} is not in the current results", movie_id))
            })?;

        Ok(&*self.selected_movie.insert(movie))
    }

    pub fn clear_selection(&mut self) {
        self.selected_movie = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: None,
            release_date: None,
            vote_average: None,
            poster_path: None,
            backdrop_path: None,
        }
    }

    fn page(number: u32, count: u64, total_pages: u32) -> MoviePage {
        MoviePage {
            page: number,
            results: (0..count).map(|i| movie(number as u64 * 100 + i)).collect(),
            total_pages,
            total_results: count * total_pages as u64,
        }
    }

    fn loaded(query: &str, total_pages: u32) -> SearchState {
        let mut state = SearchState::new();
        let key = state.begin_search(query).unwrap();
        state.settle(&key, Ok(page(1, 20, total_pages)));
        state
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = SearchState::new();
        assert_eq!(state.status, SearchStatus::Idle);
        assert_eq!(state.query, "");
        assert_eq!(state.page, 1);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_blank_query_changes_nothing() {
        let mut state = SearchState::new();
        assert!(state.begin_search("").is_none());
        assert!(state.begin_search("   ").is_none());
        assert_eq!(state, SearchState::new());
    }

    #[test]
    fn test_submit_trims_and_resets_page() {
        let mut state = loaded("batman", 10);
        state.begin_page(3).unwrap();
        state.begin_page(7).unwrap();

        let key = state.begin_search("  superman ").unwrap();
        assert_eq!(key.query, "superman");
        assert_eq!(key.page, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.status, SearchStatus::Loading);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_total_pages_clamped() {
        for (reported, expected) in [(0, 0), (10, 10), (500, 500), (501, 500), (42_000, 500)] {
            let mut state = SearchState::new();
            let key = state.begin_search("a").unwrap();
            let mut response = page(1, 1, reported);
            response.total_pages = reported;
            state.settle(&key, Ok(response));
            assert_eq!(state.total_pages, expected, "reported {}", reported);
        }
    }

    #[test]
    fn test_page_bounds() {
        let mut state = loaded("batman", 10);

        assert!(matches!(state.begin_page(0), Err(AppError::InvalidInput(_))));
        assert!(matches!(state.begin_page(11), Err(AppError::InvalidInput(_))));
        assert_eq!(state.status, SearchStatus::Success);
        assert_eq!(state.results.len(), 20);

        let key = state.begin_page(10).unwrap();
        assert_eq!(key.page, 10);
    }

    #[test]
    fn test_page_change_requires_query() {
        let mut state = SearchState::new();
        assert!(matches!(state.begin_page(1), Err(AppError::InvalidInput(_))));
        assert!(matches!(state.begin_retry(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut state = SearchState::new();
        let first = state.begin_search("q1").unwrap();
        let second = state.begin_search("q2").unwrap();

        assert!(matches!(
            state.settle(&first, Ok(page(1, 20, 3))),
            Settlement::Stale
        ));
        assert_eq!(state.status, SearchStatus::Loading);
        assert!(state.results.is_empty());

        assert!(matches!(
            state.settle(&first, Err(FetchError::Decode("late".to_string()))),
            Settlement::Stale
        ));
        assert_eq!(state.status, SearchStatus::Loading);

        assert!(matches!(
            state.settle(&second, Ok(page(1, 5, 1))),
            Settlement::Loaded { count: 5 }
        ));
        assert_eq!(state.query, "q2");
        assert_eq!(state.results.len(), 5);
    }

    #[test]
    fn test_resubmitting_same_query_supersedes_earlier_fetch() {
        let mut state = SearchState::new();
        let first = state.begin_search("batman").unwrap();
        let second = state.begin_search("batman").unwrap();

        assert_eq!(first.query, second.query);
        assert_eq!(first.page, second.page);
        assert!(matches!(
            state.settle(&first, Ok(page(1, 20, 10))),
            Settlement::Stale
        ));
        assert!(state.is_current(&second));
    }

    #[test]
    fn test_empty_result() {
        let mut state = loaded("batman", 10);
        let key = state.begin_search("xyzzznomatch").unwrap();

        let settlement = state.settle(
            &key,
            Ok(MoviePage {
                page: 1,
                results: vec![],
                total_pages: 0,
                total_results: 0,
            }),
        );

        assert!(matches!(settlement, Settlement::Empty));
        assert_eq!(state.status, SearchStatus::Success);
        assert!(state.results.is_empty());
        assert_eq!(state.total_pages, 0);
    }

    #[test]
    fn test_failure_clears_results() {
        let mut state = loaded("batman", 10);
        let key = state.begin_page(2).unwrap();

        let settlement = state.settle(
            &key,
            Err(FetchError::Status {
                status: 500,
                body: String::new(),
            }),
        );

        assert!(matches!(settlement, Settlement::Failed(_)));
        assert_eq!(state.status, SearchStatus::Error);
        assert!(state.results.is_empty());
        assert_eq!(
            state.error.as_deref(),
            Some("There was an error while fetching movies.")
        );
        // still re-searchable
        assert!(state.begin_retry().is_ok());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_selection_does_not_touch_fetch_state() {
        let mut state = loaded("batman", 10);
        let seq = state.request_seq;

        let selected = state.select(105).unwrap();
        assert_eq!(selected.id, 105);
        assert_eq!(state.request_seq, seq);
        assert_eq!(state.status, SearchStatus::Success);

        assert!(matches!(state.select(9999), Err(AppError::NotFound(_))));
        assert_eq!(state.selected_movie.as_ref().map(|m| m.id), Some(105));

        state.clear_selection();
        assert!(state.selected_movie.is_none());
    }
}
