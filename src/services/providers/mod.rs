/// Movie catalog provider abstraction
///
/// A provider performs exactly one search request per call and normalizes the
/// response into a [`MoviePage`]. Retries and result reconciliation belong to the
/// query controller, not to providers.
use crate::{error::FetchError, models::MoviePage};

pub mod tmdb;

pub use tmdb::TmdbGateway;

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Parameters for one catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub language: String,
    pub include_adult: bool,
}

impl SearchRequest {
    /// Creates a request with the default language and adult titles excluded
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
        }
    }
}

/// Trait for movie catalog gateways
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieGateway: Send + Sync {
    /// Search the catalog for one page of movies matching `request.query`
    async fn search_movies(&self, request: &SearchRequest) -> Result<MoviePage, FetchError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
