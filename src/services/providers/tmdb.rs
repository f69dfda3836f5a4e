/// TMDB movie search provider
///
/// Wraps `GET /search/movie` with bearer-token authentication.
use crate::{
    config::Config,
    error::{AppResult, FetchError},
    models::{ApiSearchResponse, MoviePage},
    services::providers::{MovieGateway, SearchRequest},
};
use reqwest::{header, Client as HttpClient};

#[derive(Clone)]
pub struct TmdbGateway {
    http_client: HttpClient,
    token: String,
    api_url: String,
}

impl std::fmt::Debug for TmdbGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbGateway")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl TmdbGateway {
    pub fn new(token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the gateway from configuration, failing fast when the token is missing
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let token = config.require_token()?;
        Ok(Self::new(token.to_string(), config.tmdb_api_url.clone()))
    }
}

#[async_trait::async_trait]
impl MovieGateway for TmdbGateway {
    #[tracing::instrument(skip(self, request), fields(query = %request.query, page = request.page))]
    async fn search_movies(&self, request: &SearchRequest) -> Result<MoviePage, FetchError> {
        let url = format!("{}/search/movie", self.api_url);
        let page = request.page.to_string();
        let include_adult = request.include_adult.to_string();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("query", request.query.as_str()),
                ("page", page.as_str()),
                ("language", request.language.as_str()),
                ("include_adult", include_adult.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, provider = self.name(), "Catalog search rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ApiSearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let movie_page = MoviePage::from(parsed);

        tracing::info!(
            results = movie_page.results.len(),
            total_pages = movie_page.total_pages,
            total_results = movie_page.total_results,
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movie_page)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
