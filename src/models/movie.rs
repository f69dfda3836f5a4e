use serde::{Deserialize, Serialize};

/// Base URL for full-size TMDB images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// Image shown when a movie has neither backdrop nor poster
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/1200x675?text=No+Image";

/// A movie as returned to the client
///
/// Read-only: values are passed through from the catalog unchanged, except that
/// blank optional strings are treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// One page of search results plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

impl MoviePage {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Detail view of a selected movie, with display fallbacks resolved
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub image_url: String,
    pub overview: String,
    pub release_date: String,
    pub rating: String,
}

impl Movie {
    /// Backdrop image preferred, poster as fallback
    pub fn image_url(&self) -> String {
        self.backdrop_path
            .as_deref()
            .or(self.poster_path.as_deref())
            .map(|path| format!("{}{}", IMAGE_BASE_URL, path))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
    }

    pub fn detail(&self) -> MovieDetail {
        MovieDetail {
            id: self.id,
            title: self.title.clone(),
            image_url: self.image_url(),
            overview: self
                .overview
                .clone()
                .unwrap_or_else(|| "No overview available.".to_string()),
            release_date: self
                .release_date
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            rating: match self.vote_average {
                Some(vote) => format!("{}/10", vote),
                None => "N/A/10".to_string(),
            },
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw search response from TMDB `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchResponse {
    pub page: u32,
    #[serde(default)]
    pub results: Vec<ApiMovie>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// Raw movie entry in a TMDB search response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<ApiMovie> for Movie {
    fn from(movie: ApiMovie) -> Self {
        Movie {
            id: movie.id,
            title: movie.title,
            overview: non_blank(movie.overview),
            release_date: non_blank(movie.release_date),
            vote_average: movie.vote_average,
            poster_path: non_blank(movie.poster_path),
            backdrop_path: non_blank(movie.backdrop_path),
        }
    }
}

impl From<ApiSearchResponse> for MoviePage {
    fn from(response: ApiSearchResponse) -> Self {
        MoviePage {
            page: response.page,
            results: response.results.into_iter().map(Movie::from).collect(),
            total_pages: response.total_pages,
            total_results: response.total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            id: 268,
            title: "Batman".to_string(),
            overview: Some("The Dark Knight of Gotham City".to_string()),
            release_date: Some("1989-06-21".to_string()),
            vote_average: Some(7.2),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
        }
    }

    #[test]
    fn test_search_response_deserializes() {
        let json = r#"{
            "page": 1,
            "results": [{
                "adult": false,
                "backdrop_path": "/frDS8A5vIP927KYAxTVVKRIbqZw.jpg",
                "genre_ids": [14, 28, 80],
                "id": 268,
                "original_language": "en",
                "original_title": "Batman",
                "overview": "Batman must face his most ruthless nemesis.",
                "popularity": 45.1,
                "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg",
                "release_date": "1989-06-21",
                "title": "Batman",
                "video": false,
                "vote_average": 7.233,
                "vote_count": 8000
            }],
            "total_pages": 10,
            "total_results": 190
        }"#;

        let response: ApiSearchResponse = serde_json::from_str(json).unwrap();
        let page = MoviePage::from(response);

        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 10);
        assert_eq!(page.total_results, 190);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 268);
        assert_eq!(page.results[0].vote_average, Some(7.233));
    }

    #[test]
    fn test_missing_and_blank_fields_become_absent() {
        let json = r#"{
            "id": 1,
            "title": "Obscure",
            "overview": "",
            "release_date": "",
            "poster_path": null
        }"#;

        let movie: Movie = serde_json::from_str::<ApiMovie>(json).unwrap().into();

        assert_eq!(movie.overview, None);
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.vote_average, None);
        assert_eq!(movie.poster_path, None);
        assert_eq!(movie.backdrop_path, None);
    }

    #[test]
    fn test_missing_results_is_empty_page() {
        let json = r#"{ "page": 1, "total_pages": 0, "total_results": 0 }"#;
        let page = MoviePage::from(serde_json::from_str::<ApiSearchResponse>(json).unwrap());
        assert!(page.is_empty());
    }

    #[test]
    fn test_image_url_prefers_backdrop() {
        let mut movie = movie();
        assert_eq!(
            movie.image_url(),
            "https://image.tmdb.org/t/p/original/backdrop.jpg"
        );

        movie.backdrop_path = None;
        assert_eq!(
            movie.image_url(),
            "https://image.tmdb.org/t/p/original/poster.jpg"
        );

        movie.poster_path = None;
        assert_eq!(movie.image_url(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_detail_fallbacks() {
        let movie = Movie {
            overview: None,
            release_date: None,
            vote_average: None,
            ..movie()
        };

        let detail = movie.detail();
        assert_eq!(detail.overview, "No overview available.");
        assert_eq!(detail.release_date, "Unknown");
        assert_eq!(detail.rating, "N/A/10");
    }

    #[test]
    fn test_detail_renders_rating() {
        let detail = movie().detail();
        assert_eq!(detail.title, "Batman");
        assert_eq!(detail.release_date, "1989-06-21");
        assert_eq!(detail.rating, "7.2/10");
    }
}
