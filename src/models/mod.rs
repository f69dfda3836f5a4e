pub mod movie;
pub mod notification;
pub mod search;

pub use movie::{ApiMovie, ApiSearchResponse, Movie, MovieDetail, MoviePage};
pub use notification::{Notification, NotificationKind};
pub use search::{FetchKey, SearchState, SearchStatus, Settlement, MAX_TOTAL_PAGES};
