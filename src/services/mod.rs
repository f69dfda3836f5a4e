pub mod controller;
pub mod providers;

pub use controller::{FetchHandle, NotificationReceiver, QueryController, SearchOptions};
pub use providers::{MovieGateway, SearchRequest, TmdbGateway};
