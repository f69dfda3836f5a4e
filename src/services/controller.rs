//! Query controller: the single owner of [`SearchState`].
//!
//! User actions are validated and applied to the state, then one fetch per
//! accepted action is spawned onto the runtime. Outcomes come back through
//! [`QueryController::on_fetch_settled`], which drops anything superseded by a
//! later action. The state lives in a `watch` channel so that consumers can
//! subscribe to snapshots; every check-and-update runs inside one
//! `send_if_modified` call.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::{
    config::Config,
    error::{AppError, AppResult, FetchError},
    models::{
        FetchKey, MovieDetail, MoviePage, Notification, NotificationKind, SearchState, Settlement,
    },
    services::providers::{MovieGateway, SearchRequest, DEFAULT_LANGUAGE},
};

/// Receiving end of the controller's notification stream
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Per-request search options applied to every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub language: String,
    pub include_adult: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            include_adult: false,
        }
    }
}

impl From<&Config> for SearchOptions {
    fn from(config: &Config) -> Self {
        Self {
            language: config.tmdb_language.clone(),
            include_adult: config.tmdb_include_adult,
        }
    }
}

/// Handle to a spawned fetch
#[derive(Debug)]
pub struct FetchHandle {
    key: FetchKey,
    task: JoinHandle<()>,
}

impl FetchHandle {
    pub fn key(&self) -> &FetchKey {
        &self.key
    }

    /// Waits until the fetch has been reconciled (applied or dropped as stale)
    pub async fn settled(self) -> AppResult<()> {
        self.task
            .await
            .map_err(|e| AppError::Internal(format!("Fetch task failed: {}", e)))
    }
}

#[derive(Clone)]
pub struct QueryController {
    gateway: Arc<dyn MovieGateway>,
    options: SearchOptions,
    state: Arc<watch::Sender<SearchState>>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl QueryController {
    /// Creates a controller in the `Idle` state
    ///
    /// The notification receiver is returned once; whoever owns it is the
    /// notification surface.
    pub fn new(
        gateway: Arc<dyn MovieGateway>,
        options: SearchOptions,
    ) -> (Self, NotificationReceiver) {
        let (state, _) = watch::channel(SearchState::new());
        let (notifications, notification_rx) = mpsc::unbounded_channel();

        let controller = Self {
            gateway,
            options,
            state: Arc::new(state),
            notifications,
        };

        (controller, notification_rx)
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Subscribes to state snapshots; the receiver is notified after every accepted mutation
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Commits a new query, resets pagination and fetches page 1
    pub fn submit_query(&self, text: &str) -> AppResult<FetchHandle> {
        let result = self.update(|state| {
            state.begin_search(text).ok_or_else(|| {
                AppError::Validation(NotificationKind::Validation.message().to_string())
            })
        });

        match result {
            Ok(key) => Ok(self.dispatch(key)),
            Err(e) => {
                tracing::debug!("Rejected blank search query");
                self.notify(NotificationKind::Validation);
                Err(e)
            }
        }
    }

    /// Moves to page `page` of the committed query
    pub fn change_page(&self, page: u32) -> AppResult<FetchHandle> {
        let key = self.update(|state| state.begin_page(page))?;
        Ok(self.dispatch(key))
    }

    /// Re-fetches the current query and page
    pub fn retry(&self) -> AppResult<FetchHandle> {
        let key = self.update(|state| state.begin_retry())?;
        Ok(self.dispatch(key))
    }

    /// Reconciles a fetch outcome with the current state
    ///
    /// Returns `false` when the outcome was stale and discarded.
    pub fn on_fetch_settled(&self, key: &FetchKey, outcome: Result<MoviePage, FetchError>) -> bool {
        let mut settlement = Settlement::Stale;
        self.state.send_if_modified(|state| {
            settlement = state.settle(key, outcome);
            !matches!(settlement, Settlement::Stale)
        });

        match settlement {
            Settlement::Stale => {
                tracing::debug!(seq = key.seq, query = %key.query, page = key.page, "Dropped stale fetch outcome");
                false
            }
            Settlement::Loaded { count } => {
                tracing::info!(seq = key.seq, query = %key.query, page = key.page, results = count, "Search results applied");
                true
            }
            Settlement::Empty => {
                tracing::info!(seq = key.seq, query = %key.query, page = key.page, "Search returned no results");
                self.notify(NotificationKind::NoResults);
                true
            }
            Settlement::Failed(e) => {
                tracing::error!(seq = key.seq, query = %key.query, page = key.page, error = %e, "Movie fetch failed");
                self.notify(NotificationKind::FetchFailed);
                true
            }
        }
    }

    /// Opens the detail view for a movie on the current page
    pub fn select_movie(&self, movie_id: u64) -> AppResult<MovieDetail> {
        self.update(|state| state.select(movie_id).map(|movie| movie.detail()))
    }

    pub fn close_detail(&self) {
        self.state.send_if_modified(|state| {
            let was_open = state.selected_movie.is_some();
            state.clear_selection();
            was_open
        });
    }

    pub fn selection(&self) -> Option<MovieDetail> {
        self.state.borrow().selected_movie.as_ref().map(|m| m.detail())
    }

    /// Applies `f` to the state, publishing a snapshot only if it succeeded
    fn update<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut SearchState) -> AppResult<T>,
    {
        let mut result = Err(AppError::Internal("State update did not run".to_string()));
        self.state.send_if_modified(|state| {
            result = f(state);
            result.is_ok()
        });
        result
    }

    fn dispatch(&self, key: FetchKey) -> FetchHandle {
        let request = SearchRequest {
            query: key.query.clone(),
            page: key.page,
            language: self.options.language.clone(),
            include_adult: self.options.include_adult,
        };

        tracing::debug!(
            seq = key.seq,
            query = %key.query,
            page = key.page,
            provider = self.gateway.name(),
            "Issuing movie fetch"
        );

        let controller = self.clone();
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let outcome = controller.gateway.search_movies(&request).await;
            controller.on_fetch_settled(&task_key, outcome);
        });

        FetchHandle { key, task }
    }

    fn notify(&self, kind: NotificationKind) {
        if self.notifications.send(Notification::new(kind)).is_err() {
            tracing::warn!(kind = ?kind, "Notification dropped, no receiver");
        }
    }
}
