use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::{MovieGateway, NotificationReceiver, QueryController, SearchOptions};

/// Shared application state
///
/// One search session per process: the controller owns the search state and
/// the notification receiver is drained by the notifications endpoint.
#[derive(Clone)]
pub struct AppState {
    pub controller: QueryController,
    pub notifications: Arc<Mutex<NotificationReceiver>>,
}

impl AppState {
    /// Creates the session state around a catalog gateway
    pub fn new(gateway: Arc<dyn MovieGateway>, options: SearchOptions) -> Self {
        let (controller, notifications) = QueryController::new(gateway, options);
        Self {
            controller,
            notifications: Arc::new(Mutex::new(notifications)),
        }
    }
}
