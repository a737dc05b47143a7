//! Application state: the store container, the per-resource list slices and
//! the global notification queue.

pub mod in_flight;
pub mod list_state;
pub mod notifications;
pub mod store;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::resources::{Banks, Cards, Clients, ProfilerProfiles, ProfilerTransactions, Transactions};

pub use in_flight::InFlight;
pub use list_state::{Applied, ListState, LoadMoreTicket, LoadStatus, QueryKind, RequestToken};
pub use notifications::{NotificationCenter, Toast, ToastLevel};
pub use store::Store;

pub type ListStore<R> = Arc<Store<ListState<R>>>;

/// Every piece of shared UI state, one store per list screen
#[derive(Clone)]
pub struct AppStore {
    pub transactions: ListStore<Transactions>,
    pub clients: ListStore<Clients>,
    pub banks: ListStore<Banks>,
    pub cards: ListStore<Cards>,
    pub profiler_profiles: ListStore<ProfilerProfiles>,
    pub profiler_transactions: ListStore<ProfilerTransactions>,
    pub notifications: Arc<Store<NotificationCenter>>,
}

impl AppStore {
    pub fn new(config: &ClientConfig) -> Self {
        let page_size = config.list.page_size;
        Self {
            transactions: Arc::new(Store::new(ListState::new(page_size))),
            clients: Arc::new(Store::new(ListState::new(page_size))),
            banks: Arc::new(Store::new(ListState::new(page_size))),
            cards: Arc::new(Store::new(ListState::new(page_size))),
            profiler_profiles: Arc::new(Store::new(ListState::new(page_size))),
            profiler_transactions: Arc::new(Store::new(ListState::new(page_size))),
            notifications: Arc::new(Store::new(NotificationCenter::new(
                config.notifications.toast(),
            ))),
        }
    }
}
