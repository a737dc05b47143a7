//! Suggestion lookups for the client/bank/card pickers.
//!
//! Only the newest lookup is kept: every call bumps a token and a response
//! whose token is no longer the latest is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use shared::AutocompleteItem;

use super::list_controller::into_data;
use crate::error::ClientResult;
use crate::resources::Resource;
use crate::services::ResourceService;
use crate::state::Applied;

pub const DEFAULT_SUGGESTION_LIMIT: u32 = 10;

pub struct AutocompleteController<R: Resource> {
    service: Arc<dyn ResourceService<R>>,
    limit: u32,
    latest: AtomicU64,
    results: Mutex<Vec<AutocompleteItem>>,
}

impl<R: Resource> AutocompleteController<R> {
    pub fn new(service: Arc<dyn ResourceService<R>>) -> Self {
        Self::with_limit(service, DEFAULT_SUGGESTION_LIMIT)
    }

    pub fn with_limit(service: Arc<dyn ResourceService<R>>, limit: u32) -> Self {
        Self {
            service,
            limit,
            latest: AtomicU64::new(0),
            results: Mutex::new(Vec::new()),
        }
    }

    pub fn results(&self) -> Vec<AutocompleteItem> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Look up suggestions for `text`. Blank input clears the list without
    /// a request.
    pub async fn lookup(&self, text: &str) -> ClientResult<Applied> {
        let text = text.trim();
        if text.is_empty() {
            self.clear();
            return Ok(Applied::Applied);
        }

        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let items = self
            .service
            .autocomplete(text, self.limit)
            .await
            .and_then(into_data)?
            .data;

        if self.latest.load(Ordering::SeqCst) != token {
            debug!("Dropped stale {} suggestions for {:?}", R::NAME, text);
            return Ok(Applied::Stale);
        }
        debug!("🔍 {} {} suggestions for {:?}", items.len(), R::NAME, text);
        *self.results.lock().unwrap_or_else(PoisonError::into_inner) = items;
        Ok(Applied::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Banks;
    use crate::services::test_utils::{FakeFailure, FakeService};

    #[tokio::test]
    async fn test_lookup_stores_matches() {
        let service = Arc::new(FakeService::banks(12));
        let picker = AutocompleteController::<Banks>::with_limit(service, 3);

        picker.lookup("bank 1").await.unwrap();
        let names: Vec<String> = picker.results().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Bank 1", "Bank 10", "Bank 11"]);
    }

    #[tokio::test]
    async fn test_blank_input_clears_without_request() {
        let service = Arc::new(FakeService::banks(3));
        let picker = AutocompleteController::<Banks>::new(service.clone());
        picker.lookup("bank").await.unwrap();
        assert_eq!(picker.results().len(), 3);

        // A scripted failure would surface if a request went out
        service.fail_next(FakeFailure::Server(500, "boom"));
        assert_eq!(picker.lookup("   ").await.unwrap(), Applied::Applied);
        assert!(picker.results().is_empty());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_results() {
        let service = Arc::new(FakeService::banks(3));
        let picker = AutocompleteController::<Banks>::new(service.clone());
        picker.lookup("bank 2").await.unwrap();

        service.fail_next(FakeFailure::Rejected("Search too short"));
        let err = picker.lookup("b").await.unwrap_err();
        assert_eq!(err.user_message(), "Search too short");
        assert_eq!(picker.results().len(), 1);
    }
}
