//! # List State Module
//!
//! The state slice behind every list screen: the loaded records, pagination,
//! the sort/search/filter settings the server says it applied, loading flags
//! and the in-flight mutation sets.
//!
//! ## Transitions
//! - `begin_query` / `query_fulfilled` / `query_rejected` cover fetch, search
//!   and sort. Each begin issues a fresh [`RequestToken`]; only the response
//!   carrying the latest token is applied, older ones are discarded.
//! - `begin_load_more` / `load_more_fulfilled` / `load_more_rejected` cover
//!   pagination continuation. They use their own status so a background load
//!   never flips the full-page spinner.
//! - The mutation helpers patch or remove a single record by ID.

use std::collections::HashSet;
use tracing::trace;

use shared::{ListPayload, PaginationInfo, Record, RecordId, SortConfig};

use super::in_flight::InFlight;
use crate::error::{ClientError, ClientResult};
use crate::resources::Resource;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Which of the page-1 queries is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Fetch,
    Search,
    Sort,
}

impl QueryKind {
    /// A failed fetch/search blanks the list; a failed sort keeps what is shown
    fn clears_on_failure(self) -> bool {
        matches!(self, QueryKind::Fetch | QueryKind::Search)
    }
}

/// Identifies one issued page-1 query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A claimed load-more: the page to request and the query it extends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreTicket {
    pub page: u32,
    generation: RequestToken,
}

/// What happened to a response handed to the slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// A newer query was issued after this one; the response was dropped
    Stale,
}

#[derive(Debug, Clone)]
pub struct ListState<R: Resource> {
    pub records: Vec<R::Record>,
    pub pagination: PaginationInfo,
    pub sort_config: SortConfig,
    pub search_query: String,
    pub filters: R::Filters,
    pub status: LoadStatus,
    pub more_status: LoadStatus,
    pub error: Option<String>,
    pub in_flight: InFlight,
    latest_token: RequestToken,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self::new(20)
    }
}

impl<R: Resource> ListState<R> {
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            pagination: PaginationInfo::from_counts(1, page_size, 0),
            sort_config: R::default_sort(),
            search_query: String::new(),
            filters: R::Filters::default(),
            status: LoadStatus::Idle,
            more_status: LoadStatus::Idle,
            error: None,
            in_flight: InFlight::default(),
            latest_token: RequestToken(0),
        }
    }

    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn loading_more(&self) -> bool {
        self.more_status == LoadStatus::Loading
    }

    pub fn has_more(&self) -> bool {
        self.pagination.has_next_page
    }

    pub fn find(&self, id: RecordId) -> Option<&R::Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    // ---- page-1 queries -------------------------------------------------

    pub fn begin_query(&mut self, kind: QueryKind) -> RequestToken {
        self.latest_token = RequestToken(self.latest_token.0 + 1);
        trace!("{} {:?} issued as {:?}", R::NAME, kind, self.latest_token);
        self.status = LoadStatus::Loading;
        // Any outstanding load-more now extends a superseded query
        if self.more_status == LoadStatus::Loading {
            self.more_status = LoadStatus::Idle;
        }
        self.error = None;
        self.latest_token
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token == self.latest_token
    }

    /// Replace the list wholesale; the server's echoed settings win
    pub fn query_fulfilled(
        &mut self,
        token: RequestToken,
        payload: ListPayload<R::Record, R::Filters>,
    ) -> Applied {
        if !self.is_latest(token) {
            return Applied::Stale;
        }
        self.records = payload.data;
        self.pagination = payload.pagination;
        self.sort_config = payload.sort_applied;
        self.search_query = payload.search_applied.unwrap_or_default();
        self.filters = payload.filters_applied;
        self.status = LoadStatus::Succeeded;
        self.error = None;
        Applied::Applied
    }

    pub fn query_rejected(
        &mut self,
        token: RequestToken,
        kind: QueryKind,
        message: String,
    ) -> Applied {
        if !self.is_latest(token) {
            return Applied::Stale;
        }
        if kind.clears_on_failure() {
            self.records.clear();
            self.pagination = PaginationInfo::from_counts(1, self.pagination.per_page, 0);
        }
        self.status = LoadStatus::Failed;
        self.error = Some(message);
        Applied::Applied
    }

    // ---- pagination continuation ---------------------------------------

    /// Claim the next page. Refused when there is no next page or a load is
    /// already running, so a double trigger issues a single request.
    pub fn begin_load_more(&mut self) -> ClientResult<LoadMoreTicket> {
        if !self.pagination.has_next_page {
            return Err(ClientError::NoMorePages);
        }
        if self.loading() || self.loading_more() {
            return Err(ClientError::AlreadyLoading);
        }
        self.more_status = LoadStatus::Loading;
        Ok(LoadMoreTicket {
            page: self.pagination.current_page + 1,
            generation: self.latest_token,
        })
    }

    /// Append the next page, skipping IDs that are already loaded
    pub fn load_more_fulfilled(
        &mut self,
        ticket: LoadMoreTicket,
        payload: ListPayload<R::Record, R::Filters>,
    ) -> Applied {
        if !self.is_latest(ticket.generation) {
            return Applied::Stale;
        }
        let existing: HashSet<RecordId> = self.records.iter().map(|r| r.id()).collect();
        self.records.extend(
            payload
                .data
                .into_iter()
                .filter(|r| !existing.contains(&r.id())),
        );
        self.pagination = payload.pagination;
        self.more_status = LoadStatus::Succeeded;
        Applied::Applied
    }

    /// Records stay as they are
    pub fn load_more_rejected(&mut self, ticket: LoadMoreTicket, message: String) -> Applied {
        if !self.is_latest(ticket.generation) {
            return Applied::Stale;
        }
        self.more_status = LoadStatus::Failed;
        self.error = Some(message);
        Applied::Applied
    }

    // ---- mutations ------------------------------------------------------

    /// Put a freshly created record at the top (newest-first lists)
    pub fn insert_created(&mut self, record: R::Record) {
        if self.position(record.id()).is_none() {
            self.records.insert(0, record);
            self.pagination = self.pagination.record_added();
        }
    }

    /// Replace the record with the same ID; returns whether one matched
    pub fn patch_record(&mut self, record: R::Record) -> bool {
        match self.position(record.id()) {
            Some(index) => {
                self.records[index] = record;
                true
            }
            None => false,
        }
    }

    /// Drop the record with `id` and shrink the total; returns whether one matched
    pub fn remove_record(&mut self, id: RecordId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                self.pagination = self.pagination.record_removed();
                true
            }
            None => false,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Banks;
    use crate::services::test_utils::bank;
    use shared::{Bank, BankFilters, SortOrder};

    fn payload(ids: std::ops::RangeInclusive<i64>, page: u32, total: u64) -> ListPayload<Bank, BankFilters> {
        ListPayload {
            data: ids.map(|id| bank(id, &format!("Bank {}", id))).collect(),
            pagination: PaginationInfo::from_counts(page, 5, total),
            filters_applied: BankFilters::default(),
            search_applied: None,
            sort_applied: SortConfig::new("name", SortOrder::Asc),
        }
    }

    fn loaded_state() -> ListState<Banks> {
        let mut state = ListState::<Banks>::new(5);
        let token = state.begin_query(QueryKind::Fetch);
        state.query_fulfilled(token, payload(1..=5, 1, 12));
        state
    }

    fn ids(state: &ListState<Banks>) -> Vec<i64> {
        state.records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_fetch_replaces_records_and_echoed_settings() {
        let mut state = ListState::<Banks>::new(5);
        let token = state.begin_query(QueryKind::Search);
        assert!(state.loading());

        let mut echoed = payload(1..=2, 1, 2);
        echoed.search_applied = Some("bank".to_string());
        echoed.sort_applied = SortConfig::new("id", SortOrder::Desc);
        assert_eq!(state.query_fulfilled(token, echoed), Applied::Applied);

        assert_eq!(ids(&state), vec![1, 2]);
        assert_eq!(state.search_query, "bank");
        assert_eq!(state.sort_config, SortConfig::new("id", SortOrder::Desc));
        assert_eq!(state.status, LoadStatus::Succeeded);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = ListState::<Banks>::new(5);
        let first = state.begin_query(QueryKind::Search);
        let second = state.begin_query(QueryKind::Search);

        assert_eq!(state.query_fulfilled(second, payload(3..=3, 1, 1)), Applied::Applied);
        assert_eq!(state.query_fulfilled(first, payload(1..=2, 1, 2)), Applied::Stale);
        assert_eq!(ids(&state), vec![3]);

        assert_eq!(
            state.query_rejected(first, QueryKind::Search, "boom".to_string()),
            Applied::Stale
        );
        assert!(state.error.is_none());
    }

    #[test]
    fn test_failed_fetch_clears_but_failed_sort_keeps() {
        let mut state = loaded_state();
        let token = state.begin_query(QueryKind::Sort);
        state.query_rejected(token, QueryKind::Sort, "bad column".to_string());
        assert_eq!(ids(&state).len(), 5);
        assert_eq!(state.error.as_deref(), Some("bad column"));

        let token = state.begin_query(QueryKind::Fetch);
        state.query_rejected(token, QueryKind::Fetch, "offline".to_string());
        assert!(state.records.is_empty());
        assert_eq!(state.status, LoadStatus::Failed);
    }

    #[test]
    fn test_load_more_appends_and_dedupes() {
        let mut state = loaded_state();
        let ticket = state.begin_load_more().unwrap();
        assert_eq!(ticket.page, 2);
        assert!(state.loading_more());
        assert!(!state.loading());

        state.load_more_fulfilled(ticket, payload(5..=10, 2, 12));
        assert_eq!(ids(&state), (1..=10).collect::<Vec<_>>());
        assert_eq!(state.pagination.current_page, 2);
        assert_eq!(state.more_status, LoadStatus::Succeeded);
    }

    #[test]
    fn test_load_more_guards() {
        let mut state = loaded_state();
        let _ticket = state.begin_load_more().unwrap();
        assert!(matches!(state.begin_load_more(), Err(ClientError::AlreadyLoading)));

        let mut last_page = ListState::<Banks>::new(5);
        let token = last_page.begin_query(QueryKind::Fetch);
        last_page.query_fulfilled(token, payload(1..=3, 1, 3));
        assert!(matches!(last_page.begin_load_more(), Err(ClientError::NoMorePages)));
    }

    #[test]
    fn test_load_more_for_superseded_query_is_dropped() {
        let mut state = loaded_state();
        let ticket = state.begin_load_more().unwrap();
        let token = state.begin_query(QueryKind::Search);

        assert_eq!(
            state.load_more_fulfilled(ticket, payload(6..=10, 2, 12)),
            Applied::Stale
        );
        assert!(!state.loading_more());
        assert!(state.is_latest(token));
        assert_eq!(ids(&state).len(), 5);
    }

    #[test]
    fn test_failed_load_more_keeps_records() {
        let mut state = loaded_state();
        let ticket = state.begin_load_more().unwrap();
        state.load_more_rejected(ticket, "timeout".to_string());
        assert_eq!(ids(&state).len(), 5);
        assert_eq!(state.more_status, LoadStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_remove_record_keeps_order_and_decrements_total() {
        let mut state = loaded_state();
        assert!(state.remove_record(3));
        assert_eq!(ids(&state), vec![1, 2, 4, 5]);
        assert_eq!(state.pagination.total_count, 11);
        assert!(state.pagination.is_consistent());
        assert!(!state.remove_record(3));
    }

    #[test]
    fn test_patch_record_touches_only_match() {
        let mut state = loaded_state();
        let before = state.records.clone();
        assert!(state.patch_record(bank(2, "Renamed")));

        assert_eq!(state.records[1].name, "Renamed");
        for (index, record) in state.records.iter().enumerate() {
            if index != 1 {
                assert_eq!(record, &before[index]);
            }
        }
        assert!(!state.patch_record(bank(99, "Ghost")));
    }

    #[test]
    fn test_insert_created_unshifts_once() {
        let mut state = loaded_state();
        state.insert_created(bank(50, "New Bank"));
        state.insert_created(bank(50, "New Bank"));
        assert_eq!(ids(&state)[0], 50);
        assert_eq!(state.records.len(), 6);
        assert_eq!(state.pagination.total_count, 13);
    }
}
