//! # List Controller
//!
//! Async orchestrators for one resource list. Each operation reads the
//! current filters/search/sort from the slice, overlays whatever the caller
//! passed, issues the request and feeds the outcome back through the slice's
//! transitions.
//!
//! ## Operations
//! - `fetch`: page 1, replaces the list
//! - `load_more`: next page, appends
//! - `search`: page 1 with a new search string
//! - `sort`: page 1 with a new sort column/direction
//! - `create` / `edit` / `delete`: single-record mutations with in-flight tracking

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use shared::{ApiResponse, ListQuery, RecordId, SortConfig, SortOrder};

use crate::error::{ClientError, ClientResult};
use crate::resources::Resource;
use crate::services::ResourceService;
use crate::state::{Applied, ListState, ListStore, QueryKind};

/// Caller-supplied values that take precedence over the slice's current ones
#[derive(Debug, Clone, PartialEq)]
pub struct ListOverrides<F> {
    pub filters: Option<F>,
    pub search: Option<String>,
    pub sort: Option<SortConfig>,
    pub limit: Option<u32>,
}

impl<F> Default for ListOverrides<F> {
    fn default() -> Self {
        Self {
            filters: None,
            search: None,
            sort: None,
            limit: None,
        }
    }
}

/// Unwrap a `{success, data}` envelope into its payload
pub fn into_data<T>(response: ApiResponse<T>) -> ClientResult<T> {
    if !response.success {
        return Err(ClientError::Rejected {
            message: response.error_message(),
        });
    }
    response.data.ok_or(ClientError::MissingData)
}

/// Check a `{success, message}` envelope that carries no payload
pub fn into_success<T>(response: ApiResponse<T>) -> ClientResult<()> {
    if !response.success {
        return Err(ClientError::Rejected {
            message: response.error_message(),
        });
    }
    Ok(())
}

pub struct ListController<R: Resource> {
    store: ListStore<R>,
    service: Arc<dyn ResourceService<R>>,
}

impl<R: Resource> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            service: self.service.clone(),
        }
    }
}

impl<R: Resource> ListController<R> {
    pub fn new(store: ListStore<R>, service: Arc<dyn ResourceService<R>>) -> Self {
        Self { store, service }
    }

    pub fn store(&self) -> &ListStore<R> {
        &self.store
    }

    pub fn service(&self) -> &Arc<dyn ResourceService<R>> {
        &self.service
    }

    fn build_query(
        state: &ListState<R>,
        page: u32,
        overrides: ListOverrides<R::Filters>,
    ) -> ListQuery<R::Filters> {
        let sort = overrides.sort.unwrap_or_else(|| state.sort_config.clone());
        let search = overrides
            .search
            .unwrap_or_else(|| state.search_query.clone());
        ListQuery {
            page,
            limit: overrides.limit.unwrap_or(state.pagination.per_page),
            sort_by: sort.sort_by,
            sort_order: sort.sort_order,
            search: (!search.trim().is_empty()).then_some(search),
            filters: overrides.filters.unwrap_or_else(|| state.filters.clone()),
        }
    }

    /// Page 1 with the current settings (plus overrides); replaces the list
    pub async fn fetch(&self, overrides: ListOverrides<R::Filters>) -> ClientResult<Applied> {
        self.run_query(QueryKind::Fetch, overrides).await
    }

    /// Page 1 filtered by `text`
    pub async fn search(&self, text: impl Into<String>) -> ClientResult<Applied> {
        let overrides = ListOverrides {
            search: Some(text.into()),
            ..Default::default()
        };
        self.run_query(QueryKind::Search, overrides).await
    }

    /// Page 1 ordered by `sort_by`/`sort_order`
    pub async fn sort(&self, sort_by: &str, sort_order: SortOrder) -> ClientResult<Applied> {
        let overrides = ListOverrides {
            sort: Some(SortConfig::new(sort_by, sort_order)),
            ..Default::default()
        };
        self.run_query(QueryKind::Sort, overrides).await
    }

    /// Page 1 with a new filter set
    pub async fn apply_filters(&self, filters: R::Filters) -> ClientResult<Applied> {
        let overrides = ListOverrides {
            filters: Some(filters),
            ..Default::default()
        };
        self.run_query(QueryKind::Fetch, overrides).await
    }

    async fn run_query(
        &self,
        kind: QueryKind,
        overrides: ListOverrides<R::Filters>,
    ) -> ClientResult<Applied> {
        let (token, query) = self.store.dispatch(|state| {
            let token = state.begin_query(kind);
            (token, Self::build_query(state, 1, overrides))
        });
        debug!("📋 {:?} {} page 1 ({:?})", kind, R::NAME, token);

        match self.service.list(&query).await.and_then(into_data) {
            Ok(payload) => {
                let count = payload.data.len();
                let applied = self
                    .store
                    .dispatch(|state| state.query_fulfilled(token, payload));
                match applied {
                    Applied::Applied => info!("✅ Loaded {} {} records", count, R::NAME),
                    Applied::Stale => debug!("Discarded stale {} response {:?}", R::NAME, token),
                }
                Ok(applied)
            }
            Err(err) => {
                let message = err.user_message();
                let applied = self
                    .store
                    .dispatch(|state| state.query_rejected(token, kind, message));
                if applied == Applied::Stale {
                    debug!("Ignoring failure of superseded {} request: {}", R::NAME, err);
                    return Ok(Applied::Stale);
                }
                error!("❌ Failed to load {} list: {}", R::NAME, err);
                Err(err)
            }
        }
    }

    /// Append the next page. Fails fast, without a request, when the server
    /// reported no next page or a load is already running.
    pub async fn load_more(&self) -> ClientResult<Applied> {
        let (ticket, query) = self.store.dispatch(|state| {
            let ticket = state.begin_load_more()?;
            Ok::<_, ClientError>((
                ticket,
                Self::build_query(state, ticket.page, ListOverrides::default()),
            ))
        })?;
        debug!("📋 Loading {} page {}", R::NAME, ticket.page);

        match self.service.list(&query).await.and_then(into_data) {
            Ok(payload) => Ok(self
                .store
                .dispatch(|state| state.load_more_fulfilled(ticket, payload))),
            Err(err) => {
                warn!("⚠️ Failed to load more {} records: {}", R::NAME, err);
                let message = err.user_message();
                self.store
                    .dispatch(|state| state.load_more_rejected(ticket, message));
                Err(err)
            }
        }
    }

    /// Create a record. Newest-first lists get it unshifted; any other
    /// ordering is refetched so the record lands where the server puts it.
    pub async fn create(&self, input: R::Create) -> ClientResult<R::Record> {
        info!("➕ Creating {}", R::NAME);
        self.store.dispatch(|state| state.in_flight.creating = true);

        let result = self.service.create(&input).await.and_then(into_data);
        let newest_first = self.store.dispatch(|state| {
            state.in_flight.creating = false;
            if let Err(err) = &result {
                state.set_error(err.user_message());
            }
            state.sort_config.is_newest_first()
        });

        let record = result.inspect_err(|err| error!("❌ Failed to create {}: {}", R::NAME, err))?;
        if newest_first {
            self.store
                .dispatch(|state| state.insert_created(record.clone()));
        } else if let Err(err) = self.fetch(ListOverrides::default()).await {
            warn!("⚠️ {} created but refresh failed: {}", R::NAME, err);
        }
        Ok(record)
    }

    /// Save changes to one record and patch it into the list by ID
    pub async fn edit(&self, id: RecordId, update: R::Update) -> ClientResult<R::Record> {
        self.store
            .dispatch(|state| state.in_flight.start_update(id))?;
        info!("✏️ Updating {} {}", R::NAME, id);

        let result = self.service.update(id, &update).await.and_then(into_data);
        self.store.dispatch(|state| {
            state.in_flight.finish_update(id);
            match &result {
                Ok(record) => {
                    state.patch_record(record.clone());
                }
                Err(err) => state.set_error(err.user_message()),
            }
        });

        result.inspect_err(|err| error!("❌ Failed to update {} {}: {}", R::NAME, id, err))
    }

    /// Delete one record and drop it from the list by ID
    pub async fn delete(&self, id: RecordId) -> ClientResult<()> {
        self.store
            .dispatch(|state| state.in_flight.start_delete(id))?;
        info!("🗑️ Deleting {} {}", R::NAME, id);

        let result = self.service.delete(id).await.and_then(into_success);
        self.store.dispatch(|state| {
            state.in_flight.finish_delete(id);
            match &result {
                Ok(()) => {
                    state.remove_record(id);
                }
                Err(err) => state.set_error(err.user_message()),
            }
        });

        result.inspect_err(|err| error!("❌ Failed to delete {} {}: {}", R::NAME, id, err))
    }
}
