//! # List View Module
//!
//! View-model behind every paginated table. It owns no records itself: the
//! data lives in the resource's list store and every change goes through the
//! [`ListController`]. What the view adds is interaction plumbing.
//!
//! ## Surfaces
//! - **Sort headers**: `click_header` computes the next sort and dispatches it;
//!   columns outside `Resource::SORT_COLUMNS` are ignored
//! - **Search box**: `type_search` updates the input at once and debounces
//!   the request
//! - **Infinite scroll**: `sentinel_visible` loads the next page when allowed
//! - **Row actions**: `save_edit` and `delete_row` with row glyphs, ghost rows
//!   and error toasts
//!
//! Failed calls show a toast and leave the row interactive again. Nothing is
//! retried.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use shared::{RecordId, SortConfig};

use super::debounce::Debouncer;
use super::infinite_scroll::InfiniteScroll;
use super::row_status::{RowGlyph, RowStatusTracker};
use super::sort_header::next_sort;
use crate::actions::{ListController, ListOverrides};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::resources::Resource;
use crate::state::{Applied, ListState, NotificationCenter, Store};

/// Current instant on the tokio clock, so paused-time tests drive expiry
pub fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Timings for one view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListViewTimings {
    pub search_debounce: Duration,
    pub glyph: Duration,
    pub fade_out: Duration,
}

impl ListViewTimings {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            search_debounce: config.debounce.search(),
            glyph: config.row_status.success(),
            fade_out: config.row_status.fade_out(),
        }
    }
}

impl Default for ListViewTimings {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(500),
            glyph: Duration::from_millis(1000),
            fade_out: Duration::from_millis(300),
        }
    }
}

pub struct ListView<R: Resource> {
    controller: ListController<R>,
    notifications: Arc<Store<NotificationCenter>>,
    rows: Store<RowStatusTracker<R::Record>>,
    search_input: String,
    debouncer: Debouncer,
}

impl<R: Resource> ListView<R> {
    pub fn new(
        controller: ListController<R>,
        notifications: Arc<Store<NotificationCenter>>,
        timings: ListViewTimings,
    ) -> Self {
        let search_input = controller.store().select(|s| s.search_query.clone());
        Self {
            controller,
            notifications,
            rows: Store::new(RowStatusTracker::new(timings.glyph, timings.fade_out)),
            search_input,
            debouncer: Debouncer::new(timings.search_debounce),
        }
    }

    pub fn controller(&self) -> &ListController<R> {
        &self.controller
    }

    pub fn state(&self) -> ListState<R> {
        self.controller.store().snapshot()
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn sort_config(&self) -> SortConfig {
        self.controller.store().select(|s| s.sort_config.clone())
    }

    /// First load when the screen mounts
    pub async fn load(&self) -> ClientResult<Applied> {
        let result = self.controller.fetch(ListOverrides::default()).await;
        self.toast_on_error(&result);
        result
    }

    pub fn is_sortable(column: &str) -> bool {
        R::SORT_COLUMNS.contains(&column)
    }

    /// Header click. Returns `None` for columns the server cannot sort by.
    pub async fn click_header(&self, column: &str) -> Option<ClientResult<Applied>> {
        if !Self::is_sortable(column) {
            debug!("Ignoring click on unsortable {} column {}", R::NAME, column);
            return None;
        }
        let sort = next_sort(&self.sort_config(), column);
        debug!("Sorting {} by {} {}", R::NAME, sort.sort_by, sort.sort_order.as_str());
        let result = self.controller.sort(&sort.sort_by, sort.sort_order).await;
        self.toast_on_error(&result);
        Some(result)
    }

    /// Keystroke in the search box. The input updates at once; the request
    /// goes out once typing pauses.
    pub fn type_search(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
        let controller = self.controller.clone();
        let notifications = self.notifications.clone();
        let query = self.search_input.clone();
        self.debouncer.call(move || async move {
            if let Err(err) = controller.search(query).await {
                notify_failure(&notifications, &err);
            }
        });
    }

    pub fn scroll_guard(&self) -> InfiniteScroll {
        self.controller.store().select(|s| InfiniteScroll {
            has_more: s.has_more(),
            loading: s.loading(),
            loading_more: s.loading_more(),
        })
    }

    /// The sentinel row's visibility changed. Returns `None` when no request
    /// was issued.
    pub async fn sentinel_visible(&self, visible: bool) -> Option<ClientResult<Applied>> {
        if !self.scroll_guard().should_load(visible) {
            return None;
        }
        let result = self.controller.load_more().await;
        self.toast_on_error(&result);
        Some(result)
    }

    /// Controls for this row are disabled while a mutation is in flight
    pub fn row_busy(&self, id: RecordId) -> bool {
        self.controller
            .store()
            .select(|s| s.in_flight.is_busy(id))
    }

    pub fn row_glyph(&self, id: RecordId) -> Option<RowGlyph> {
        self.rows.select(|rows| rows.glyph(id))
    }

    pub async fn save_edit(&self, id: RecordId, update: R::Update) -> ClientResult<R::Record> {
        let result = self.controller.edit(id, update).await;
        match &result {
            Ok(_) => self.rows.dispatch(|rows| rows.mark_saved(id, now())),
            Err(err) => notify_failure(&self.notifications, err),
        }
        result
    }

    pub async fn delete_row(&self, id: RecordId) -> ClientResult<()> {
        let before = self
            .controller
            .store()
            .select(|s| s.position(id).map(|index| (index, s.records[index].clone())));

        let result = self.controller.delete(id).await;
        match &result {
            Ok(()) => {
                if let Some((index, record)) = before {
                    self.rows
                        .dispatch(|rows| rows.mark_removed(id, record, index, now()));
                }
            }
            Err(err) => notify_failure(&self.notifications, err),
        }
        result
    }

    /// Rows to draw, ghosts of just-deleted records included (flagged `true`)
    pub fn rows(&self) -> Vec<(R::Record, bool)> {
        let records = self.controller.store().select(|s| s.records.clone());
        self.rows.select(|rows| rows.render_rows(&records))
    }

    /// Expire glyphs, ghosts and toasts; true when anything changed
    pub fn tick(&self, at: Instant) -> bool {
        let rows_changed = self.rows.dispatch(|rows| rows.tick(at));
        let toasts_expired = self.notifications.dispatch(|center| center.tick(at));
        rows_changed || toasts_expired > 0
    }

    fn toast_on_error<T>(&self, result: &ClientResult<T>) {
        if let Err(err) = result {
            notify_failure(&self.notifications, err);
        }
    }
}

fn notify_failure(notifications: &Store<NotificationCenter>, err: &ClientError) {
    if err.is_guard() {
        debug!("Skipped request: {}", err);
        return;
    }
    warn!("⚠️ {}", err);
    let message = err.user_message();
    notifications.dispatch(|center| center.error(message, now()));
}
