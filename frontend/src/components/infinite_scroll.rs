//! Sentinel-row guard for infinite scrolling.

/// Decides whether a visible sentinel row should trigger a load-more.
///
/// A trigger is allowed only while more pages exist and neither a full
/// reload nor a load-more is running, so repeated visibility events while
/// a page is in flight issue nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfiniteScroll {
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
}

impl InfiniteScroll {
    pub fn should_load(&self, sentinel_visible: bool) -> bool {
        sentinel_visible && self.has_more && !self.loading && !self.loading_more
    }

    /// Footer text under the table
    pub fn footer(&self) -> Option<&'static str> {
        if self.loading_more {
            Some("Loading more...")
        } else if !self.has_more && !self.loading {
            Some("No more records")
        } else {
            None
        }
    }
}
