//! View-models for the list screens and forms. Rendering is left to the
//! embedding UI; everything here is plain state plus async handlers.

pub mod debounce;
pub mod infinite_scroll;
pub mod list_view;
pub mod picker_input;
pub mod row_status;
pub mod sort_header;
pub mod transaction_form;

pub use debounce::Debouncer;
pub use infinite_scroll::InfiniteScroll;
pub use list_view::{ListView, ListViewTimings};
pub use picker_input::PickerInput;
pub use row_status::{GhostRow, RowGlyph, RowStatusTracker};
pub use sort_header::{next_sort, sort_indicator};
pub use transaction_form::TransactionForm;
