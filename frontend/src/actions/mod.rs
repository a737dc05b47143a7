//! Async actions that talk to the API and drive the state slices.

pub mod autocomplete;
pub mod list_controller;

pub use autocomplete::{AutocompleteController, DEFAULT_SUGGESTION_LIMIT};
pub use list_controller::{into_data, ListController, ListOverrides};
