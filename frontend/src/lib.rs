//! # Ledger Frontend
//!
//! Client core for the ledger tracker: typed REST services, list state with
//! pagination/sort/search, optimistic mutations and the view-models the list
//! screens and forms are built on.
//!
//! ## Layers
//! - [`services`]: HTTP calls, one service per resource plus PDF export
//! - [`actions`]: async operations that call a service and update state
//! - [`state`]: the store container and per-resource list slices
//! - [`components`]: list view, sort headers, debounced search, row status, forms
//! - [`domain`]: profiler balance calculations
//! - [`app`]: wires all of the above from a [`config::ClientConfig`]

pub mod actions;
pub mod app;
pub mod components;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod resources;
pub mod services;
pub mod state;

pub use app::AppContext;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
