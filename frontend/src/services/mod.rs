//! Service layer: HTTP wrappers around the ledger REST API.

pub mod api;
pub mod export;
pub mod resource_service;

#[cfg(test)]
pub mod test_utils;

pub use api::ApiClient;
pub use export::ExportService;
pub use resource_service::{HttpResourceService, ListResponse, ResourceService};
