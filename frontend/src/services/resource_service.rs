//! # Resource Service
//!
//! Thin wrappers around the REST endpoints of one resource. A service turns a
//! typed [`ListQuery`] into query parameters, performs the HTTP call and hands
//! back the parsed envelope untouched. Interpreting `success` is the action
//! layer's job; nothing here retries.

use async_trait::async_trait;
use reqwest::Method;
use std::marker::PhantomData;
use tracing::debug;

use shared::{ApiResponse, AutocompletePayload, ListPayload, ListQuery, QueryParams, RecordId};

use super::api::ApiClient;
use crate::error::ClientResult;
use crate::resources::Resource;

pub type ListResponse<R> =
    ApiResponse<ListPayload<<R as Resource>::Record, <R as Resource>::Filters>>;

/// Trait defining the HTTP operations every list resource supports
#[async_trait]
pub trait ResourceService<R: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery<R::Filters>) -> ClientResult<ListResponse<R>>;

    async fn create(&self, input: &R::Create) -> ClientResult<ApiResponse<R::Record>>;

    async fn update(
        &self,
        id: RecordId,
        input: &R::Update,
    ) -> ClientResult<ApiResponse<R::Record>>;

    async fn delete(&self, id: RecordId) -> ClientResult<ApiResponse<serde_json::Value>>;

    async fn autocomplete(
        &self,
        search: &str,
        limit: u32,
    ) -> ClientResult<ApiResponse<AutocompletePayload>>;
}

/// `ResourceService` backed by the real REST API
pub struct HttpResourceService<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for HttpResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> HttpResourceService<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn item_path(id: RecordId) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

#[async_trait]
impl<R: Resource> ResourceService<R> for HttpResourceService<R> {
    async fn list(&self, query: &ListQuery<R::Filters>) -> ClientResult<ListResponse<R>> {
        let params = query.to_params();
        debug!("📋 Listing {} with {:?}", R::PATH, params.pairs());
        self.api.get_json(R::PATH, &params).await
    }

    async fn create(&self, input: &R::Create) -> ClientResult<ApiResponse<R::Record>> {
        self.api.send_json(Method::POST, R::PATH, input).await
    }

    async fn update(
        &self,
        id: RecordId,
        input: &R::Update,
    ) -> ClientResult<ApiResponse<R::Record>> {
        self.api
            .send_json(Method::PUT, &Self::item_path(id), input)
            .await
    }

    async fn delete(&self, id: RecordId) -> ClientResult<ApiResponse<serde_json::Value>> {
        self.api.delete_json(&Self::item_path(id)).await
    }

    async fn autocomplete(
        &self,
        search: &str,
        limit: u32,
    ) -> ClientResult<ApiResponse<AutocompletePayload>> {
        let mut params = QueryParams::new();
        params.push("search", search.trim());
        params.push("limit", limit);
        self.api
            .get_json(&format!("{}/autocomplete", R::PATH), &params)
            .await
    }
}
