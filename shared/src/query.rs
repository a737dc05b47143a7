//! Query-string side of the list endpoints: pagination/sort/search
//! parameters plus the per-resource filter sets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ProfileStatus, RecordId, SortOrder, TransactionType};

/// Ordered `key=value` pairs; repeated keys are how arrays go on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// One `key=value` pair per element
    pub fn push_all<V: ToString>(&mut self, key: &str, values: &[V]) {
        for value in values {
            self.push(key, value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A resource-specific filter set that knows how to put itself on a URL
pub trait QueryFilters {
    fn append_query(&self, params: &mut QueryParams);
}

/// Everything a paginated list request carries
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub search: Option<String>,
    pub filters: F,
}

impl<F: QueryFilters> ListQuery<F> {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push("page", self.page);
        params.push("limit", self.limit);
        params.push("sort_by", &self.sort_by);
        params.push("sort_order", self.sort_order.as_str());
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                params.push("search", search);
            }
        }
        self.filters.append_query(&mut params);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilters {
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub client_ids: Vec<RecordId>,
    #[serde(default)]
    pub bank_ids: Vec<RecordId>,
    #[serde(default)]
    pub card_ids: Vec<RecordId>,
}

impl QueryFilters for TransactionFilters {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("transaction_type", self.transaction_type);
        params.push_opt("min_amount", self.min_amount);
        params.push_opt("max_amount", self.max_amount);
        params.push_opt("start_date", self.start_date);
        params.push_opt("end_date", self.end_date);
        params.push_all("client_ids", &self.client_ids);
        params.push_all("bank_ids", &self.bank_ids);
        params.push_all("card_ids", &self.card_ids);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientFilters {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl QueryFilters for ClientFilters {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("start_date", self.start_date);
        params.push_opt("end_date", self.end_date);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankFilters {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl QueryFilters for BankFilters {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("start_date", self.start_date);
        params.push_opt("end_date", self.end_date);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFilters {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl QueryFilters for CardFilters {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt("start_date", self.start_date);
        params.push_opt("end_date", self.end_date);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilerProfileFilters {
    #[serde(default)]
    pub status: Option<ProfileStatus>,
    #[serde(default)]
    pub client_ids: Vec<RecordId>,
    #[serde(default)]
    pub bank_ids: Vec<RecordId>,
}

impl QueryFilters for ProfilerProfileFilters {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_opt(
            "status",
            self.status.map(|s| match s {
                ProfileStatus::Active => "active",
                ProfileStatus::Done => "done",
            }),
        );
        params.push_all("client_ids", &self.client_ids);
        params.push_all("bank_ids", &self.bank_ids);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilerTransactionFilters {
    #[serde(default)]
    pub profile_ids: Vec<RecordId>,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl QueryFilters for ProfilerTransactionFilters {
    fn append_query(&self, params: &mut QueryParams) {
        params.push_all("profile_ids", &self.profile_ids);
        params.push_opt("transaction_type", self.transaction_type);
        params.push_opt("min_amount", self.min_amount);
        params.push_opt("max_amount", self.max_amount);
        params.push_opt("start_date", self.start_date);
        params.push_opt("end_date", self.end_date);
    }
}

/// A `{label, value}` selection coming out of a multi-select filter widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToken {
    pub label: String,
    pub value: String,
}

impl FilterToken {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// Resolve selected tokens to record IDs.
///
/// Values that are not numeric IDs are dropped; repeated IDs keep their
/// first position only.
pub fn token_ids(tokens: &[FilterToken]) -> Vec<RecordId> {
    let mut ids: Vec<RecordId> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Ok(id) = token.value.trim().parse::<RecordId>() {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}
