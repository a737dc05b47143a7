//! Wire types shared between the ledger tracker client and the REST API.
//!
//! Everything in here mirrors the JSON the `/api/v1` endpoints speak: the
//! records themselves, the response envelope, pagination, sorting, filters
//! and the small pure helpers (validation, charge math) that forms need
//! before anything goes over the wire.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod query;
pub mod validation;

pub use query::*;
pub use validation::*;

/// Server-assigned record identifier
pub type RecordId = i64;

/// Anything that lives in a paginated list and is addressed by ID
pub trait Record {
    fn id(&self) -> RecordId;
}

/// Direction of a money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the account
    Deposit,
    /// Money leaving the account (subject to withdraw charges)
    Withdraw,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A deposit or withdraw against a client's bank/card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    pub client_id: RecordId,
    #[serde(default)]
    pub client_name: Option<String>,
    pub bank_id: Option<RecordId>,
    #[serde(default)]
    pub bank_name: Option<String>,
    pub card_id: Option<RecordId>,
    #[serde(default)]
    pub card_name: Option<String>,
    pub transaction_type: TransactionType,
    pub transaction_amount: f64,
    /// Withdraw charge as a percentage of `transaction_amount`
    #[serde(default)]
    pub widthdraw_charges: f64,
    #[serde(default)]
    pub remarks: Option<String>,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    #[serde(default)]
    pub modify_date: Option<NaiveDate>,
    #[serde(default)]
    pub modify_time: Option<NaiveTime>,
}

/// Body for `POST /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub client_id: RecordId,
    pub bank_id: Option<RecordId>,
    pub card_id: Option<RecordId>,
    pub transaction_type: TransactionType,
    pub transaction_amount: f64,
    pub widthdraw_charges: f64,
    pub remarks: Option<String>,
}

/// Body for `PUT /transactions/{id}`; only present fields are changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widthdraw_charges: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_no: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    #[serde(default)]
    pub modify_date: Option<NaiveDate>,
    #[serde(default)]
    pub modify_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub account_number: Option<String>,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    #[serde(default)]
    pub modify_date: Option<NaiveDate>,
    #[serde(default)]
    pub modify_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBank {
    pub name: String,
    pub account_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BankUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: RecordId,
    pub name: String,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    #[serde(default)]
    pub modify_date: Option<NaiveDate>,
    #[serde(default)]
    pub modify_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Lifecycle of a profiler profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Active,
    Done,
}

/// A profile tracks a planned deposit for one client and its running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerProfile {
    pub id: RecordId,
    pub client_id: RecordId,
    #[serde(default)]
    pub client_name: Option<String>,
    pub bank_id: Option<RecordId>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub credit_card_number: Option<String>,
    pub pre_planned_deposit_amount: f64,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub total_deposits: f64,
    #[serde(default)]
    pub total_withdrawals: f64,
    pub status: ProfileStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    #[serde(default)]
    pub modify_date: Option<NaiveDate>,
    #[serde(default)]
    pub modify_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfilerProfile {
    pub client_id: RecordId,
    pub bank_id: Option<RecordId>,
    pub credit_card_number: Option<String>,
    pub pre_planned_deposit_amount: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilerProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_planned_deposit_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProfileStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// A deposit or withdraw booked against a profiler profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerTransaction {
    pub id: RecordId,
    pub profile_id: RecordId,
    #[serde(default)]
    pub client_name: Option<String>,
    pub transaction_type: TransactionType,
    pub amount: f64,
    #[serde(default)]
    pub withdraw_charges_percentage: f64,
    #[serde(default)]
    pub withdraw_charges_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub create_date: NaiveDate,
    pub create_time: NaiveTime,
    #[serde(default)]
    pub modify_date: Option<NaiveDate>,
    #[serde(default)]
    pub modify_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfilerTransaction {
    pub profile_id: RecordId,
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub withdraw_charges_percentage: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilerTransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdraw_charges_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> RecordId {
                self.id
            }
        })*
    };
}

impl_record!(
    Transaction,
    Client,
    Bank,
    Card,
    ProfilerProfile,
    ProfilerTransaction,
    AutocompleteItem,
);

/// Pagination block echoed by every list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationInfo {
    /// Derive a pagination block from raw counts the way the API does
    pub fn from_counts(current_page: u32, per_page: u32, total_count: u64) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_count.div_ceil(per_page as u64) as u32;
        Self {
            current_page,
            per_page,
            total_count,
            total_pages,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Whether the flags agree with the page counters
    pub fn is_consistent(&self) -> bool {
        self.has_next_page == (self.current_page < self.total_pages)
            && self.has_previous_page == (self.current_page > 1)
    }

    /// Recompute after a single record disappeared server-side
    pub fn record_removed(&self) -> Self {
        Self::from_counts(
            self.current_page,
            self.per_page,
            self.total_count.saturating_sub(1),
        )
    }

    /// Recompute after a single record was created server-side
    pub fn record_added(&self) -> Self {
        Self::from_counts(self.current_page, self.per_page, self.total_count + 1)
    }
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self::from_counts(1, 20, 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Column + direction; the allowed columns are enforced server-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl SortConfig {
    pub fn new(sort_by: impl Into<String>, sort_order: SortOrder) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_order,
        }
    }

    /// Newest records first, i.e. a freshly created record belongs at the top
    pub fn is_newest_first(&self) -> bool {
        self.sort_order == SortOrder::Desc
            && matches!(self.sort_by.as_str(), "id" | "create_date" | "created_at")
    }
}

/// Standard `{success, data, code, message}` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            code: Some(200),
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            code: Some(code),
            message: Some(message.into()),
            errors: Vec::new(),
        }
    }

    /// The most specific human-readable message the server sent, if any
    pub fn error_message(&self) -> Option<String> {
        self.message
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .or_else(|| self.errors.first().cloned())
    }
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub code: Option<u16>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<String> {
        self.message
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .cloned()
            .or_else(|| self.errors.first().cloned())
    }
}

/// `data` of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPayload<R, F> {
    pub data: Vec<R>,
    pub pagination: PaginationInfo,
    #[serde(default)]
    pub filters_applied: F,
    #[serde(default)]
    pub search_applied: Option<String>,
    pub sort_applied: SortConfig,
}

/// One `{id, name}` suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteItem {
    pub id: RecordId,
    pub name: String,
}

/// `data` of an autocomplete response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutocompletePayload {
    pub data: Vec<AutocompleteItem>,
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub limit_applied: u32,
}

/// Filter for the profiler PDF export endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileExportRequest {
    pub profile_id: Option<RecordId>,
    pub client_id: Option<RecordId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// JSON flavour of the export response (base64 PDF content)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    #[serde(default)]
    pub file_name: Option<String>,
    pub content_base64: String,
}
