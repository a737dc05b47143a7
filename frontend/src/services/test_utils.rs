//! In-memory `ResourceService` used by the unit tests.
//!
//! Behaves like the REST API for a single resource: paginates, filters by
//! search text, echoes the applied sort/search/filters and assigns IDs on
//! create. Tests can queue failures and hold individual list responses
//! behind a gate to reproduce out-of-order arrivals.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

use shared::{
    ApiResponse, AutocompleteItem, AutocompletePayload, Bank, BankUpdate, ListPayload,
    ListQuery, NewBank, NewTransaction, PaginationInfo, Record, RecordId, SortConfig,
    Transaction, TransactionType, TransactionUpdate,
};

use super::resource_service::{ListResponse, ResourceService};
use crate::error::{ClientError, ClientResult};
use crate::resources::{Banks, Resource, Transactions};

/// A scripted failure for the next call
#[derive(Debug, Clone)]
pub enum FakeFailure {
    Server(u16, &'static str),
    Rejected(&'static str),
}

impl FakeFailure {
    fn into_error(self) -> ClientError {
        match self {
            FakeFailure::Server(status, message) => ClientError::Server {
                status,
                message: Some(message.to_string()),
            },
            FakeFailure::Rejected(message) => ClientError::Rejected {
                message: Some(message.to_string()),
            },
        }
    }
}

pub struct FakeService<R: Resource> {
    records: Mutex<Vec<R::Record>>,
    next_id: Mutex<RecordId>,
    list_calls: Mutex<Vec<ListQuery<R::Filters>>>,
    mutation_calls: Mutex<Vec<String>>,
    holds: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    failures: Mutex<VecDeque<FakeFailure>>,
    /// Envelope-level failure (`success: false`) for the next list call
    reject_next_list: Mutex<Option<&'static str>>,
    matches: fn(&R::Record, &str) -> bool,
    name_of: fn(&R::Record) -> String,
    build: fn(&R::Create, RecordId) -> R::Record,
    patch: fn(&mut R::Record, &R::Update),
}

impl<R: Resource> FakeService<R> {
    pub fn list_calls(&self) -> Vec<ListQuery<R::Filters>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<String> {
        self.mutation_calls.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<R::Record> {
        self.records.lock().unwrap().clone()
    }

    pub fn fail_next(&self, failure: FakeFailure) {
        self.failures.lock().unwrap().push_back(failure);
    }

    pub fn reject_next_list(&self, message: &'static str) {
        *self.reject_next_list.lock().unwrap() = Some(message);
    }

    /// Hold the next list response for `search` until the sender fires
    pub fn hold_search(&self, search: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds.lock().unwrap().insert(search.to_string(), rx);
        tx
    }

    fn take_failure(&self) -> Option<ClientError> {
        self.failures
            .lock()
            .unwrap()
            .pop_front()
            .map(FakeFailure::into_error)
    }

    fn page_for(&self, query: &ListQuery<R::Filters>) -> ListResponse<R> {
        let records = self.records.lock().unwrap();
        let search = query.search.clone().unwrap_or_default();
        let matching: Vec<&R::Record> = records
            .iter()
            .filter(|r| search.is_empty() || (self.matches)(r, &search))
            .collect();

        let pagination =
            PaginationInfo::from_counts(query.page, query.limit, matching.len() as u64);
        let start = ((query.page.max(1) - 1) * query.limit) as usize;
        let data = matching
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .cloned()
            .collect();

        ApiResponse::ok(ListPayload {
            data,
            pagination,
            filters_applied: query.filters.clone(),
            search_applied: query.search.clone().filter(|s| !s.is_empty()),
            sort_applied: SortConfig::new(query.sort_by.clone(), query.sort_order),
        })
    }
}

#[async_trait]
impl<R: Resource> ResourceService<R> for FakeService<R> {
    async fn list(&self, query: &ListQuery<R::Filters>) -> ClientResult<ListResponse<R>> {
        self.list_calls.lock().unwrap().push(query.clone());

        let hold = query
            .search
            .as_ref()
            .and_then(|s| self.holds.lock().unwrap().remove(s));
        if let Some(hold) = hold {
            let _ = hold.await;
        }

        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        if let Some(message) = self.reject_next_list.lock().unwrap().take() {
            return Ok(ApiResponse::failure(400, message));
        }
        Ok(self.page_for(query))
    }

    async fn create(&self, input: &R::Create) -> ClientResult<ApiResponse<R::Record>> {
        self.mutation_calls.lock().unwrap().push("create".to_string());
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let record = (self.build)(input, id);
        self.records.lock().unwrap().insert(0, record.clone());
        Ok(ApiResponse::ok(record))
    }

    async fn update(
        &self,
        id: RecordId,
        input: &R::Update,
    ) -> ClientResult<ApiResponse<R::Record>> {
        self.mutation_calls.lock().unwrap().push(format!("update:{}", id));
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id() == id) {
            Some(record) => {
                (self.patch)(record, input);
                Ok(ApiResponse::ok(record.clone()))
            }
            None => Ok(ApiResponse::failure(404, "Record not found")),
        }
    }

    async fn delete(&self, id: RecordId) -> ClientResult<ApiResponse<serde_json::Value>> {
        self.mutation_calls.lock().unwrap().push(format!("delete:{}", id));
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(ApiResponse::failure(404, "Record not found"));
        }
        Ok(ApiResponse {
            data: None,
            message: Some(format!("{} deleted successfully", R::NAME)),
            ..ApiResponse::ok(serde_json::Value::Null)
        })
    }

    async fn autocomplete(
        &self,
        search: &str,
        limit: u32,
    ) -> ClientResult<ApiResponse<AutocompletePayload>> {
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let records = self.records.lock().unwrap();
        let data: Vec<AutocompleteItem> = records
            .iter()
            .filter(|r| (self.matches)(r, search))
            .take(limit as usize)
            .map(|r| AutocompleteItem {
                id: r.id(),
                name: (self.name_of)(r),
            })
            .collect();
        Ok(ApiResponse::ok(AutocompletePayload {
            result_count: data.len(),
            data,
            search_query: search.to_string(),
            limit_applied: limit,
        }))
    }
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
}

pub fn test_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 30, 0).unwrap()
}

pub fn bank(id: RecordId, name: &str) -> Bank {
    Bank {
        id,
        name: name.to_string(),
        account_number: None,
        create_date: test_date(),
        create_time: test_time(),
        modify_date: None,
        modify_time: None,
    }
}

pub fn transaction(id: RecordId, amount: f64) -> Transaction {
    Transaction {
        id,
        client_id: 1,
        client_name: Some("Acme Traders".to_string()),
        bank_id: Some(2),
        bank_name: Some("HDFC".to_string()),
        card_id: None,
        card_name: None,
        transaction_type: TransactionType::Deposit,
        transaction_amount: amount,
        widthdraw_charges: 0.0,
        remarks: None,
        create_date: test_date(),
        create_time: test_time(),
        modify_date: None,
        modify_time: None,
    }
}

fn with_records<R: Resource>(
    records: Vec<R::Record>,
    matches: fn(&R::Record, &str) -> bool,
    name_of: fn(&R::Record) -> String,
    build: fn(&R::Create, RecordId) -> R::Record,
    patch: fn(&mut R::Record, &R::Update),
) -> FakeService<R> {
    let next_id = records.iter().map(|r| r.id()).max().unwrap_or(0);
    FakeService {
        records: Mutex::new(records),
        next_id: Mutex::new(next_id),
        list_calls: Mutex::new(Vec::new()),
        mutation_calls: Mutex::new(Vec::new()),
        holds: Mutex::new(HashMap::new()),
        failures: Mutex::new(VecDeque::new()),
        reject_next_list: Mutex::new(None),
        matches,
        name_of,
        build,
        patch,
    }
}

impl FakeService<Banks> {
    /// `count` banks named "Bank 1".."Bank N" with IDs 1..=N
    pub fn banks(count: usize) -> Self {
        let records = (1..=count as RecordId)
            .map(|id| bank(id, &format!("Bank {}", id)))
            .collect();
        with_records::<Banks>(
            records,
            |b, q| b.name.to_lowercase().contains(&q.to_lowercase()),
            |b| b.name.clone(),
            |input: &NewBank, id| Bank {
                account_number: input.account_number.clone(),
                ..bank(id, &input.name)
            },
            |b, update: &BankUpdate| {
                if let Some(name) = &update.name {
                    b.name = name.clone();
                }
                if let Some(account) = &update.account_number {
                    b.account_number = Some(account.clone());
                }
            },
        )
    }
}

impl FakeService<Transactions> {
    /// `count` deposits with IDs 1..=N and amount `id * 100`
    pub fn transactions(count: usize) -> Self {
        let records = (1..=count as RecordId)
            .map(|id| transaction(id, id as f64 * 100.0))
            .collect();
        with_records::<Transactions>(
            records,
            |t, q| {
                t.remarks
                    .as_deref()
                    .is_some_and(|r| r.to_lowercase().contains(&q.to_lowercase()))
            },
            |t| format!("#{}", t.id),
            |input: &NewTransaction, id| Transaction {
                client_id: input.client_id,
                bank_id: input.bank_id,
                card_id: input.card_id,
                transaction_type: input.transaction_type,
                widthdraw_charges: input.widthdraw_charges,
                remarks: input.remarks.clone(),
                ..transaction(id, input.transaction_amount)
            },
            |t, update: &TransactionUpdate| {
                if let Some(amount) = update.transaction_amount {
                    t.transaction_amount = amount;
                }
                if let Some(remarks) = &update.remarks {
                    t.remarks = Some(remarks.clone());
                }
            },
        )
    }
}
