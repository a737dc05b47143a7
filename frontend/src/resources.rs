//! Resource descriptors.
//!
//! Every list screen (transactions, clients, banks, cards and the profiler
//! tables) runs the same paginated/sortable/searchable machinery. A
//! [`Resource`] ties that machinery to one endpoint: which record type comes
//! back, which filters it accepts and where it lives under `/api/v1`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use shared::{
    Bank, BankFilters, BankUpdate, Card, CardFilters, CardUpdate, Client, ClientFilters,
    ClientUpdate, NewBank, NewCard, NewClient, NewProfilerProfile, NewProfilerTransaction,
    NewTransaction, ProfilerProfile, ProfilerProfileFilters, ProfilerProfileUpdate,
    ProfilerTransaction, ProfilerTransactionFilters, ProfilerTransactionUpdate, QueryFilters,
    Record, SortConfig, SortOrder, Transaction, TransactionFilters, TransactionUpdate,
};

pub trait Resource: Debug + Clone + Send + Sync + 'static {
    type Record: Record + Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Filters: QueryFilters
        + Clone
        + Debug
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;
    type Create: Debug + Serialize + Send + Sync + 'static;
    type Update: Debug + Serialize + Send + Sync + 'static;

    /// Human-readable name for logs and toasts
    const NAME: &'static str;
    /// Path under the API base URL
    const PATH: &'static str;
    /// Columns the server accepts in `sort_by`; other headers are not clickable
    const SORT_COLUMNS: &'static [&'static str];

    fn default_sort() -> SortConfig;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Transactions;
#[derive(Debug, Clone, Copy, Default)]
pub struct Clients;
#[derive(Debug, Clone, Copy, Default)]
pub struct Banks;
#[derive(Debug, Clone, Copy, Default)]
pub struct Cards;
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilerProfiles;
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilerTransactions;

impl Resource for Transactions {
    type Record = Transaction;
    type Filters = TransactionFilters;
    type Create = NewTransaction;
    type Update = TransactionUpdate;

    const NAME: &'static str = "transaction";
    const PATH: &'static str = "transactions";
    const SORT_COLUMNS: &'static [&'static str] = &[
        "id",
        "create_date",
        "transaction_amount",
        "transaction_type",
        "client_name",
        "bank_name",
        "card_name",
    ];

    fn default_sort() -> SortConfig {
        SortConfig::new("create_date", SortOrder::Desc)
    }
}

impl Resource for Clients {
    type Record = Client;
    type Filters = ClientFilters;
    type Create = NewClient;
    type Update = ClientUpdate;

    const NAME: &'static str = "client";
    const PATH: &'static str = "clients";
    const SORT_COLUMNS: &'static [&'static str] = &["id", "name", "email", "create_date"];

    fn default_sort() -> SortConfig {
        SortConfig::new("name", SortOrder::Asc)
    }
}

impl Resource for Banks {
    type Record = Bank;
    type Filters = BankFilters;
    type Create = NewBank;
    type Update = BankUpdate;

    const NAME: &'static str = "bank";
    const PATH: &'static str = "banks";
    const SORT_COLUMNS: &'static [&'static str] = &["id", "name", "create_date"];

    fn default_sort() -> SortConfig {
        SortConfig::new("name", SortOrder::Asc)
    }
}

impl Resource for Cards {
    type Record = Card;
    type Filters = CardFilters;
    type Create = NewCard;
    type Update = CardUpdate;

    const NAME: &'static str = "card";
    const PATH: &'static str = "cards";
    const SORT_COLUMNS: &'static [&'static str] = &["id", "name", "create_date"];

    fn default_sort() -> SortConfig {
        SortConfig::new("name", SortOrder::Asc)
    }
}

impl Resource for ProfilerProfiles {
    type Record = ProfilerProfile;
    type Filters = ProfilerProfileFilters;
    type Create = NewProfilerProfile;
    type Update = ProfilerProfileUpdate;

    const NAME: &'static str = "profile";
    const PATH: &'static str = "profiler/profiles";
    const SORT_COLUMNS: &'static [&'static str] = &[
        "id",
        "client_name",
        "pre_planned_deposit_amount",
        "current_balance",
        "create_date",
    ];

    fn default_sort() -> SortConfig {
        SortConfig::new("create_date", SortOrder::Desc)
    }
}

impl Resource for ProfilerTransactions {
    type Record = ProfilerTransaction;
    type Filters = ProfilerTransactionFilters;
    type Create = NewProfilerTransaction;
    type Update = ProfilerTransactionUpdate;

    const NAME: &'static str = "profiler transaction";
    const PATH: &'static str = "profiler/transactions";
    const SORT_COLUMNS: &'static [&'static str] =
        &["id", "amount", "transaction_type", "create_date"];

    fn default_sort() -> SortConfig {
        SortConfig::new("create_date", SortOrder::Desc)
    }
}
