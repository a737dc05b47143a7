//! # App Context
//!
//! Builds every long-lived piece of the client from one [`ClientConfig`]:
//! the HTTP client, one service and controller per resource, the shared
//! [`AppStore`] and the export service. Screens receive what they need from
//! here instead of reaching for globals.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::actions::{AutocompleteController, ListController};
use crate::components::{ListView, ListViewTimings, PickerInput};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::logging::init_logging;
use crate::resources::{
    Banks, Cards, Clients, ProfilerProfiles, ProfilerTransactions, Resource, Transactions,
};
use crate::services::{ApiClient, ExportService, HttpResourceService, ResourceService};
use crate::state::{AppStore, ListStore};

#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub store: AppStore,
    pub transactions: ListController<Transactions>,
    pub clients: ListController<Clients>,
    pub banks: ListController<Banks>,
    pub cards: ListController<Cards>,
    pub profiler_profiles: ListController<ProfilerProfiles>,
    pub profiler_transactions: ListController<ProfilerTransactions>,
    pub client_picker: Arc<AutocompleteController<Clients>>,
    pub bank_picker: Arc<AutocompleteController<Banks>>,
    pub card_picker: Arc<AutocompleteController<Cards>>,
    pub export: ExportService,
}

fn http_service<R: Resource>(api: &ApiClient) -> Arc<dyn ResourceService<R>> {
    Arc::new(HttpResourceService::<R>::new(api.clone()))
}

fn controller<R: Resource>(store: &ListStore<R>, api: &ApiClient) -> ListController<R> {
    ListController::new(store.clone(), http_service(api))
}

impl AppContext {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let store = AppStore::new(&config);

        Ok(Self {
            transactions: controller(&store.transactions, &api),
            clients: controller(&store.clients, &api),
            banks: controller(&store.banks, &api),
            cards: controller(&store.cards, &api),
            profiler_profiles: controller(&store.profiler_profiles, &api),
            profiler_transactions: controller(&store.profiler_transactions, &api),
            client_picker: Arc::new(AutocompleteController::new(http_service(&api))),
            bank_picker: Arc::new(AutocompleteController::new(http_service(&api))),
            card_picker: Arc::new(AutocompleteController::new(http_service(&api))),
            export: ExportService::new(api.clone()),
            api,
            store,
            config,
        })
    }

    /// Load config from `path` (defaults if missing), start logging and
    /// build the context
    pub fn bootstrap(path: &Path) -> Result<Self> {
        let config = ClientConfig::load_or_default(path)?;
        init_logging(&config.logging);
        info!("🚀 Ledger client using API at {}", config.api.base_url);
        Self::new(config).context("Failed to build API client")
    }

    pub fn timings(&self) -> ListViewTimings {
        ListViewTimings::from_config(&self.config)
    }

    fn view<R: Resource>(&self, controller: &ListController<R>) -> ListView<R> {
        ListView::new(
            controller.clone(),
            self.store.notifications.clone(),
            self.timings(),
        )
    }

    pub fn transactions_view(&self) -> ListView<Transactions> {
        self.view(&self.transactions)
    }

    pub fn clients_view(&self) -> ListView<Clients> {
        self.view(&self.clients)
    }

    pub fn banks_view(&self) -> ListView<Banks> {
        self.view(&self.banks)
    }

    pub fn cards_view(&self) -> ListView<Cards> {
        self.view(&self.cards)
    }

    pub fn profiler_profiles_view(&self) -> ListView<ProfilerProfiles> {
        self.view(&self.profiler_profiles)
    }

    pub fn profiler_transactions_view(&self) -> ListView<ProfilerTransactions> {
        self.view(&self.profiler_transactions)
    }

    pub fn client_picker_input(&self) -> PickerInput<Clients> {
        PickerInput::new(self.client_picker.clone(), self.config.debounce.autocomplete())
    }

    pub fn bank_picker_input(&self) -> PickerInput<Banks> {
        PickerInput::new(self.bank_picker.clone(), self.config.debounce.autocomplete())
    }

    pub fn card_picker_input(&self) -> PickerInput<Cards> {
        PickerInput::new(self.card_picker.clone(), self.config.debounce.autocomplete())
    }
}
