//! Type-ahead picker for clients, banks and cards.

use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use shared::{AutocompleteItem, RecordId};

use super::debounce::Debouncer;
use crate::actions::AutocompleteController;
use crate::resources::Resource;

pub struct PickerInput<R: Resource> {
    lookup: Arc<AutocompleteController<R>>,
    debouncer: Debouncer,
    text: String,
    selected: Option<AutocompleteItem>,
}

impl<R: Resource> PickerInput<R> {
    pub fn new(lookup: Arc<AutocompleteController<R>>, delay: Duration) -> Self {
        Self {
            lookup,
            debouncer: Debouncer::new(delay),
            text: String::new(),
            selected: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn suggestions(&self) -> Vec<AutocompleteItem> {
        self.lookup.results()
    }

    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected.as_ref().map(|item| item.id)
    }

    /// Keystroke: clears any selection and schedules a lookup
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selected = None;
        let lookup = self.lookup.clone();
        let query = self.text.clone();
        self.debouncer.call(move || async move {
            if let Err(err) = lookup.lookup(&query).await {
                warn!("⚠️ {} suggestions failed: {}", R::NAME, err);
            }
        });
    }

    pub fn select(&mut self, item: AutocompleteItem) {
        self.debouncer.cancel();
        self.text = item.name.clone();
        self.selected = Some(item);
        self.lookup.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Banks;
    use crate::services::test_utils::FakeService;

    #[tokio::test(start_paused = true)]
    async fn test_lookup_after_pause_then_select() {
        let service = Arc::new(FakeService::banks(12));
        let lookup = Arc::new(AutocompleteController::<Banks>::new(service));
        let mut picker = PickerInput::new(lookup, Duration::from_millis(300));

        picker.type_text("bank 1");
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(picker.suggestions().is_empty());

        tokio::time::sleep(Duration::from_millis(150)).await;
        let suggestions = picker.suggestions();
        assert_eq!(suggestions.len(), 4);

        picker.select(suggestions[1].clone());
        assert_eq!(picker.selected_id(), Some(10));
        assert_eq!(picker.text(), "Bank 10");
        assert!(picker.suggestions().is_empty());

        picker.type_text("Bank 1");
        assert_eq!(picker.selected_id(), None);
    }
}
