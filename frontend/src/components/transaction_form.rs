//! Deposit/withdraw entry form.
//!
//! Holds the raw input, shows inline errors and a live charge preview, and
//! submits through the transactions controller. An invalid form never
//! reaches the network.

use tracing::{info, warn};

use shared::{
    ChargeBreakdown, FormField, Transaction, TransactionFormInput, TransactionType,
    ValidationResult,
};

use crate::actions::ListController;
use crate::error::{ClientError, ClientResult};
use crate::resources::Transactions;

#[derive(Debug, Clone, Default)]
pub struct TransactionForm {
    pub input: TransactionFormInput,
    validation: Option<ValidationResult>,
    submitting: bool,
    form_error: Option<String>,
    form_success: bool,
}

impl TransactionForm {
    pub fn new(transaction_type: TransactionType) -> Self {
        Self {
            input: TransactionFormInput {
                transaction_type: Some(transaction_type),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    pub fn form_success(&self) -> bool {
        self.form_success
    }

    /// Inline message under `field` from the last validation
    pub fn field_error(&self, field: FormField) -> Option<String> {
        self.validation.as_ref()?.message_for(field)
    }

    /// Charge/adjusted preview; `None` until amount and percentage parse
    pub fn charge_preview(&self) -> Option<ChargeBreakdown> {
        let amount = self.input.validate().cleaned_amount?;
        let percentage = self.input.charges()?;
        let transaction_type = self.input.transaction_type.unwrap_or(TransactionType::Deposit);
        Some(ChargeBreakdown::calculate(transaction_type, amount, percentage))
    }

    pub fn validate(&mut self) -> bool {
        let result = self.input.validate();
        let valid = result.is_valid;
        self.validation = Some(result);
        valid
    }

    /// Validate and create. The controller is only called for a valid form.
    pub async fn submit(
        &mut self,
        controller: &ListController<Transactions>,
    ) -> ClientResult<Transaction> {
        self.form_error = None;
        self.form_success = false;

        if !self.validate() {
            let errors = self
                .validation
                .as_ref()
                .map(|v| v.errors.clone())
                .unwrap_or_default();
            return Err(ClientError::Validation(errors));
        }
        let Some(payload) = self.input.to_new_transaction() else {
            return Err(ClientError::Validation(Vec::new()));
        };

        self.submitting = true;
        let result = controller.create(payload).await;
        self.submitting = false;

        match &result {
            Ok(transaction) => {
                info!("💰 Saved {} #{}", transaction.transaction_type, transaction.id);
                self.form_success = true;
                self.input = TransactionFormInput {
                    transaction_type: self.input.transaction_type,
                    ..Default::default()
                };
                self.validation = None;
            }
            Err(err) => {
                warn!("⚠️ Transaction not saved: {}", err);
                self.form_error = Some(err.user_message());
            }
        }
        result
    }
}
