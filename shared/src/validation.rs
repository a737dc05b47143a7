//! Form validation and withdraw-charge math for deposit/withdraw entry.

use serde::{Deserialize, Serialize};

use crate::{NewTransaction, RecordId, TransactionType};

/// Form fields a validation error can be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Amount,
    Client,
    Bank,
    Card,
    Charges,
    Remarks,
}

/// Specific validation errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ValidationError {
    #[error("Amount is required")]
    AmountMissing,
    #[error("Amount must be a number")]
    AmountNotNumeric(String),
    #[error("Amount must be greater than 0")]
    AmountNotPositive,
    #[error("Please select a client")]
    ClientMissing,
    #[error("Please select a bank")]
    BankMissing,
    #[error("Withdraw charges must be between 0 and 100")]
    ChargesOutOfRange,
    #[error("Remarks cannot exceed {0} characters")]
    RemarksTooLong(usize),
}

impl ValidationError {
    pub fn field(&self) -> FormField {
        match self {
            ValidationError::AmountMissing
            | ValidationError::AmountNotNumeric(_)
            | ValidationError::AmountNotPositive => FormField::Amount,
            ValidationError::ClientMissing => FormField::Client,
            ValidationError::BankMissing => FormField::Bank,
            ValidationError::ChargesOutOfRange => FormField::Charges,
            ValidationError::RemarksTooLong(_) => FormField::Remarks,
        }
    }
}

/// Validation result for transaction form input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub cleaned_amount: Option<f64>,
}

impl ValidationResult {
    /// Inline message for one field, if that field failed
    pub fn message_for(&self, field: FormField) -> Option<String> {
        self.errors
            .iter()
            .find(|e| e.field() == field)
            .map(|e| e.to_string())
    }
}

pub const MAX_REMARKS_LEN: usize = 500;

/// Raw deposit/withdraw form input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFormInput {
    pub transaction_type: Option<TransactionType>,
    pub amount: String,
    pub client_id: Option<RecordId>,
    pub bank_id: Option<RecordId>,
    pub card_id: Option<RecordId>,
    pub charges_percentage: String,
    pub remarks: String,
}

impl TransactionFormInput {
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        let cleaned_amount = match parse_amount(&self.amount) {
            Ok(amount) if amount > 0.0 => Some(amount),
            Ok(_) => {
                errors.push(ValidationError::AmountNotPositive);
                None
            }
            Err(e) => {
                errors.push(e);
                None
            }
        };

        if self.client_id.is_none() {
            errors.push(ValidationError::ClientMissing);
        }
        if self.bank_id.is_none() {
            errors.push(ValidationError::BankMissing);
        }

        if self.charges().map_or(true, |pct| !(0.0..=100.0).contains(&pct)) {
            errors.push(ValidationError::ChargesOutOfRange);
        }

        if self.remarks.chars().count() > MAX_REMARKS_LEN {
            errors.push(ValidationError::RemarksTooLong(MAX_REMARKS_LEN));
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Charge percentage; blank means no charge
    pub fn charges(&self) -> Option<f64> {
        let raw = self.charges_percentage.trim();
        if raw.is_empty() {
            return Some(0.0);
        }
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Build the create payload; `None` when the form does not validate
    pub fn to_new_transaction(&self) -> Option<NewTransaction> {
        let result = self.validate();
        let amount = result.cleaned_amount.filter(|_| result.is_valid)?;
        let remarks = self.remarks.trim();
        Some(NewTransaction {
            client_id: self.client_id?,
            bank_id: self.bank_id,
            card_id: self.card_id,
            transaction_type: self.transaction_type.unwrap_or(TransactionType::Deposit),
            transaction_amount: amount,
            widthdraw_charges: self.charges().unwrap_or(0.0),
            remarks: (!remarks.is_empty()).then(|| remarks.to_string()),
        })
    }
}

fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '₹' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Err(ValidationError::AmountMissing);
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::AmountNotNumeric(input.to_string()))
}

/// Charge and adjusted total for one amount/percentage pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeBreakdown {
    pub charge_amount: f64,
    pub adjusted_amount: f64,
}

impl ChargeBreakdown {
    /// Withdraws add the charge on top; deposit-side display subtracts it
    pub fn calculate(transaction_type: TransactionType, amount: f64, percentage: f64) -> Self {
        let charge_amount = round_cents(amount * percentage / 100.0);
        let adjusted_amount = match transaction_type {
            TransactionType::Withdraw => round_cents(amount + charge_amount),
            TransactionType::Deposit => round_cents(amount - charge_amount),
        };
        Self {
            charge_amount,
            adjusted_amount,
        }
    }

    pub fn formatted_charge(&self) -> String {
        format!("{:.2}", self.charge_amount)
    }

    pub fn formatted_adjusted(&self) -> String {
        format!("{:.2}", self.adjusted_amount)
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> TransactionFormInput {
        TransactionFormInput {
            transaction_type: Some(TransactionType::Deposit),
            amount: "250".to_string(),
            client_id: Some(1),
            bank_id: Some(2),
            card_id: None,
            charges_percentage: String::new(),
            remarks: "salary".to_string(),
        }
    }

    #[test]
    fn test_zero_amount_rejected_with_message() {
        let input = TransactionFormInput {
            amount: "0".to_string(),
            ..valid_input()
        };
        let result = input.validate();
        assert!(!result.is_valid);
        assert_eq!(
            result.message_for(FormField::Amount).as_deref(),
            Some("Amount must be greater than 0")
        );
        assert!(input.to_new_transaction().is_none());
    }

    #[test]
    fn test_missing_selections_reported_per_field() {
        let input = TransactionFormInput {
            client_id: None,
            bank_id: None,
            ..valid_input()
        };
        let result = input.validate();
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.message_for(FormField::Client).as_deref(),
            Some("Please select a client")
        );
        assert!(result.message_for(FormField::Amount).is_none());
    }

    #[test]
    fn test_amount_parsing() {
        let input = TransactionFormInput {
            amount: "$1,250.50".to_string(),
            ..valid_input()
        };
        assert_eq!(input.validate().cleaned_amount, Some(1250.5));

        let input = TransactionFormInput {
            amount: "twelve".to_string(),
            ..valid_input()
        };
        assert!(matches!(
            input.validate().errors[0],
            ValidationError::AmountNotNumeric(_)
        ));

        let input = TransactionFormInput {
            amount: "  ".to_string(),
            ..valid_input()
        };
        assert_eq!(input.validate().errors[0], ValidationError::AmountMissing);
    }

    #[test]
    fn test_charges_range() {
        let input = TransactionFormInput {
            charges_percentage: "120".to_string(),
            ..valid_input()
        };
        assert_eq!(
            input.validate().errors,
            vec![ValidationError::ChargesOutOfRange]
        );
    }

    #[test]
    fn test_to_new_transaction() {
        let input = TransactionFormInput {
            transaction_type: Some(TransactionType::Withdraw),
            charges_percentage: "2.5".to_string(),
            remarks: "  ".to_string(),
            ..valid_input()
        };
        let payload = input.to_new_transaction().unwrap();
        assert_eq!(payload.transaction_amount, 250.0);
        assert_eq!(payload.widthdraw_charges, 2.5);
        assert_eq!(payload.remarks, None);
        assert_eq!(payload.transaction_type, TransactionType::Withdraw);
    }

    #[test]
    fn test_withdraw_charge_calculation() {
        let breakdown = ChargeBreakdown::calculate(TransactionType::Withdraw, 1000.0, 5.0);
        assert_eq!(breakdown.formatted_charge(), "50.00");
        assert_eq!(breakdown.formatted_adjusted(), "1050.00");
    }

    #[test]
    fn test_deposit_charge_calculation() {
        let breakdown = ChargeBreakdown::calculate(TransactionType::Deposit, 1000.0, 5.0);
        assert_eq!(breakdown.charge_amount, 50.0);
        assert_eq!(breakdown.adjusted_amount, 950.0);

        let fractional = ChargeBreakdown::calculate(TransactionType::Withdraw, 200.0, 1.5);
        assert_eq!(fractional.formatted_charge(), "3.00");
        assert_eq!(fractional.formatted_adjusted(), "203.00");
    }
}
