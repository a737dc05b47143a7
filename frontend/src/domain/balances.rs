//! # Profiler Balances
//!
//! Running balances for a profiler profile, computed from its transactions.
//!
//! ## Rules
//! - Transactions are applied oldest first (`create_date`, `create_time`, then `id`)
//! - A deposit adds its amount
//! - A withdraw subtracts its amount plus its charge
//!
//! The charge comes from `withdraw_charges_amount` when the server sent one,
//! otherwise from `amount * withdraw_charges_percentage / 100`.

use serde::{Deserialize, Serialize};

use shared::{round_cents, ProfilerProfile, ProfilerTransaction, RecordId, TransactionType};

/// Balance right after one transaction was applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub transaction_id: RecordId,
    pub balance: f64,
}

/// Charge booked on a withdraw; deposits carry none
pub fn withdraw_charge(transaction: &ProfilerTransaction) -> f64 {
    if transaction.transaction_type != TransactionType::Withdraw {
        return 0.0;
    }
    if transaction.withdraw_charges_amount > 0.0 {
        transaction.withdraw_charges_amount
    } else {
        round_cents(transaction.amount * transaction.withdraw_charges_percentage / 100.0)
    }
}

/// Signed effect of one transaction on the balance
pub fn balance_delta(transaction: &ProfilerTransaction) -> f64 {
    match transaction.transaction_type {
        TransactionType::Deposit => transaction.amount,
        TransactionType::Withdraw => -(transaction.amount + withdraw_charge(transaction)),
    }
}

fn chronological(transactions: &[ProfilerTransaction]) -> Vec<&ProfilerTransaction> {
    let mut ordered: Vec<&ProfilerTransaction> = transactions.iter().collect();
    ordered.sort_by_key(|t| (t.create_date, t.create_time, t.id));
    ordered
}

/// Balance after each transaction, oldest first
pub fn running_balances(opening: f64, transactions: &[ProfilerTransaction]) -> Vec<BalancePoint> {
    let mut balance = opening;
    chronological(transactions)
        .into_iter()
        .map(|t| {
            balance = round_cents(balance + balance_delta(t));
            BalancePoint {
                transaction_id: t.id,
                balance,
            }
        })
        .collect()
}

/// Totals for one profile's detail header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile_id: RecordId,
    pub pre_planned_deposit_amount: f64,
    pub total_deposits: f64,
    pub total_withdrawals: f64,
    pub total_charges: f64,
    pub current_balance: f64,
    /// Planned deposit not yet received; never negative
    pub remaining_deposit: f64,
    pub transaction_count: usize,
}

impl ProfileSummary {
    /// Summarize `transactions` that belong to `profile`; others are ignored
    pub fn calculate(profile: &ProfilerProfile, transactions: &[ProfilerTransaction]) -> Self {
        let own: Vec<ProfilerTransaction> = transactions
            .iter()
            .filter(|t| t.profile_id == profile.id)
            .cloned()
            .collect();

        let mut total_deposits = 0.0;
        let mut total_withdrawals = 0.0;
        let mut total_charges = 0.0;
        for t in &own {
            match t.transaction_type {
                TransactionType::Deposit => total_deposits += t.amount,
                TransactionType::Withdraw => {
                    total_withdrawals += t.amount;
                    total_charges += withdraw_charge(t);
                }
            }
        }

        let current_balance = running_balances(0.0, &own)
            .last()
            .map_or(0.0, |point| point.balance);

        Self {
            profile_id: profile.id,
            pre_planned_deposit_amount: profile.pre_planned_deposit_amount,
            total_deposits: round_cents(total_deposits),
            total_withdrawals: round_cents(total_withdrawals),
            total_charges: round_cents(total_charges),
            current_balance,
            remaining_deposit: round_cents(
                (profile.pre_planned_deposit_amount - total_deposits).max(0.0),
            ),
            transaction_count: own.len(),
        }
    }

    /// Share of the planned deposit received so far, capped at 100
    pub fn deposit_progress(&self) -> f64 {
        if self.pre_planned_deposit_amount <= 0.0 {
            return 0.0;
        }
        round_cents((self.total_deposits / self.pre_planned_deposit_amount * 100.0).min(100.0))
    }

    pub fn is_fully_deposited(&self) -> bool {
        self.remaining_deposit <= 0.0
    }
}
