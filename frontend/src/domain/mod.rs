//! Client-side calculations over loaded records.

pub mod balances;

pub use balances::{
    balance_delta, running_balances, withdraw_charge, BalancePoint, ProfileSummary,
};
