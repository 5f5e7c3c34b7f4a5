use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum TransactionError {
    #[error("amount must be non-negative, got {0}")]
    InvalidAmount(f64),
}

/// A single deposit or withdrawal, recorded with the balance it left behind.
/// Owned exclusively by the account it belongs to and never mutated afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub amount: f64,
    pub kind: TxKind,
    pub balance_after: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    Deposit,
    Withdrawal,
}

impl Transaction {
    pub fn new(amount: f64, kind: TxKind, balance_after: f64) -> Result<Self, TransactionError> {
        Self::with_timestamp(amount, kind, balance_after, Local::now().naive_local())
    }

    pub fn with_timestamp(
        amount: f64,
        kind: TxKind,
        balance_after: f64,
        timestamp: NaiveDateTime,
    ) -> Result<Self, TransactionError> {
        if amount < 0.0 {
            return Err(TransactionError::InvalidAmount(amount));
        }
        Ok(Transaction {
            amount,
            kind,
            balance_after,
            timestamp,
        })
    }

    /// Two-line human-readable form, shown by the `show` command.
    pub fn render(&self) -> String {
        format!(
            "{} - {} - ${}\nBalance: ${}",
            self.timestamp, self.kind, self.amount, self.balance_after
        )
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Deposit => write!(f, "Deposit"),
            TxKind::Withdrawal => write!(f, "Withdrawal"),
        }
    }
}
