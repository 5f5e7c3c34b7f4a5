use crate::bank::{Transaction, TransactionError, TxKind};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AccountError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("insufficient funds: withdrawal of ${0} exceeds the balance")]
    InsufficientFunds(f64),

    #[error("insufficient funds: cannot go below the minimum balance of ${0} in a savings account")]
    MinimumBalance(f64),
}

/// Variant-specific payload. Withdrawal rules and serialization dispatch on
/// this tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccountKind {
    Savings { minimum_balance: f64 },
    Checking { checkbook_issued: bool },
}

impl AccountKind {
    pub fn savings() -> Self {
        AccountKind::Savings {
            minimum_balance: 100.0,
        }
    }

    pub fn checking() -> Self {
        AccountKind::Checking {
            checkbook_issued: false,
        }
    }
}

/// Outcome of `issue_checkbook` on an account that already has one is a
/// distinguishable no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckbookStatus {
    Issued,
    AlreadyIssued,
}

pub struct Account {
    pub number: String, // Unique, zero-padded
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub balance: f64,
    pub history: Vec<Transaction>,
    pub kind: AccountKind,
}

impl Account {
    pub fn new(
        number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: impl Into<String>,
        kind: AccountKind,
    ) -> Self {
        Account {
            number: number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: gender.into(),
            balance: 0.0,
            history: Vec::new(),
            kind,
        }
    }

    pub fn deposit(&mut self, amount: f64) -> Result<(), AccountError> {
        let tx = Transaction::new(amount, TxKind::Deposit, self.balance + amount)?;
        self.balance += amount;
        self.history.push(tx);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: f64) -> Result<(), AccountError> {
        // The savings floor is checked before the base rules, so a savings
        // overdraft reports the minimum-balance message.
        if let AccountKind::Savings { minimum_balance } = self.kind {
            if self.balance - amount < minimum_balance {
                return Err(AccountError::MinimumBalance(minimum_balance));
            }
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds(amount));
        }
        let tx = Transaction::new(amount, TxKind::Withdrawal, self.balance - amount)?;
        self.balance -= amount;
        self.history.push(tx);
        Ok(())
    }

    /// Chronological history, one rendered transaction per entry. Empty
    /// string when nothing has happened yet.
    pub fn history_text(&self) -> String {
        self.history
            .iter()
            .map(Transaction::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn summary(&self) -> String {
        match self.kind {
            AccountKind::Savings { .. } => {
                format!("Savings Account {}\nBalance: ${:.2}", self.number, self.balance)
            }
            AccountKind::Checking { .. } => {
                format!("Checking Account {}\nBalance: ${:.2}", self.number, self.balance)
            }
        }
    }

    pub fn checkbook_issued(&self) -> bool {
        matches!(
            self.kind,
            AccountKind::Checking {
                checkbook_issued: true
            }
        )
    }

    /// Checking only; `None` for savings accounts.
    pub fn issue_checkbook(&mut self) -> Option<CheckbookStatus> {
        match &mut self.kind {
            AccountKind::Checking { checkbook_issued } => {
                if *checkbook_issued {
                    Some(CheckbookStatus::AlreadyIssued)
                } else {
                    *checkbook_issued = true;
                    Some(CheckbookStatus::Issued)
                }
            }
            AccountKind::Savings { .. } => None,
        }
    }
}
