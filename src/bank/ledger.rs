use crate::bank::{Account, AccountRecord, RecordError};
use csv::Trim;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Account table I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Account table row error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Account record error: {0}")]
    Record(#[from] RecordError),
}

/// The in-memory account table, keyed by account number. Kept ordered so
/// every save writes rows in assignment order.
pub struct Ledger {
    accounts: BTreeMap<String, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            accounts: BTreeMap::new(),
        }
    }

    /// Reads the whole table from `path`. A missing file is an empty ledger,
    /// not an error.
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        if !path.exists() {
            log::debug!("No account table at {path:?}, starting empty");
            return Ok(Ledger::new());
        }

        let file = File::open(path)?;
        let mut rdr = csv::ReaderBuilder::new().trim(Trim::All).from_reader(file);

        let mut ledger = Ledger::new();
        for result in rdr.deserialize::<AccountRecord>() {
            let record = result?;
            log::debug!("Deserialised row for account {}", record.account_number);
            let account = record.into_account()?;
            ledger.accounts.insert(account.number.clone(), account);
        }
        Ok(ledger)
    }

    /// Rewrites the whole table at `path`, header first. Not atomic.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let mut wtr = csv::Writer::from_writer(File::create(path)?);
        for account in self.accounts.values() {
            wtr.serialize(AccountRecord::from_account(account)?)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Next free zero-padded account number. Numbers past 99999 simply widen.
    pub fn next_account_number(&self) -> String {
        let max = self
            .accounts
            .keys()
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("{:05}", max + 1)
    }

    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.number.clone(), account);
    }

    pub fn get(&self, number: &str) -> Option<&Account> {
        self.accounts.get(number)
    }

    pub fn get_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.get_mut(number)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::AccountKind;

    fn account(number: &str) -> Account {
        Account::new(number, "Sheena", "Ondoy", "F", AccountKind::savings())
    }

    #[test]
    fn test_that_an_empty_ledger_starts_numbering_at_one() {
        assert_eq!(Ledger::new().next_account_number(), "00001");
    }

    #[test]
    fn test_that_numbering_continues_from_the_maximum() {
        let mut ledger = Ledger::new();
        ledger.insert(account("00007"));
        assert_eq!(ledger.next_account_number(), "00008");
    }

    #[test]
    fn test_that_numbering_ignores_gaps() {
        let mut ledger = Ledger::new();
        ledger.insert(account("00099"));
        ledger.insert(account("00003"));
        assert_eq!(ledger.next_account_number(), "00100");
    }

    #[test]
    fn test_that_numbering_widens_past_five_digits() {
        let mut ledger = Ledger::new();
        ledger.insert(account("99999"));
        assert_eq!(ledger.next_account_number(), "100000");
    }

    #[test]
    fn test_that_insert_and_lookup_agree() {
        let mut ledger = Ledger::new();
        assert!(ledger.is_empty());
        ledger.insert(account("00001"));
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get("00001").is_some());
        assert!(ledger.get("00002").is_none());
        ledger.get_mut("00001").unwrap().deposit(10.0).unwrap();
        assert_eq!(ledger.get("00001").unwrap().balance, 10.0);
    }
}
