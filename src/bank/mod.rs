mod account;
mod ledger;
mod record;
mod transaction;

pub use account::{Account, AccountError, AccountKind, CheckbookStatus};
pub use ledger::{Ledger, LedgerError};
pub use record::{AccountRecord, RecordError};
pub use transaction::{Transaction, TransactionError, TxKind};
