//! Clients, accounts, and the transactions applied to them.

pub mod account;
pub mod client;
pub mod history;
pub mod record;
pub mod registry;
pub mod statement;
pub mod transaction;

pub use account::{Account, AccountKind, AccountNumber, CheckingLimits, AGENCY_CODE};
pub use client::{Client, ClientId, ClientKind, NaturalPerson};
pub use history::History;
pub use record::{TransactionKind, TransactionRecord};
pub use registry::{AccountSummary, Bank};
pub use statement::{format_money, Statement, StatementFormat};
pub use transaction::{apply, Transaction};
