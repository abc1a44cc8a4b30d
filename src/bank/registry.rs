use chrono::NaiveDate;

use crate::errors::BankError;

use super::account::{Account, AccountNumber, CheckingLimits};
use super::client::Client;
use super::record::TransactionRecord;
use super::statement::Statement;
use super::transaction::Transaction;

/// One row of the account listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub agency: &'static str,
    pub number: AccountNumber,
    pub holder: String,
    pub kind: &'static str,
}

/// Every client registered in the process, in registration order.
#[derive(Debug, Default)]
pub struct Bank {
    clients: Vec<Client>,
    accounts_opened: u32,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a natural-person client. Tax ids are unique across the bank.
    pub fn register_client(
        &mut self,
        tax_id: &str,
        name: &str,
        birth_date: NaiveDate,
        address: &str,
    ) -> Result<&Client, BankError> {
        if self.client(tax_id).is_ok() {
            return Err(BankError::DuplicateClient(tax_id.to_string()));
        }
        self.clients
            .push(Client::natural_person(name, tax_id, birth_date, address));
        tracing::info!(tax_id, name, "client registered");
        self.client(tax_id)
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, tax_id: &str) -> Result<&Client, BankError> {
        self.clients
            .iter()
            .find(|client| client.tax_id() == tax_id)
            .ok_or_else(|| BankError::ClientNotFound(tax_id.to_string()))
    }

    pub fn client_mut(&mut self, tax_id: &str) -> Result<&mut Client, BankError> {
        self.clients
            .iter_mut()
            .find(|client| client.tax_id() == tax_id)
            .ok_or_else(|| BankError::ClientNotFound(tax_id.to_string()))
    }

    /// Number of accounts opened so far; the next account gets this plus one.
    pub fn account_count(&self) -> u32 {
        self.accounts_opened
    }

    /// Opens a checking account for the client with `tax_id` and returns its
    /// number.
    pub fn open_checking_account(
        &mut self,
        tax_id: &str,
        limits: CheckingLimits,
    ) -> Result<AccountNumber, BankError> {
        let number = self.accounts_opened + 1;
        let client = self.client_mut(tax_id)?;
        let owner = client.id();
        client.add_account(Account::checking(number, owner, limits));
        self.accounts_opened = number;
        tracing::info!(tax_id, number, "checking account opened");
        Ok(number)
    }

    /// Applies a transaction to one of the client's accounts; the first
    /// account is used when `number` is `None`.
    pub fn transact(
        &mut self,
        tax_id: &str,
        number: Option<AccountNumber>,
        transaction: Transaction,
    ) -> Result<&TransactionRecord, BankError> {
        let client = self.client_mut(tax_id)?;
        let number = resolve_number(client, number)?;
        client.apply_transaction(number, transaction)
    }

    /// Confirms that the client exists and owns the account (or has any
    /// account when `number` is `None`), returning its number.
    pub fn resolve_account(
        &self,
        tax_id: &str,
        number: Option<AccountNumber>,
    ) -> Result<AccountNumber, BankError> {
        resolve_number(self.client(tax_id)?, number)
    }

    /// Resets the withdrawal counter of one of the client's accounts.
    pub fn reset_period(
        &mut self,
        tax_id: &str,
        number: Option<AccountNumber>,
    ) -> Result<AccountNumber, BankError> {
        let client = self.client_mut(tax_id)?;
        let number = resolve_number(client, number)?;
        if let Some(account) = client.account_mut(number) {
            account.reset_period();
        }
        Ok(number)
    }

    pub fn statement(
        &self,
        tax_id: &str,
        number: Option<AccountNumber>,
    ) -> Result<Statement, BankError> {
        let client = self.client(tax_id)?;
        let number = resolve_number(client, number)?;
        let account = client
            .account(number)
            .ok_or_else(|| BankError::AccountNotFound(number.to_string()))?;
        Ok(Statement::for_account(account, client.name()))
    }

    /// All accounts, ordered by account number.
    pub fn accounts(&self) -> Vec<AccountSummary> {
        let mut rows: Vec<AccountSummary> = self
            .clients
            .iter()
            .flat_map(|client| {
                client.accounts().iter().map(move |account| AccountSummary {
                    agency: account.agency(),
                    number: account.number(),
                    holder: client.name().to_string(),
                    kind: account.kind().label(),
                })
            })
            .collect();
        rows.sort_by_key(|row| row.number);
        rows
    }
}

fn resolve_number(
    client: &Client,
    number: Option<AccountNumber>,
) -> Result<AccountNumber, BankError> {
    match number {
        Some(number) if client.account(number).is_some() => Ok(number),
        Some(number) => Err(BankError::AccountNotFound(format!(
            "account {} of client {}",
            number,
            client.tax_id()
        ))),
        None => client
            .first_account()
            .map(Account::number)
            .ok_or_else(|| {
                BankError::AccountNotFound(format!("client {} has no accounts", client.tax_id()))
            }),
    }
}
