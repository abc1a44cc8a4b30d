use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BankError;

use super::account::{Account, AccountNumber};
use super::record::TransactionRecord;
use super::transaction::Transaction;

/// Stable identifier used by accounts to refer back to their owner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a client who is a natural person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NaturalPerson {
    pub name: String,
    pub tax_id: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientKind {
    NaturalPerson(NaturalPerson),
}

impl ClientKind {
    pub fn tax_id(&self) -> &str {
        match self {
            ClientKind::NaturalPerson(person) => &person.tax_id,
        }
    }
}

/// Owns a set of accounts and is the only way to apply a transaction to one
/// of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    id: ClientId,
    address: String,
    accounts: Vec<Account>,
    kind: ClientKind,
}

impl Client {
    pub fn natural_person(
        name: impl Into<String>,
        tax_id: impl Into<String>,
        birth_date: NaiveDate,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: ClientId::new(),
            address: address.into(),
            accounts: Vec::new(),
            kind: ClientKind::NaturalPerson(NaturalPerson {
                name: name.into(),
                tax_id: tax_id.into(),
                birth_date,
            }),
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn kind(&self) -> &ClientKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            ClientKind::NaturalPerson(person) => &person.name,
        }
    }

    pub fn tax_id(&self) -> &str {
        self.kind.tax_id()
    }

    pub fn birth_date(&self) -> NaiveDate {
        match &self.kind {
            ClientKind::NaturalPerson(person) => person.birth_date,
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|account| account.number() == number)
    }

    pub(crate) fn account_mut(&mut self, number: AccountNumber) -> Option<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.number() == number)
    }

    pub fn first_account(&self) -> Option<&Account> {
        self.accounts.first()
    }

    /// Appends without checking for duplicates. Accounts are expected to
    /// carry this client's id as owner.
    pub fn add_account(&mut self, account: Account) {
        debug_assert_eq!(account.owner(), self.id);
        self.accounts.push(account);
    }

    /// Applies `transaction` to the account with `number`, which must belong
    /// to this client.
    pub fn apply_transaction(
        &mut self,
        number: AccountNumber,
        transaction: Transaction,
    ) -> Result<&TransactionRecord, BankError> {
        let kind = &self.kind;
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.number() == number)
            .ok_or_else(|| {
                BankError::AccountNotFound(format!(
                    "account {} of client {}",
                    number,
                    kind.tax_id()
                ))
            })?;
        transaction.apply(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::account::CheckingLimits;
    use rust_decimal_macros::dec;

    fn client() -> Client {
        Client::natural_person(
            "Ana",
            "111",
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            "Rua A, 10 - Centro - Recife/PE",
        )
    }

    #[test]
    fn applies_transactions_to_owned_accounts_only() {
        let mut ana = client();
        ana.add_account(Account::checking(1, ana.id(), CheckingLimits::default()));
        ana.add_account(Account::checking(2, ana.id(), CheckingLimits::default()));

        ana.apply_transaction(2, Transaction::deposit(dec!(75)))
            .unwrap();
        assert_eq!(ana.account(2).map(Account::balance), Some(dec!(75)));
        assert_eq!(ana.account(1).map(Account::balance), Some(dec!(0)));

        let err = ana
            .apply_transaction(7, Transaction::deposit(dec!(75)))
            .unwrap_err();
        assert_eq!(
            err,
            BankError::AccountNotFound("account 7 of client 111".into())
        );
    }

    #[test]
    fn exposes_natural_person_identity() {
        let ana = client();
        assert_eq!(ana.name(), "Ana");
        assert_eq!(ana.tax_id(), "111");
        assert_eq!(ana.birth_date().to_string(), "1990-05-17");
        assert!(ana.first_account().is_none());
    }
}
