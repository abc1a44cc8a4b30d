use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::BankError;

use super::account::Account;
use super::record::{TransactionKind, TransactionRecord};

/// A requested operation; exists only for the duration of one `apply`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
}

impl Transaction {
    pub fn deposit(amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Deposit,
            amount,
        }
    }

    pub fn withdrawal(amount: Decimal) -> Self {
        Self {
            kind: TransactionKind::Withdrawal,
            amount,
        }
    }

    pub fn apply<'a>(&self, account: &'a mut Account) -> Result<&'a TransactionRecord, BankError> {
        apply(self.kind, self.amount, account)
    }
}

/// Runs the account operation for `kind` and, only if it succeeds, records it
/// in the account history. This is the single write path into a history.
pub fn apply(
    kind: TransactionKind,
    amount: Decimal,
    account: &mut Account,
) -> Result<&TransactionRecord, BankError> {
    match kind {
        TransactionKind::Deposit => account.deposit(amount)?,
        TransactionKind::Withdrawal => account.withdraw(amount)?,
    }
    let record = account
        .history_mut()
        .append(TransactionRecord::now(kind, amount));
    tracing::debug!(id = %record.id(), %kind, %amount, "transaction recorded");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::account::CheckingLimits;
    use crate::bank::client::ClientId;
    use rust_decimal_macros::dec;

    #[test]
    fn failed_transaction_leaves_no_record() {
        let mut account = Account::checking(1, ClientId::new(), CheckingLimits::default());

        let err = Transaction::withdrawal(dec!(10))
            .apply(&mut account)
            .unwrap_err();
        assert_eq!(err, BankError::InsufficientFunds);
        assert!(account.history().is_empty());

        let err = Transaction::deposit(dec!(0)).apply(&mut account).unwrap_err();
        assert_eq!(err, BankError::InvalidAmount);
        assert!(account.history().is_empty());
    }

    #[test]
    fn successful_transaction_is_recorded() {
        let mut account = Account::checking(1, ClientId::new(), CheckingLimits::default());

        let record = apply(TransactionKind::Deposit, dec!(250.50), &mut account).unwrap();
        assert_eq!(record.kind(), TransactionKind::Deposit);
        assert_eq!(record.amount(), dec!(250.50));

        assert_eq!(account.balance(), dec!(250.50));
        assert_eq!(account.history().len(), 1);
    }
}
