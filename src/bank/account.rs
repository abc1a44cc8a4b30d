use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::BankError;

use super::client::ClientId;
use super::history::History;

/// Agency code shared by every account of the bank.
pub const AGENCY_CODE: &str = "0001";

pub type AccountNumber = u32;

/// Withdrawal ceilings applied by checking accounts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckingLimits {
    pub per_withdrawal: Decimal,
    pub max_withdrawals: u32,
}

impl Default for CheckingLimits {
    fn default() -> Self {
        Self {
            per_withdrawal: Decimal::from(500),
            max_withdrawals: 3,
        }
    }
}

/// Selects the withdrawal rules an account follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// Only the balance is checked.
    Basic,
    Checking {
        limits: CheckingLimits,
        withdrawals_used: u32,
    },
}

impl AccountKind {
    pub fn checking(limits: CheckingLimits) -> Self {
        AccountKind::Checking {
            limits,
            withdrawals_used: 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Basic => "Basic",
            AccountKind::Checking { .. } => "Checking",
        }
    }
}

/// A balance plus the history of operations applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    number: AccountNumber,
    owner: ClientId,
    balance: Decimal,
    history: History,
    kind: AccountKind,
}

impl Account {
    pub fn new(number: AccountNumber, owner: ClientId, kind: AccountKind) -> Self {
        Self {
            number,
            owner,
            balance: Decimal::ZERO,
            history: History::new(),
            kind,
        }
    }

    pub fn checking(number: AccountNumber, owner: ClientId, limits: CheckingLimits) -> Self {
        Self::new(number, owner, AccountKind::checking(limits))
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn agency(&self) -> &'static str {
        AGENCY_CODE
    }

    pub fn owner(&self) -> ClientId {
        self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Withdrawals counted against the current period, `None` for accounts
    /// without a withdrawal cap.
    pub fn withdrawals_used(&self) -> Option<u32> {
        match self.kind {
            AccountKind::Basic => None,
            AccountKind::Checking {
                withdrawals_used, ..
            } => Some(withdrawals_used),
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::AmountOverflow)?;
        tracing::debug!(account = self.number, %amount, balance = %self.balance, "deposit applied");
        Ok(())
    }

    /// Checking limits are evaluated before the balance so that a rejected
    /// request never touches the balance or the counter.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), BankError> {
        if let AccountKind::Checking {
            limits,
            withdrawals_used,
        } = &self.kind
        {
            if *withdrawals_used >= limits.max_withdrawals {
                return Err(BankError::DailyLimitReached);
            }
            if amount > limits.per_withdrawal {
                return Err(BankError::PerTransactionLimitExceeded);
            }
        }

        self.withdraw_from_balance(amount)?;

        if let AccountKind::Checking {
            withdrawals_used, ..
        } = &mut self.kind
        {
            *withdrawals_used += 1;
        }
        tracing::debug!(account = self.number, %amount, balance = %self.balance, "withdrawal applied");
        Ok(())
    }

    fn withdraw_from_balance(&mut self, amount: Decimal) -> Result<(), BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(BankError::InsufficientFunds);
        }
        self.balance -= amount;
        Ok(())
    }

    /// Starts a new withdrawal period. Nothing calls this on a schedule; the
    /// caller decides what a period is.
    pub fn reset_period(&mut self) {
        if let AccountKind::Checking {
            withdrawals_used, ..
        } = &mut self.kind
        {
            *withdrawals_used = 0;
        }
    }
}
