use std::fmt::{self, Write as _};

use rust_decimal::Decimal;

use super::account::{Account, AccountNumber};
use super::record::TransactionRecord;

/// Snapshot of one account's history and balance, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub agency: &'static str,
    pub number: AccountNumber,
    pub holder: String,
    pub records: Vec<TransactionRecord>,
    pub balance: Decimal,
}

/// Presentation options for [`Statement::render`].
#[derive(Debug, Clone)]
pub struct StatementFormat<'a> {
    pub currency_symbol: &'a str,
    pub timestamp_format: &'a str,
}

impl Statement {
    pub fn for_account(account: &Account, holder: impl Into<String>) -> Self {
        Self {
            agency: account.agency(),
            number: account.number(),
            holder: holder.into(),
            records: account.history().records().to_vec(),
            balance: account.balance(),
        }
    }

    /// Fails when `timestamp_format` holds a specifier chrono cannot render.
    pub fn render(&self, format: &StatementFormat<'_>) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(
            out,
            "Agency {} / Account {} ({})",
            self.agency, self.number, self.holder
        )?;
        if self.records.is_empty() {
            out.push_str("No transactions recorded.\n");
        }
        for record in &self.records {
            writeln!(
                out,
                "{}: {} at {}",
                record.kind(),
                format_money(format.currency_symbol, record.amount()),
                record.timestamp().format(format.timestamp_format)
            )?;
        }
        write!(
            out,
            "\nBalance: {}",
            format_money(format.currency_symbol, self.balance)
        )?;
        Ok(out)
    }
}

/// Formats an amount with two decimal places after the currency symbol.
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{} {:.2}", symbol, amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::account::CheckingLimits;
    use crate::bank::client::ClientId;
    use crate::bank::transaction::Transaction;
    use rust_decimal_macros::dec;

    const FORMAT: StatementFormat<'static> = StatementFormat {
        currency_symbol: "R$",
        timestamp_format: "%d-%m-%Y %H:%M:%S",
    };

    #[test]
    fn renders_records_then_balance() {
        let mut account = Account::checking(3, ClientId::new(), CheckingLimits::default());
        Transaction::deposit(dec!(1000)).apply(&mut account).unwrap();
        Transaction::withdrawal(dec!(200.5))
            .apply(&mut account)
            .unwrap();

        let text = Statement::for_account(&account, "Ana").render(&FORMAT).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Agency 0001 / Account 3 (Ana)");
        assert!(lines[1].starts_with("Deposit: R$ 1000.00 at "));
        assert!(lines[2].starts_with("Withdrawal: R$ 200.50 at "));
        assert_eq!(lines.last(), Some(&"Balance: R$ 799.50"));
    }

    #[test]
    fn empty_statement_says_so() {
        let account = Account::checking(1, ClientId::new(), CheckingLimits::default());
        let text = Statement::for_account(&account, "Ana").render(&FORMAT).unwrap();
        assert!(text.contains("No transactions recorded."));
        assert!(text.ends_with("Balance: R$ 0.00"));
    }

    #[test]
    fn unknown_timestamp_specifier_fails_to_render() {
        let mut account = Account::checking(1, ClientId::new(), CheckingLimits::default());
        Transaction::deposit(dec!(10)).apply(&mut account).unwrap();
        let format = StatementFormat {
            currency_symbol: "R$",
            timestamp_format: "%Q",
        };
        assert!(Statement::for_account(&account, "Ana").render(&format).is_err());
    }
}
