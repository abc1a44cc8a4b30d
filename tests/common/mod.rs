use bank_core::bank::{AccountNumber, Bank, CheckingLimits};
use chrono::NaiveDate;

pub const TAX_ID: &str = "111";

/// A bank with one client owning one default checking account.
pub fn bank_with_checking_account() -> (Bank, AccountNumber) {
    let mut bank = Bank::new();
    bank.register_client(
        TAX_ID,
        "Ana Souza",
        NaiveDate::from_ymd_opt(1990, 5, 17).expect("valid date"),
        "Rua A, 10 - Centro - Recife/PE",
    )
    .expect("register client");
    let number = bank
        .open_checking_account(TAX_ID, CheckingLimits::default())
        .expect("open account");
    (bank, number)
}
