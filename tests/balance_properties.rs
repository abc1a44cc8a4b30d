use bank_core::bank::{
    Account, AccountKind, CheckingLimits, ClientId, Transaction, TransactionKind,
};
use bank_core::errors::BankError;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn amount() -> impl Strategy<Value = Decimal> {
    // Cents between -50.00 and 1500.00 so invalid, over-limit, and
    // over-balance requests all show up.
    (-5_000i64..150_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn transaction() -> impl Strategy<Value = Transaction> {
    (any::<bool>(), amount()).prop_map(|(is_deposit, amount)| {
        if is_deposit {
            Transaction::deposit(amount)
        } else {
            Transaction::withdrawal(amount)
        }
    })
}

fn account_kind() -> impl Strategy<Value = AccountKind> {
    prop_oneof![
        Just(AccountKind::Basic),
        (1i64..1_000, 0u32..5).prop_map(|(limit, max)| AccountKind::checking(CheckingLimits {
            per_withdrawal: Decimal::from(limit),
            max_withdrawals: max,
        })),
    ]
}

proptest! {
    #[test]
    fn balance_never_goes_negative(
        kind in account_kind(),
        transactions in prop::collection::vec(transaction(), 0..64),
    ) {
        let mut account = Account::new(1, ClientId::new(), kind);
        let mut expected_balance = Decimal::ZERO;

        for transaction in transactions {
            let before = account.history().len();
            match transaction.apply(&mut account) {
                Ok(record) => {
                    prop_assert_eq!(record.amount(), transaction.amount);
                    match transaction.kind {
                        TransactionKind::Deposit => expected_balance += transaction.amount,
                        TransactionKind::Withdrawal => expected_balance -= transaction.amount,
                    }
                    prop_assert_eq!(account.history().len(), before + 1);
                }
                Err(_) => {
                    prop_assert_eq!(account.history().len(), before);
                }
            }
            prop_assert!(account.balance() >= Decimal::ZERO);
            prop_assert_eq!(account.balance(), expected_balance);
        }
    }

    #[test]
    fn withdrawals_beyond_the_cap_always_fail(
        max in 0u32..5,
        amounts in prop::collection::vec(1i64..100, 6..12),
    ) {
        let limits = CheckingLimits {
            per_withdrawal: Decimal::from(100),
            max_withdrawals: max,
        };
        let mut account = Account::checking(1, ClientId::new(), limits);
        Transaction::deposit(Decimal::from(10_000)).apply(&mut account).unwrap();

        for (index, amount) in amounts.into_iter().enumerate() {
            let result = Transaction::withdrawal(Decimal::from(amount)).apply(&mut account);
            if (index as u32) < max {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result.unwrap_err(), BankError::DailyLimitReached);
            }
        }
    }
}
