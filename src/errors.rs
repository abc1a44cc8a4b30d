use thiserror::Error;

/// Failures reported by banking operations. None of them are fatal; the
/// operation that produced one left every balance and history untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("Invalid amount.")]
    InvalidAmount,
    #[error("Amount would overflow the account balance.")]
    AmountOverflow,
    #[error("Insufficient funds.")]
    InsufficientFunds,
    #[error("Withdrawal limit for the period reached.")]
    DailyLimitReached,
    #[error("Amount exceeds the per-withdrawal limit.")]
    PerTransactionLimitExceeded,
    #[error("Client not found: {0}")]
    ClientNotFound(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("A client with tax id `{0}` is already registered.")]
    DuplicateClient(String),
}

/// Error type for configuration loading and saving.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}
