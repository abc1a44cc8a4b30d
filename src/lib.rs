#![doc(test(attr(deny(warnings))))]

//! Bank Core models clients, their accounts, and the deposits and
//! withdrawals applied to them, together with the interactive shell that
//! drives the model.

pub mod bank;
pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Bank Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
