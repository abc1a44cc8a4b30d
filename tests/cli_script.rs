use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn script(home: &TempDir, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("bank_core_cli")
        .unwrap()
        .env("BANK_CORE_CLI_SCRIPT", "1")
        .env("BANK_CORE_HOME", home.path())
        .env("NO_COLOR", "1")
        .write_stdin(input)
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = TempDir::new().unwrap();
    let input = "new-client 111 \"Ana Souza\" 17-05-1990 \"Rua A, 10\"\n\
                 new-account 111\n\
                 deposit 111 1000\n\
                 withdraw 111 200\n\
                 statement 111\n\
                 list-accounts\n\
                 quit\n";

    script(&home, input)
        .success()
        .stdout(contains("Client `Ana Souza` registered."))
        .stdout(contains("Account 1 created."))
        .stdout(contains("Deposit: R$ 1000.00 at"))
        .stdout(contains("Withdrawal: R$ 200.00 at"))
        .stdout(contains("Balance: R$ 800.00"))
        .stdout(contains("Holder:  Ana Souza"));
}

#[test]
fn rejected_operations_do_not_stop_the_script() {
    let home = TempDir::new().unwrap();
    let input = "new-client 111 Ana 17-05-1990 Street\n\
                 new-client 111 Bia 01-01-2000 Avenue\n\
                 deposit 111 50\n\
                 new-account 111\n\
                 withdraw 111 10\n\
                 deposit 111 abc\n\
                 statement 111\n";

    script(&home, input)
        .success()
        .stdout(contains("A client with tax id `111` is already registered."))
        .stdout(contains("client 111 has no accounts"))
        .stdout(contains("Insufficient funds."))
        .stdout(contains("invalid amount `abc`"))
        .stdout(contains("Balance: R$ 0.00"));
}

#[test]
fn quit_stops_processing() {
    let home = TempDir::new().unwrap();
    script(&home, "quit\nnew-client 111 Ana 17-05-1990 Street\n")
        .success()
        .stdout(contains("registered").not());
}

#[test]
fn configured_limits_apply_to_new_accounts() {
    let home = TempDir::new().unwrap();
    script(&home, "config set max_withdrawals 1\n").success();

    let input = "new-client 111 Ana 17-05-1990 Street\n\
                 new-account 111\n\
                 deposit 111 100\n\
                 withdraw 111 10\n\
                 withdraw 111 10\n";
    script(&home, input)
        .success()
        .stdout(contains("Withdrawal limit for the period reached."));
}

#[test]
fn deposit_overflow_is_reported_not_fatal() {
    let home = TempDir::new().unwrap();
    let input = "new-client 111 Ana 17-05-1990 Street\n\
                 new-account 111\n\
                 deposit 111 79228162514264337593543950335\n\
                 deposit 111 1\n\
                 withdraw 111 5\n";

    script(&home, input)
        .success()
        .stdout(contains("Amount would overflow the account balance."))
        .stdout(contains("Withdrawal of R$ 5.00 completed."));
}
