use crate::bank::{format_money, AccountNumber, Transaction};
use crate::cli::core::{optional_account, parse_amount, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;

use super::CommandDefinition;

const DEPOSIT_USAGE: &str = "deposit <tax-id> <amount> [account]";
const WITHDRAW_USAGE: &str = "withdraw <tax-id> <amount> [account]";
const STATEMENT_USAGE: &str = "statement <tax-id> [account]";
const RESET_USAGE: &str = "reset-limits <tax-id> [account]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("deposit", "Deposit into an account", DEPOSIT_USAGE, cmd_deposit)
            .with_aliases(&["d"]),
        CommandDefinition::new(
            "withdraw",
            "Withdraw from an account",
            WITHDRAW_USAGE,
            cmd_withdraw,
        )
        .with_aliases(&["w", "s"]),
        CommandDefinition::new(
            "statement",
            "Show the transaction history and balance",
            STATEMENT_USAGE,
            cmd_statement,
        )
        .with_aliases(&["e"]),
        CommandDefinition::new(
            "reset-limits",
            "Start a new withdrawal period for an account",
            RESET_USAGE,
            cmd_reset_limits,
        ),
    ]
}

fn cmd_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tax_id = context.arg_or_prompt(args, 0, "Tax id", DEPOSIT_USAGE)?;
    let account = optional_account(args, 2)?;
    // Fail on an unknown client or account before asking for the amount.
    let account = context.bank.resolve_account(&tax_id, account)?;
    let amount = parse_amount(&context.arg_or_prompt(args, 1, "Deposit amount", DEPOSIT_USAGE)?)?;
    apply(context, &tax_id, account, Transaction::deposit(amount))
}

fn cmd_withdraw(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tax_id = context.arg_or_prompt(args, 0, "Tax id", WITHDRAW_USAGE)?;
    let account = optional_account(args, 2)?;
    let account = context.bank.resolve_account(&tax_id, account)?;
    let amount = parse_amount(&context.arg_or_prompt(
        args,
        1,
        "Withdrawal amount",
        WITHDRAW_USAGE,
    )?)?;
    apply(context, &tax_id, account, Transaction::withdrawal(amount))
}

fn apply(
    context: &mut ShellContext,
    tax_id: &str,
    account: AccountNumber,
    transaction: Transaction,
) -> CommandResult {
    let record = context.bank.transact(tax_id, Some(account), transaction)?;
    io::print_success(format!(
        "{} of {} completed.",
        record.kind(),
        format_money(&context.config.currency_symbol, record.amount())
    ));
    Ok(())
}

fn cmd_statement(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tax_id = context.arg_or_prompt(args, 0, "Tax id", STATEMENT_USAGE)?;
    let account = optional_account(args, 1)?;
    let statement = context.bank.statement(&tax_id, account)?;

    let text = statement.render(&context.config.statement_format())?;

    output::section("Statement");
    for line in text.lines() {
        output::plain(line);
    }
    output::separator();
    Ok(())
}

fn cmd_reset_limits(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tax_id = context.arg_or_prompt(args, 0, "Tax id", RESET_USAGE)?;
    let account = optional_account(args, 1)?;
    let number = context.bank.reset_period(&tax_id, account)?;
    io::print_success(format!("Withdrawal period restarted for account {}.", number));
    Ok(())
}
