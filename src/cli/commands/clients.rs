use crate::cli::core::{parse_birth_date, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::errors::BankError;

use super::CommandDefinition;

const NEW_CLIENT_USAGE: &str = "new-client <tax-id> <name> <birth-date> <address>";
const NEW_ACCOUNT_USAGE: &str = "new-account <tax-id>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "new-client",
            "Register a new client",
            NEW_CLIENT_USAGE,
            cmd_new_client,
        )
        .with_aliases(&["nu"]),
        CommandDefinition::new(
            "new-account",
            "Open a checking account for a client",
            NEW_ACCOUNT_USAGE,
            cmd_new_account,
        )
        .with_aliases(&["nc"]),
        CommandDefinition::new(
            "list-accounts",
            "List every account",
            "list-accounts",
            cmd_list_accounts,
        )
        .with_aliases(&["lc"]),
        CommandDefinition::new(
            "list-clients",
            "List every registered client",
            "list-clients",
            cmd_list_clients,
        ),
    ]
}

fn cmd_new_client(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tax_id = context.arg_or_prompt(args, 0, "Tax id", NEW_CLIENT_USAGE)?;
    // Reject a known tax id before collecting the remaining fields.
    if context.bank.client(&tax_id).is_ok() {
        return Err(BankError::DuplicateClient(tax_id).into());
    }
    let name = context.arg_or_prompt(args, 1, "Name", NEW_CLIENT_USAGE)?;
    let birth_date = parse_birth_date(&context.arg_or_prompt(
        args,
        2,
        "Birth date (dd-mm-yyyy)",
        NEW_CLIENT_USAGE,
    )?)?;
    let address = context.arg_or_prompt(
        args,
        3,
        "Address (street, number - district - city/state)",
        NEW_CLIENT_USAGE,
    )?;

    context
        .bank
        .register_client(&tax_id, &name, birth_date, &address)?;
    io::print_success(format!("Client `{}` registered.", name));
    Ok(())
}

fn cmd_new_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let tax_id = context.arg_or_prompt(args, 0, "Client tax id", NEW_ACCOUNT_USAGE)?;
    let limits = context.config.checking_limits();
    let number = context.bank.open_checking_account(&tax_id, limits)?;
    io::print_success(format!("Account {} created.", number));
    Ok(())
}

fn cmd_list_accounts(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let rows = context.bank.accounts();
    if rows.is_empty() {
        io::print_info("No accounts registered.");
        return Ok(());
    }
    for row in rows {
        output::separator();
        output::plain(format!("Agency:  {}", row.agency));
        output::plain(format!("Account: {} ({})", row.number, row.kind));
        output::plain(format!("Holder:  {}", row.holder));
    }
    Ok(())
}

fn cmd_list_clients(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let clients = context.bank.clients();
    if clients.is_empty() {
        io::print_info("No clients registered.");
        return Ok(());
    }
    for client in clients {
        output::separator();
        output::plain(format!("Name:       {}", client.name()));
        output::plain(format!("Tax id:     {}", client.tax_id()));
        output::plain(format!(
            "Birth date: {}",
            client.birth_date().format("%d-%m-%Y")
        ));
        output::plain(format!("Address:    {}", client.address()));
        output::plain(format!("Accounts:   {}", client.accounts().len()));
    }
    Ok(())
}
