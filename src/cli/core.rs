//! Shell context, dispatch, and the argument helpers shared by commands.

use std::{fmt, io, str::FromStr};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rust_decimal::Decimal;
use strsim::levenshtein;

use crate::{
    bank::{AccountNumber, Bank},
    config::{Config, ConfigManager},
    errors::{BankError, ConfigError},
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub bank: Bank,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            bank: Bank::new(),
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn prompt(&self) -> String {
        "bank> ".to_string()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.all_names()
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let command = tokens[0].to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, &tokens[0], &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit the shell?", false)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::Bank(err) => {
                tracing::warn!(error = %err, command = ?self.last_command, "operation rejected");
                cli_io::print_error(err);
            }
            other => cli_io::print_error(other),
        }
    }

    /// Returns the positional argument at `index`, prompting for it in
    /// interactive mode. Script mode requires every argument inline.
    pub(crate) fn arg_or_prompt(
        &self,
        args: &[&str],
        index: usize,
        prompt: &str,
        usage: &str,
    ) -> Result<String, CommandError> {
        let value = match args.get(index) {
            Some(value) => value.to_string(),
            None if self.mode == CliMode::Interactive => {
                cli_io::prompt_text(&self.theme, prompt)?
            }
            None => return Err(CommandError::usage(usage)),
        };
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(CommandError::InvalidArguments(format!(
                "{} cannot be empty",
                prompt
            )));
        }
        Ok(value)
    }
}

/// Accepts `1000`, `1000.50`, and `1000,50`.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal, CommandError> {
    let normalized = input.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|_| {
        CommandError::InvalidArguments(format!("invalid amount `{}`", input.trim()))
    })
}

/// Accepts `dd-mm-yyyy` and `yyyy-mm-dd`.
pub(crate) fn parse_birth_date(input: &str) -> Result<NaiveDate, CommandError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .map_err(|_| {
            CommandError::InvalidArguments(format!(
                "invalid date `{}` (use DD-MM-YYYY)",
                input
            ))
        })
}

pub(crate) fn parse_account_number(input: &str) -> Result<AccountNumber, CommandError> {
    input.trim().parse::<AccountNumber>().map_err(|_| {
        CommandError::InvalidArguments(format!("account number must be numeric, got `{}`", input))
    })
}

/// Optional trailing account number.
pub(crate) fn optional_account(
    args: &[&str],
    index: usize,
) -> Result<Option<AccountNumber>, CommandError> {
    args.get(index)
        .map(|value| parse_account_number(value))
        .transpose()
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("could not render output: {0}")]
    Render(#[from] fmt::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {}", usage))
    }
}

/// Errors that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> (ShellContext, tempfile::TempDir) {
    let temp = tempfile::tempdir().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
    let mut context =
        ShellContext::with_config_manager(CliMode::Script, manager).expect("shell context");
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    (context, temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_line_handles_quotes() {
        let tokens = crate::cli::shell::parse_command_line(
            "new-client 111 \"Ana Souza\" 17-05-1990 \"Rua A, 10 - Centro\"",
        )
        .unwrap();
        assert_eq!(
            tokens,
            vec![
                "new-client",
                "111",
                "Ana Souza",
                "17-05-1990",
                "Rua A, 10 - Centro"
            ]
        );
    }

    #[test]
    fn amounts_accept_comma_decimals() {
        assert_eq!(parse_amount("1000").unwrap(), dec!(1000));
        assert_eq!(parse_amount("12,5").unwrap(), dec!(12.5));
        assert!(matches!(
            parse_amount("ten"),
            Err(CommandError::InvalidArguments(_))
        ));
    }

    #[test]
    fn birth_dates_accept_both_orders() {
        let expected = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
        assert_eq!(parse_birth_date("17-05-1990").unwrap(), expected);
        assert_eq!(parse_birth_date("1990-05-17").unwrap(), expected);
        assert!(parse_birth_date("31-02-1990").is_err());
    }

    #[test]
    fn script_runs_the_full_flow() {
        let (context, _home) = process_script(&[
            "new-client 111 Ana 17-05-1990 \"Rua A, 10\"",
            "new-account 111",
            "deposit 111 1000",
            "withdraw 111 200",
            "withdraw 111 600",
            "quit",
            "deposit 111 5000",
        ]);

        let statement = context.bank.statement("111", None).unwrap();
        assert_eq!(statement.balance, dec!(800));
        assert_eq!(statement.records.len(), 2);
        assert!(!context.running);
    }

    #[test]
    fn script_mode_requires_inline_arguments() {
        let (mut context, _home) =
            process_script(&["new-client 111 Ana 17-05-1990 Street", "new-account 111"]);
        let err = context.process_line("deposit 111").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn duplicate_client_is_reported_not_fatal() {
        let (mut context, _home) = process_script(&["new-client 111 Ana 17-05-1990 Street"]);
        let err = context
            .process_line("new-client 111 Bia 01-01-2000 Avenue")
            .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Bank(BankError::DuplicateClient(_))
        ));
        assert_eq!(context.bank.clients().len(), 1);
        assert_eq!(context.bank.clients()[0].name(), "Ana");
        assert!(context.running);
    }

    #[test]
    fn unknown_commands_keep_the_loop_running() {
        let (mut context, _home) = process_script(&[]);
        let control = context.process_line("depositt 111 10").unwrap();
        assert_eq!(control, LoopControl::Continue);
    }
}
