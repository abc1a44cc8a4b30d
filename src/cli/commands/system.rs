use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::config::Config;
use crate::utils::build_info;

use super::CommandDefinition;

const CONFIG_USAGE: &str = "config [show | set <key> <value> | reset]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("config", "Show or change settings", CONFIG_USAGE, cmd_config),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("quit", "Exit the shell", "quit", cmd_quit)
            .with_aliases(&["exit", "q"]),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            output_section("Configuration");
            let config = &context.config;
            io::print_info(format!("  currency_symbol  : {}", config.currency_symbol));
            io::print_info(format!("  withdrawal_limit : {}", config.withdrawal_limit));
            io::print_info(format!("  max_withdrawals  : {}", config.max_withdrawals));
            io::print_info(format!("  timestamp_format : {}", config.timestamp_format));
            io::print_info(format!(
                "  file             : {}",
                context.config_manager.path().display()
            ));
            Ok(())
        }
        ["set", key, value] => {
            context.config.set(key, value)?;
            context.persist_config()?;
            io::print_success(format!("`{}` updated.", key));
            io::print_info("New limits apply to accounts opened from now on.");
            Ok(())
        }
        ["reset"] => {
            context.config = Config::default();
            context.persist_config()?;
            io::print_success("Configuration restored to defaults.");
            Ok(())
        }
        _ => Err(CommandError::usage(CONFIG_USAGE)),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Bank Core {}", meta.version));
    io::print_info(format!("  Build hash : {}", meta.git_hash));
    io::print_info(format!("  Built at   : {}", meta.timestamp));
    io::print_info(format!("  Target     : {}", meta.target));
    io::print_info(format!("  Profile    : {}", meta.profile));
    io::print_info(format!("  Rustc      : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_quit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use crate::cli::core::process_script;
    use crate::config::ConfigManager;
    use rust_decimal_macros::dec;

    #[test]
    fn config_set_persists_to_disk() {
        let (mut context, home) = process_script(&[]);
        context
            .process_line("config set withdrawal_limit 800")
            .unwrap();
        assert_eq!(context.config.withdrawal_limit, dec!(800));

        let reloaded = ConfigManager::with_base_dir(home.path().to_path_buf())
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(reloaded.withdrawal_limit, dec!(800));
    }

    #[test]
    fn config_rejects_malformed_invocations() {
        let (mut context, _home) = process_script(&[]);
        assert!(context.process_line("config set max_withdrawals").is_err());
        assert!(context.process_line("config set max_withdrawals lots").is_err());
        assert_eq!(context.config.max_withdrawals, 3);
    }

    #[test]
    fn config_rejects_unrenderable_timestamp_format() {
        let (mut context, home) = process_script(&[]);
        assert!(context
            .process_line("config set timestamp_format %Q")
            .is_err());
        assert_eq!(context.config.timestamp_format, "%d-%m-%Y %H:%M:%S");
        assert!(!home.path().join("config.json").exists());
    }
}
