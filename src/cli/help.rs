use crate::cli::commands::{CommandDefinition, CommandRegistry};
use crate::cli::io;
use crate::cli::output::section as output_section;

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for entry in registry.iter() {
        let aliases = if entry.aliases.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.aliases.join(", "))
        };
        io::print_info(format!(
            "  {:<14} {}{}",
            entry.name, entry.description, aliases
        ));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandDefinition) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  Description: {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::print_info(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
    io::print_info("Missing arguments are prompted for in interactive mode.");
}
