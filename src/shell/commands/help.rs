//! Help command implementation.

use std::fmt::Write as _;
use std::sync::Arc;

use crate::shell::command::{
    ArgKind, Command, CommandGroup, CommandRegistry, CommandResult, ShellContext,
};

/// Command to display help information.
pub struct HelpCommand;

fn overview(registry: &CommandRegistry) -> String {
    let mut commands: Vec<&Arc<dyn Command>> = registry.commands().collect();
    commands.sort_by(|a, b| a.group().cmp(&b.group()).then_with(|| a.name().cmp(b.name())));

    let mut out = String::new();
    for group in CommandGroup::ALL {
        let members: Vec<_> = commands.iter().filter(|c| c.group() == group).collect();
        if members.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}:", group.title());
        for cmd in members {
            let _ = writeln!(out, "  {:<34} {}", cmd.usage(), cmd.description());
        }
        out.push('\n');
    }
    out.push_str("Type 'help <command>' for details and aliases.");
    out
}

fn detail(cmd: &dyn Command) -> String {
    let mut out = format!("{}\n\nUsage: {}", cmd.name().to_uppercase(), cmd.usage());
    if !cmd.aliases().is_empty() {
        let _ = write!(out, "\nAliases: {}", cmd.aliases().join(", "));
    }
    let _ = write!(out, "\n\n{}", cmd.help());
    out
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["h", "?"]
    }

    fn description(&self) -> &str {
        "Show commands, or details for one command"
    }

    fn usage(&self) -> &str {
        "help [command]"
    }

    fn help(&self) -> &str {
        "Without arguments, lists the commands by section.\n\
         With a command name or alias, shows its usage and aliases.\n\n\
         Examples:\n  \
           help\n  \
           ? gen"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(registry) = ctx.registry else {
            return CommandResult::error("Help not available (no registry)");
        };

        match args.first() {
            None => CommandResult::success(overview(registry)),
            Some(&name) => match registry.get(name) {
                Some(cmd) => CommandResult::success(detail(cmd.as_ref())),
                None => CommandResult::error(format!(
                    "Unknown command: '{}'\nType 'help' to see available commands.",
                    name
                )),
            },
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        match index {
            0 => ArgKind::Command,
            _ => ArgKind::Plain,
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
