//! Show command implementation.

use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;
use crate::strength::estimate_strength;

/// Command to reveal one stored password.
pub struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn aliases(&self) -> &[&str] {
        &["get"]
    }

    fn description(&self) -> &str {
        "Reveal a stored password"
    }

    fn usage(&self) -> &str {
        "show <id|platform>"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Print one entry with its password, looked up by id or by\n\
         platform name (case-insensitive) in the last fetched list.\n\n\
         Examples:\n  \
           show 12\n  \
           get github"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Err(e) = ctx.require_user() {
            return e;
        }

        let record = match ctx.state.vault.resolve(args[0]) {
            Ok(r) => r,
            Err(e) => return CommandResult::error(e),
        };
        log::info!("Revealed entry {}", record.id);

        let mut output = format!(
            "Platform: {}\nEmail:    {}\nPassword: {}\nStrength: {}",
            record.platform,
            record.email,
            record.password,
            OutputHighlighter::strength(estimate_strength(&record.password))
        );
        if let Some(created) = &record.created_at {
            output.push_str(&format!("\nCreated:  {}", created));
        }
        CommandResult::success(output)
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        match index {
            0 => ArgKind::Entry,
            _ => ArgKind::Plain,
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
