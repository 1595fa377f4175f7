//! Suggest command implementation.

use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;

/// Command to ask the server for a generated password.
pub struct SuggestCommand;

impl Command for SuggestCommand {
    fn name(&self) -> &str {
        "suggest"
    }

    fn description(&self) -> &str {
        "Get a generated password from the server"
    }

    fn usage(&self) -> &str {
        "suggest"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Generator
    }

    fn help(&self) -> &str {
        "Ask the server to generate a strong password. The suggestion\n\
         replaces the current generated password, so 'add' and 'edit'\n\
         can use it.\n\n\
         Examples:\n  \
           suggest"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Err(e) = ctx.require_user() {
            return e;
        }

        match ctx.client.suggest_password() {
            Ok(suggestion) => {
                let msg = format!(
                    "{}\nStrength: {}",
                    suggestion.value,
                    OutputHighlighter::strength(suggestion.strength)
                );
                ctx.state.panel.show(suggestion);
                CommandResult::success(msg)
            }
            Err(e) => ctx.api_failure("generate password", e),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
