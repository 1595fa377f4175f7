//! Inline hints: the rest of a command name, or the arguments still to type.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Hinter that provides command usage hints.
pub struct LockboxHinter {
    registry: Arc<CommandRegistry>,
}

impl LockboxHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn get_hint(&self, line: &str) -> Option<String> {
        let has_trailing_space = line.ends_with(char::is_whitespace);
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (&command, args) = parts.split_first()?;

        // Still typing the command: complete it if there is exactly one match.
        if args.is_empty() && !has_trailing_space {
            let completions = self.registry.completions(command);
            return match completions.as_slice() {
                [only] if only.len() > command.len() => {
                    only.get(command.len()..).map(str::to_string)
                }
                _ => None,
            };
        }

        let cmd = self.registry.get(command)?;
        let usage = cmd.usage().strip_prefix(cmd.name())?;
        let expected: Vec<&str> = usage.split_whitespace().collect();
        let remaining = expected.get(args.len()..)?;
        if remaining.is_empty() {
            return None;
        }

        let lead = if has_trailing_space { "" } else { " " };
        Some(format!("{}{}", lead, remaining.join(" ")))
    }
}

impl Hinter for LockboxHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        // Only hint if cursor is at end of line
        if pos < line.len() {
            return None;
        }

        self.get_hint(line)
    }
}
