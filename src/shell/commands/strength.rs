//! Strength command implementation.

use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};
use crate::shell::highlighter::OutputHighlighter;
use crate::strength::estimate_strength;

/// Command to score an arbitrary password.
pub struct StrengthCommand;

impl Command for StrengthCommand {
    fn name(&self) -> &str {
        "strength"
    }

    fn aliases(&self) -> &[&str] {
        &["check", "score"]
    }

    fn description(&self) -> &str {
        "Score a password"
    }

    fn usage(&self) -> &str {
        "strength <password>"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Generator
    }

    fn help(&self) -> &str {
        "Score a password from 0 to 100 and show its tier\n\
         (Weak, Fair, Good or Strong). The line is not saved to history.\n\n\
         Examples:\n  \
           strength correcthorsebatterystaple\n  \
           strength \"pass phrase with spaces\""
    }

    fn execute(&self, args: &[&str], _ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing password", self.usage()));
        }
        let password = args.join(" ");
        let score = estimate_strength(&password);
        CommandResult::success(format!("Strength: {}", OutputHighlighter::strength(score)))
    }

    fn arg_kind(&self, _index: usize) -> ArgKind {
        ArgKind::Secret
    }

    fn min_args(&self) -> usize {
        1
    }
}
