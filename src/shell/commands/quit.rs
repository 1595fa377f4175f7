//! Quit command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to exit the shell.
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "q"]
    }

    fn description(&self) -> &str {
        "Exit LockBox"
    }

    fn usage(&self) -> &str {
        "quit"
    }

    fn help(&self) -> &str {
        "Exit the shell. You stay signed in until you run 'logout'.\n\n\
         Examples:\n  \
           quit\n  \
           q"
    }

    fn execute(&self, _args: &[&str], _ctx: &mut ShellContext) -> CommandResult {
        log::info!("User requested exit");
        CommandResult::Exit
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::Fixture;

    #[test]
    fn test_quit_command() {
        let mut fx = Fixture::signed_in(vec![]);
        assert!(matches!(fx.run(&QuitCommand, &[]), CommandResult::Exit));
        assert!(fx.state.session.is_authenticated());
    }

    #[test]
    fn test_quit_rejects_arguments() {
        let mut fx = Fixture::new(vec![]);
        assert!(matches!(fx.dispatch("exit", &["now"]), CommandResult::Error(_)));
    }
}
