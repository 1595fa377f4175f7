//! Logout command implementation.

use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};

/// Command to sign out.
pub struct LogoutCommand;

impl Command for LogoutCommand {
    fn name(&self) -> &str {
        "logout"
    }

    fn description(&self) -> &str {
        "Sign out and forget the stored session"
    }

    fn usage(&self) -> &str {
        "logout"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Account
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if !ctx.state.session.is_authenticated() {
            return CommandResult::success("Not logged in.");
        }

        // The local session goes away even if the backend cannot be reached.
        if let Err(e) = ctx.client.logout() {
            log::warn!("Backend logout failed: {}", e);
        }
        ctx.end_session();
        CommandResult::success("Logged out.")
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
