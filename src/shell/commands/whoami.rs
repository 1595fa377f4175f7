//! Whoami command implementation.

use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};

/// Command to show who is signed in, after checking with the backend.
pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &str {
        "whoami"
    }

    fn aliases(&self) -> &[&str] {
        &["status"]
    }

    fn description(&self) -> &str {
        "Show the signed-in account"
    }

    fn usage(&self) -> &str {
        "whoami"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Account
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let before = ctx.state.session.user().cloned();
        ctx.state.session.revalidate(ctx.client);
        let after = ctx.state.session.user().cloned();

        if before != after {
            ctx.session_changed = true;
            if after.is_none() {
                ctx.end_session();
            }
        }

        match after {
            Some(user) => CommandResult::success(format!("{} <{}> (id {})", user.name, user.email, user.id)),
            None => CommandResult::success("Not logged in."),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
