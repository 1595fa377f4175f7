//! Delete command implementation.

use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};

/// Command to delete a stored entry.
pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn name(&self) -> &str {
        "delete"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "del"]
    }

    fn description(&self) -> &str {
        "Delete a stored password"
    }

    fn usage(&self) -> &str {
        "delete <id|platform>"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Delete an entry on the server.\n\n\
         Examples:\n  \
           delete 12\n  \
           rm github"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if let Err(e) = ctx.require_user() {
            return e;
        }

        let (id, platform) = match ctx.state.vault.resolve(args[0]) {
            Ok(r) => (r.id, r.platform.clone()),
            Err(e) => return CommandResult::error(e),
        };

        match ctx.client.delete_password(id) {
            Ok(()) => {
                ctx.state.vault.remove(id);
                ctx.reindex();
                log::info!("Deleted entry {}", id);
                CommandResult::success(format!("Deleted '{}' (id {}).", platform, id))
            }
            Err(e) => ctx.api_failure("delete password", e),
        }
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
