//! Edit command implementation.

use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};

/// Command to change a stored entry.
pub struct EditCommand;

impl Command for EditCommand {
    fn name(&self) -> &str {
        "edit"
    }

    fn aliases(&self) -> &[&str] {
        &["update"]
    }

    fn description(&self) -> &str {
        "Rename an entry or change its password"
    }

    fn usage(&self) -> &str {
        "edit <id|platform> <platform> [password]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Change the platform name and password of an entry.\n\n\
         Without a password the last generated one is used; if there is\n\
         none, the current password is kept.\n\n\
         Examples:\n  \
           edit 12 GitHub\n  \
           generate 24\n  \
           update github GitHub"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let user = match ctx.require_user() {
            Ok(u) => u,
            Err(e) => return e,
        };

        let (id, current_password) = match ctx.state.vault.resolve(args[0]) {
            Ok(r) => (r.id, r.password.clone()),
            Err(e) => return CommandResult::error(e),
        };
        let platform = args[1];

        let (password, from_panel) = match args.get(2) {
            Some(p) => (p.to_string(), false),
            None => match ctx.state.panel.current() {
                Some(generated) => (generated.value.clone(), true),
                None => (current_password, false),
            },
        };

        match ctx.client.update_password(id, platform, &password) {
            Ok(()) => {
                if from_panel {
                    ctx.state.panel.reset();
                }
                ctx.state.vault.update(id, platform, &password);
                ctx.refresh_vault(&user);
                log::info!("Updated entry {}", id);
                CommandResult::success(format!("Updated entry {}.", id))
            }
            Err(e) => ctx.api_failure("update password", e),
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        match index {
            0 => ArgKind::Entry,
            2 => ArgKind::Secret,
            _ => ArgKind::Plain,
        }
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}
