//! Add command implementation.

use crate::credentials::PasswordRecord;
use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};
use crate::strength::{StrengthLabel, classify, estimate_strength};

/// Command to store a new password.
pub struct AddCommand;

impl Command for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn aliases(&self) -> &[&str] {
        &["new"]
    }

    fn description(&self) -> &str {
        "Store a new password"
    }

    fn usage(&self) -> &str {
        "add <platform> <email> [password]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Store a password for a platform.\n\n\
         Arguments:\n  \
           <platform>  - Site or service name\n  \
           <email>     - Username or email used there\n  \
           [password]  - Omit to use the last generated password\n\n\
         Examples:\n  \
           generate 20\n  \
           add GitHub ada@example.com"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let user = match ctx.require_user() {
            Ok(u) => u,
            Err(e) => return e,
        };
        let (platform, email) = (args[0], args[1]);

        let (password, from_panel) = match args.get(2) {
            Some(p) => (p.to_string(), false),
            None => match ctx.state.panel.current() {
                Some(generated) => (generated.value.clone(), true),
                None => {
                    return CommandResult::error(
                        "No password given. Pass one or run 'generate' first.",
                    );
                }
            },
        };

        match ctx.client.add_password(&user, platform, email, &password) {
            Ok(id) => {
                if from_panel {
                    ctx.state.panel.reset();
                }
                ctx.state.vault.upsert(PasswordRecord {
                    id,
                    platform: platform.to_string(),
                    email: email.to_string(),
                    password: password.clone(),
                    created_at: None,
                });
                ctx.platform_index.insert(platform);
                log::info!("Added entry {} for '{}'", id, platform);

                let mut msg = format!("Saved '{}' (id {}).", platform, id);
                if classify(estimate_strength(&password)) == StrengthLabel::Weak {
                    msg.push_str("\nWarning: this password is weak.");
                }
                CommandResult::success(msg)
            }
            Err(e) => ctx.api_failure("add password", e),
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        match index {
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
