//! List command implementation.

use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};

/// Command to fetch and list stored passwords.
pub struct ListCommand;

/// Hides a password while keeping a hint of its length.
pub(crate) fn mask(password: &str) -> String {
    "*".repeat(password.chars().count().clamp(4, 12))
}

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn aliases(&self) -> &[&str] {
        &["ls", "l"]
    }

    fn description(&self) -> &str {
        "List stored passwords"
    }

    fn usage(&self) -> &str {
        "list [query]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Fetch your passwords from the server and list them.\n\n\
         Passwords are masked; use 'show' to reveal one. A query keeps\n\
         only entries whose platform or email contains it.\n\n\
         Examples:\n  \
           list\n  \
           ls git"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let user = match ctx.require_user() {
            Ok(u) => u,
            Err(e) => return e,
        };

        match ctx.client.list_passwords(&user) {
            Ok(records) => {
                ctx.state.vault.replace_all(records);
                ctx.reindex();
            }
            Err(e) => return ctx.api_failure("list passwords", e),
        }

        let query = args.first().copied().unwrap_or("");
        let mut rows = ctx.state.vault.search(query);
        if rows.is_empty() {
            return CommandResult::success(if query.is_empty() {
                "No passwords stored.".to_string()
            } else {
                format!("No entries match '{}'.", query)
            });
        }
        rows.sort_by_key(|r| r.platform.to_lowercase());

        let mut output = format!("{:<6}{:<20}{:<28}{}\n", "ID", "PLATFORM", "EMAIL", "PASSWORD");
        for record in &rows {
            output.push_str(&format!(
                "{:<6}{:<20}{:<28}{}\n",
                record.id,
                record.platform,
                record.email,
                mask(&record.password)
            ));
        }
        output.pop();

        log::info!("Listed {} entries", rows.len());
        CommandResult::success(output)
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
