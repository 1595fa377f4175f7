//! Import command implementation.

use std::path::Path;

use crate::api::ApiError;
use crate::config::expand_home;
use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};

/// Command to upload passwords from a CSV file.
pub struct ImportCommand;

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

impl Command for ImportCommand {
    fn name(&self) -> &str {
        "import"
    }

    fn description(&self) -> &str {
        "Import passwords from a CSV file"
    }

    fn usage(&self) -> &str {
        "import <file.csv>"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Upload a CSV file of passwords. The server checks every row and\n\
         reports the ones it could not import.\n\n\
         Examples:\n  \
           import ~/Downloads/passwords.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let user = match ctx.require_user() {
            Ok(u) => u,
            Err(e) => return e,
        };

        let path = expand_home(args[0]);
        if !is_csv(&path) {
            return CommandResult::error("Please select a CSV file");
        }
        let csv_data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                return CommandResult::error(format!("Failed to read {}: {}", path.display(), e));
            }
        };

        match ctx.client.import_csv(&user, &csv_data) {
            Ok(imported) => {
                log::info!("Imported {} entries from {}", imported, path.display());
                ctx.refresh_vault(&user);
                CommandResult::success(format!("Imported {} passwords.", imported))
            }
            Err(ApiError::ImportFailed { message, errors }) => {
                let mut msg = message;
                for line in errors {
                    msg.push_str("\n  ");
                    msg.push_str(&line);
                }
                CommandResult::error(msg)
            }
            Err(e) => ctx.api_failure("import passwords", e),
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
