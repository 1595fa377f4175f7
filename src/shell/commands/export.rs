//! Export command implementation.

use crate::config::expand_home;
use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};

/// Command to download all passwords as a file.
pub struct ExportCommand;

pub const DEFAULT_EXPORT_FILE: &str = "lockbox_export.csv";

impl Command for ExportCommand {
    fn name(&self) -> &str {
        "export"
    }

    fn description(&self) -> &str {
        "Download your passwords to a file"
    }

    fn usage(&self) -> &str {
        "export [path]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Vault
    }

    fn help(&self) -> &str {
        "Download every stored password to a file. The file holds the\n\
         passwords in clear text.\n\n\
         Arguments:\n  \
           [path] - Output file (default lockbox_export.csv)\n\n\
         Examples:\n  \
           export\n  \
           export ~/backup.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let user = match ctx.require_user() {
            Ok(u) => u,
            Err(e) => return e,
        };
        let path = expand_home(args.first().copied().unwrap_or(DEFAULT_EXPORT_FILE));

        let bytes = match ctx.client.export_csv(&user) {
            Ok(b) => b,
            Err(e) => return ctx.api_failure("export passwords", e),
        };

        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                log::info!("Exported {} bytes to {}", bytes.len(), path.display());
                CommandResult::success(format!("Exported to {}", path.display()))
            }
            Err(e) => CommandResult::error(format!("Failed to write {}: {}", path.display(), e)),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
