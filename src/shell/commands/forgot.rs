//! Forgot-password command implementation.

use crate::api::ApiError;
use crate::shell::command::{Command, CommandGroup, CommandResult, ShellContext};

/// Command to request a password-reset code by email.
pub struct ForgotCommand;

impl Command for ForgotCommand {
    fn name(&self) -> &str {
        "forgot"
    }

    fn aliases(&self) -> &[&str] {
        &["reset"]
    }

    fn description(&self) -> &str {
        "Email a one-time password reset code"
    }

    fn usage(&self) -> &str {
        "forgot <email>"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Account
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let email = args[0];
        match ctx.client.forgot_password(email) {
            Ok(()) => {
                log::info!("Reset code requested for {}", email);
                CommandResult::success(format!("A reset code was sent to {}.", email))
            }
            Err(ApiError::InvalidEmail) => {
                CommandResult::error(format!("No account is registered for {}.", email))
            }
            Err(e) => CommandResult::error(e.to_string()),
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
