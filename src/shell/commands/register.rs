//! Register command implementation.

use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};
use crate::strength::{StrengthLabel, classify, estimate_strength};

/// Command to create an account.
pub struct RegisterCommand;

impl Command for RegisterCommand {
    fn name(&self) -> &str {
        "register"
    }

    fn aliases(&self) -> &[&str] {
        &["signup"]
    }

    fn description(&self) -> &str {
        "Create a new account"
    }

    fn usage(&self) -> &str {
        "register <name> <email> <mobile> [password]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Account
    }

    fn help(&self) -> &str {
        "Create a new account. You are prompted for the master password\n\
         twice unless it is given on the command line.\n\n\
         Examples:\n  \
           register Ada ada@example.com 5550100"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let (name, email, mobile) = (args[0], args[1], args[2]);

        let password = match args.get(3) {
            Some(p) => p.to_string(),
            None => {
                let first = match ctx.secret_or_prompt(None, "Master password: ") {
                    Ok(p) => p,
                    Err(e) => return e,
                };
                let second = match ctx.secret_or_prompt(None, "Repeat password: ") {
                    Ok(p) => p,
                    Err(e) => return e,
                };
                if first != second {
                    return CommandResult::error("Passwords do not match");
                }
                first
            }
        };

        if classify(estimate_strength(&password)) == StrengthLabel::Weak {
            log::warn!("Registering with a weak master password");
        }

        match ctx.client.register(name, email, mobile, &password) {
            Ok(message) => {
                log::info!("Registration for {} answered: {}", email, message);
                CommandResult::success(format!("{}\nUse 'login {}' to sign in.", message, email))
            }
            Err(e) => ctx.api_failure("register", e),
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        match index {
            3 => ArgKind::Secret,
            _ => ArgKind::Plain,
        }
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::Fixture;
    use serde_json::json;

    #[test]
    fn test_register_sends_fields_and_shows_message() {
        let mut fx = Fixture::new(vec![json!({"code": 3, "message": "User registered successfully"})]);
        let result = fx.run(&RegisterCommand, &["Ada", "ada@example.com", "5550100", "Str0ng!pass"]);

        match result {
            CommandResult::Success(Some(msg)) => {
                assert!(msg.starts_with("User registered successfully"));
                assert!(msg.contains("login ada@example.com"));
            }
            other => panic!("Expected success, got {:?}", other),
        }
        let request = &fx.requests()[0];
        assert_eq!(request["add_user"], true);
        assert_eq!(request["mobile"], "5550100");
        assert_eq!(request["password"], "Str0ng!pass");
        assert!(!fx.state.session.is_authenticated());
    }

    #[test]
    fn test_register_prompt_mismatch() {
        let mut fx = Fixture::new(vec![]);
        fx.answer("one");
        fx.answer("two");
        let result = fx.run(&RegisterCommand, &["Ada", "ada@example.com", "5550100"]);

        assert!(matches!(result, CommandResult::Error(_)));
        assert!(fx.requests().is_empty());
    }

    #[test]
    fn test_register_shows_refusal_message() {
        let mut fx = Fixture::new(vec![json!({"code": 5, "message": "Email already registered"})]);
        let result = fx.run(&RegisterCommand, &["Ada", "ada@example.com", "5550100", "pw"]);
        match result {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("Email already registered")),
            other => panic!("Expected the backend message, got {:?}", other),
        }
    }

    #[test]
    fn test_register_transport_failure_is_error() {
        let mut fx = Fixture::new(vec![]);
        let result = fx.run(&RegisterCommand, &["Ada", "ada@example.com", "5550100", "pw"]);
        match result {
            CommandResult::Error(msg) => assert!(msg.starts_with("Failed to register")),
            other => panic!("Expected error, got {:?}", other),
        }
    }
}
