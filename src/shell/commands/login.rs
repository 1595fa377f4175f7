//! Login command implementation.

use crate::shell::command::{ArgKind, Command, CommandGroup, CommandResult, ShellContext};

/// Command to sign in.
pub struct LoginCommand;

impl Command for LoginCommand {
    fn name(&self) -> &str {
        "login"
    }

    fn description(&self) -> &str {
        "Sign in to your account"
    }

    fn usage(&self) -> &str {
        "login <email> [password]"
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Account
    }

    fn help(&self) -> &str {
        "Sign in with your email and master password.\n\n\
         If the password is omitted you are prompted for it; typing it\n\
         on the command line keeps the line out of history.\n\n\
         Examples:\n  \
           login ada@example.com"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let email = args[0];
        let password = match ctx.secret_or_prompt(args.get(1).copied(), "Password: ") {
            Ok(p) => p,
            Err(e) => return e,
        };

        match ctx.client.login(email, &password) {
            Ok(user) => {
                let msg = format!("Welcome, {}!", user.name);
                ctx.begin_session(user.clone());
                ctx.refresh_vault(&user);
                CommandResult::success(msg)
            }
            Err(e) => {
                log::warn!("Login failed for {}: {}", email, e);
                CommandResult::error(format!("Login failed: {}", e))
            }
        }
    }

    fn arg_kind(&self, index: usize) -> ArgKind {
        match index {
            1 => ArgKind::Secret,
            _ => ArgKind::Plain,
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::Fixture;
    use serde_json::json;

    fn login_ok() -> serde_json::Value {
        json!({"code": 1, "data": {"id": "5", "email": "ada@example.com", "name": "Ada"}})
    }

    #[test]
    fn test_login_establishes_session_and_loads_vault() {
        let mut fx = Fixture::new(vec![
            login_ok(),
            json!({"code": 130, "data": [
                {"id": 1, "name": "GitHub", "email": "ada", "password": "x"}
            ]}),
        ]);
        let result = fx.run(&LoginCommand, &["ada@example.com", "pw"]);

        match result {
            CommandResult::Success(Some(msg)) => assert!(msg.contains("Welcome, Ada")),
            other => panic!("Expected welcome, got {:?}", other),
        }
        assert!(fx.session_changed);
        assert_eq!(fx.state.session.user().unwrap().id, 5);
        assert_eq!(fx.state.vault.len(), 1);
        assert!(fx.index.contains("github"));
    }

    #[test]
    fn test_login_prompts_for_password() {
        let mut fx = Fixture::new(vec![login_ok(), json!({"code": 130, "data": null})]);
        fx.answer("pw");
        let result = fx.run(&LoginCommand, &["ada@example.com"]);

        assert!(matches!(result, CommandResult::Success(_)));
        assert_eq!(fx.prompt.asked.borrow().len(), 1);
        assert_eq!(fx.requests()[0]["password"], "pw");
    }

    #[test]
    fn test_login_rejected_keeps_signed_out() {
        let mut fx = Fixture::new(vec![json!({"code": 3, "message": "Invalid credentials"})]);
        let result = fx.run(&LoginCommand, &["ada@example.com", "bad"]);

        assert!(matches!(result, CommandResult::Error(_)));
        assert!(!fx.state.session.is_authenticated());
        assert!(!fx.session_changed);
    }
}
