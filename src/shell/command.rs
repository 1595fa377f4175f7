//! Command trait, registry and execution context for the shell.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::credentials::Vault;
use crate::generator::GeneratorPanel;
use crate::session::{Session, User};
use crate::trie::Trie;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
    /// Continue without output.
    Continue,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }
}

/// What an argument position holds. Drives completion, highlighting and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Plain,
    /// A password; masked on screen and never written to history.
    Secret,
    /// A stored entry, by id or platform name.
    Entry,
    /// Another command's name.
    Command,
}

/// Section a command is listed under in `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandGroup {
    Generator,
    Account,
    Vault,
    Shell,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 4] = [
        CommandGroup::Generator,
        CommandGroup::Account,
        CommandGroup::Vault,
        CommandGroup::Shell,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Generator => "Passwords",
            CommandGroup::Account => "Account",
            CommandGroup::Vault => "Vault (login required)",
            CommandGroup::Shell => "Shell",
        }
    }
}

/// Reads a secret without echoing it.
pub trait SecretPrompt {
    fn read_secret(&self, label: &str) -> io::Result<String>;
}

pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn read_secret(&self, label: &str) -> io::Result<String> {
        rpassword::prompt_password(label)
    }
}

static TERMINAL_PROMPT: TerminalPrompt = TerminalPrompt;

/// Everything the shell keeps between commands.
#[derive(Debug)]
pub struct ShellState {
    pub session: Session,
    pub vault: Vault,
    pub panel: GeneratorPanel,
}

impl ShellState {
    pub fn new(session: Session, panel: GeneratorPanel) -> Self {
        Self {
            session,
            vault: Vault::new(),
            panel,
        }
    }
}

/// Context available to commands during execution.
pub struct ShellContext<'a> {
    pub client: &'a ApiClient,
    pub state: &'a mut ShellState,
    /// Platform names offered by completion; kept in step with the vault.
    pub platform_index: &'a mut Trie,
    pub registry: Option<&'a CommandRegistry>,
    pub prompt: &'a dyn SecretPrompt,
    /// Set when the session was established or cleared and must be persisted.
    pub session_changed: bool,
}

impl<'a> ShellContext<'a> {
    pub fn new(client: &'a ApiClient, state: &'a mut ShellState, platform_index: &'a mut Trie) -> Self {
        Self {
            client,
            state,
            platform_index,
            registry: None,
            prompt: &TERMINAL_PROMPT,
            session_changed: false,
        }
    }

    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_prompt(mut self, prompt: &'a dyn SecretPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    /// The signed-in user, or the error to show when nobody is.
    pub fn require_user(&self) -> Result<User, CommandResult> {
        self.state
            .session
            .user()
            .cloned()
            .ok_or_else(|| CommandResult::error("Not logged in. Use 'login <email>' first."))
    }

    /// Uses `given` if present, otherwise prompts for a secret.
    pub fn secret_or_prompt(&self, given: Option<&str>, label: &str) -> Result<String, CommandResult> {
        let secret = match given {
            Some(s) => s.to_string(),
            None => self
                .prompt
                .read_secret(label)
                .map_err(|e| CommandResult::error(format!("Failed to read password: {}", e)))?,
        };
        if secret.is_empty() {
            return Err(CommandResult::error("Password cannot be empty"));
        }
        Ok(secret)
    }

    pub fn begin_session(&mut self, user: User) {
        self.state.vault.clear();
        self.platform_index.clear();
        self.state.session.establish(user);
        self.state.session.remember_cookies(self.client);
        self.session_changed = true;
    }

    pub fn end_session(&mut self) {
        self.state.session.clear();
        self.state.vault.clear();
        self.state.panel.reset();
        self.platform_index.clear();
        self.session_changed = true;
    }

    /// Re-reads the platform names from the vault into the completion index.
    pub fn reindex(&mut self) {
        self.platform_index.rebuild(self.state.vault.platforms());
    }

    /// Re-fetches the vault after a change. Failures only leave the cache stale.
    pub fn refresh_vault(&mut self, user: &User) {
        match self.client.list_passwords(user) {
            Ok(records) => {
                self.state.vault.replace_all(records);
                self.reindex();
            }
            Err(ApiError::SessionExpired) => self.end_session(),
            Err(e) => log::warn!("Could not refresh password list: {}", e),
        }
    }

    /// Turns a backend failure into a message. An expired session is cleared.
    pub fn api_failure(&mut self, action: &str, err: ApiError) -> CommandResult {
        match err {
            ApiError::SessionExpired => {
                log::warn!("Session expired during '{}'", action);
                self.end_session();
                CommandResult::error(ApiError::SessionExpired.to_string())
            }
            other => {
                log::warn!("'{}' failed: {}", action, other);
                CommandResult::error(format!("Failed to {}: {}", action, other))
            }
        }
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Returns the primary name of the command.
    fn name(&self) -> &str;

    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Returns a short description of the command.
    fn description(&self) -> &str;

    /// Returns usage information (e.g., "add <platform> <email> [password]").
    fn usage(&self) -> &str;

    /// Returns detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    fn group(&self) -> CommandGroup {
        CommandGroup::Shell
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    /// What the argument at `index` (0-based, after the command name) holds.
    fn arg_kind(&self, _index: usize) -> ArgKind {
        ArgKind::Plain
    }

    fn min_args(&self) -> usize {
        0
    }

    /// Maximum number of arguments (None = unlimited).
    fn max_args(&self) -> Option<usize> {
        None
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    aliases: HashMap<String, String>,
    names: Trie,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            names: Trie::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.names.insert(&name);

        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.names.insert(alias);
        }

        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        let primary = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.commands.get(primary).map(Arc::clone)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Command names and aliases starting with `prefix`.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.names.completions(prefix)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Checks argument counts, then runs the command.
    pub fn dispatch(&self, name: &str, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(cmd) = self.get(name) else {
            return CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                name
            ));
        };

        if args.len() < cmd.min_args() {
            return CommandResult::error(format!("Usage: {}\nMissing required arguments", cmd.usage()));
        }
        if let Some(max) = cmd.max_args() {
            if args.len() > max {
                return CommandResult::error(format!("Usage: {}\nToo many arguments", cmd.usage()));
            }
        }

        crate::logging::timed(&format!("Command '{}'", cmd.name()), || cmd.execute(args, ctx))
    }

    /// True if `args` put a value in a secret position of command `name`.
    pub fn carries_secret(&self, name: &str, args: &[&str]) -> bool {
        self.get(name)
            .is_some_and(|cmd| (0..args.len()).any(|i| cmd.arg_kind(i) == ArgKind::Secret))
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        registry
    }

    #[test]
    fn test_alias_lookup() {
        let registry = registry();
        assert_eq!(registry.get("rm").unwrap().name(), "delete");
        assert_eq!(registry.get("gen").unwrap().name(), "generate");
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_carries_secret() {
        let registry = registry();
        assert!(!registry.carries_secret("login", &["ada@example.com"]));
        assert!(registry.carries_secret("login", &["ada@example.com", "pw"]));
        assert!(registry.carries_secret("strength", &["hunter2"]));
        assert!(!registry.carries_secret("list", &["git"]));
        assert!(!registry.carries_secret("unknown", &["x", "y"]));
    }

    #[test]
    fn test_completions_include_aliases() {
        let registry = registry();
        let completions = registry.completions("de");
        assert!(completions.contains(&"delete".to_string()));
        assert!(completions.contains(&"del".to_string()));
    }
}
