//! Shell module - rustyline-based interactive shell.
//!
//! This module provides a shell-like interface with:
//! - Command, entry and help-topic completion
//! - Syntax highlighting with masked passwords
//! - Command history that never records passwords
//! - Usage hints

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;

#[cfg(test)]
pub(crate) mod test_support;

use anyhow::{Result, anyhow};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

use crate::api::ApiClient;
use crate::credentials::Vault;
use crate::session::Session;
use crate::trie::Trie;

use command::{CommandRegistry, CommandResult, ShellContext, ShellState};
use commands::register_all;
use completer::LockboxCompleter;
use highlighter::{LockboxHighlighter, OutputHighlighter};
use hints::LockboxHinter;
use history::{HistoryConfig, HistoryFilter};

/// Splits on whitespace, keeping each word's byte offset.
pub(crate) fn words(line: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                out.push((s, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, &line[s..]));
    }
    out
}

fn prompt_for(session: &Session) -> String {
    match session.user() {
        Some(user) => format!("lockbox({})> ", user.name),
        None => "lockbox> ".to_string(),
    }
}

/// Combined helper for rustyline that provides all shell features.
pub struct LockboxHelper {
    completer: LockboxCompleter,
    highlighter: LockboxHighlighter,
    hinter: LockboxHinter,
}

impl LockboxHelper {
    pub fn new(registry: Arc<CommandRegistry>, platform_index: Arc<RwLock<Trie>>) -> Self {
        Self {
            completer: LockboxCompleter::new(Arc::clone(&registry), platform_index),
            highlighter: LockboxHighlighter::new(Arc::clone(&registry)),
            hinter: LockboxHinter::new(registry),
        }
    }
}

impl Completer for LockboxHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for LockboxHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for LockboxHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

// Passwords may contain unbalanced brackets, so every line is accepted as typed.
impl Validator for LockboxHelper {}

impl Helper for LockboxHelper {}

/// Configuration for the shell.
pub struct ShellConfig {
    pub history: HistoryConfig,
    pub show_welcome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_welcome: true,
        }
    }
}

/// What running one input line produced.
#[derive(Debug)]
pub struct LineOutcome {
    pub result: CommandResult,
    /// The session was established or cleared and should be persisted.
    pub session_changed: bool,
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    /// Platform names for completion (shared with helper).
    platform_index: Arc<RwLock<Trie>>,
    config: ShellConfig,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            platform_index: Arc::new(RwLock::new(Trie::new())),
            config,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    fn init_platform_index(&self, vault: &Vault) {
        if let Ok(mut index) = self.platform_index.write() {
            index.rebuild(vault.platforms());
            log::debug!("Initialized platform index with {} entries", index.len());
        }
    }

    /// Runs the interactive shell. `save_fn` is called whenever a command
    /// changed the session.
    pub fn run_with_save<F>(&self, client: &ApiClient, state: &mut ShellState, mut save_fn: F) -> Result<()>
    where
        F: FnMut(&Session) -> Result<()>,
    {
        self.init_platform_index(&state.vault);

        let helper = LockboxHelper::new(Arc::clone(&self.registry), Arc::clone(&self.platform_index));
        let mut editor: Editor<LockboxHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(helper));
        editor.set_max_history_size(self.config.history.max_entries)?;

        if self.config.history.path.exists() {
            if let Err(e) = editor.load_history(&self.config.history.path) {
                log::warn!("Could not load history: {}", e);
            } else {
                log::debug!("Loaded history from {}", self.config.history.path.display());
            }
        }
        let mut filter =
            HistoryFilter::new(self.config.history.clone()).with_registry(Arc::clone(&self.registry));

        if self.config.show_welcome {
            match state.session.user() {
                Some(user) => println!("Signed in as {}. Type 'help' for available commands.", user.email),
                None => println!("Type 'login <email>' to sign in, or 'help' for available commands."),
            }
        }

        log::info!("Shell started");

        loop {
            match editor.readline(&prompt_for(&state.session)) {
                Ok(line) => {
                    if filter.should_add(&line) {
                        let _ = editor.add_history_entry(line.trim());
                    }

                    let outcome = self.execute_line(&line, client, state)?;

                    match outcome.result {
                        CommandResult::Success(Some(msg)) => println!("{}", msg),
                        CommandResult::Success(None) | CommandResult::Continue => {}
                        CommandResult::Error(msg) => eprintln!("{}", OutputHighlighter::error(&msg)),
                        CommandResult::Exit => break,
                    }

                    if outcome.session_changed {
                        if let Err(e) = save_fn(&state.session) {
                            eprintln!(
                                "{}",
                                OutputHighlighter::warning(&format!("Failed to save session: {}", e))
                            );
                            log::error!("Failed to save session: {:#}", e);
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    log::debug!("Interrupted (Ctrl-C)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    log::info!("EOF received (Ctrl-D)");
                    break;
                }
                Err(err) => {
                    eprintln!("{}", OutputHighlighter::error(&format!("Error: {}", err)));
                    log::error!("Readline error: {}", err);
                    break;
                }
            }
        }

        if let Some(parent) = self.config.history.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        if let Err(e) = editor.save_history(&self.config.history.path) {
            log::warn!("Failed to save history: {}", e);
        } else {
            log::debug!("Saved history to {}", self.config.history.path.display());
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Parses and executes one input line.
    pub fn execute_line(&self, line: &str, client: &ApiClient, state: &mut ShellState) -> Result<LineOutcome> {
        let mut index = self
            .platform_index
            .write()
            .map_err(|e| anyhow!("Platform index lock poisoned: {}", e))?;
        let mut ctx = ShellContext::new(client, state, &mut index).with_registry(&self.registry);

        let result = self.execute_with_context(line, &mut ctx);
        Ok(LineOutcome {
            result,
            session_changed: ctx.session_changed,
        })
    }

    fn execute_with_context(&self, line: &str, ctx: &mut ShellContext) -> CommandResult {
        let parts = match shell_words::split(line) {
            Ok(parts) => parts,
            Err(e) => return CommandResult::error(format!("Parse error: {}", e)),
        };
        let Some((cmd_name, args)) = parts.split_first() else {
            return CommandResult::Continue;
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        // Arguments may hold passwords; only their number is logged.
        log::debug!("Executing command: {} ({} args)", cmd_name, args.len());
        self.registry.dispatch(cmd_name, &args, ctx)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
