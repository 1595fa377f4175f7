//! Trie-based autocomplete for rustyline.
//!
//! Completes command names, and for arguments asks the command what the
//! position holds: stored entries complete from the platform index, command
//! names from the registry.

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::{Arc, RwLock};

use crate::shell::command::{ArgKind, CommandRegistry};
use crate::shell::words;
use crate::trie::Trie;

/// Completer that handles both command and argument completion.
pub struct LockboxCompleter {
    registry: Arc<CommandRegistry>,
    /// Platform names of the cached vault (updated by commands).
    platform_index: Arc<RwLock<Trie>>,
}

/// Context for completion - are we completing a command or an argument?
#[derive(Debug)]
enum CompletionContext<'a> {
    Command {
        partial: &'a str,
    },
    Argument {
        command: &'a str,
        arg_index: usize,
        partial: &'a str,
    },
}

fn pairs(words: Vec<String>) -> Vec<Pair> {
    words
        .into_iter()
        .map(|s| Pair {
            replacement: if s.contains(char::is_whitespace) {
                shell_words::quote(&s).into_owned()
            } else {
                s.clone()
            },
            display: s,
        })
        .collect()
}

impl LockboxCompleter {
    pub fn new(registry: Arc<CommandRegistry>, platform_index: Arc<RwLock<Trie>>) -> Self {
        Self {
            registry,
            platform_index,
        }
    }

    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        pairs(self.registry.completions(partial))
    }

    fn complete_platform(&self, partial: &str) -> Vec<Pair> {
        match self.platform_index.read() {
            Ok(index) => pairs(index.completions(partial)),
            Err(_) => vec![],
        }
    }

    /// Works out what is being typed at `pos`.
    fn parse_context<'a>(&self, line: &'a str, pos: usize) -> CompletionContext<'a> {
        let before = &line[..pos];
        let words = words(before);
        let ends_with_space = before.ends_with(char::is_whitespace);

        match words.as_slice() {
            [] => CompletionContext::Command { partial: "" },
            [(_, command)] if !ends_with_space => CompletionContext::Command { partial: *command },
            [(_, command), rest @ ..] => {
                let (arg_index, partial) = if ends_with_space {
                    (rest.len(), "")
                } else {
                    (rest.len() - 1, rest.last().map(|w| w.1).unwrap_or(""))
                };
                CompletionContext::Argument {
                    command: *command,
                    arg_index,
                    partial,
                }
            }
        }
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        match self.parse_context(line, pos) {
            CompletionContext::Command { partial } => {
                (pos - partial.len(), self.complete_command(partial))
            }
            CompletionContext::Argument {
                command,
                arg_index,
                partial,
            } => {
                let kind = self.registry.get(command).map(|c| c.arg_kind(arg_index));
                let completions = match kind {
                    Some(ArgKind::Entry) => self.complete_platform(partial),
                    Some(ArgKind::Command) => self.complete_command(partial),
                    _ => vec![],
                };
                (pos - partial.len(), completions)
            }
        }
    }
}

impl Completer for LockboxCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_completer() -> LockboxCompleter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        let mut index = Trie::new();
        index.insert("GitHub");
        index.insert("GitLab");
        index.insert("Work Mail");
        index.insert("Bank");

        LockboxCompleter::new(Arc::new(registry), Arc::new(RwLock::new(index)))
    }

    fn displays(pairs: &[Pair]) -> Vec<&str> {
        pairs.iter().map(|p| p.display.as_str()).collect()
    }

    #[test]
    fn test_complete_command_partial() {
        let completer = setup_completer();
        let (start, completions) = completer.candidates("sh", 2);

        assert_eq!(start, 0);
        assert_eq!(displays(&completions), vec!["show"]);
    }

    #[test]
    fn test_complete_entry_argument() {
        let completer = setup_completer();
        let (start, completions) = completer.candidates("show git", 8);

        assert_eq!(start, 5);
        assert_eq!(displays(&completions), vec!["GitHub", "GitLab"]);
    }

    #[test]
    fn test_complete_quotes_names_with_spaces() {
        let completer = setup_completer();
        let (_, completions) = completer.candidates("rm wo", 5);

        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].replacement, "'Work Mail'");
    }

    #[test]
    fn test_complete_help_argument() {
        let completer = setup_completer();
        let (_, completions) = completer.candidates("help gen", 8);
        assert_eq!(displays(&completions), vec!["gen", "generate"]);
    }

    #[test]
    fn test_no_completion_for_plain_or_secret_args() {
        let completer = setup_completer();
        assert!(completer.candidates("login ", 6).1.is_empty());
        assert!(completer.candidates("add GitHub ada ", 15).1.is_empty());
        assert!(completer.candidates("bogus ", 6).1.is_empty());
    }

    #[test]
    fn test_parse_context() {
        let completer = setup_completer();

        assert!(matches!(
            completer.parse_context("", 0),
            CompletionContext::Command { partial: "" }
        ));
        assert!(matches!(
            completer.parse_context("edit ", 5),
            CompletionContext::Argument {
                command: "edit",
                arg_index: 0,
                partial: ""
            }
        ));
        assert!(matches!(
            completer.parse_context("edit 4 Git", 10),
            CompletionContext::Argument {
                command: "edit",
                arg_index: 1,
                partial: "Git"
            }
        ));
    }
}
