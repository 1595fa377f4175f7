//! Syntax and semantic highlighting for the shell.
//!
//! Input is colored by what each argument holds. Passwords typed on the
//! command line are shown as `*` while editing.

use rustyline::highlight::{CmdKind, Highlighter};
use std::borrow::Cow;
use std::sync::Arc;

use crate::shell::command::{ArgKind, CommandRegistry};
use crate::shell::words;
use crate::strength::{StrengthLabel, classify};

/// ANSI color codes for highlighting.
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const WHITE: &str = "\x1b[37m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
}

/// Highlighter for shell input with syntax coloring.
pub struct LockboxHighlighter {
    registry: Arc<CommandRegistry>,
}

impl LockboxHighlighter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn highlight_line(&self, line: &str) -> String {
        let words = words(line);
        let Some(&(_, name)) = words.first() else {
            return line.to_string();
        };
        let command = self.registry.get(name);

        let mut result = String::with_capacity(line.len() * 2);
        let mut last = 0;
        let mut masking = false;

        for (i, &(start, word)) in words.iter().enumerate() {
            result.push_str(&line[last..start]);
            last = start + word.len();

            if i == 0 {
                if command.is_some() {
                    result.push_str(colors::BOLD);
                    result.push_str(colors::CYAN);
                } else {
                    result.push_str(colors::RED);
                }
                result.push_str(word);
                result.push_str(colors::RESET);
                continue;
            }

            let kind = command
                .as_ref()
                .map_or(ArgKind::Plain, |c| c.arg_kind(i - 1));
            // Quoted secrets can span several words; mask from the first secret on.
            masking |= kind == ArgKind::Secret;

            if masking {
                result.push_str(colors::DIM);
                result.push_str(&"*".repeat(word.chars().count()));
            } else {
                result.push_str(match kind {
                    ArgKind::Entry => colors::MAGENTA,
                    ArgKind::Command => colors::YELLOW,
                    _ => colors::WHITE,
                });
                result.push_str(word);
            }
            result.push_str(colors::RESET);
        }

        result.push_str(&line[last..]);
        result
    }
}

impl Highlighter for LockboxHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlight_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        Cow::Owned(format!(
            "{}{}{}{}",
            colors::BOLD,
            colors::BRIGHT_GREEN,
            prompt,
            colors::RESET
        ))
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("{}{}{}", colors::DIM, hint, colors::RESET))
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        _completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        Cow::Owned(format!(
            "{}{}{}",
            colors::BRIGHT_CYAN,
            candidate,
            colors::RESET
        ))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

/// Utilities for semantic highlighting in output.
pub struct OutputHighlighter;

impl OutputHighlighter {
    pub fn error(msg: &str) -> String {
        format!("{}{}{}", colors::BRIGHT_RED, msg, colors::RESET)
    }

    pub fn warning(msg: &str) -> String {
        format!("{}{}{}", colors::YELLOW, msg, colors::RESET)
    }

    /// Formats a score as `N/100 (Label)`, colored by tier.
    pub fn strength(score: u8) -> String {
        let label = classify(score);
        let color = match label {
            StrengthLabel::Weak => colors::RED,
            StrengthLabel::Fair => colors::YELLOW,
            StrengthLabel::Good => colors::BRIGHT_YELLOW,
            StrengthLabel::Strong => colors::GREEN,
        };
        format!("{}{}/100 ({}){}", color, score, label, colors::RESET)
    }
}
