//! Command line parser
//!
//! Simple split on whitespace. The first token is the command, at most
//! `ARGS` more become its arguments and anything beyond is dropped.
//! No quoting, no escaping, no copying: tokens borrow the line.

use heapless::Vec;

use crate::config::DEFAULT_MAX_ARGS;

/// Tokenized command line
#[derive(Debug, Clone)]
pub struct TokenSet<'a, const ARGS: usize = DEFAULT_MAX_ARGS> {
    command: Option<&'a str>,
    args: Vec<&'a str, ARGS>,
    dropped: usize,
}

impl<'a, const ARGS: usize> TokenSet<'a, ARGS> {
    /// No command, no arguments
    pub const fn empty() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            dropped: 0,
        }
    }

    /// The command name (first token), `None` for a blank line
    pub fn command(&self) -> Option<&'a str> {
        self.command
    }

    /// Arguments after the command name
    pub fn args(&self) -> &[&'a str] {
        &self.args
    }

    /// Number of arguments (command name excluded)
    pub fn argc(&self) -> usize {
        self.args.len()
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied()
    }

    /// Whitespace-separated segments that did not fit
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_none()
    }
}

/// Parse a command line into command and arguments
pub fn parse_line<const ARGS: usize>(line: &str) -> TokenSet<'_, ARGS> {
    let mut parts = line.split_ascii_whitespace();
    let mut tokens = TokenSet::empty();

    tokens.command = parts.next();
    for part in parts {
        if tokens.args.push(part).is_err() {
            tokens.dropped += 1;
        }
    }

    tokens
}
