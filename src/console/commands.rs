//! Command table and dispatch
//!
//! The table is filled once at startup by explicit `register` calls and is
//! read-only afterwards, so several consoles can share it. Handlers are
//! plain function values; whatever state they need comes in through the
//! caller-owned context `C`.

use heapless::Vec;

use super::io::Sink;
use super::parser::TokenSet;
use super::ConsoleError;
use crate::config::{DEFAULT_TABLE_CAPACITY, MAX_NAME_LEN};
use crate::logging::LogStream;

/// Command handler: `(context, arguments, output) -> result code`.
///
/// The command name is not part of `args`. Zero means success; the table
/// attaches no meaning to other values.
pub type Handler<C> = fn(&mut C, &[&str], &mut dyn Sink) -> i8;

/// Command descriptor
pub struct CommandEntry<C> {
    pub name: &'static str,
    pub handler: Handler<C>,
}

// Manual impls: `C` itself need not be Clone/Copy
impl<C> Clone for CommandEntry<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for CommandEntry<C> {}

/// Outcome of a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A registered command had the requested name
    pub matched: bool,
    /// Handler result, 0 when nothing matched
    pub return_code: i8,
}

impl DispatchResult {
    pub const UNKNOWN: Self = Self {
        matched: false,
        return_code: 0,
    };
}

/// Fixed-capacity command table
pub struct CommandTable<C, const N: usize = DEFAULT_TABLE_CAPACITY> {
    entries: Vec<CommandEntry<C>, N>,
    dropped: usize,
    rejected: usize,
    log: Option<(&'static LogStream, u8)>,
}

impl<C, const N: usize> CommandTable<C, N> {
    /// Create empty table
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            dropped: 0,
            rejected: 0,
            log: None,
        }
    }

    /// Report refused registrations to `stream`, tagged with `session`.
    pub fn with_log(mut self, stream: &'static LogStream, session: u8) -> Self {
        self.log = Some((stream, session));
        self
    }

    /// Add a command.
    ///
    /// Returns `false` when the entry was not stored:
    /// - the name is not a valid command name (see [`is_valid_name`]); counted
    ///   by [`rejected_count`](Self::rejected_count)
    /// - the table is full; counted by [`dropped_count`](Self::dropped_count)
    ///
    /// Names are not checked for uniqueness; dispatch takes the first match.
    pub fn register(&mut self, name: &'static str, handler: Handler<C>) -> bool {
        if !is_valid_name(name) {
            self.rejected += 1;
            if let Some((log, session)) = self.log {
                crate::cli_warn!(log, session, "{}: bad name '{}'", ConsoleError::InvalidValue, name);
            }
            return false;
        }

        if self.entries.push(CommandEntry { name, handler }).is_err() {
            self.dropped += 1;
            if let Some((log, session)) = self.log {
                crate::cli_warn!(log, session, "{}: dropped '{}'", ConsoleError::TableFull, name);
            }
            return false;
        }
        true
    }

    /// Find the first entry called `name` (exact, case-sensitive)
    pub fn find(&self, name: &str) -> Option<&CommandEntry<C>> {
        self.entries.iter().find(|c| c.name == name)
    }

    /// Run the command `name` with `args`.
    pub fn exec(
        &self,
        name: &str,
        args: &[&str],
        ctx: &mut C,
        out: &mut dyn Sink,
    ) -> DispatchResult {
        match self.find(name) {
            Some(entry) => DispatchResult {
                matched: true,
                return_code: (entry.handler)(ctx, args, out),
            },
            None => DispatchResult::UNKNOWN,
        }
    }

    /// Dispatch a tokenized line. `None` when the line had no command.
    pub fn dispatch<const ARGS: usize>(
        &self,
        tokens: &TokenSet<'_, ARGS>,
        ctx: &mut C,
        out: &mut dyn Sink,
    ) -> Option<DispatchResult> {
        let name = tokens.command()?;
        Some(self.exec(name, tokens.args(), ctx, out))
    }

    pub fn entries(&self) -> &[CommandEntry<C>] {
        &self.entries
    }

    /// Accepted registrations
    pub fn registered_count(&self) -> usize {
        self.entries.len()
    }

    /// Registrations refused because the table was full
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    /// Registrations refused because of an invalid name
    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    /// All registration attempts, accepted or not
    pub fn attempts(&self) -> usize {
        self.entries.len() + self.dropped + self.rejected
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<C, const N: usize> Default for CommandTable<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A command name is 1 to [`MAX_NAME_LEN`] bytes of printable ASCII with no
/// spaces, so the tokenizer can produce it as a single token.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LEN && name.bytes().all(|b| b.is_ascii_graphic())
}
