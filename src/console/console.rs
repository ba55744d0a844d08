//! Interpreter: one console session on one transport
//!
//! Owns the line state and echo switch. The command table and the handler
//! context are passed in on every call, so a serial console and a network
//! console can share one table without any global state.

use core::fmt::Write;

use super::assembler::{LineAssembler, LineEvent, LineState};
use super::commands::{CommandTable, DispatchResult};
use super::echo::{self, Echo};
use super::io::{ByteSource, Sink, SinkError};
use super::parser::{parse_line, TokenSet};
use super::ConsoleError;
use crate::config::{CliConfig, DEFAULT_LINE_SIZE, DEFAULT_MAX_ARGS};

/// What happened to a finished line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line, nothing dispatched
    Empty,
    /// A command name was looked up (matched or not)
    Dispatched(DispatchResult),
    /// Line overflowed and was thrown away
    Discarded,
    /// Ctrl+C
    Cancelled,
}

/// Console state machine
pub struct Interpreter<const LINE: usize = DEFAULT_LINE_SIZE, const ARGS: usize = DEFAULT_MAX_ARGS> {
    assembler: LineAssembler<LINE>,
    echo: Echo,
    config: CliConfig,
    /// Lines finished (any outcome except cancel)
    lines: u32,
}

impl<const LINE: usize, const ARGS: usize> Interpreter<LINE, ARGS> {
    /// Create new interpreter
    pub const fn new(config: CliConfig) -> Self {
        Self {
            assembler: LineAssembler::new(config.overflow),
            echo: Echo::new(config.echo),
            config,
            lines: 0,
        }
    }

    /// Process a single input byte
    ///
    /// Returns `Some` when the byte finished or cancelled a line, `None` if
    /// more input is needed.
    pub fn feed<C, const N: usize>(
        &mut self,
        byte: u8,
        table: &CommandTable<C, N>,
        ctx: &mut C,
        out: &mut dyn Sink,
    ) -> Option<LineOutcome> {
        let event = self.assembler.push(byte);
        let echoed = self.echo.render(event, out);

        let outcome = match event {
            LineEvent::Completed => Some(self.run_line(table, ctx, out)),
            LineEvent::Discarded => {
                if let Some(log) = self.config.log.stream() {
                    crate::cli_warn!(log, self.config.session, "line over {} bytes discarded", LINE);
                }
                let _ = writeln!(out, "{}\r", ConsoleError::LineOverflow);
                self.lines = self.lines.wrapping_add(1);
                self.print_prompt(out);
                Some(LineOutcome::Discarded)
            }
            LineEvent::Cancelled => {
                if let Some(log) = self.config.log.stream() {
                    crate::cli_debug!(log, self.config.session, "line cancelled");
                }
                self.print_prompt(out);
                Some(LineOutcome::Cancelled)
            }
            LineEvent::Dropped { first: true } => {
                if let Some(log) = self.config.log.stream() {
                    crate::cli_warn!(log, self.config.session, "input beyond {} bytes dropped", LINE);
                }
                None
            }
            _ => None,
        };

        if self.config.buffered_io && (echoed || outcome.is_some()) {
            let _ = out.flush();
        }

        outcome
    }

    /// Feed a batch of bytes. Returns how many lines were finished.
    pub fn feed_bytes<C, const N: usize>(
        &mut self,
        bytes: &[u8],
        table: &CommandTable<C, N>,
        ctx: &mut C,
        out: &mut dyn Sink,
    ) -> usize {
        bytes
            .iter()
            .filter(|&&b| self.feed(b, table, ctx, out).is_some())
            .count()
    }

    /// Run one iteration: drain everything `source` has right now.
    ///
    /// Returns the number of bytes consumed. Never waits for input.
    pub fn poll<C, const N: usize>(
        &mut self,
        source: &mut dyn ByteSource,
        table: &CommandTable<C, N>,
        ctx: &mut C,
        out: &mut dyn Sink,
    ) -> usize {
        let mut consumed = 0;
        while let Some(byte) = source.read_byte() {
            self.feed(byte, table, ctx, out);
            consumed += 1;
        }
        consumed
    }

    fn run_line<C, const N: usize>(
        &mut self,
        table: &CommandTable<C, N>,
        ctx: &mut C,
        out: &mut dyn Sink,
    ) -> LineOutcome {
        let outcome = {
            let tokens: TokenSet<'_, ARGS> = parse_line(self.assembler.line().as_str());
            match tokens.command() {
                None => LineOutcome::Empty,
                Some(name) => {
                    if tokens.dropped() > 0 {
                        if let Some(log) = self.config.log.stream() {
                            crate::cli_debug!(log, self.config.session,
                                "{}: {} extra arguments ignored", name, tokens.dropped());
                        }
                    }
                    let mut result = table.exec(name, tokens.args(), ctx, out);
                    if !result.matched && self.config.builtin_info && name == "info" {
                        self.print_info(table, out);
                        result = DispatchResult { matched: true, return_code: 0 };
                    }
                    self.report(name, result, out);
                    LineOutcome::Dispatched(result)
                }
            }
        };

        self.assembler.consume();
        self.lines = self.lines.wrapping_add(1);
        self.print_prompt(out);
        outcome
    }

    fn report(&self, name: &str, result: DispatchResult, out: &mut dyn Sink) {
        let session = self.config.session;
        if !result.matched {
            if let Some(log) = self.config.log.stream() {
                crate::cli_info!(log, session, "unknown command '{}'", name);
            }
            let _ = writeln!(out, "{}: {}\r", ConsoleError::UnknownCommand, name);
        } else if result.return_code < 0 {
            if let Some(log) = self.config.log.stream() {
                crate::cli_debug!(log, session, "'{}' returned {}", name, result.return_code);
            }
            let _ = writeln!(out, "error: {}\r", result.return_code);
        }
    }

    /// Built-in `info`: limits and table state
    pub fn print_info<C, const N: usize>(&self, table: &CommandTable<C, N>, out: &mut dyn Sink) {
        let _ = writeln!(out, "line size:  {}\r", LINE);
        let _ = writeln!(out, "max args:   {}\r", ARGS);
        let _ = writeln!(out, "commands:   {}/{}\r", table.registered_count(), table.capacity());
        let _ = writeln!(out, "dropped:    {}\r", table.dropped_count());
        let _ = writeln!(out, "rejected:   {}\r", table.rejected_count());
        let _ = writeln!(out, "echo:       {}\r", if self.echo.enabled() { "on" } else { "off" });
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Sink) {
        let _ = out.write_str(self.config.prompt);
        if self.config.buffered_io {
            let _ = out.flush();
        }
    }

    /// Print welcome banner
    pub fn print_banner(&self, banner: &str, out: &mut dyn Sink) {
        let _ = writeln!(out, "\r\n{}\r", banner);
        let _ = writeln!(out, "Type 'help' for commands.\r");
        self.print_prompt(out);
    }

    /// Ring the terminal bell, whatever the echo state
    pub fn bell(&self, out: &mut dyn Sink) -> Result<usize, SinkError> {
        let written = echo::bell(out)?;
        if self.config.buffered_io {
            out.flush()?;
        }
        Ok(written)
    }

    pub fn set_echo(&mut self, enabled: bool) {
        self.echo.set(enabled);
    }

    pub fn echo_enabled(&self) -> bool {
        self.echo.enabled()
    }

    /// Line assembly state
    pub fn state(&self) -> LineState {
        self.assembler.state()
    }

    /// What has been typed on the current line
    pub fn pending_line(&self) -> &str {
        self.assembler.line().as_str()
    }

    /// Lines finished since creation
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn config(&self) -> &CliConfig {
        &self.config
    }
}

impl<const LINE: usize, const ARGS: usize> Default for Interpreter<LINE, ARGS> {
    fn default() -> Self {
        Self::new(CliConfig::new())
    }
}
