//! Module: config
//!
//! Purpose: Limits and runtime options for the command line interpreter.
//!
//! Architecture:
//! - Buffer sizes are const generics on the console types, defaulting to the
//!   constants below. They never change after build.
//! - Everything else lives in [`CliConfig`], a `Copy` value handed to each
//!   interpreter at construction. Echo is the only option that can be
//!   changed later (see `Interpreter::set_echo`).

use crate::logging::LogStream;

/// Maximum length of a command line including all arguments, in bytes.
pub const DEFAULT_LINE_SIZE: usize = 100;

/// Maximum number of arguments passed to a handler (command name excluded).
pub const DEFAULT_MAX_ARGS: usize = 5;

/// Number of entries a command table holds.
pub const DEFAULT_TABLE_CAPACITY: usize = 16;

/// Longest accepted command name, in bytes.
pub const MAX_NAME_LEN: usize = 16;

/// Prompt written after every dispatch cycle.
pub const DEFAULT_PROMPT: &str = "#> ";

/// What happens to printable input once the line buffer is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Mark the line unusable. The terminator resets it and reports
    /// `LineOverflow`; nothing is executed.
    DiscardLine,
    /// Drop the excess bytes and execute what fits.
    Truncate,
}

/// Runtime interpreter options.
#[derive(Clone, Copy)]
pub struct CliConfig {
    /// Prompt string
    pub prompt: &'static str,
    /// Initial echo state
    pub echo: bool,
    /// Flush the sink after each burst of output
    pub buffered_io: bool,
    /// Line overflow behaviour
    pub overflow: OverflowPolicy,
    /// Answer `info` when no registered command claims the name
    pub builtin_info: bool,
    /// Tag for log records (distinguishes consoles sharing a log stream)
    pub session: u8,
    /// Where diagnostics go
    pub log: LogTarget,
}

/// Destination of interpreter diagnostics.
#[derive(Clone, Copy)]
pub enum LogTarget {
    /// Discard
    Off,
    /// The process-wide [`crate::CLI_LOG`]
    Global,
    /// A caller-owned stream
    Stream(&'static LogStream),
}

impl LogTarget {
    /// Resolve to a stream, `None` when logging is off.
    pub fn stream(self) -> Option<&'static LogStream> {
        match self {
            Self::Off => None,
            Self::Global => Some(&crate::log_globals::CLI_LOG),
            Self::Stream(stream) => Some(stream),
        }
    }
}

impl CliConfig {
    /// Defaults: `"#> "` prompt, echo on, unbuffered, discard overflowing
    /// lines, `info` enabled, session 0, logging to [`crate::CLI_LOG`].
    pub const fn new() -> Self {
        Self {
            prompt: DEFAULT_PROMPT,
            echo: true,
            buffered_io: false,
            overflow: OverflowPolicy::DiscardLine,
            builtin_info: true,
            session: 0,
            log: LogTarget::Global,
        }
    }

    pub const fn with_prompt(mut self, prompt: &'static str) -> Self {
        self.prompt = prompt;
        self
    }

    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub const fn with_buffered_io(mut self, buffered: bool) -> Self {
        self.buffered_io = buffered;
        self
    }

    pub const fn with_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = policy;
        self
    }

    pub const fn with_builtin_info(mut self, enabled: bool) -> Self {
        self.builtin_info = enabled;
        self
    }

    pub const fn with_session(mut self, session: u8) -> Self {
        self.session = session;
        self
    }

    pub const fn with_log(mut self, target: LogTarget) -> Self {
        self.log = target;
        self
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CliConfig")
            .field("prompt", &self.prompt)
            .field("echo", &self.echo)
            .field("buffered_io", &self.buffered_io)
            .field("overflow", &self.overflow)
            .field("builtin_info", &self.builtin_info)
            .field("session", &self.session)
            .field("log", &self.log.stream().is_some())
            .finish()
    }
}
