//! Global log stream instance.
//!
//! Default destination for interpreter diagnostics (see
//! `config::LogTarget::Global`). Every console produces into it; whoever
//! owns a spare output drains it.

use crate::logging::LogStream;

/// Process-wide interpreter log.
///
/// Producers: interpreters and command tables, from any thread. Drained by
/// `log_drain::drain_to`.
pub static CLI_LOG: LogStream = LogStream::new();
