//! # RustLibCli
//!
//! Small command line interpreter for bare metal consoles.
//!
//! ## Architecture
//!
//! Bytes go in one at a time through [`Interpreter::feed`], complete lines
//! are tokenized in place and dispatched through a [`CommandTable`] built
//! once at startup. Output goes to whatever implements [`Sink`].
//! - No heap, every buffer has a fixed capacity
//! - No globals in the core: line state lives in the interpreter, handler
//!   state in a caller-owned context
//! - One table can serve several consoles (serial + network)

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod demo;
pub mod log_drain;
pub mod log_globals;
pub mod logging;

pub use config::{CliConfig, LogTarget, OverflowPolicy};
pub use console::{
    CommandTable, ConsoleError, DispatchResult, Interpreter, LineOutcome, Sink, SinkError,
};
pub use log_globals::CLI_LOG;
pub use logging::{LogLevel, LogStream};
