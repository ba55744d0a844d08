//! Command line interpreter core
//!
//! Byte-at-a-time input, no suspension of its own.
//! Zero heap allocation - all buffers are fixed size.

pub mod assembler;
pub mod commands;
pub mod console;
pub mod echo;
pub mod error;
pub mod io;
pub mod line_buffer;
pub mod numeric;
pub mod parser;

pub use assembler::{LineAssembler, LineEvent, LineState};
pub use commands::{CommandEntry, CommandTable, DispatchResult, Handler};
pub use console::{Interpreter, LineOutcome};
pub use echo::Echo;
pub use error::ConsoleError;
pub use io::{ByteSource, Sink, SinkError};
pub use line_buffer::LineBuffer;
pub use numeric::{parse_arg, parse_signed, IntWidth, SignedArg};
pub use parser::{parse_line, TokenSet};
