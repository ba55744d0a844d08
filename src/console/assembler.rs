//! Line assembly: raw bytes in, complete lines out
//!
//! ```text
//! Idle ──printable──▶ Collecting ──CR/LF──▶ Complete ──consume()──▶ Idle
//!   ▲                     │
//!   └──── Ctrl+C ─────────┘
//! ```
//!
//! Overflow and cancel stay inside `Collecting`; there is no error state.
//! Escape sequences (`ESC x`, `ESC [ params final`) are swallowed; a control
//! byte inside one ends the sequence and keeps its usual meaning.

use super::LineBuffer;
use crate::config::{OverflowPolicy, DEFAULT_LINE_SIZE};

pub const BACKSPACE: u8 = 0x08;
pub const DELETE: u8 = 0x7F;
pub const CTRL_C: u8 = 0x03;
pub const ESCAPE: u8 = 0x1B;

/// Assembler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// Buffer empty, nothing typed yet
    Idle,
    /// At least one byte accepted (or dropped) since the last reset
    Collecting,
    /// Terminator seen, line ready for tokenizing
    Complete,
}

/// What a single byte did to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEvent {
    /// Nothing changed (unsupported control byte, escape sequence, LF after CR)
    Ignored,
    /// Printable byte appended
    Accepted(u8),
    /// Last byte removed by backspace
    Erased,
    /// Printable byte refused, buffer full. `first` is set for the first
    /// refusal on this line.
    Dropped { first: bool },
    /// Terminator seen, line is ready
    Completed,
    /// Terminator seen on an overflowed line; line reset, nothing to run
    Discarded,
    /// Ctrl+C: line reset
    Cancelled,
}

#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    Escape,      // Got ESC
    Bracket,     // Got ESC [, waiting for the final byte
}

/// Byte-at-a-time line assembler
pub struct LineAssembler<const N: usize = DEFAULT_LINE_SIZE> {
    line: LineBuffer<N>,
    state: LineState,
    policy: OverflowPolicy,
    /// A printable byte was refused on this line
    overflowed: bool,
    /// Previous byte was CR, so a following LF is part of the same terminator
    after_cr: bool,
    escape_state: EscapeState,
}

impl<const N: usize> LineAssembler<N> {
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self {
            line: LineBuffer::new(),
            state: LineState::Idle,
            policy,
            overflowed: false,
            after_cr: false,
            escape_state: EscapeState::Normal,
        }
    }

    /// Process a single input byte
    ///
    /// Pushing into a `Complete` line that was never consumed starts a new
    /// line.
    pub fn push(&mut self, byte: u8) -> LineEvent {
        if self.state == LineState::Complete {
            self.reset();
        }

        // A C0 control byte (CR, LF, Ctrl+C, ESC, ...) aborts a pending escape
        // sequence and is then handled like any other byte.
        if self.escape_state != EscapeState::Normal {
            if byte < 0x20 {
                self.escape_state = EscapeState::Normal;
            } else {
                self.escape_state = match (self.escape_state, byte) {
                    (EscapeState::Escape, b'[') => EscapeState::Bracket,
                    // Parameter and intermediate bytes keep the sequence open
                    (EscapeState::Bracket, 0x20..=0x3F) => EscapeState::Bracket,
                    _ => EscapeState::Normal,
                };
                return LineEvent::Ignored;
            }
        }

        let after_cr = core::mem::replace(&mut self.after_cr, false);

        match byte {
            b'\n' if after_cr => LineEvent::Ignored,

            b'\r' | b'\n' => {
                self.after_cr = byte == b'\r';
                if self.overflowed && self.policy == OverflowPolicy::DiscardLine {
                    self.reset();
                    LineEvent::Discarded
                } else {
                    self.state = LineState::Complete;
                    LineEvent::Completed
                }
            }

            BACKSPACE | DELETE => {
                if self.line.backspace() {
                    if self.line.is_empty() && !self.overflowed {
                        self.state = LineState::Idle;
                    }
                    LineEvent::Erased
                } else {
                    LineEvent::Ignored
                }
            }

            CTRL_C => {
                self.reset();
                LineEvent::Cancelled
            }

            ESCAPE => {
                self.escape_state = EscapeState::Escape;
                LineEvent::Ignored
            }

            // Printable character
            0x20..=0x7E => {
                self.state = LineState::Collecting;
                if self.line.push(byte) {
                    LineEvent::Accepted(byte)
                } else {
                    let first = !self.overflowed;
                    self.overflowed = true;
                    LineEvent::Dropped { first }
                }
            }

            _ => LineEvent::Ignored,
        }
    }

    /// Current state
    pub fn state(&self) -> LineState {
        self.state
    }

    /// The line so far (or the finished line while `Complete`)
    pub fn line(&self) -> &LineBuffer<N> {
        &self.line
    }

    /// Whether bytes were refused on the current line
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Release a `Complete` line and return to `Idle`.
    pub fn consume(&mut self) {
        if self.state == LineState::Complete {
            self.reset();
        }
    }

    /// Drop everything typed so far.
    pub fn reset(&mut self) {
        self.line.clear();
        self.state = LineState::Idle;
        self.overflowed = false;
        self.escape_state = EscapeState::Normal;
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new(OverflowPolicy::DiscardLine)
    }
}
