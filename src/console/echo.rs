//! Echo and terminal control output
//!
//! Mirrors what the line assembler did back to the terminal. The bell is
//! separate and ignores the echo switch.

use super::assembler::LineEvent;
use super::io::Sink;

/// Terminal bell
pub const BELL: u8 = 0x07;

/// Backspace, space, backspace: erases one cell on a VT100-ish terminal
pub const ERASE: &[u8] = b"\x08 \x08";

pub const NEWLINE: &[u8] = b"\r\n";

pub const CANCEL: &[u8] = b"^C\r\n";

/// Runtime echo switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Echo {
    enabled: bool,
}

impl Echo {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Write the terminal side effect of `event`, if echo is on.
    ///
    /// Returns whether anything was written. Sink errors are ignored.
    pub fn render(&self, event: LineEvent, out: &mut dyn Sink) -> bool {
        if !self.enabled {
            return false;
        }

        let bytes: &[u8] = match event {
            LineEvent::Accepted(byte) => {
                let _ = out.write(&[byte]);
                return true;
            }
            LineEvent::Erased => ERASE,
            LineEvent::Dropped { first: true } => &[BELL],
            LineEvent::Completed | LineEvent::Discarded => NEWLINE,
            LineEvent::Cancelled => CANCEL,
            LineEvent::Dropped { first: false } | LineEvent::Ignored => return false,
        };

        let _ = out.write(bytes);
        true
    }
}

impl Default for Echo {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Ring the terminal bell (one control byte, echo state irrelevant).
pub fn bell(out: &mut dyn Sink) -> Result<usize, super::io::SinkError> {
    out.write(&[BELL])
}
