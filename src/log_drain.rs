//! Log output to a console sink.
//!
//! Drains a [`LogStream`] into any [`Sink`]: a spare UART, the serial
//! console itself between commands, or a test buffer.
//!
//! # Format
//!
//! ```text
//! [      seq] LEVEL s<session>: message
//! ```

use crate::console::io::{Sink, SliceWriter};
use crate::logging::{LogEntry, LogStream};

/// Format log entry into `buf`, returning the length used.
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    use core::fmt::Write;

    let mut writer = SliceWriter::new(buf);
    let _ = write!(
        writer,
        "[{:9}] {} s{}: {}\r\n",
        entry.seq,
        entry.level.as_str(),
        entry.session,
        entry.message()
    );
    writer.len()
}

/// Write every pending record to `out`.
///
/// Reports (and resets) the drop counter first when records were lost.
/// Returns the number of records written. Stops at the first sink failure,
/// losing that record; later ones stay queued.
pub fn drain_to<const N: usize>(stream: &LogStream<N>, out: &mut dyn Sink) -> usize {
    let mut format_buf = [0u8; 128];

    let dropped = stream.dropped();
    if dropped > 0 {
        let mut writer = SliceWriter::new(&mut format_buf);
        let _ = core::fmt::write(&mut writer, format_args!("dropped {} log records\r\n", dropped));
        let len = writer.len();
        if out.write(&format_buf[..len]).is_err() {
            return 0;
        }
        stream.reset_dropped();
    }

    let mut written = 0;
    while let Some(entry) = stream.drain() {
        let len = format_log_entry(&entry, &mut format_buf);
        if out.write(&format_buf[..len]).is_err() {
            break;
        }
        written += 1;
    }
    written
}
