//! Non-blocking diagnostic logging for the interpreter.
//!
//! # Architecture
//!
//! ```text
//! Interpreter            LogStream            Drain (any sink)
//! ───────────            ─────────            ────────────────
//!
//! cli_warn!() ─────────▶ [L0][L1][L2] ──────▶ UART / telnet / test buffer
//! fixed cost              fixed-size           blocking ok
//! never blocks            ring buffer          runs when idle
//! ```
//!
//! # Rules
//!
//! - Logging from the feed path never blocks and never allocates.
//! - Records are dropped (and counted) when the ring is full.
//! - Any number of producers and drains may share a stream (threads, tasks,
//!   several consoles). A producer claims a slot before writing it, and a
//!   slot is only handed to a drain once its stamp says it is complete.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Longest message kept per record, in bytes.
pub const MAX_MSG_LEN: usize = 60;

/// Default ring size in records.
pub const LOG_BUFFER_SIZE: usize = 32;

/// Record severity, most severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Name as printed by the drain.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// One queued diagnostic record.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Position in the stream (monotonic, wraps at `u32::MAX`).
    pub seq: u32,
    /// Console session that produced the record.
    pub session: u8,
    pub level: LogLevel,
    /// Valid bytes in `msg`.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        seq: 0,
        session: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text (lossy: invalid UTF-8 yields an empty string).
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One ring cell.
///
/// `stamp` tells whose turn it is: equal to `pos` when free for the producer
/// at position `pos`, `pos + 1` once written and ready for the drain.
struct Slot {
    stamp: AtomicU32,
    entry: UnsafeCell<LogEntry>,
}

impl Slot {
    #[allow(clippy::declare_interior_mutable_const)]
    const EMPTY: Self = Self {
        stamp: AtomicU32::new(0),
        entry: UnsafeCell::new(LogEntry::EMPTY),
    };
}

/// Lock-free bounded log ring.
///
/// - Push never blocks (drops message if full)
/// - Drain runs whenever the owner of the output has time
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: A slot's entry is only touched by the caller that won the CAS on
// write_idx (producer) or read_idx (drain) for that position, and the stamp
// handoff (Release store, Acquire load) orders the entry accesses between
// them. No two callers ever hold the same slot at once.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log buffer size must be power of 2");
        assert!(N <= (1 << 30), "Log buffer too large for 32-bit stamps");

        let mut slots = [Slot::EMPTY; N];
        let mut i = 0;
        while i < N {
            slots[i].stamp = AtomicU32::new(i as u32);
            i += 1;
        }

        Self {
            slots,
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue one record for `session`. Never blocks.
    ///
    /// `false` when the ring was full and the record was counted as dropped.
    /// Messages longer than [`MAX_MSG_LEN`] are cut.
    pub fn push(&self, session: u8, level: LogLevel, msg: &[u8]) -> bool {
        let mut pos = self.write_idx.load(Ordering::Relaxed);
        loop {
            let slot = &self.slots[(pos as usize) & Self::MASK];
            let stamp = slot.stamp.load(Ordering::Acquire);
            let lag = stamp.wrapping_sub(pos) as i32;

            if lag == 0 {
                match self.write_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        // SAFETY: Winning the CAS for `pos` gives exclusive
                        // access to this slot until the stamp is advanced.
                        unsafe {
                            let entry = &mut *slot.entry.get();
                            entry.seq = pos;
                            entry.session = session;
                            entry.level = level;
                            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
                            entry.msg[..entry.len as usize]
                                .copy_from_slice(&msg[..entry.len as usize]);
                        }
                        slot.stamp.store(pos.wrapping_add(1), Ordering::Release);
                        return true;
                    }
                    Err(current) => pos = current,
                }
            } else if lag < 0 {
                // Slot still holds the previous lap's record
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            } else {
                pos = self.write_idx.load(Ordering::Relaxed);
            }
        }
    }

    /// Take the oldest record, `None` when the ring is empty.
    pub fn drain(&self) -> Option<LogEntry> {
        let mut pos = self.read_idx.load(Ordering::Relaxed);
        loop {
            let slot = &self.slots[(pos as usize) & Self::MASK];
            let stamp = slot.stamp.load(Ordering::Acquire);
            let lag = stamp.wrapping_sub(pos.wrapping_add(1)) as i32;

            if lag == 0 {
                match self.read_idx.compare_exchange_weak(
                    pos,
                    pos.wrapping_add(1),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                ) {
                    Ok(_) => {
                        // SAFETY: Winning the CAS for `pos` gives exclusive
                        // access to this published slot.
                        let entry = unsafe { *slot.entry.get() };
                        slot.stamp.store(pos.wrapping_add(N as u32), Ordering::Release);
                        return Some(entry);
                    }
                    Err(current) => pos = current,
                }
            } else if lag < 0 {
                // Not written yet (empty, or a producer is mid-write)
                return None;
            } else {
                pos = self.read_idx.load(Ordering::Relaxed);
            }
        }
    }

    /// Records lost to a full ring since the last reset.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Clear the drop counter once the loss has been reported.
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Records claimed by producers and not yet drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Acquire);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written. Output that does not fit is cut.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = crate::console::io::SliceWriter::new(buf);
    let _ = core::fmt::write(&mut writer, args);
    writer.len()
}

/// Format into a stack buffer and push to a stream, dropping on overflow.
///
/// # Example
///
/// ```ignore
/// cli_log!(LogLevel::Info, CLI_LOG, session, "unknown command '{}'", name);
/// ```
#[macro_export]
macro_rules! cli_log {
    ($level:expr, $stream:expr, $session:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($session, $level, &buf[..len]);
    }};
}

/// `cli_log!` at [`LogLevel::Info`].
#[macro_export]
macro_rules! cli_info {
    ($stream:expr, $session:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Info, $stream, $session, $($arg)*)
    };
}

/// `cli_log!` at [`LogLevel::Warn`].
#[macro_export]
macro_rules! cli_warn {
    ($stream:expr, $session:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Warn, $stream, $session, $($arg)*)
    };
}

/// `cli_log!` at [`LogLevel::Error`].
#[macro_export]
macro_rules! cli_error {
    ($stream:expr, $session:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Error, $stream, $session, $($arg)*)
    };
}

/// `cli_log!` at [`LogLevel::Debug`].
#[macro_export]
macro_rules! cli_debug {
    ($stream:expr, $session:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Debug, $stream, $session, $($arg)*)
    };
}

/// `cli_log!` at [`LogLevel::Trace`].
#[macro_export]
macro_rules! cli_trace {
    ($stream:expr, $session:expr, $($arg:tt)*) => {
        $crate::cli_log!($crate::logging::LogLevel::Trace, $stream, $session, $($arg)*)
    };
}
