//! Byte-feed and output-sink interfaces
//!
//! Transports (UART, telnet socket, test buffer) implement [`Sink`] for
//! output and optionally [`ByteSource`] for input. The interpreter never
//! buffers or retries; whatever the sink does with a write is final.

use core::fmt;

/// Output sink failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Transport has no room right now
    Full,
    /// Transport is gone (peer disconnected, driver error)
    Closed,
}

/// Where interpreter output goes.
pub trait Sink {
    /// Write `bytes`, returning how many were taken.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError>;

    /// Push buffered output to the peer. Unbuffered sinks need not override.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Formatted output for handlers: `write!(out, ...)` on `&mut dyn Sink`.
impl fmt::Write for dyn Sink + '_ {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            match self.write(bytes) {
                Ok(0) | Err(_) => return Err(fmt::Error),
                Ok(n) => bytes = &bytes[n.min(bytes.len())..],
            }
        }
        Ok(())
    }
}

/// Capture buffer: keeps what fits, reports the rest as not taken.
impl<const N: usize> Sink for heapless::Vec<u8, N> {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError> {
        let room = N - self.len();
        if room == 0 && !bytes.is_empty() {
            return Err(SinkError::Full);
        }
        let take = bytes.len().min(room);
        // Cannot fail: `take` fits
        let _ = self.extend_from_slice(&bytes[..take]);
        Ok(take)
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, SinkError> {
        (**self).write(bytes)
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        (**self).flush()
    }
}

/// Where interpreter input comes from when polled.
pub trait ByteSource {
    /// Next received byte, `None` when nothing is waiting. Must not block.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Consumer half of an interrupt-fed receive queue.
impl<const N: usize> ByteSource for heapless::spsc::Consumer<'_, u8, N> {
    fn read_byte(&mut self) -> Option<u8> {
        self.dequeue()
    }
}

/// Bytes already in memory (scripts, tests).
impl ByteSource for core::slice::Iter<'_, u8> {
    fn read_byte(&mut self) -> Option<u8> {
        self.next().copied()
    }
}

/// `fmt::Write` into a fixed slice, cutting what does not fit.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}
