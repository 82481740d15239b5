#![cfg_attr(not(test), no_std)]

//! Streaming NMEA 0183 decoding for serial GPS receivers.
//!
//! Bytes come in through a [`ByteSource`] in chunks of any size. The
//! [`NmeaReader`] keeps a fixed-capacity accumulation buffer, hands it to the
//! [`demux`](nmea::demux()) routine which routes each sentence to its
//! [`Decoder`](nmea::Decoder), and carries any partial sentence over to the
//! next call. [`IpdReader`] strips `+IPD,<len>:` framing for receivers reached
//! through a packet modem instead of a raw UART.

use core::fmt::Write;

use tinyvec::ArrayVec;

mod fmt;

pub mod buf;
pub mod coord;
pub mod cursor;
pub mod error;
pub mod ipd;
pub mod nmea;
pub mod source;

pub use buf::{BoundedBuf, OverflowPolicy};
pub use coord::{to_decimal_degrees, Position};
pub use error::{BufError, ReadError};
pub use ipd::{IpdFramer, IpdReader};
pub use nmea::{DecoderState, NmeaReader, SentenceKind};
pub use source::{ByteSource, NbSource};

/// `core::fmt::Write` into a fixed array. Output past `N` bytes is dropped.
pub struct FmtBuf<const N: usize = 256>(pub ArrayVec<[u8; N]>);

impl<const N: usize> Write for FmtBuf<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for b in s.bytes() {
            self.0.try_push(b);
        }
        Ok(())
    }
}

impl<const N: usize> FmtBuf<N> {
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.0.as_slice()).ok()
    }

    pub fn new() -> Self {
        Self(Default::default())
    }
}

impl<const N: usize> Default for FmtBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}
