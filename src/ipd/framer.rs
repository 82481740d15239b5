use crate::error::ReadError;
use crate::source::ByteSource;

const MAX_DIGITS: u8 = 4;

// Each state names the byte expected *next*
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderState {
    #[default]
    ExpectPlus,
    ExpectI,
    ExpectP,
    ExpectD,
    ExpectComma,
    /// Digit `n` of the declared length, 1 to 4.
    ExpectDigit(u8),
    /// Four digits read, only `:` may follow.
    ExpectColon,
    HeaderComplete,
}
use HeaderState::*;

/// Byte-at-a-time recognizer for `+IPD,<len>:` packet headers.
///
/// A byte that does not fit the header drops back to [`ExpectPlus`] without
/// being looked at again, so in `++IPD` the second `+` does not start a new
/// header.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IpdFramer {
    state: HeaderState,
    /// Declared length while the header is read, then what is left of the payload.
    length: u16,
}

impl IpdFramer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn is_complete_header(&self) -> bool {
        self.state == HeaderComplete
    }

    /// Payload bytes still to be read, once a header is complete.
    pub fn packet_length(&self) -> Option<u16> {
        self.is_complete_header().then_some(self.length)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the automaton by one byte. Returns `true` once a header is complete.
    pub fn update(&mut self, b: u8) -> bool {
        let prev = self.state;
        self.state = match (prev, b) {
            (ExpectPlus, b'+') => ExpectI,
            (ExpectI, b'I') => ExpectP,
            (ExpectP, b'P') => ExpectD,
            (ExpectD, b'D') => ExpectComma,
            (ExpectComma, b',') => {
                self.length = 0;
                ExpectDigit(1)
            }
            (ExpectDigit(n), b'0'..=b'9') => {
                self.length = self.length * 10 + u16::from(b - b'0');
                if n == MAX_DIGITS {
                    ExpectColon
                } else {
                    ExpectDigit(n + 1)
                }
            }
            (ExpectDigit(n), b':') if n > 1 => HeaderComplete,
            (ExpectColon, b':') => HeaderComplete,
            (HeaderComplete, _) => HeaderComplete,
            (ExpectPlus, _) => ExpectPlus,
            _ => {
                log_debug!("+IPD header mismatch in {:?}", prev);
                self.length = 0;
                ExpectPlus
            }
        };
        if prev != HeaderComplete && self.state == HeaderComplete {
            log_trace!("+IPD header complete, {} bytes", self.length);
        }
        self.is_complete_header()
    }

    /// Feeds bytes from `source` one at a time until a header is complete.
    ///
    /// Returns `Ok(false)` when the source runs dry first. Progress is kept, a
    /// header split across reads completes on a later call.
    pub fn find<S: ByteSource>(&mut self, source: &mut S) -> Result<bool, S::Error> {
        let mut byte = [0u8; 1];
        while !self.is_complete_header() {
            match source.read(&mut byte)? {
                [b] => {
                    self.update(*b);
                }
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// Reads payload of the current packet into `buf` and returns it.
    ///
    /// At most `min(remaining, buf.len())` bytes are read. The framer resets
    /// only once the whole payload has been read, until then later calls keep
    /// draining the same packet. Without a complete header nothing is read.
    pub fn read_packet<'a, S: ByteSource>(
        &mut self,
        source: &mut S,
        buf: &'a mut [u8],
    ) -> Result<&'a [u8], ReadError<S::Error>> {
        if buf.is_empty() {
            return Err(ReadError::ZeroCapacity);
        }
        if !self.is_complete_header() {
            return Ok(&buf[..0]);
        }
        if self.length == 0 {
            self.reset();
            return Ok(&buf[..0]);
        }

        let want = buf.len().min(usize::from(self.length));
        let (dest, _) = buf.split_at_mut(want);
        let read = source.read(dest).map_err(ReadError::Source)?;
        self.length -= read.len() as u16;
        if self.length == 0 {
            self.reset();
        }
        Ok(read)
    }
}
