use super::{
    demux, Decoders, GgaRecord, GsaRecord, GsvRecord, RmcRecord, END_OF_LINE, MAX_SENTENCE_LEN,
    UNDECODED_TOKENS,
};
use crate::buf::{BoundedBuf, OverflowPolicy};
use crate::coord::Position;
use crate::cursor;
use crate::error::ReadError;
use crate::source::ByteSource;

/// Room for a handful of sentences, which covers one burst from a 1 Hz receiver.
pub const DEFAULT_PENDING_CAPACITY: usize = 512;

/// Running counters kept by an [`NmeaReader`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReaderStats {
    /// Sentences that produced a record.
    pub decoded: u32,
    /// Complete lines of a known but undecoded type such as GLL or VTG.
    pub undecoded: u32,
    /// Bytes thrown away to make room or to get rid of an overlong sentence.
    pub discarded_bytes: u32,
}

/// Pulls bytes from a [`ByteSource`] and keeps the latest record of every
/// sentence type it decodes.
///
/// Whatever is left after the last complete line stays in a fixed buffer of
/// `N` bytes and is completed by later reads.
pub struct NmeaReader<S, const N: usize = DEFAULT_PENDING_CAPACITY> {
    source: S,
    decoders: Decoders,
    pending: BoundedBuf<N>,
    stats: ReaderStats,
}

impl<S: ByteSource> NmeaReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_decoders(source, Decoders::default())
    }
}

impl<S: ByteSource, const N: usize> NmeaReader<S, N> {
    /// A reader that only decodes `decoders`, in their order.
    pub fn with_decoders(source: S, decoders: Decoders) -> Self {
        Self {
            source,
            decoders,
            pending: BoundedBuf::new(OverflowPolicy::Truncate),
            stats: ReaderStats::default(),
        }
    }

    /// Does one read from the source and decodes every sentence it completes.
    ///
    /// Returns how many records were updated. An empty read is not an error.
    pub fn poll(&mut self) -> Result<usize, ReadError<S::Error>> {
        if N == 0 {
            return Err(ReadError::ZeroCapacity);
        }
        if self.pending.is_full() {
            self.make_room();
        }

        let n = self
            .source
            .read(self.pending.spare_mut())
            .map_err(ReadError::Source)?
            .len();
        self.pending.commit(n);
        Ok(self.process())
    }

    /// Decodes bytes that arrived some other way, for example from an
    /// interrupt handler. Returns how many records were updated.
    pub fn feed(&mut self, mut bytes: &[u8]) -> usize {
        if N == 0 {
            return 0;
        }
        let mut decoded = 0;
        while !bytes.is_empty() {
            if self.pending.is_full() {
                self.make_room();
            }
            let stored = self.pending.extend_from_slice(bytes).unwrap_or(0);
            bytes = &bytes[stored..];
            decoded += self.process();
        }
        decoded
    }

    pub fn gga(&self) -> Option<&GgaRecord> {
        self.decoders.gga()
    }

    pub fn gsa(&self) -> Option<&GsaRecord> {
        self.decoders.gsa()
    }

    pub fn gsv(&self) -> Option<&GsvRecord> {
        self.decoders.gsv()
    }

    pub fn rmc(&self) -> Option<&RmcRecord> {
        self.decoders.rmc()
    }

    /// Position of the last GGA sentence, if it reported a lock.
    pub fn position(&self) -> Option<Position> {
        self.gga().filter(|gga| gga.is_locked).map(GgaRecord::position)
    }

    pub fn stats(&self) -> ReaderStats {
        self.stats
    }

    pub fn decoders(&self) -> &Decoders {
        &self.decoders
    }

    /// Bytes held over for the next read.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Runs every complete line through the decoders, then offers them the
    /// trailing partial line and keeps it.
    fn process(&mut self) -> usize {
        let Self {
            decoders,
            pending,
            stats,
            ..
        } = self;

        let mut decoded = 0;
        let mut rest = &pending[..];
        while let Some(at) = cursor::position(rest, END_OF_LINE) {
            let (mut line, tail) = rest.split_at(at + END_OF_LINE.len());
            // a sentence that lost its terminator runs into the next one
            if let Some(start) = line.iter().rposition(|&b| b == b'$').filter(|&i| i > 0) {
                log_warn!("dropping {} bytes of unterminated sentence", start);
                stats.discarded_bytes = stats.discarded_bytes.saturating_add(start as u32);
                line = &line[start..];
            }
            let (_, n) = demux(&mut decoders[..], line);
            if n == 0 && UNDECODED_TOKENS.iter().any(|t| cursor::find(line, t).1) {
                stats.undecoded = stats.undecoded.saturating_add(1);
            }
            decoded += n;
            rest = tail;
        }

        if rest.len() > MAX_SENTENCE_LEN {
            // keep the last `$` onward if it can still be a sentence
            let from = match rest.iter().rposition(|&b| b == b'$') {
                Some(i) if rest.len() - i <= MAX_SENTENCE_LEN => i,
                _ => rest.len(),
            };
            log_warn!("dropping {} bytes of unterminated input", from);
            stats.discarded_bytes = stats.discarded_bytes.saturating_add(from as u32);
            rest = &rest[from..];
        }
        if rest.is_empty() {
            decoders.reset();
        } else {
            demux(&mut decoders[..], rest);
        }

        let done = pending.len() - rest.len();
        pending.consume(done);
        stats.decoded = stats.decoded.saturating_add(decoded as u32);
        decoded
    }

    fn make_room(&mut self) {
        let from = match self.pending.iter().rposition(|&b| b == b'$') {
            Some(i) if i > 0 => i,
            _ => self.pending.len(),
        };
        log_warn!("pending buffer full, dropping {} bytes", from);
        self.stats.discarded_bytes = self.stats.discarded_bytes.saturating_add(from as u32);
        self.pending.consume(from);
        if self.pending.is_empty() {
            self.decoders.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea::{DecoderState, SentenceKind};

    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
    const RMC: &[u8] = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
    const VTG: &[u8] = b"$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48\r\n";

    /// Hands out one scripted chunk per read.
    struct Script<'a> {
        chunks: &'a [&'a [u8]],
    }

    impl ByteSource for Script<'_> {
        type Error = ();

        fn read<'b>(&mut self, buf: &'b mut [u8]) -> Result<&'b [u8], ()> {
            let Some((chunk, rest)) = self.chunks.split_first() else {
                return Ok(&buf[..0]);
            };
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            self.chunks = rest;
            Ok(&buf[..n])
        }
    }

    struct Broken;

    impl ByteSource for Broken {
        type Error = u8;

        fn read<'b>(&mut self, _buf: &'b mut [u8]) -> Result<&'b [u8], u8> {
            Err(7)
        }
    }

    #[test]
    fn partial_line_carries_over() {
        let chunks: &[&[u8]] = &[&GGA[..30], &GGA[30..]];
        let mut reader = NmeaReader::new(Script { chunks });

        assert_eq!(reader.poll(), Ok(0));
        assert_eq!(reader.pending(), &GGA[..30]);
        assert_eq!(
            reader.decoders().get(SentenceKind::Gga).map(|d| d.state()),
            Some(DecoderState::Active)
        );

        assert_eq!(reader.poll(), Ok(1));
        assert!(reader.pending().is_empty());
        assert_eq!(reader.gga().map(|g| g.satellites_used), Some(8));
        let position = reader.position().unwrap();
        assert!((position.lat - 48.1173).abs() < 1e-3);
        assert!((position.lon - 11.5167).abs() < 1e-3);
    }

    #[test]
    fn every_line_is_decoded_regardless_of_priority() {
        let mut reader = NmeaReader::new(Script { chunks: &[] });
        let burst = [RMC, VTG, GGA].concat();
        assert_eq!(reader.feed(&burst), 2);
        assert!(reader.rmc().unwrap().is_valid());
        assert!(reader.gga().unwrap().is_locked);
        assert_eq!(
            reader.stats(),
            ReaderStats {
                decoded: 2,
                undecoded: 1,
                discarded_bytes: 0
            }
        );
    }

    #[test]
    fn no_position_without_lock() {
        let mut reader = NmeaReader::new(Script { chunks: &[] });
        reader.feed(b"$GPGGA,,,,,,0,00,,,M,,M,,*66\r\n");
        assert!(reader.gga().is_some());
        assert_eq!(reader.position(), None);
    }

    #[test]
    fn source_errors_are_wrapped() {
        let mut reader = NmeaReader::new(Broken);
        assert_eq!(reader.poll(), Err(ReadError::Source(7)));
    }

    #[test]
    fn zero_capacity_is_an_error() {
        let mut reader = NmeaReader::<_, 0>::with_decoders(Script { chunks: &[] }, Decoders::default());
        assert_eq!(reader.poll(), Err(ReadError::ZeroCapacity));
        assert_eq!(reader.feed(GGA), 0);
    }

    #[test]
    fn overlong_garbage_is_dropped() {
        let mut reader = NmeaReader::new(Script { chunks: &[] });
        let noise = [b'x'; 100];
        reader.feed(&noise);
        assert!(reader.pending().is_empty());
        assert_eq!(reader.stats().discarded_bytes, 100);

        // garbage in front of a partial sentence goes, the sentence stays
        let mut input = [b'x'; 90].to_vec();
        input.extend_from_slice(&RMC[..10]);
        reader.feed(&input);
        assert_eq!(reader.pending(), &RMC[..10]);
        assert_eq!(reader.stats().discarded_bytes, 190);

        assert_eq!(reader.feed(&RMC[10..]), 1);
        assert!(reader.rmc().is_some());
    }

    #[test]
    fn buffer_smaller_than_burst_decodes_everything() {
        let mut reader = NmeaReader::<_, 96>::with_decoders(Script { chunks: &[] }, Decoders::default());
        let burst = [GGA, RMC, GGA].concat();
        assert_eq!(reader.feed(&burst), 3);
        assert_eq!(reader.stats().decoded, 3);
        assert_eq!(reader.stats().discarded_bytes, 0);
    }

    #[test]
    fn full_buffer_keeps_from_last_dollar() {
        let mut reader = NmeaReader::<_, 48>::with_decoders(Script { chunks: &[] }, Decoders::default());
        let mut input = [b'x'; 40].to_vec();
        input.extend_from_slice(b"$GPRMC,1");
        assert_eq!(reader.feed(&input), 0);
        assert_eq!(reader.pending().len(), 48);

        reader.feed(b"2");
        assert_eq!(reader.pending(), b"$GPRMC,12");
        assert_eq!(reader.stats().discarded_bytes, 40);
        assert_eq!(
            reader.decoders().get(SentenceKind::Rmc).map(|d| d.state()),
            Some(DecoderState::Active)
        );
    }

    #[test]
    fn full_buffer_without_room_drops_everything() {
        let mut reader = NmeaReader::<_, 48>::with_decoders(Script { chunks: &[] }, Decoders::default());
        reader.feed(&RMC[..48]);
        assert_eq!(
            reader.decoders().get(SentenceKind::Rmc).map(|d| d.state()),
            Some(DecoderState::Active)
        );

        reader.feed(b"x");
        assert_eq!(reader.pending(), b"x");
        assert_eq!(reader.stats().discarded_bytes, 48);
        assert_eq!(
            reader.decoders().get(SentenceKind::Rmc).map(|d| d.state()),
            Some(DecoderState::Inactive)
        );
        assert!(reader.rmc().is_none());
    }

    #[test]
    fn full_buffer_on_poll() {
        let chunks: &[&[u8]] = &[&GGA[..48], &GGA[..20]];
        let mut reader = NmeaReader::<_, 48>::with_decoders(Script { chunks }, Decoders::default());
        assert_eq!(reader.poll(), Ok(0));
        assert_eq!(reader.poll(), Ok(0));
        assert_eq!(reader.stats().discarded_bytes, 48);
        assert_eq!(reader.pending(), &GGA[..20]);
    }

    #[test]
    fn sentence_missing_its_terminator_is_dropped() {
        let mut reader = NmeaReader::new(Script { chunks: &[] });
        assert_eq!(reader.feed(&GGA[..20]), 0);
        assert_eq!(reader.feed(RMC), 1);
        assert!(reader.gga().is_none());
        assert!(reader.rmc().unwrap().is_valid());
        assert_eq!(reader.stats().discarded_bytes, 20);
        assert_eq!(
            reader.decoders().get(SentenceKind::Gga).map(|d| d.state()),
            Some(DecoderState::Inactive)
        );
    }

    #[test]
    fn counters_saturate() {
        let mut reader = NmeaReader::new(Script { chunks: &[] });
        reader.stats.decoded = u32::MAX;
        reader.stats.undecoded = u32::MAX;
        reader.feed(RMC);
        reader.feed(VTG);
        assert_eq!(reader.stats().decoded, u32::MAX);
        assert_eq!(reader.stats().undecoded, u32::MAX);
    }

    #[test]
    fn restricted_decoders() {
        let decoders = Decoders::with_priority(&[SentenceKind::Rmc]);
        let mut reader = NmeaReader::<_, 256>::with_decoders(Script { chunks: &[] }, decoders);
        assert_eq!(reader.feed(&[GGA, RMC].concat()), 1);
        assert!(reader.gga().is_none());
        assert!(reader.rmc().is_some());
    }
}
