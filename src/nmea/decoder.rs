use tinyvec::ArrayVec;

use super::{
    DecoderState, GgaRecord, GsaRecord, GsvRecord, Record, RmcRecord, SentenceConfig,
    SentenceKind, END_OF_LINE,
};
use crate::cursor;

/// Decoder for one sentence type. Lives as long as the driver and overwrites
/// its record in place every time a sentence completes.
#[derive(Debug, Copy, Clone)]
pub struct Decoder {
    config: &'static SentenceConfig,
    state: DecoderState,
    record: Record,
    matched: u8,
    decoded: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(SentenceKind::Gga)
    }
}

impl Decoder {
    pub fn new(kind: SentenceKind) -> Self {
        Self {
            config: kind.config(),
            state: DecoderState::Inactive,
            record: Record::empty(kind),
            matched: 0,
            decoded: false,
        }
    }

    pub fn kind(&self) -> SentenceKind {
        self.config.kind
    }

    pub fn start_token(&self) -> &'static [u8] {
        self.config.start_token
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = DecoderState::Inactive;
    }

    /// Decodes this decoder's sentence out of `chunk` and returns the bytes
    /// after its line terminator.
    ///
    /// Without a start token the decoder stays inactive. With a start token
    /// but no terminator yet it becomes active and the whole `chunk` comes
    /// back, so it can be offered again once more bytes have arrived.
    pub fn parse<'a>(&mut self, chunk: &'a [u8]) -> &'a [u8] {
        self.state = DecoderState::Active;
        let (text, remainder, found) = cursor::sentence(chunk, self.config.start_token, END_OF_LINE);
        if !found {
            if !cursor::find(chunk, self.config.start_token).1 {
                self.state = DecoderState::Inactive;
            }
            return chunk;
        }

        let (record, matched) = Record::decode(self.config, text);
        self.record = record;
        self.matched = matched;
        self.decoded = true;
        self.state = DecoderState::Inactive;
        log_trace!(
            "decoded {} sentence, {} fields matched",
            self.config.kind.as_str(),
            matched
        );
        remainder
    }

    /// Last decoded record, `None` until a sentence has completed.
    pub fn record(&self) -> Option<&Record> {
        self.decoded.then_some(&self.record)
    }

    /// Fields that converted in the last decoded sentence.
    pub fn matched_fields(&self) -> u8 {
        self.matched
    }
}

/// The decoders a driver routes sentences to, in priority order.
#[derive(Debug, Clone)]
pub struct Decoders(ArrayVec<[Decoder; 4]>);

impl Default for Decoders {
    fn default() -> Self {
        Self::with_priority(&SentenceKind::ALL)
    }
}

impl core::ops::Deref for Decoders {
    type Target = [Decoder];

    fn deref(&self) -> &Self::Target {
        self.0.as_slice()
    }
}

impl core::ops::DerefMut for Decoders {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut_slice()
    }
}

impl Decoders {
    /// One decoder per listed kind, tried in the listed order. Repeated kinds
    /// are ignored, unlisted kinds are not decoded.
    pub fn with_priority(order: &[SentenceKind]) -> Self {
        let mut decoders: ArrayVec<[Decoder; 4]> = ArrayVec::new();
        for &kind in order {
            if !decoders.iter().any(|d| d.kind() == kind) {
                decoders.push(Decoder::new(kind));
            }
        }
        Self(decoders)
    }

    pub fn get(&self, kind: SentenceKind) -> Option<&Decoder> {
        self.0.iter().find(|d| d.kind() == kind)
    }

    pub fn reset(&mut self) {
        self.0.iter_mut().for_each(Decoder::reset);
    }

    pub fn gga(&self) -> Option<&GgaRecord> {
        match self.get(SentenceKind::Gga)?.record()? {
            Record::Gga(r) => Some(r),
            _ => None,
        }
    }

    pub fn gsa(&self) -> Option<&GsaRecord> {
        match self.get(SentenceKind::Gsa)?.record()? {
            Record::Gsa(r) => Some(r),
            _ => None,
        }
    }

    pub fn gsv(&self) -> Option<&GsvRecord> {
        match self.get(SentenceKind::Gsv)?.record()? {
            Record::Gsv(r) => Some(r),
            _ => None,
        }
    }

    pub fn rmc(&self) -> Option<&RmcRecord> {
        match self.get(SentenceKind::Rmc)?.record()? {
            Record::Rmc(r) => Some(r),
            _ => None,
        }
    }
}
