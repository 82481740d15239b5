//! NMEA 0183 sentence decoding.
//!
//! Four sentence types are decoded: GGA, GSA, GSV and RMC. Checksums are
//! carried on the wire but never verified, so a corrupted sentence that still
//! looks well formed decodes to wrong values.

pub mod decoder;
pub mod demux;
pub mod fields;
pub mod gga;
pub mod gsa;
pub mod gsv;
pub mod reader;
pub mod rmc;

pub use decoder::{Decoder, Decoders};
pub use demux::{demux, demux_with};
pub use fields::{FieldKind, Fields, Value};
pub use gga::GgaRecord;
pub use gsa::GsaRecord;
pub use gsv::{GsvRecord, SatelliteInView};
pub use reader::{NmeaReader, ReaderStats, DEFAULT_PENDING_CAPACITY};
pub use rmc::RmcRecord;

pub const END_OF_LINE: &[u8] = b"\r\n";

/// Longest sentence NMEA 0183 allows, `$` through `\n`.
pub const MAX_SENTENCE_LEN: usize = 82;

/// A GGA sentence reports a lock once at least this many fields converted.
pub const GGA_LOCK_MIN_FIELDS: u8 = 7;

/// Sentence types we know by name but do not decode.
pub const UNDECODED_TOKENS: [&[u8]; 3] = [b"GLL,", b"VTG,", b"ZDA,"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Not inside a sentence, or just finished one.
    Inactive,
    /// Start token seen, waiting for the end of the line.
    Active,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceKind {
    Gga,
    Gsa,
    Gsv,
    Rmc,
}

impl SentenceKind {
    /// Default demultiplexing priority.
    pub const ALL: [SentenceKind; 4] = [
        SentenceKind::Gga,
        SentenceKind::Gsa,
        SentenceKind::Gsv,
        SentenceKind::Rmc,
    ];

    pub fn config(self) -> &'static SentenceConfig {
        match self {
            SentenceKind::Gga => &GGA_CONFIG,
            SentenceKind::Gsa => &GSA_CONFIG,
            SentenceKind::Gsv => &GSV_CONFIG,
            SentenceKind::Rmc => &RMC_CONFIG,
        }
    }

    pub fn start_token(self) -> &'static [u8] {
        self.config().start_token
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentenceKind::Gga => "GGA",
            SentenceKind::Gsa => "GSA",
            SentenceKind::Gsv => "GSV",
            SentenceKind::Rmc => "RMC",
        }
    }
}

/// How one sentence type is found and laid out. One immutable record per type.
#[derive(Debug)]
pub struct SentenceConfig {
    pub kind: SentenceKind,
    pub start_token: &'static [u8],
    pub schema: &'static [FieldKind],
    /// Matched fields needed before the sentence counts as a lock, for types
    /// that report one.
    pub lock_min_fields: Option<u8>,
}

pub static GGA_CONFIG: SentenceConfig = SentenceConfig {
    kind: SentenceKind::Gga,
    start_token: b"GGA,",
    schema: gga::SCHEMA,
    lock_min_fields: Some(GGA_LOCK_MIN_FIELDS),
};

pub static GSA_CONFIG: SentenceConfig = SentenceConfig {
    kind: SentenceKind::Gsa,
    start_token: b"GSA,",
    schema: gsa::SCHEMA,
    lock_min_fields: None,
};

pub static GSV_CONFIG: SentenceConfig = SentenceConfig {
    kind: SentenceKind::Gsv,
    start_token: b"GSV,",
    schema: gsv::SCHEMA,
    lock_min_fields: None,
};

pub static RMC_CONFIG: SentenceConfig = SentenceConfig {
    kind: SentenceKind::Rmc,
    start_token: b"RMC,",
    schema: rmc::SCHEMA,
    lock_min_fields: None,
};

/// Decoded fields of one sentence.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Record {
    Gga(GgaRecord),
    Gsa(GsaRecord),
    Gsv(GsvRecord),
    Rmc(RmcRecord),
}

impl Record {
    pub fn empty(kind: SentenceKind) -> Self {
        match kind {
            SentenceKind::Gga => Record::Gga(GgaRecord::default()),
            SentenceKind::Gsa => Record::Gsa(GsaRecord::default()),
            SentenceKind::Gsv => Record::Gsv(GsvRecord::default()),
            SentenceKind::Rmc => Record::Rmc(RmcRecord::default()),
        }
    }

    /// Splits `text` by the type's schema and builds its record.
    pub fn decode(config: &SentenceConfig, text: &[u8]) -> (Self, u8) {
        let fields = Fields::split(text, config.schema);
        let record = match config.kind {
            SentenceKind::Gga => Record::Gga(GgaRecord::from_fields(
                &fields,
                config.lock_min_fields.unwrap_or(GGA_LOCK_MIN_FIELDS),
            )),
            SentenceKind::Gsa => Record::Gsa(GsaRecord::from_fields(&fields)),
            SentenceKind::Gsv => Record::Gsv(GsvRecord::from_fields(&fields)),
            SentenceKind::Rmc => Record::Rmc(RmcRecord::from_fields(&fields)),
        };
        (record, fields.matched())
    }

    pub fn kind(&self) -> SentenceKind {
        match self {
            Record::Gga(_) => SentenceKind::Gga,
            Record::Gsa(_) => SentenceKind::Gsa,
            Record::Gsv(_) => SentenceKind::Gsv,
            Record::Rmc(_) => SentenceKind::Rmc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configs_line_up_with_kinds() {
        for kind in SentenceKind::ALL {
            let config = kind.config();
            assert_eq!(config.kind, kind);
            assert_eq!(&config.start_token[..3], kind.as_str().as_bytes());
            assert_eq!(config.start_token.last(), Some(&b','));
        }
    }

    #[test]
    fn decode_dispatches_on_kind() {
        let (record, matched) = Record::decode(&RMC_CONFIG, b",123519,A,4807.038,N");
        assert_eq!(record.kind(), SentenceKind::Rmc);
        assert_eq!(matched, 4);
    }
}
