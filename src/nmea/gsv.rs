use tinyvec::ArrayVec;

use super::fields::{FieldKind, Fields};

/// Satellite groups carried by one GSV sentence.
pub const GROUPS_PER_SENTENCE: usize = 4;

const HEADER_FIELDS: usize = 3;
const GROUP_FIELDS: usize = 4;

/// msg_count, msg_index, sats_in_view, then (id, elevation, azimuth, snr)
/// four times
pub const SCHEMA: &[FieldKind] = &[FieldKind::Int; HEADER_FIELDS + GROUP_FIELDS * GROUPS_PER_SENTENCE];

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SatelliteInView {
    pub id: u16,
    /// Degrees, 0 to 90.
    pub elevation: u8,
    /// Degrees from true north, 0 to 359.
    pub azimuth: u16,
    /// dB-Hz, 0 when not tracking.
    pub snr: u8,
}

/// Satellites in view.
///
/// The flat `sat_id`..`snr` fields describe the first satellite of the
/// sentence, `satellites` holds every group whose id converted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct GsvRecord {
    pub message_count: u8,
    pub message_index: u8,
    pub satellites_in_view: u8,
    pub sat_id: u16,
    pub elevation: u8,
    pub azimuth: u16,
    pub snr: u8,
    pub satellites: ArrayVec<[SatelliteInView; GROUPS_PER_SENTENCE]>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for GsvRecord {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "GsvRecord {{ message: {}/{}, in_view: {}, satellites: {} }}",
            self.message_index,
            self.message_count,
            self.satellites_in_view,
            self.satellites.as_slice()
        )
    }
}

impl GsvRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        let mut satellites = ArrayVec::new();
        for group in 0..GROUPS_PER_SENTENCE {
            let base = HEADER_FIELDS + group * GROUP_FIELDS;
            if fields.is_present(base) {
                satellites.push(satellite(fields, base));
            }
        }
        let first = satellite(fields, HEADER_FIELDS);
        Self {
            message_count: fields.num(0),
            message_index: fields.num(1),
            satellites_in_view: fields.num(2),
            sat_id: first.id,
            elevation: first.elevation,
            azimuth: first.azimuth,
            snr: first.snr,
            satellites,
        }
    }

    pub fn is_last_message(&self) -> bool {
        self.message_index != 0 && self.message_index == self.message_count
    }
}

fn satellite(fields: &Fields, base: usize) -> SatelliteInView {
    SatelliteInView {
        id: fields.num(base),
        elevation: fields.num(base + 1),
        azimuth: fields.num(base + 2),
        snr: fields.num(base + 3),
    }
}
