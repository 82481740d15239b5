use super::fields::{FieldKind::*, FieldKind, Fields};

pub const SATELLITE_SLOTS: usize = 12;

/// mode, fix_type, 12 satellite ids, pdop, hdop, vdop
pub const SCHEMA: &[FieldKind] = &[
    Char, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Int, Float, Float, Float,
];

/// DOP and active satellites.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GsaRecord {
    /// `M` manual or `A` automatic 2D/3D selection.
    pub mode: char,
    /// 1 no fix, 2 2D, 3 3D.
    pub fix_type: u8,
    /// Satellites used in the fix, zero for an empty slot.
    pub satellite_ids: [u16; SATELLITE_SLOTS],
    pub pdop: f32,
    pub hdop: f32,
    pub vdop: f32,
}

impl GsaRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        let mut satellite_ids = [0; SATELLITE_SLOTS];
        for (i, id) in satellite_ids.iter_mut().enumerate() {
            *id = fields.num(2 + i);
        }
        Self {
            mode: fields.char(0),
            fix_type: fields.num(1),
            satellite_ids,
            pdop: fields.float(14),
            hdop: fields.float(15),
            vdop: fields.float(16),
        }
    }

    pub fn active_satellites(&self) -> impl Iterator<Item = u16> + '_ {
        self.satellite_ids.iter().copied().filter(|&id| id != 0)
    }
}
