use super::fields::{FieldKind::*, FieldKind, Fields};
use crate::coord::Position;

/// time, lat, lat_hemi, lon, lon_hemi, fix_status, sats_used, hdop, altitude,
/// alt_units, geoid_height, geoid_units, dgps_age, dgps_station
pub const SCHEMA: &[FieldKind] = &[
    Float, Float, Char, Float, Char, Int, Int, Float, Float, Char, Float, Char, Float, Int,
];

/// Global positioning system fix data.
///
/// Latitude and longitude are kept in their raw `ddmm.mmmm` form, use
/// [`position`](Self::position) for decimal degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GgaRecord {
    pub is_locked: bool,
    pub time: f32,
    pub latitude: f32,
    pub latitude_hemisphere: char,
    pub longitude: f32,
    pub longitude_hemisphere: char,
    pub fix_status: u8,
    pub satellites_used: u8,
    pub hdop: f32,
    pub altitude: f32,
    pub altitude_units: char,
    pub geoid_height: f32,
    pub geoid_height_units: char,
    pub dgps_age: f32,
    pub dgps_station_id: u16,
}

impl GgaRecord {
    pub fn from_fields(fields: &Fields, lock_min_fields: u8) -> Self {
        Self {
            is_locked: fields.matched() >= lock_min_fields,
            time: fields.float(0),
            latitude: fields.float(1),
            latitude_hemisphere: fields.char(2),
            longitude: fields.float(3),
            longitude_hemisphere: fields.char(4),
            fix_status: fields.num(5),
            satellites_used: fields.num(6),
            hdop: fields.float(7),
            altitude: fields.float(8),
            altitude_units: fields.char(9),
            geoid_height: fields.float(10),
            geoid_height_units: fields.char(11),
            dgps_age: fields.float(12),
            dgps_station_id: fields.num(13),
        }
    }

    pub fn position(&self) -> Position {
        Position::from_nmea(
            self.latitude,
            self.latitude_hemisphere,
            self.longitude,
            self.longitude_hemisphere,
        )
    }
}
