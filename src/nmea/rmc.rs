use chrono::{NaiveDate, NaiveDateTime};

use super::fields::{FieldKind::*, FieldKind, Fields};
use crate::coord::Position;

/// time, status, lat, lat_hemi, lon, lon_hemi, speed, track_angle, date,
/// mag_variation, mag_direction
pub const SCHEMA: &[FieldKind] = &[
    Float, Char, Float, Char, Float, Char, Float, Float, Int, Float, Char,
];

/// Recommended minimum navigation data.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RmcRecord {
    /// UTC `hhmmss.ss`.
    pub time: f32,
    /// `A` active, `V` void.
    pub status: char,
    pub latitude: f32,
    pub lat_hemisphere: char,
    pub longitude: f32,
    pub lon_hemisphere: char,
    /// Knots over ground.
    pub speed: f32,
    /// Degrees true.
    pub track_angle: f32,
    /// `ddmmyy`.
    pub date: u32,
    pub magnetic_variation: f32,
    pub magnetic_direction: char,
    /// Fields that converted successfully.
    pub field_count: u8,
}

impl RmcRecord {
    pub fn from_fields(fields: &Fields) -> Self {
        Self {
            time: fields.float(0),
            status: fields.char(1),
            latitude: fields.float(2),
            lat_hemisphere: fields.char(3),
            longitude: fields.float(4),
            lon_hemisphere: fields.char(5),
            speed: fields.float(6),
            track_angle: fields.float(7),
            date: fields.num(8),
            magnetic_variation: fields.float(9),
            magnetic_direction: fields.char(10),
            field_count: fields.matched(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == 'A'
    }

    pub fn position(&self) -> Position {
        Position::from_nmea(
            self.latitude,
            self.lat_hemisphere,
            self.longitude,
            self.lon_hemisphere,
        )
    }

    /// UTC date and time of the fix. Two digit years are taken as 20xx.
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        if self.date == 0 || self.time < 0.0 {
            return None;
        }
        let day = self.date / 10_000;
        let month = self.date / 100 % 100;
        let year = 2000 + (self.date % 100) as i32;

        let whole = self.time as u32;
        let millis = ((self.time - whole as f32) * 1000.0) as u32;
        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(
            whole / 10_000,
            whole / 100 % 100,
            whole % 100,
            millis.min(999),
        )
    }
}
