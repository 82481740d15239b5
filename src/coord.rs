use core::fmt;

/// Converts an NMEA `ddmm.mmmm` / `dddmm.mmmm` value and its hemisphere letter
/// to signed decimal degrees.
///
/// Southern and western hemispheres are negative. Any other letter, including
/// an empty field, is treated as positive.
///
/// Only apply this to the raw field value: feeding it an already converted
/// value gives garbage.
pub fn to_decimal_degrees(raw: f32, hemisphere: char) -> f32 {
    // `as i32` truncates toward zero, which is what we want for degrees
    let degrees = (raw / 100.0) as i32 as f32;
    let minutes = raw - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;
    match hemisphere {
        'S' | 'W' => -decimal,
        _ => decimal,
    }
}

/// Latitude and longitude in signed decimal degrees.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position {
    pub lat: f32,
    pub lon: f32,
}

impl Position {
    pub fn from_nmea(lat: f32, lat_hemisphere: char, lon: f32, lon_hemisphere: char) -> Self {
        Self {
            lat: to_decimal_degrees(lat, lat_hemisphere),
            lon: to_decimal_degrees(lon, lon_hemisphere),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.lat.abs(),
            if self.lat >= 0.0 { 'N' } else { 'S' },
            self.lon.abs(),
            if self.lon >= 0.0 { 'E' } else { 'W' }
        )
    }
}
