//! Schema-driven field splitting.
//!
//! A schema lists the expected type of each comma-delimited field. Conversion
//! is permissive: an empty or malformed field becomes [`Value::Missing`] and
//! reads back as zero, it is just not counted as matched.

use tinyvec::ArrayVec;

use crate::cursor;

/// Longest schema of any decoded sentence (GSV).
pub const MAX_FIELDS: usize = 19;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    Float,
    Int,
    Char,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    #[default]
    Missing,
    Float(f32),
    Int(i32),
    Char(char),
}

impl Value {
    fn convert(raw: &[u8], kind: FieldKind) -> Self {
        let Ok(raw) = core::str::from_utf8(raw) else {
            return Value::Missing;
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Value::Missing;
        }
        match kind {
            FieldKind::Float => raw.parse().map_or(Value::Missing, Value::Float),
            FieldKind::Int => raw.parse().map_or(Value::Missing, Value::Int),
            FieldKind::Char => raw.chars().next().map_or(Value::Missing, Value::Char),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Fields {
    values: ArrayVec<[Value; MAX_FIELDS]>,
    matched: u8,
}

impl Fields {
    /// Splits sentence text on commas and converts each field by `schema`.
    ///
    /// A leading comma is skipped and everything from `*` on (the checksum)
    /// is ignored. Fields past the end of the schema are ignored, fields
    /// missing from the text read as [`Value::Missing`].
    pub fn split(text: &[u8], schema: &[FieldKind]) -> Self {
        let body = text.strip_prefix(b",").unwrap_or(text);
        let body = match cursor::position(body, b"*") {
            Some(at) => &body[..at],
            None => body,
        };

        let mut fields = Fields::default();
        let mut raw = body.split(|&b| b == b',');
        for &kind in schema.iter().take(MAX_FIELDS) {
            let value = raw
                .next()
                .map_or(Value::Missing, |field| Value::convert(field, kind));
            if value != Value::Missing {
                fields.matched += 1;
            }
            fields.values.push(value);
        }
        fields
    }

    /// Number of fields that converted successfully.
    pub fn matched(&self) -> u8 {
        self.matched
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Value {
        self.values.get(index).copied().unwrap_or_default()
    }

    pub fn is_present(&self, index: usize) -> bool {
        self.get(index) != Value::Missing
    }

    pub fn float(&self, index: usize) -> f32 {
        match self.get(index) {
            Value::Float(v) => v,
            Value::Int(v) => v as f32,
            _ => 0.0,
        }
    }

    pub fn int(&self, index: usize) -> i32 {
        match self.get(index) {
            Value::Int(v) => v,
            _ => 0,
        }
    }

    /// Integer field narrowed to `T`, zero when it does not fit.
    pub fn num<T: TryFrom<i32> + Default>(&self, index: usize) -> T {
        T::try_from(self.int(index)).unwrap_or_default()
    }

    /// Character field, `'\0'` when missing.
    pub fn char(&self, index: usize) -> char {
        match self.get(index) {
            Value::Char(c) => c,
            _ => '\0',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldKind::*;
    use super::*;

    #[test]
    fn converts_by_schema() {
        let fields = Fields::split(b",123519.00,A,08,N", &[Float, Char, Int, Char]);
        assert_eq!(fields.matched(), 4);
        assert_eq!(fields.float(0), 123519.0);
        assert_eq!(fields.char(1), 'A');
        assert_eq!(fields.int(2), 8);
        assert_eq!(fields.char(3), 'N');
    }

    #[test]
    fn malformed_and_empty_fields_are_zero() {
        let fields = Fields::split(b",abc,,4.5", &[Float, Int, Int]);
        assert_eq!(fields.matched(), 0);
        assert_eq!(fields.float(0), 0.0);
        assert_eq!(fields.int(1), 0);
        // a float where an int is expected does not match
        assert_eq!(fields.int(2), 0);
        assert!(!fields.is_present(2));
    }

    #[test]
    fn later_fields_still_convert_after_a_bad_one() {
        let fields = Fields::split(b",x,2,3", &[Int, Int, Int]);
        assert_eq!(fields.matched(), 2);
        assert_eq!(fields.int(2), 3);
    }

    #[test]
    fn checksum_is_ignored() {
        let fields = Fields::split(b",M,,0000*47", &[Char, Float, Int, Int]);
        assert_eq!(fields.matched(), 2);
        assert_eq!(fields.num::<u16>(2), 0);
        assert!(fields.is_present(2));
        assert!(!fields.is_present(3));
    }

    #[test]
    fn short_text_leaves_missing_tail() {
        let fields = Fields::split(b",1", &[Int, Int, Int]);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.matched(), 1);
        assert_eq!(fields.get(2), Value::Missing);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let fields = Fields::split(b",1,2,3,4", &[Int, Int]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.matched(), 2);
    }

    #[test]
    fn narrowing_out_of_range_is_zero() {
        let fields = Fields::split(b",300,-1", &[Int, Int]);
        assert_eq!(fields.num::<u8>(0), 0);
        assert_eq!(fields.num::<u16>(0), 300);
        assert_eq!(fields.num::<u8>(1), 0);
    }

    #[test]
    fn non_utf8_field_is_missing() {
        let fields = Fields::split(b",\xff\xfe,7", &[Int, Int]);
        assert_eq!(fields.matched(), 1);
        assert_eq!(fields.int(1), 7);
    }
}
