//! Byte-span combinators.
//!
//! Every function takes a span and hands back what is left of it. A token that
//! is not present leaves the span untouched, so callers have to check the
//! `found` flag before assuming any progress was made.

/// Finds the first occurrence of `token` and returns the span after it.
///
/// When `token` is absent the whole `haystack` is returned with `found = false`.
pub fn find<'a>(haystack: &'a [u8], token: &[u8]) -> (&'a [u8], bool) {
    match position(haystack, token) {
        Some(at) => (&haystack[at + token.len()..], true),
        None => (haystack, false),
    }
}

/// Copies the bytes in front of `token` into `dest` and consumes the token.
///
/// Returns `(copied, remainder, found)`. Bytes that do not fit in `dest` are
/// dropped, the remainder still starts after the token. The token itself is
/// not copied. When `token` is absent nothing is copied and the whole
/// `haystack` is returned.
pub fn fill_upto<'a>(haystack: &'a [u8], token: &[u8], dest: &mut [u8]) -> (usize, &'a [u8], bool) {
    match position(haystack, token) {
        Some(at) => {
            let copied = at.min(dest.len());
            dest[..copied].copy_from_slice(&haystack[..copied]);
            (copied, &haystack[at + token.len()..], true)
        }
        None => (0, haystack, false),
    }
}

/// Drops up to `n` bytes from the front of `haystack`.
pub fn skip(haystack: &[u8], n: usize) -> &[u8] {
    &haystack[n.min(haystack.len())..]
}

/// Locates one sentence between `start` and `end`.
///
/// Returns `(text, remainder, found)`. The text begins at the last byte of
/// the start token, so for `b"GGA,"` it keeps the leading comma, and it stops
/// short of the end token. The remainder begins after the end token.
///
/// If either token is missing, `text` is empty and the whole `chunk` comes
/// back as the remainder: more bytes are needed.
pub fn sentence<'a>(chunk: &'a [u8], start: &[u8], end: &[u8]) -> (&'a [u8], &'a [u8], bool) {
    let Some(at) = position(chunk, start) else {
        return (&[], chunk, false);
    };
    let text_start = at + start.len().saturating_sub(1);
    let body = &chunk[text_start..];
    match position(body, end) {
        Some(len) => (&body[..len], &body[len + end.len()..], true),
        None => (&[], chunk, false),
    }
}

pub(crate) fn position(haystack: &[u8], token: &[u8]) -> Option<usize> {
    if token.is_empty() {
        return Some(0);
    }
    haystack.windows(token.len()).position(|w| w == token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_consumes_through_token() {
        let (rest, found) = find(b"$GPGGA,1,2", b"GGA,");
        assert!(found);
        assert_eq!(rest, b"1,2");
    }

    #[test]
    fn find_missing_token_returns_everything() {
        let input = b"$GPGLL,4916.45,N";
        let (rest, found) = find(input, b"GGA,");
        assert!(!found);
        assert_eq!(rest, input);
    }

    #[test]
    fn find_on_short_haystack() {
        let (rest, found) = find(b"\r", b"\r\n");
        assert!(!found);
        assert_eq!(rest, b"\r");
    }

    #[test]
    fn fill_upto_copies_prefix() {
        let mut dest = [0u8; 8];
        let (copied, rest, found) = fill_upto(b"abc\r\nxyz", b"\r\n", &mut dest);
        assert!(found);
        assert_eq!(copied, 3);
        assert_eq!(&dest[..copied], b"abc");
        assert_eq!(rest, b"xyz");
    }

    #[test]
    fn fill_upto_truncates_to_destination() {
        let mut dest = [0u8; 2];
        let (copied, rest, found) = fill_upto(b"abcdef:tail", b":", &mut dest);
        assert!(found);
        assert_eq!(copied, 2);
        assert_eq!(&dest, b"ab");
        assert_eq!(rest, b"tail");
    }

    #[test]
    fn fill_upto_without_token_copies_nothing() {
        let mut dest = [0u8; 4];
        let (copied, rest, found) = fill_upto(b"abc", b":", &mut dest);
        assert!(!found);
        assert_eq!(copied, 0);
        assert_eq!(rest, b"abc");
    }

    #[test]
    fn skip_is_bounded() {
        assert_eq!(skip(b"abcdef", 2), b"cdef");
        assert_eq!(skip(b"abc", 10), b"");
    }

    #[test]
    fn sentence_keeps_leading_comma() {
        let (text, rest, found) = sentence(b"$GPGGA,1,2,3\r\n$GPRMC", b"GGA,", b"\r\n");
        assert!(found);
        assert_eq!(text, b",1,2,3");
        assert_eq!(rest, b"$GPRMC");
    }

    #[test]
    fn sentence_without_terminator_needs_more_bytes() {
        let input = b"$GPGGA,1,2,3";
        let (text, rest, found) = sentence(input, b"GGA,", b"\r\n");
        assert!(!found);
        assert!(text.is_empty());
        assert_eq!(rest, input);
    }

    #[test]
    fn sentence_terminator_must_follow_start() {
        let input = b"\r\n$GPGGA,1";
        let (_, rest, found) = sentence(input, b"GGA,", b"\r\n");
        assert!(!found);
        assert_eq!(rest, input);
    }
}
