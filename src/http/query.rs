//! URL query string decoder.
//!
//! Parses `key1=val1&key2=val2` strings into an ordered parameter map,
//! percent-decoding each key and value independently.

use memchr::memchr;
use std::{error, fmt};

/// Decoded query parameters in first-seen order.
///
/// Duplicate keys keep their original position and take the last value,
/// matching standard `LinkedHashMap`-style query semantics. Values stay
/// strings; numeric interpretation is up to each handler.
///
/// # Examples
/// ```
/// use funweb::query::QueryParams;
///
/// let params = QueryParams::parse("q=hello+world%2Fme&bob=5").unwrap();
/// assert_eq!(params.get("q"), Some("hello world/me"));
/// assert_eq!(params.get("bob"), Some("5"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw query string (no leading `?`).
    ///
    /// An empty input yields an empty map. Every `&`-separated pair must
    /// contain a `=`; a pair without one is a decode error rather than a
    /// silently recovered value.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSeparator`]: a pair has no `=`
    /// - [`Error::InvalidEscape`]: a `%` escape is truncated or not hex
    /// - [`Error::InvalidUtf8`]: decoded bytes are not valid UTF-8
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let mut params = QueryParams::default();
        if raw.is_empty() {
            return Ok(params);
        }

        let data = raw.as_bytes();
        let mut start = 0;
        while start < data.len() {
            let end = memchr(b'&', &data[start..])
                .map(|pos| start + pos)
                .unwrap_or(data.len());
            let pair = &data[start..end];

            let eq = memchr(b'=', pair).ok_or(Error::MissingSeparator)?;
            let key = percent_decode(&pair[..eq])?;
            let value = percent_decode(&pair[eq + 1..])?;
            params.insert(key, value);

            start = end + 1;
        }

        Ok(params)
    }

    /// Returns the value for `key`, if present.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` when `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of distinct parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when no parameters were decoded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    // Last write wins, first-seen position kept.
    fn insert(&mut self, key: String, value: String) {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }
}

/// Reverses URL percent-escaping: `+` becomes a space, `%XX` becomes the
/// byte `0xXX`, everything else passes through. The decoded bytes must form
/// valid UTF-8 text.
pub fn percent_decode(raw: &[u8]) -> Result<String, Error> {
    let mut bytes = Vec::with_capacity(raw.len());

    let mut i = 0;
    while i < raw.len() {
        match raw[i] {
            b'+' => {
                bytes.push(b' ');
                i += 1;
            }
            b'%' => {
                let hex = raw.get(i + 1..i + 3).ok_or(Error::InvalidEscape)?;
                let high = hex_value(hex[0]).ok_or(Error::InvalidEscape)?;
                let low = hex_value(hex[1]).ok_or(Error::InvalidEscape)?;
                bytes.push(high << 4 | low);
                i += 3;
            }
            byte => {
                bytes.push(byte);
                i += 1;
            }
        }
    }

    match simdutf8::basic::from_utf8(&bytes) {
        Ok(text) => Ok(text.to_owned()),
        Err(_) => Err(Error::InvalidUtf8),
    }
}

#[inline(always)]
const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode failures for query strings.
///
/// Callers map every variant to a client-error response; none of them may
/// surface as a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A `&`-separated pair contained no `=`.
    MissingSeparator,
    /// A `%` escape was truncated or contained non-hex digits.
    InvalidEscape,
    /// The decoded bytes were not valid UTF-8.
    InvalidUtf8,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingSeparator => write!(f, "query pair is missing '='"),
            Error::InvalidEscape => write!(f, "malformed percent escape in query"),
            Error::InvalidUtf8 => write!(f, "query decodes to invalid UTF-8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal encoder for round-trip checks; reserved characters and
    // non-ASCII are always escaped, spaces use '+'.
    fn encode(text: &str) -> String {
        let mut out = String::new();
        for byte in text.bytes() {
            match byte {
                b' ' => out.push('+'),
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                    out.push(byte as char)
                }
                _ => out.push_str(&format!("%{:02X}", byte)),
            }
        }
        out
    }

    #[test]
    fn basic() {
        let params = QueryParams::parse("a=1&b=2").unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.get("b"), Some("2"));
        assert!(params.get("c").is_none());
    }

    #[test]
    fn empty_input_is_empty_map() {
        let params = QueryParams::parse("").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn empty_value() {
        let params = QueryParams::parse("name=").unwrap();
        assert_eq!(params.get("name"), Some(""));
    }

    #[test]
    fn plus_and_escapes() {
        let params = QueryParams::parse("q=hello+world%2Fme&bob=5").unwrap();

        assert_eq!(params.get("q"), Some("hello world/me"));
        assert_eq!(params.get("bob"), Some("5"));
    }

    #[test]
    fn escaped_key() {
        let params = QueryParams::parse("my%20key=my%3Dvalue").unwrap();
        assert_eq!(params.get("my key"), Some("my=value"));
    }

    #[test]
    fn duplicate_key_last_wins() {
        let params = QueryParams::parse("key=1&other=x&key=2").unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("key"), Some("2"));
    }

    #[test]
    fn missing_separator_is_an_error() {
        assert_eq!(QueryParams::parse("flag"), Err(Error::MissingSeparator));
        assert_eq!(QueryParams::parse("a=1&flag"), Err(Error::MissingSeparator));
        assert_eq!(QueryParams::parse("a=1&&b=2"), Err(Error::MissingSeparator));
    }

    #[test]
    fn malformed_escapes() {
        assert_eq!(QueryParams::parse("a=%2"), Err(Error::InvalidEscape));
        assert_eq!(QueryParams::parse("a=%zz"), Err(Error::InvalidEscape));
        assert_eq!(QueryParams::parse("a=100%"), Err(Error::InvalidEscape));
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(QueryParams::parse("a=%FF%FE"), Err(Error::InvalidUtf8));
    }

    #[test]
    fn non_ascii_decodes_as_utf8() {
        let params = QueryParams::parse("name=%C3%A9clair").unwrap();
        assert_eq!(params.get("name"), Some("éclair"));
    }

    #[test]
    fn round_trip() {
        let cases = [
            ("plain", "value"),
            ("with space", "a b c"),
            ("amp&key", "amp&value"),
            ("eq=key", "eq=value"),
            ("slash/key", "users/torvalds/repos"),
            ("mixed &=/ ", " /=& "),
        ];

        for (key, value) in cases {
            let raw = format!("{}={}", encode(key), encode(value));
            let params = QueryParams::parse(&raw).unwrap();

            assert_eq!(params.get(key), Some(value), "raw: {raw}");
        }
    }
}
