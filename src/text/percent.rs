use std::borrow::Cow;

use memchr::memchr_iter;

use crate::{Error, Result};

const ESCAPE: u8 = b'%';

/// Percent-decode one value fragment.
///
/// `+` is left as-is. Every `%` must start a two-hex-digit escape, and the
/// decoded bytes must be valid UTF-8.
pub fn decode_fragment(fragment: &str) -> Result<String> {
    let bytes = fragment.as_bytes();
    let mut escapes = memchr_iter(ESCAPE, bytes).peekable();
    if escapes.peek().is_none() {
        return Ok(fragment.to_string());
    }
    for idx in escapes {
        let well_formed = bytes
            .get(idx + 1..idx + 3)
            .is_some_and(|digits| digits.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(Error::malformed_escape(fragment));
        }
    }
    urlencoding::decode(fragment)
        .map(Cow::into_owned)
        .map_err(|err| Error::percent_decode(fragment, err))
}

/// Percent-encode one value fragment. Everything outside `A-Z a-z 0-9 - _ . ~`
/// is escaped, which includes the `,` list separator.
pub fn encode_fragment(fragment: &str) -> Cow<'_, str> {
    urlencoding::encode(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    #[case("hello%20world", "hello world")]
    #[case("plain", "plain")]
    #[case("a+b", "a+b")]
    #[case("%2C", ",")]
    #[case("caf%C3%A9", "café")]
    #[case("100%25", "100%")]
    #[case("%2c%2C", ",,")]
    fn test_decode_fragment(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_fragment(input).unwrap(), expected);
    }

    #[rstest::rstest]
    #[case("%zz")]
    #[case("100%")]
    #[case("%2")]
    #[case("a%2g")]
    #[case("%20%")]
    fn test_decode_malformed_escape(#[case] input: &str) {
        let err = decode_fragment(input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::PercentDecode);
        assert_eq!(err.fragment.as_deref(), Some(input));
    }

    #[rstest::rstest]
    fn test_decode_invalid_utf8() {
        let err = decode_fragment("%FF%FE").unwrap_err();
        assert_eq!(err.kind, ErrorKind::PercentDecode);
        assert_eq!(err.fragment.as_deref(), Some("%FF%FE"));
    }

    #[rstest::rstest]
    fn test_encode_fragment_escapes_separators() {
        assert_eq!(encode_fragment("a,b&c=d"), "a%2Cb%26c%3Dd");
        assert_eq!(encode_fragment("safe-_.~"), "safe-_.~");
    }
}
