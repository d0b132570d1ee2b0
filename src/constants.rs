pub const QUERY_PREFIX: char = '?';

pub const PAIR_SEPARATOR: char = '&';

pub const KEY_VALUE_SEPARATOR: u8 = b'=';

pub const LIST_SEPARATOR: char = ',';

pub const OPEN_BRACKET: char = '[';

pub const CLOSE_BRACKET: char = ']';

/// Characters that cannot appear inside an encoded key segment.
#[inline]
pub fn is_structural_key_char(ch: char) -> bool {
    matches!(ch, OPEN_BRACKET | CLOSE_BRACKET | PAIR_SEPARATOR | '=')
}
