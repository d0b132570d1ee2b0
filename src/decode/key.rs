use smallvec::{smallvec, SmallVec};

use crate::constants::{CLOSE_BRACKET, OPEN_BRACKET};
use crate::{Error, Result};

/// Segments of one decoded key, root first. Never empty.
pub type KeyPath = SmallVec<[String; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The tail segment accepts characters.
    Accumulating,
    /// A `]` just closed the tail; only `[` or end of input may follow.
    JustClosed,
}

/// Split a raw key such as `a[b][c]` into its path segments.
///
/// The leading bare segment may be empty (`[a]` decodes to `["", "a"]`,
/// `""` to `[""]`). Once a bracket group has been opened, a further `[`
/// inside the still-open group clears the group instead of nesting, so
/// `a[b[c]` decodes to `["a", "c"]`.
///
/// # Examples
/// ```
/// use bracket_qs::decode_key_string;
///
/// let path = decode_key_string("user[address][city]")?;
/// assert_eq!(path.as_slice(), ["user", "address", "city"]);
/// # Ok::<(), bracket_qs::Error>(())
/// ```
pub fn decode_key_string(key: &str) -> Result<KeyPath> {
    let mut segments: KeyPath = smallvec![String::new()];
    let mut state = State::Accumulating;
    let mut found_open_bracket = false;

    for ch in key.chars() {
        match (ch, state) {
            (CLOSE_BRACKET, State::Accumulating) if found_open_bracket => {
                state = State::JustClosed;
            }
            (CLOSE_BRACKET, _) => return Err(Error::invalid_key_string(key)),
            (OPEN_BRACKET, State::JustClosed) => {
                segments.push(String::new());
                state = State::Accumulating;
            }
            (OPEN_BRACKET, State::Accumulating) => {
                if found_open_bracket {
                    tail(&mut segments, key)?.clear();
                } else {
                    segments.push(String::new());
                    found_open_bracket = true;
                }
            }
            (_, State::JustClosed) => return Err(Error::invalid_key_string(key)),
            (_, State::Accumulating) => tail(&mut segments, key)?.push(ch),
        }
    }

    if state == State::Accumulating && found_open_bracket {
        return Err(Error::invalid_key_string(key));
    }
    Ok(segments)
}

fn tail<'a>(segments: &'a mut KeyPath, key: &str) -> Result<&'a mut String> {
    let Some(last) = segments.last_mut() else {
        return Err(Error::invalid_key_string(key));
    };
    Ok(last)
}
