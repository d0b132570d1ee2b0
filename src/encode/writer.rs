use crate::constants::{
    is_structural_key_char, CLOSE_BRACKET, KEY_VALUE_SEPARATOR, LIST_SEPARATOR, OPEN_BRACKET,
    PAIR_SEPARATOR, QUERY_PREFIX,
};
use crate::text::percent::encode_fragment;
use crate::{Error, Result};

pub(crate) struct Writer {
    buffer: String,
    pairs: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            pairs: 0,
        }
    }

    pub fn finish(self) -> String {
        self.buffer
    }

    pub fn pairs(&self) -> usize {
        self.pairs
    }

    /// Write one `key=value` pair. The key is rendered as its first segment
    /// followed by the rest in brackets; the values are percent-encoded and
    /// joined by the list separator.
    pub fn write_pair(&mut self, path: &[&str], values: &[String]) -> Result<()> {
        validate_path(path)?;

        self.buffer.push(if self.pairs == 0 {
            QUERY_PREFIX
        } else {
            PAIR_SEPARATOR
        });
        self.pairs += 1;

        self.write_key(path);
        self.buffer.push(char::from(KEY_VALUE_SEPARATOR));
        for (idx, value) in values.iter().enumerate() {
            if idx > 0 {
                self.buffer.push(LIST_SEPARATOR);
            }
            self.buffer.push_str(&encode_fragment(value));
        }
        Ok(())
    }

    fn write_key(&mut self, path: &[&str]) {
        let mut segments = path.iter();
        if let Some(first) = segments.next() {
            self.buffer.push_str(first);
        }
        for segment in segments {
            self.buffer.push(OPEN_BRACKET);
            self.buffer.push_str(segment);
            self.buffer.push(CLOSE_BRACKET);
        }
    }
}

fn validate_path(path: &[&str]) -> Result<()> {
    match path
        .iter()
        .find(|segment| segment.contains(is_structural_key_char))
    {
        Some(segment) => Err(Error::encode(
            format!("key segment \"{segment}\" contains a bracket or pair separator"),
            *segment,
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[rstest::rstest]
    fn test_writer_prefixes_and_separates() {
        let mut writer = Writer::new();
        writer.write_pair(&["a"], &["1".to_string()]).unwrap();
        writer
            .write_pair(&["b", "c"], &["x y".to_string(), "z".to_string()])
            .unwrap();

        assert_eq!(writer.pairs(), 2);
        assert_eq!(writer.finish(), "?a=1&b[c]=x%20y,z");
    }

    #[rstest::rstest]
    fn test_writer_empty_leading_segment() {
        let mut writer = Writer::new();
        writer.write_pair(&["", "a"], &["1".to_string()]).unwrap();
        assert_eq!(writer.finish(), "?[a]=1");
    }

    #[rstest::rstest]
    #[case(&["a[b"])]
    #[case(&["a", "b]"])]
    #[case(&["a&b"])]
    #[case(&["a=b"])]
    fn test_writer_rejects_structural_keys(#[case] path: &[&str]) {
        let mut writer = Writer::new();
        let err = writer.write_pair(path, &["1".to_string()]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Encode);
        assert_eq!(writer.pairs(), 0);
    }
}
