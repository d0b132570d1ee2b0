use std::string::FromUtf8Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidQueryString,
    InvalidKeyValueString,
    InvalidKeyString,
    PercentDecode,
    Encode,
    Serialize,
    Deserialize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Encode,
    Decode,
}

/// Error returned by every decode and encode entry point.
///
/// `fragment` holds the raw piece of input that triggered the failure (the
/// pair token, the key token, the value fragment or the key segment) so the
/// caller can report it without re-scanning the query.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub stage: ErrorStage,
    pub message: String,
    pub fragment: Option<String>,
    #[source]
    source: Option<FromUtf8Error>,
}

impl Error {
    fn new(kind: ErrorKind, stage: ErrorStage, message: String, fragment: Option<String>) -> Self {
        Self {
            kind,
            stage,
            message,
            fragment,
            source: None,
        }
    }

    pub fn invalid_query_string() -> Self {
        Self::new(
            ErrorKind::InvalidQueryString,
            ErrorStage::Decode,
            "query string must start with '?'".to_string(),
            None,
        )
    }

    pub fn invalid_key_value_string(pair: impl Into<String>) -> Self {
        let pair = pair.into();
        Self::new(
            ErrorKind::InvalidKeyValueString,
            ErrorStage::Decode,
            format!("invalid key-value pair \"{pair}\": expected exactly one '='"),
            Some(pair),
        )
    }

    pub fn invalid_key_string(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::new(
            ErrorKind::InvalidKeyString,
            ErrorStage::Decode,
            format!("invalid key \"{key}\": malformed bracket nesting"),
            Some(key),
        )
    }

    pub fn percent_decode(fragment: impl Into<String>, source: FromUtf8Error) -> Self {
        let fragment = fragment.into();
        let mut err = Self::new(
            ErrorKind::PercentDecode,
            ErrorStage::Decode,
            format!("percent-decoding \"{fragment}\" failed: {source}"),
            Some(fragment),
        );
        err.source = Some(source);
        err
    }

    pub fn malformed_escape(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self::new(
            ErrorKind::PercentDecode,
            ErrorStage::Decode,
            format!(
                "percent-decoding \"{fragment}\" failed: '%' must be followed by two hex digits"
            ),
            Some(fragment),
        )
    }

    pub fn encode(message: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Encode,
            ErrorStage::Encode,
            message.into(),
            Some(fragment.into()),
        )
    }

    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Serialize,
            ErrorStage::Encode,
            message.into(),
            None,
        )
    }

    pub fn deserialize(message: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::Deserialize,
            ErrorStage::Decode,
            message.into(),
            None,
        )
    }
}
