/// Options for decoding query strings.
///
/// # Examples
/// ```
/// use bracket_qs::DecodeOptions;
///
/// let opts = DecodeOptions::new().with_always_arrays(true);
/// assert!(opts.always_arrays);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Keep single-fragment values as one-element lists instead of
    /// collapsing them to a scalar.
    pub always_arrays: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_always_arrays(mut self, always_arrays: bool) -> Self {
        self.always_arrays = always_arrays;
        self
    }
}
