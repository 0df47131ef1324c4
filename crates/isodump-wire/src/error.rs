#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete unit could be read.
    ///
    /// `offset` is the byte position from the start of the input where
    /// the read began; `needed` and `available` describe the shortfall.
    /// This is how truncated bitmaps and field bodies surface to the
    /// record decoder, which decides whether the condition is a clean
    /// end of stream or a per-record truncation.
    #[error("input truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}
