use serde::{Deserialize, Serialize};

/// An exclusive span of byte offsets in a source file.
///
/// Synthetic tokens inserted by the normalizer carry an empty span
/// (`start == end`) marking the insertion point.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub struct Span {
    /// A byte offset specifying the inclusive start of a span.
    pub start: usize,
    /// A byte offset specifying the exclusive end of a span.
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// An empty span at the given offset.
    #[inline]
    pub fn zero_width(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}
