use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

/// Half-open index bounds for [`Matrix::split`](crate::Matrix::split)
///
/// Bounds follow slice semantics: a negative bound counts from the end, an omitted bound
/// means the full extent, and bounds past either end are clamped. A span whose start lies
/// after its end selects nothing.
///
/// Ordinary `usize` ranges convert into a `Span`, so `m.split(0..2, 3..)` works directly. Use
/// [`Span::new`] for negative bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    start: Option<isize>,
    end: Option<isize>,
}

impl Span {
    /// The full extent, equivalent to `..`
    pub const FULL: Span = Span {
        start: None,
        end: None,
    };

    #[inline]
    pub fn new(start: Option<isize>, end: Option<isize>) -> Self {
        Span { start, end }
    }

    /// Resolves the bounds against a dimension of length `len`
    pub fn resolve(&self, len: usize) -> Range<usize> {
        let start = self.start.map_or(0, |b| resolve_bound(b, len));
        let end = self.end.map_or(len, |b| resolve_bound(b, len));
        if start > end {
            start..start
        } else {
            start..end
        }
    }
}

#[inline]
fn resolve_bound(bound: isize, len: usize) -> usize {
    if bound < 0 {
        len.saturating_sub(bound.unsigned_abs())
    } else {
        bound.unsigned_abs().min(len)
    }
}

#[inline]
fn to_bound(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

impl From<Range<usize>> for Span {
    fn from(value: Range<usize>) -> Self {
        Span::new(Some(to_bound(value.start)), Some(to_bound(value.end)))
    }
}

impl From<RangeFrom<usize>> for Span {
    fn from(value: RangeFrom<usize>) -> Self {
        Span::new(Some(to_bound(value.start)), None)
    }
}

impl From<RangeTo<usize>> for Span {
    fn from(value: RangeTo<usize>) -> Self {
        Span::new(None, Some(to_bound(value.end)))
    }
}

impl From<RangeFull> for Span {
    fn from(_: RangeFull) -> Self {
        Span::FULL
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn resolve_plain() {
        assert_eq!(Span::from(1..3).resolve(5), 1..3);
        assert_eq!(Span::from(2..).resolve(5), 2..5);
        assert_eq!(Span::from(..4).resolve(5), 0..4);
        assert_eq!(Span::from(..).resolve(5), 0..5);
    }

    #[test]
    fn resolve_negative_and_clamped() {
        assert_eq!(Span::new(Some(-2), None).resolve(5), 3..5);
        assert_eq!(Span::new(None, Some(-1)).resolve(5), 0..4);
        assert_eq!(Span::new(Some(-10), Some(2)).resolve(5), 0..2);
        assert_eq!(Span::from(3..100).resolve(5), 3..5);
        assert_eq!(Span::new(Some(4), Some(2)).resolve(5), 4..4);
    }
}
