use std::ops::Range;

/// A pair of T and the span in the template source
pub type Spanned<T> = (T, Span);

/// A byte range in the template source
pub type Span = Range<usize>;

/// A span representing no location in the template source
pub const NO_SPAN: Span = 0..0;

/// Empty span at `offset`, used for errors reported at the end of input
pub fn point(offset: usize) -> Span {
    offset..offset
}

/// Smallest span covering both `a` and `b`
pub fn join(a: &Span, b: &Span) -> Span {
    a.start.min(b.start)..a.end.max(b.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_is_empty() {
        assert!(point(7).is_empty());
        assert_eq!(7..7, point(7));
    }

    #[test]
    fn join_covers_both_spans() {
        assert_eq!(2..9, join(&(4..9), &(2..3)));
        assert_eq!(0..5, join(&(0..5), &(1..2)));
    }
}
