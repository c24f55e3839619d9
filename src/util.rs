/*!
Result types shared by the search entry points.
*/

use std::ops::RangeInclusive;

/// A non-empty match found by a search.
///
/// Both bounds are `char` offsets into the searched text and both are
/// inclusive, so a match of a single symbol has `start == end`.
#[derive(Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    start: usize,
    end: usize,
}

impl Match {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset of the last symbol of the match.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of symbols matched, never zero.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Returns the matched part of `subject`, which must be the searched
    /// text. Offsets beyond the end of `subject` are clamped.
    pub fn slice<'s>(&self, subject: &'s str) -> &'s str {
        let byte = |offset: usize| {
            subject
                .char_indices()
                .nth(offset)
                .map_or(subject.len(), |(index, _)| index)
        };
        &subject[byte(self.start)..byte(self.end + 1)]
    }
}

impl From<Match> for RangeInclusive<usize> {
    fn from(m: Match) -> Self {
        m.range()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let m = Match::new(1, 5);
        assert_eq!(m.len(), 5);
        assert_eq!(m.range(), 1..=5);
        assert_eq!(m.slice("xabbbcx"), "abbbc");
        assert_eq!(Match::new(2, 2).slice("abc"), "c");
    }

    #[test]
    fn slice_counts_chars() {
        assert_eq!(Match::new(1, 2).slice("aéüb"), "éü");
    }

    #[test]
    fn ordered_by_start_then_end() {
        let mut found = vec![Match::new(3, 4), Match::new(0, 2), Match::new(0, 1)];
        found.sort();
        assert_eq!(found, [Match::new(0, 1), Match::new(0, 2), Match::new(3, 4)]);
    }
}
