//! Simulation of an [`Automaton`] over text.
//!
//! Both entry points walk the input once and keep their state as bit vectors,
//! so the running time is bounded by the input length times the number of
//! positions; nothing is ever retried.

use log::{debug, trace};

use crate::{bitvec::BitVec, glushkov::automaton::Automaton, util::Match};

/// Returns true when the whole of `word` is matched by the automaton.
pub fn matches(automaton: &Automaton, word: &str) -> bool {
    let mut state = automaton.initial().clone();
    for c in word.chars() {
        state = automaton.step(&state, c);
        // Nothing leaves the dead state.
        if state.none() {
            return false;
        }
    }
    state.contains(0)
}

/// An in-progress search anchored at `start`.
#[derive(Debug)]
struct Candidate {
    state: BitVec,
    start: usize,
    best_end: Option<usize>,
}

/// Finds matches of the automaton inside `text`.
///
/// A candidate match is started at every offset and all candidates advance
/// together, one symbol at a time. A candidate reports its longest accepted
/// span once it can go no further. As soon as a candidate accepts, every
/// candidate that started after it is abandoned without being reported, so
/// an earlier match always wins over an overlapping later one.
///
/// Offsets count `char`s and the end of a [`Match`] is inclusive. Empty
/// matches are never reported. Matches are returned sorted by start, then
/// end.
pub fn search(automaton: &Automaton, text: &str) -> Vec<Match> {
    let mut found = Vec::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    for (offset, c) in text.chars().enumerate() {
        candidates.push(Candidate {
            state: automaton.initial().clone(),
            start: offset,
            best_end: None,
        });

        let mut i = 0;
        while i < candidates.len() {
            let next = automaton.step(&candidates[i].state, c);
            if next.none() {
                let candidate = candidates.remove(i);
                if let Some(end) = candidate.best_end {
                    trace!("candidate at {} ends at {end}", candidate.start);
                    found.push(Match::new(candidate.start, end));
                }
                continue;
            }
            let accepting = next.contains(0);
            let candidate = &mut candidates[i];
            candidate.state = next;
            if accepting {
                candidate.best_end = Some(offset);
                let dropped = candidates.len() - (i + 1);
                if dropped > 0 {
                    trace!("accept at {offset} abandons {dropped} later candidates");
                }
                candidates.truncate(i + 1);
                break;
            }
            i += 1;
        }
    }

    found.extend(
        candidates
            .into_iter()
            .filter_map(|candidate| Some(Match::new(candidate.start, candidate.best_end?))),
    );
    found.sort();
    debug!("search found {} matches", found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use quickcheck::quickcheck;

    fn spans(pattern: &str, text: &str) -> Vec<(usize, usize)> {
        let aut = compile(pattern).unwrap();
        search(&aut, text)
            .into_iter()
            .map(|m| (m.start(), m.end()))
            .collect()
    }

    #[test]
    fn full_match() {
        let aut = compile("(a|b)*c").unwrap();
        assert!(matches(&aut, "c"));
        assert!(matches(&aut, "aabbc"));
        assert!(!matches(&aut, "aab"));
        assert!(!matches(&aut, "aabbcc"));
        assert!(!matches(&aut, ""));
    }

    #[test]
    fn empty_word_needs_nullable_pattern() {
        assert!(matches(&compile("a*").unwrap(), ""));
        assert!(matches(&compile("(a|b*)").unwrap(), ""));
        assert!(!matches(&compile("a+").unwrap(), ""));
        assert!(!matches(&compile("ab*").unwrap(), ""));
    }

    #[test]
    fn symbols_outside_the_alphabet() {
        let aut = compile("é+").unwrap();
        assert!(matches(&aut, "ééé"));
        assert!(!matches(&aut, "e"));
    }

    #[test]
    fn single_match_inside_text() {
        assert_eq!(spans("ab*c", "xabbbcx"), [(1, 5)]);
        assert_eq!(spans("ab*c", "abbbc"), [(0, 4)]);
    }

    #[test]
    fn longest_end_is_reported() {
        assert_eq!(spans("a+", "baaab"), [(1, 3)]);
        assert_eq!(spans("ab|abcd", "abcd"), [(0, 3)]);
        // The best end is kept once the candidate overshoots.
        assert_eq!(spans("ab|abcd", "abcx"), [(0, 1)]);
    }

    #[test]
    fn disjoint_matches() {
        assert_eq!(spans("ab", "abxab"), [(0, 1), (3, 4)]);
        assert_eq!(spans("a", "aaa"), [(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn accepting_candidate_abandons_later_starts() {
        // The candidate started at 0 accepts at 1 and abandons the one
        // started at 1, which would otherwise have matched "bc".
        assert_eq!(spans("ab|bc", "abc"), [(0, 1)]);
        // Later candidates are only abandoned when an earlier one accepts.
        assert_eq!(spans("abc|bcd", "abcd"), [(0, 2)]);
        assert_eq!(spans("abx|bcd", "abcd"), [(1, 3)]);
    }

    #[test]
    fn earlier_candidate_survives_after_later_match() {
        // The candidate at 0 accepts "aa" but keeps reading towards "aaab",
        // so the one started at 2 runs alongside it and is reported too.
        assert_eq!(spans("aaab|aa", "aaaa"), [(0, 1), (2, 3)]);
    }

    #[test]
    fn remaining_candidates_are_reported_at_end() {
        assert_eq!(spans("a*b*", "aabb"), [(0, 3)]);
        assert!(spans("x", "").is_empty());
    }

    #[test]
    fn nullable_pattern_reports_no_empty_match() {
        assert!(spans("a*", "bbb").is_empty());
        assert_eq!(spans("a*", "bab"), [(1, 1)]);
    }

    quickcheck! {
        fn prop_dead_state_stays_dead(word: String) -> bool {
            let aut = compile("(ab|c)*d+").unwrap();
            let mut state = BitVec::new(aut.positions() + 1, false);
            word.chars().all(|c| {
                state = aut.step(&state, c);
                state.none()
            })
        }

        fn prop_match_agrees_with_search(word: Vec<bool>) -> bool {
            let word: String = word.iter().map(|&b| if b { 'a' } else { 'b' }).collect();
            let aut = compile("(a|b)*ab").unwrap();
            let whole = !word.is_empty()
                && search(&aut, &word).first() == Some(&Match::new(0, word.chars().count() - 1));
            matches(&aut, &word) == whole
        }
    }
}
