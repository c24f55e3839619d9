//! The Glushkov position automaton and its builder.
//!
//! A pattern with `N` literal occurrences yields an automaton with one state
//! per occurrence plus a virtual start state 0. All state sets are
//! [`BitVec`]s of width `N + 1`, where bit 0 doubles as the "nullable" marker
//! in First/Last sets and as the "accepting" marker in follow sets.

use log::debug;

use crate::{
    bitvec::BitVec,
    error::CompileError,
    glushkov::syntax::{Postfix, Token},
};

/// A compiled pattern.
///
/// `follow[p]` is the set of positions that may come right after position
/// `p`, with bit 0 set iff `p` is accepting. `follow[0]` is the First set of
/// the whole pattern. The automaton is immutable once built and can be shared
/// between threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Automaton {
    follow: Box<[BitVec]>,
    // labels[0] is never read.
    labels: Box<[char]>,
}

/// An edge of the automaton: reading `symbol` in `from` may lead to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: usize,
    pub symbol: char,
    pub to: usize,
}

/// First, Last and Positions of a sub-expression.
struct Fragment {
    first: BitVec,
    last: BitVec,
    positions: BitVec,
}

impl Fragment {
    fn nullable(&self) -> bool {
        self.first.contains(0)
    }

    /// Positions of this fragment the match can leave from.
    fn exits(&self) -> BitVec {
        self.last.clone() & &self.positions
    }
}

/// Wires every exit position of `from` to `entry`.
fn close(follow: &mut [BitVec], from: &Fragment, entry: &BitVec) {
    for p in from.exits().ones().filter(|&p| p > 0) {
        follow[p] |= entry;
    }
}

impl Automaton {
    /// Runs the Glushkov construction over a postfix token stream.
    pub fn build(postfix: &Postfix) -> Result<Automaton, CompileError> {
        let width = postfix.positions() + 1;
        let empty = BitVec::new(width, false);
        let mut follow = vec![empty.clone()];
        let mut labels = vec!['\0'];
        let mut stack: Vec<Fragment> = Vec::new();

        for &token in postfix.tokens() {
            match token {
                Token::Literal(c) => {
                    let mut unit = empty.clone();
                    unit.set(follow.len(), true)?;
                    follow.push(empty.clone());
                    labels.push(c);
                    stack.push(Fragment {
                        first: unit.clone(),
                        last: unit.clone(),
                        positions: unit,
                    });
                }
                Token::Star => {
                    let e = stack.last_mut().ok_or(CompileError::MalformedPattern)?;
                    e.first.set(0, true)?;
                    e.last.set(0, true)?;
                    close(&mut follow, e, &e.first);
                }
                Token::Plus => {
                    let e = stack.last().ok_or(CompileError::MalformedPattern)?;
                    close(&mut follow, e, &e.first);
                }
                Token::Union => {
                    let g = stack.pop().ok_or(CompileError::MalformedPattern)?;
                    let f = stack.last_mut().ok_or(CompileError::MalformedPattern)?;
                    f.first |= &g.first;
                    f.last |= &g.last;
                    f.positions |= &g.positions;
                }
                Token::Concat => {
                    let g = stack.pop().ok_or(CompileError::MalformedPattern)?;
                    let f = stack.last_mut().ok_or(CompileError::MalformedPattern)?;
                    close(&mut follow, f, &g.first);
                    let (f_nullable, g_nullable) = (f.nullable(), g.nullable());
                    if f_nullable {
                        f.first |= &g.first;
                        f.first.set(0, g_nullable)?;
                    }
                    if g_nullable {
                        f.last |= &g.last;
                        f.last.set(0, f_nullable)?;
                    } else {
                        f.last = g.last;
                    }
                    f.positions |= &g.positions;
                }
                Token::Open | Token::Close => return Err(CompileError::MalformedPattern),
            }
        }

        let whole = match (stack.pop(), stack.is_empty()) {
            (None, _) => return Err(CompileError::EmptyPattern),
            (Some(whole), true) => whole,
            (Some(_), false) => return Err(CompileError::MalformedPattern),
        };
        for (p, set) in follow.iter_mut().enumerate().skip(1) {
            set.set(0, whole.last.contains(p))?;
        }
        follow[0] = whole.first;

        debug!("built automaton with {} positions", width - 1);
        Ok(Automaton {
            follow: follow.into_boxed_slice(),
            labels: labels.into_boxed_slice(),
        })
    }

    /// Number of positions `N`, i.e. literal occurrences in the pattern.
    pub fn positions(&self) -> usize {
        self.labels.len() - 1
    }

    /// The start state, which is also the First set of the pattern.
    pub fn initial(&self) -> &BitVec {
        &self.follow[0]
    }

    /// Whether the pattern matches the empty string.
    pub fn is_nullable(&self) -> bool {
        self.follow[0].contains(0)
    }

    pub fn follow(&self, position: usize) -> Option<&BitVec> {
        self.follow.get(position)
    }

    /// The character read when entering `position`. Position 0 has none.
    pub fn label(&self, position: usize) -> Option<char> {
        match position {
            0 => None,
            p => self.labels.get(p).copied(),
        }
    }

    pub fn is_accepting(&self, position: usize) -> bool {
        self.follow(position).is_some_and(|set| set.contains(0))
    }

    /// Accepting positions in ascending order, 0 included when nullable.
    pub fn accepting(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.follow.len()).filter(|&p| self.is_accepting(p))
    }

    /// Every edge of the automaton, ordered by source then target.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.follow.iter().enumerate().flat_map(move |(from, set)| {
            set.ones().filter(|&to| to > 0).map(move |to| Transition {
                from,
                symbol: self.labels[to],
                to,
            })
        })
    }

    /// Reads `symbol` in every position of `state`.
    ///
    /// The result is the union of the follow sets of the active positions
    /// labelled `symbol`; its bit 0 tells whether the automaton accepts.
    pub fn step(&self, state: &BitVec, symbol: char) -> BitVec {
        let mut next = BitVec::new(self.follow.len(), false);
        for p in state.ones().filter(|&p| p > 0) {
            if self.labels.get(p) == Some(&symbol) {
                next |= &self.follow[p];
            }
        }
        next
    }
}
