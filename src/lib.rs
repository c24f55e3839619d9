//! Regular expressions compiled to Glushkov position automata.
//!
//! A pattern is made of literal characters, union (`|`), zero-or-more (`*`),
//! one-or-more (`+`), grouping (`(`, `)`) and escape (`\`). It compiles to an
//! [`Automaton`] with one state per literal occurrence, which is then
//! simulated with bit-vector state sets: matching never backtracks and runs
//! in time proportional to the input length.
//!
//! ```
//! let automaton = rgx::compile("(a|b)*c").unwrap();
//! assert!(rgx::matches(&automaton, "abbac"));
//!
//! let found = rgx::search(&rgx::compile("ab*c").unwrap(), "xabbbcx");
//! assert_eq!((found[0].start(), found[0].end()), (1, 5));
//! ```

pub mod bitvec;
pub mod error;
pub mod glushkov;
pub mod regex;
pub mod util;

pub use bitvec::BitVec;
pub use error::CompileError;
pub use glushkov::{
    automaton::{Automaton, Transition},
    simulate::{matches, search},
};
pub use regex::{Builder, Config, Regex};
pub use util::Match;

/// Compiles `pattern` with the default metacharacters.
pub fn compile(pattern: &str) -> Result<Automaton, CompileError> {
    Builder::new(pattern).automaton()
}
