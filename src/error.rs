use thiserror::Error;

use crate::bitvec::OutOfRange;

/// Reasons a pattern can fail to compile.
///
/// No partial automaton is ever produced: every variant is terminal for the
/// pattern that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// A close with no matching open, or an open left over at the end.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// The escape character was the last character of the pattern.
    #[error("escape character with nothing to escape")]
    DanglingEscape,
    /// The pattern denotes no expression at all, e.g. `` or `()`.
    #[error("empty pattern")]
    EmptyPattern,
    /// An operator is missing one of its operands.
    #[error("malformed pattern")]
    MalformedPattern,
    /// Two metacharacter bindings of a `Config` use the same character.
    #[error("{symbol:?} is bound to more than one metacharacter")]
    ConflictingSyntax { symbol: char },
    /// The builder addressed a bit outside of its own state width.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}
