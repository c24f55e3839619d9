//! The Glushkov position automaton.
//!
//! Compilation goes through [`syntax::tokenize`], [`syntax::to_postfix`] and
//! [`automaton::Automaton::build`]; [`simulate`] runs the result over text.

pub mod automaton;
pub mod simulate;
pub mod syntax;
