//! Types and API for Regex matching
//!
//! This module defines the [`Regex`] struct, a compiled pattern together with
//! the text it was compiled from, and the [`Config`]/[`Builder`] pair used to
//! compile patterns written with other metacharacters.

use std::fmt;

use crate::{
    error::CompileError,
    glushkov::{
        automaton::Automaton,
        simulate,
        syntax::{Token, to_postfix, tokenize},
    },
    util::Match,
};

/// A regular expression
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    automaton: Automaton,
}

impl Regex {
    /// Compiles `pattern` with the default syntax.
    pub fn new(pattern: &str) -> Result<Self, CompileError> {
        Builder::new(pattern).build()
    }

    /// Returns true when the whole of `word` is matched.
    pub fn matches(&self, word: &str) -> bool {
        simulate::matches(&self.automaton, word)
    }

    /// Returns every match found in `text`, see [`simulate::search`] for how
    /// overlapping matches are resolved.
    pub fn search(&self, text: &str) -> Vec<Match> {
        simulate::search(&self.automaton, text)
    }

    /// Returns the leftmost match in `text`, if any.
    pub fn find(&self, text: &str) -> Option<Match> {
        self.search(text).into_iter().next()
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The pattern this regex was compiled from.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// The characters that act as metacharacters in a pattern.
///
/// Any other character is a literal, and so is any character following
/// `escape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub union: char,
    pub star: char,
    pub plus: char,
    pub open: char,
    pub close: char,
    pub escape: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            union: '|',
            star: '*',
            plus: '+',
            open: '(',
            close: ')',
            escape: '\\',
        }
    }
}

impl Config {
    /// Checks that no character is bound twice.
    pub fn validate(&self) -> Result<(), CompileError> {
        let symbols = [
            self.union,
            self.star,
            self.plus,
            self.open,
            self.close,
            self.escape,
        ];
        for (i, &symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(&symbol) {
                return Err(CompileError::ConflictingSyntax { symbol });
            }
        }
        Ok(())
    }

    /// Token for an unescaped character.
    pub(crate) fn classify(&self, c: char) -> Token {
        match c {
            _ if c == self.union => Token::Union,
            _ if c == self.star => Token::Star,
            _ if c == self.plus => Token::Plus,
            _ if c == self.open => Token::Open,
            _ if c == self.close => Token::Close,
            _ => Token::Literal(c),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Builder<'s> {
    pattern: &'s str,
    config: Config,
}

impl<'s> Builder<'s> {
    pub fn new(pattern: &'s str) -> Self {
        Self {
            pattern,
            config: Config::default(),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn union(mut self, symbol: char) -> Self {
        self.config.union = symbol;
        self
    }

    pub fn star(mut self, symbol: char) -> Self {
        self.config.star = symbol;
        self
    }

    pub fn plus(mut self, symbol: char) -> Self {
        self.config.plus = symbol;
        self
    }

    pub fn open(mut self, symbol: char) -> Self {
        self.config.open = symbol;
        self
    }

    pub fn close(mut self, symbol: char) -> Self {
        self.config.close = symbol;
        self
    }

    pub fn escape(mut self, symbol: char) -> Self {
        self.config.escape = symbol;
        self
    }

    /// Compiles the pattern to an automaton without keeping the pattern text.
    pub fn automaton(&self) -> Result<Automaton, CompileError> {
        let tokens = tokenize(self.pattern, &self.config)?;
        Automaton::build(&to_postfix(&tokens)?)
    }

    pub fn build(self) -> Result<Regex, CompileError> {
        let automaton = self.automaton()?;
        Ok(Regex {
            pattern: self.pattern.to_owned(),
            automaton,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_leftmost() {
        let re = Regex::new("b+").unwrap();
        assert_eq!(re.find("abbcb"), Some(Match::new(1, 2)));
        assert_eq!(re.find("acd"), None);
    }

    #[test]
    fn keeps_pattern_text() {
        let re = Regex::new(r"a\*").unwrap();
        assert_eq!(re.as_str(), r"a\*");
        assert_eq!(re.to_string(), r"a\*");
        assert_eq!(re.automaton().positions(), 2);
    }

    #[test]
    fn alternate_metacharacters() {
        let re = Builder::new("[a/b]~c!")
            .union('/')
            .star('~')
            .plus('!')
            .open('[')
            .close(']')
            .build()
            .unwrap();
        assert!(re.matches("c"));
        assert!(re.matches("abacc"));
        assert!(!re.matches("ab"));
        // The default metacharacters are ordinary literals here.
        let re = Builder::new("a|b*").union('/').star('~').build().unwrap();
        assert!(re.matches("a|b*"));
        assert!(!re.matches("a"));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let err = Builder::new("ab").star('|').build().unwrap_err();
        assert_eq!(err, CompileError::ConflictingSyntax { symbol: '|' });
        assert_eq!(err.to_string(), "'|' is bound to more than one metacharacter");
    }

    #[test]
    fn config_is_reusable() {
        let config = Config {
            escape: '%',
            ..Config::default()
        };
        let re = Builder::new("%(a%)").config(config).build().unwrap();
        assert!(re.matches("(a)"));
        assert!(Builder::new(r"\").config(config).build().is_ok());
    }
}
