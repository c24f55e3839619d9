//! Pattern syntax: tokens, implicit concatenation and postfix conversion.
//!
//! [`tokenize`] resolves escapes, wraps the pattern in an explicit group and
//! makes every concatenation explicit. [`to_postfix`] then reorders the tokens
//! with the shunting-yard algorithm, which is the form consumed by the
//! automaton builder.

use log::trace;

use crate::{error::CompileError, regex::Config};

/// One lexical element of a pattern.
///
/// Escapes are resolved while tokenizing, so an escaped metacharacter is just
/// a [`Token::Literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(char),
    Union,
    Star,
    Plus,
    Concat,
    Open,
    Close,
}

impl Token {
    /// Binding strength of an operator. Groups and literals are not ranked.
    pub fn precedence(self) -> u8 {
        match self {
            Token::Star | Token::Plus => 3,
            Token::Concat => 2,
            Token::Union => 1,
            Token::Literal(_) | Token::Open | Token::Close => 0,
        }
    }

    pub fn is_operator(self) -> bool {
        matches!(
            self,
            Token::Union | Token::Star | Token::Plus | Token::Concat
        )
    }

    /// Whether an operand can end right before this token.
    fn ends_operand(self) -> bool {
        matches!(
            self,
            Token::Literal(_) | Token::Close | Token::Star | Token::Plus
        )
    }

    /// Whether an operand can start with this token.
    fn starts_operand(self) -> bool {
        matches!(self, Token::Literal(_) | Token::Open)
    }
}

/// A pattern in postfix order, together with its number of positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<Token>,
    positions: usize,
}

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of literal occurrences, i.e. the `N` of the automaton.
    pub fn positions(&self) -> usize {
        self.positions
    }
}

/// Splits `pattern` into tokens using the metacharacters bound in `config`.
///
/// The result is wrapped in an `Open`/`Close` pair and carries an explicit
/// `Concat` between every two adjacent operands.
pub fn tokenize(pattern: &str, config: &Config) -> Result<Vec<Token>, CompileError> {
    config.validate()?;
    let mut tokens = Vec::with_capacity(pattern.len() * 2 + 2);
    push(&mut tokens, Token::Open);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = if c == config.escape {
            Token::Literal(chars.next().ok_or(CompileError::DanglingEscape)?)
        } else {
            config.classify(c)
        };
        push(&mut tokens, token);
    }
    push(&mut tokens, Token::Close);
    trace!("tokens of {pattern:?}: {tokens:?}");
    Ok(tokens)
}

fn push(tokens: &mut Vec<Token>, token: Token) {
    if token.starts_operand() && tokens.last().is_some_and(|prev| prev.ends_operand()) {
        tokens.push(Token::Concat);
    }
    tokens.push(token);
}

/// Converts an explicit-concatenation token stream to postfix order.
pub fn to_postfix(tokens: &[Token]) -> Result<Postfix, CompileError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    let mut positions = 0;

    for &token in tokens {
        match token {
            Token::Literal(_) => {
                output.push(token);
                positions += 1;
            }
            Token::Open => stack.push(token),
            Token::Close => loop {
                match stack.pop() {
                    None => return Err(CompileError::UnbalancedParentheses),
                    Some(Token::Open) => break,
                    Some(op) => output.push(op),
                }
            },
            Token::Union | Token::Star | Token::Plus | Token::Concat => {
                loop {
                    match stack.last() {
                        None => return Err(CompileError::MalformedPattern),
                        Some(&top) if top.precedence() >= token.precedence() => {
                            output.push(top);
                            stack.pop();
                        }
                        Some(_) => break,
                    }
                }
                stack.push(token);
            }
        }
    }
    if !stack.is_empty() {
        return Err(CompileError::UnbalancedParentheses);
    }

    trace!("postfix: {output:?} ({positions} positions)");
    Ok(Postfix {
        tokens: output,
        positions,
    })
}
