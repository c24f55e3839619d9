use rgx::{
    Config, Regex,
    glushkov::syntax::{Token, tokenize},
};
use regex as rust_regex;

/// Translates a pattern of ours into an anchored rust-regex pattern with the
/// same language, or None if we cannot tokenize it.
pub fn rust_pattern(pattern: &str) -> Option<String> {
    let tokens = tokenize(pattern, &Config::default()).ok()?;
    let mut translated = String::from("^");
    for token in tokens {
        match token {
            Token::Literal(c) => translated.push_str(&regex_syntax::escape(c.encode_utf8(&mut [0; 4]))),
            Token::Union => translated.push('|'),
            Token::Star => translated.push('*'),
            Token::Plus => translated.push('+'),
            Token::Concat => {}
            Token::Open => translated.push_str("(?:"),
            Token::Close => translated.push(')'),
        }
    }
    translated.push('$');
    Some(translated)
}

/// Compiles a pattern both with this crate and with rust-regex. Panics if
/// we accept a pattern rust-regex rejects.
pub fn compile_both(pattern: &str) -> Option<(Regex, rust_regex::Regex)> {
    let ours = Regex::new(pattern).ok()?;
    let translated = rust_pattern(pattern)?;
    match rust_regex::Regex::new(&translated) {
        Ok(rust_re) => Some((ours, rust_re)),
        Err(e) => panic!("rust-regex failed to compile {translated:?} but we succeeded: {e}"),
    }
}

/// Checks full matching of `input` against rust-regex.
pub fn check_full_match(pattern: &str, input: &str) {
    let Some((ours, rust_re)) = compile_both(pattern) else {
        panic!("pattern {pattern:?} failed to compile");
    };
    assert_eq!(
        ours.matches(input),
        rust_re.is_match(input),
        "Mismatch for pattern {:?} input {:?} (matches)",
        pattern,
        input
    );
}
