//! Line lexer.
//!
//! Converts one line of assembly into tokens. At every offset the token
//! classes are tried in `TokenType::ALL` order and the first class that
//! matches wins; within a class the first alternative that matches wins.
//! The `Error` class accepts any run of non-whitespace, so lexing never
//! fails and every diagnosis is left to the parser. Offsets no class can
//! match (line breaks and other non-blank whitespace) are skipped.
//! Whitespace tokens are dropped from the output.

use crate::isa::mnemonic::Mnemonic;
use crate::isa::token::{Token, TokenType};

/// Splits a source line into tokens.
///
/// # Arguments
///
/// * `line` - One line of assembly source.
///
/// # Returns
///
/// The tokens in source order, without whitespace.
pub fn lex(line: &str) -> Vec<Token> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let rest = &bytes[pos..];
        let matched = TokenType::ALL
            .into_iter()
            .find_map(|kind| match_class(kind, rest).map(|len| (kind, len)));
        match matched {
            Some((kind, len)) => {
                if kind != TokenType::Whitespace {
                    tokens.push(Token::new(kind, &line[pos..pos + len]));
                }
                pos += len;
            }
            None => pos += 1,
        }
    }
    tokens
}

/// Length of the match of one token class at the start of `s`.
fn match_class(kind: TokenType, s: &[u8]) -> Option<usize> {
    match kind {
        TokenType::LBracket => literal(s, b"["),
        TokenType::RBracket => literal(s, b"]"),
        TokenType::Comma => literal(s, b","),
        TokenType::Immediate => immediate(s),
        TokenType::XRegister => x_register(s),
        TokenType::SRegister => fp_register(s, b'S'),
        TokenType::DRegister => fp_register(s, b'D'),
        TokenType::Label => {
            let n = run(s, is_word);
            (n > 0 && s.get(n) == Some(&b':')).then_some(n + 1)
        }
        TokenType::Identifier => nonzero(run(s, is_word)),
        TokenType::Whitespace => nonzero(run(s, is_blank)),
        TokenType::Error => nonzero(run(s, |b| !is_space(b))),
        mnemonic => mnemonic_of_class(mnemonic, s),
    }
}

/// Matches any mnemonic of the class spelled in upper or lower case and
/// followed by at least one blank; the blanks belong to the token.
fn mnemonic_of_class(kind: TokenType, s: &[u8]) -> Option<usize> {
    Mnemonic::ALL
        .into_iter()
        .filter(|m| m.token_type() == kind)
        .find_map(|m| {
            let upper = m.name().as_bytes();
            let word = s.get(..upper.len())?;
            let spelled = word == upper
                || word.iter().zip(upper).all(|(w, u)| *w == u.to_ascii_lowercase());
            if !spelled {
                return None;
            }
            let blanks = run(&s[upper.len()..], is_blank);
            (blanks > 0).then_some(upper.len() + blanks)
        })
}

/// `#?-?0[xX][0-9a-fA-F]+|#?-?[0-9]+`
fn immediate(s: &[u8]) -> Option<usize> {
    let mut prefix = 0;
    if s.first() == Some(&b'#') {
        prefix += 1;
    }
    if s.get(prefix) == Some(&b'-') {
        prefix += 1;
    }
    if s.get(prefix) == Some(&b'0') && matches!(s.get(prefix + 1), Some(b'x' | b'X')) {
        let digits = run(&s[prefix + 2..], |b| b.is_ascii_hexdigit());
        if digits > 0 {
            return Some(prefix + 2 + digits);
        }
    }
    let digits = run(&s[prefix..], |b| b.is_ascii_digit());
    (digits > 0).then_some(prefix + digits)
}

/// `[Xx][12][0-9]|[Xx]30|[Xx][0-9]|XZR|xzr|SP|sp|LR|lr|FP|fp|IP[01]|ip[01]`
fn x_register(s: &[u8]) -> Option<usize> {
    const NAMES: [&[u8]; 10] =
        [b"XZR", b"xzr", b"SP", b"sp", b"LR", b"lr", b"FP", b"fp", b"IP", b"ip"];
    if matches!(s.first(), Some(b'X' | b'x')) {
        match (s.get(1), s.get(2)) {
            (Some(b'1' | b'2'), Some(d)) if d.is_ascii_digit() => return Some(3),
            (Some(b'3'), Some(b'0')) => return Some(3),
            (Some(d), _) if d.is_ascii_digit() => return Some(2),
            _ => {}
        }
    }
    for name in NAMES {
        if !s.starts_with(name) {
            continue;
        }
        if name.eq_ignore_ascii_case(b"IP") {
            if matches!(s.get(2), Some(b'0' | b'1')) {
                return Some(3);
            }
        } else {
            return Some(name.len());
        }
    }
    None
}

/// `[Pp][12][0-9]|[Pp]30|[Pp][0-9]+` for the `S` and `D` register prefixes.
fn fp_register(s: &[u8], prefix: u8) -> Option<usize> {
    if !s.first().is_some_and(|b| b.eq_ignore_ascii_case(&prefix)) {
        return None;
    }
    match (s.get(1), s.get(2)) {
        (Some(b'1' | b'2'), Some(d)) if d.is_ascii_digit() => Some(3),
        (Some(b'3'), Some(b'0')) => Some(3),
        _ => nonzero(run(&s[1..], |b| b.is_ascii_digit())).map(|n| n + 1),
    }
}

fn literal(s: &[u8], lit: &[u8]) -> Option<usize> {
    s.starts_with(lit).then_some(lit.len())
}

fn run(s: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    s.iter().take_while(|&&b| pred(b)).count()
}

const fn nonzero(n: usize) -> Option<usize> {
    if n > 0 { Some(n) } else { None }
}

const fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

const fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// `\s`: blank, line feed, vertical tab, form feed, carriage return.
const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}
