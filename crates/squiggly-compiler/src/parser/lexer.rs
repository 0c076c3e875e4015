//! Tokenizer for filter source.
//!
//! Tokens are a kind plus a span; text is sliced back out of the source on
//! demand. A run of characters the token table does not recognize becomes a
//! single `Garbage` token.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn offset(at: usize) -> TextSize {
    TextSize::from(at as u32)
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for (result, range) in SyntaxKind::lexer(source).spanned() {
        let span = TextRange::new(offset(range.start), offset(range.end));
        let kind = result.unwrap_or(SyntaxKind::Garbage);
        match tokens.last_mut() {
            // Unrecognized input is contiguous, so growing the previous
            // garbage token keeps the run in one piece.
            Some(last) if kind == SyntaxKind::Garbage && last.kind == SyntaxKind::Garbage => {
                last.span = last.span.cover(span);
            }
            _ => tokens.push(Token::new(kind, span)),
        }
    }
    tokens
}

pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span]
}
