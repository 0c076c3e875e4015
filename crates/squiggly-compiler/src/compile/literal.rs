//! Literal builders: strings, numbers, booleans, variables and regex patterns.

use squiggly_core::{PatternFlags, RegexName};

use crate::diagnostics::DiagnosticKind;

/// A literal that failed to build. The caller attaches the source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiteralError {
    pub kind: DiagnosticKind,
    pub detail: String,
}

impl LiteralError {
    pub fn new(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn message(&self) -> String {
        self.kind.describe(Some(&self.detail))
    }
}

/// Strips the quotes of a `"`, `'` or backtick string and resolves escapes.
///
/// Unquoted or too-short text passes through unchanged.
pub(crate) fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return text.to_string();
    };
    if first != last || !matches!(first, '"' | '\'' | '`') {
        return text.to_string();
    }
    unescape(&text[1..text.len() - 1])
}

/// Resolves backslash escapes. An unknown escape yields the escaped character.
pub(crate) fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex, 'x');
            }
            'u' if chars.peek() == Some(&'{') => {
                chars.next();
                let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                push_code_point(&mut out, &hex, 'u');
            }
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                push_code_point(&mut out, &hex, 'u');
            }
            other => out.push(other),
        }
    }

    out
}

fn push_code_point(out: &mut String, hex: &str, marker: char) {
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push(marker);
            out.push_str(hex);
        }
    }
}

/// `$name` → `name`, `${some name}` → `some name` (unescaped).
pub(crate) fn variable_name(text: &str) -> String {
    let name = text.strip_prefix('$').unwrap_or(text);
    match name.strip_prefix('{').and_then(|n| n.strip_suffix('}')) {
        Some(braced) => unescape(braced),
        None => name.to_string(),
    }
}

pub(crate) fn parse_integer(text: &str) -> Result<i64, LiteralError> {
    text.parse::<i64>().map_err(|err| {
        let kind = match err.kind() {
            std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                DiagnosticKind::NumberOutOfRange
            }
            _ => DiagnosticKind::InvalidNumber,
        };
        LiteralError::new(kind, text)
    })
}

pub(crate) fn parse_float(text: &str) -> Result<f64, LiteralError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(LiteralError::new(DiagnosticKind::NumberOutOfRange, text)),
        Err(_) => Err(LiteralError::new(DiagnosticKind::InvalidNumber, text)),
    }
}

pub(crate) fn parse_boolean(text: &str) -> bool {
    text.eq_ignore_ascii_case("true")
}

/// Builds a pattern from `~pattern~flags`.
///
/// The closing delimiter is the last `~`, so `/` and escaped `\~` stay in the
/// pattern. Flags are the letters glued to it; the lexer ends the token at
/// the first non-letter.
pub(crate) fn build_pattern(text: &str) -> Result<RegexName, LiteralError> {
    let body = text.strip_prefix('~').unwrap_or(text);
    let (pattern, flag_text) = match body.rfind('~') {
        Some(end) => (&body[..end], &body[end + 1..]),
        None => (body, ""),
    };

    let mut flags = PatternFlags::default();
    for flag in flag_text.chars() {
        match flag {
            'i' => flags.case_insensitive = true,
            'm' => flags.multi_line = true,
            's' => flags.unix_lines = true,
            'x' => flags.comments = true,
            other => {
                return Err(LiteralError::new(
                    DiagnosticKind::InvalidRegexFlag,
                    format!("unrecognized flag {other} for pattern {pattern}"),
                ));
            }
        }
    }

    validate_pattern(pattern, flags)?;

    RegexName::compile(pattern, flags).map_err(|err| {
        LiteralError::new(
            DiagnosticKind::InvalidRegex,
            format!("invalid regex {pattern}: {err}"),
        )
    })
}

/// Parses with `regex-syntax` first for a precise error message.
fn validate_pattern(pattern: &str, flags: PatternFlags) -> Result<(), LiteralError> {
    regex_syntax::ParserBuilder::new()
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .crlf(!flags.unix_lines)
        .ignore_whitespace(flags.comments)
        .build()
        .parse(pattern)
        .map(|_| ())
        .map_err(|err| {
            let reason = match &err {
                regex_syntax::Error::Parse(e) => e.kind().to_string(),
                regex_syntax::Error::Translate(e) => e.kind().to_string(),
                other => other.to_string(),
            };
            LiteralError::new(
                DiagnosticKind::InvalidRegex,
                format!("invalid regex {pattern}: {reason}"),
            )
        })
}
