//! Field-name matchers.

use std::fmt;

use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;
use serde::{Serialize, Serializer};

/// Identity text of [`Name::AnyShallow`].
pub const ANY_SHALLOW: &str = "*";
/// Identity text of [`Name::AnyDeep`].
pub const ANY_DEEP: &str = "**";
/// Identity text of [`Name::Never`]. Not reachable from filter syntax.
pub const NEVER: &str = "~";

/// How a selection node matches a field name.
///
/// Siblings are keyed by [`Name::text`], so two names with the same text
/// merge into one node regardless of variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Name {
    /// Matches exactly one field.
    Exact(String),
    /// Glob-style pattern such as `a*b`.
    Wildcard(String),
    /// `*`: every field at this level.
    AnyShallow,
    /// `**`: every field at this level and below.
    AnyDeep,
    Regex(RegexName),
    /// `$name`, resolved by the evaluator.
    Variable(String),
    /// Matches nothing.
    Never,
}

impl Name {
    pub fn exact(text: impl Into<String>) -> Self {
        Name::Exact(text.into())
    }

    /// Identity text used for sibling keys.
    pub fn text(&self) -> &str {
        match self {
            Name::Exact(text) | Name::Wildcard(text) | Name::Variable(text) => text,
            Name::AnyShallow => ANY_SHALLOW,
            Name::AnyDeep => ANY_DEEP,
            Name::Regex(regex) => regex.pattern(),
            Name::Never => NEVER,
        }
    }

    pub fn is_any_shallow(&self) -> bool {
        matches!(self, Name::AnyShallow)
    }

    pub fn is_any_deep(&self) -> bool {
        matches!(self, Name::AnyDeep)
    }

    pub fn is_never(&self) -> bool {
        matches!(self, Name::Never)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Regex(regex) => write!(f, "{regex}"),
            Name::Variable(name) => write!(f, "${name}"),
            other => f.write_str(other.text()),
        }
    }
}

/// Regex engine flags written after the closing delimiter of a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PatternFlags {
    /// `i`
    pub case_insensitive: bool,
    /// `m`
    pub multi_line: bool,
    /// `s`: only `\n` terminates a line.
    pub unix_lines: bool,
    /// `x`: whitespace and `#` comments are ignored.
    pub comments: bool,
}

impl PatternFlags {
    pub fn is_empty(&self) -> bool {
        *self == PatternFlags::default()
    }

    fn syntax_config(&self) -> syntax::Config {
        syntax::Config::new()
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .crlf(!self.unix_lines)
            .ignore_whitespace(self.comments)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.unix_lines, 's'),
            (self.comments, 'x'),
        ];
        for (set, flag) in flags {
            if set {
                write!(f, "{flag}")?;
            }
        }
        Ok(())
    }
}

/// A compiled pattern together with the source text it came from.
///
/// Equality looks at the pattern text and flags only.
#[derive(Debug, Clone)]
pub struct RegexName {
    pattern: String,
    flags: PatternFlags,
    regex: Regex,
}

impl RegexName {
    pub fn compile(pattern: impl Into<String>, flags: PatternFlags) -> Result<Self, BuildError> {
        let pattern = pattern.into();
        let regex = Regex::builder()
            .syntax(flags.syntax_config())
            .build(&pattern)?;
        Ok(Self {
            pattern,
            flags,
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Unanchored search.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for RegexName {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.flags == other.flags
    }
}

impl fmt::Display for RegexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "~{}~{}", self.pattern, self.flags)
    }
}

impl Serialize for RegexName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("RegexName", 2)?;
        state.serialize_field("pattern", &self.pattern)?;
        state.serialize_field("flags", &self.flags.to_string())?;
        state.end()
    }
}
