/// What went wrong, in precedence order.
///
/// Earlier variants outrank later ones when deciding which of two
/// overlapping diagnostics is the follow-on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Unclosed groups
    UnclosedParen,
    UnclosedBracket,
    UnclosedBrace,

    // Missing input
    ExpectedExpression,
    ExpectedField,
    ExpectedArgument,
    ExpectedPropertyName,
    ExpectedRangeBound,

    // Misplaced input
    UnrecognizedExpression,
    UnknownChainLink,
    UnknownOperator,
    InvalidSeparator,
    UnexpectedToken,
    UnexpectedCharacters,

    // Bad literal values
    InvalidRegexFlag,
    InvalidRegex,
    NumberOutOfRange,
    InvalidNumber,
    InvalidRecursionDepth,
}

impl DiagnosticKind {
    pub fn outranks(self, other: DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_unclosed(self) -> bool {
        matches!(
            self,
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace
        )
    }

    /// Something required was absent. At the same position this is the real
    /// problem even when a group also went unclosed.
    pub fn is_missing(self) -> bool {
        matches!(
            self,
            Self::ExpectedExpression
                | Self::ExpectedField
                | Self::ExpectedArgument
                | Self::ExpectedPropertyName
                | Self::ExpectedRangeBound
        )
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedBrace => "missing closing `}`",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedField => "expected a field name",
            Self::ExpectedArgument => "expected an argument",
            Self::ExpectedPropertyName => "expected a property name",
            Self::ExpectedRangeBound => "expected an integer or variable",

            Self::UnrecognizedExpression => "unrecognized expression",
            Self::UnknownChainLink => "unknown chain link",
            Self::UnknownOperator => "unknown operator",
            Self::InvalidSeparator => "unexpected separator",
            Self::UnexpectedToken => "unexpected token",
            Self::UnexpectedCharacters => "unrecognized characters",

            Self::InvalidRegexFlag => "unrecognized regex flag",
            Self::InvalidRegex => "invalid regex",
            Self::NumberOutOfRange => "number out of range",
            Self::InvalidNumber => "invalid number",
            Self::InvalidRecursionDepth => "recursion depth must be a non-negative integer",
        }
    }

    /// The user-facing message, with `detail` folded into the summary.
    ///
    /// Offending text is bracketed, unclosed groups append what was found
    /// instead, and regex or depth errors carry a complete message of their
    /// own.
    pub fn describe(self, detail: Option<&str>) -> String {
        let summary = self.summary();
        let Some(detail) = detail else {
            return summary.to_owned();
        };
        match self {
            Self::UnclosedParen | Self::UnclosedBracket | Self::UnclosedBrace => {
                format!("{summary}; {detail}")
            }
            Self::UnrecognizedExpression
            | Self::UnknownChainLink
            | Self::UnknownOperator
            | Self::NumberOutOfRange
            | Self::InvalidNumber => format!("{summary} [{detail}]"),
            Self::InvalidRegexFlag | Self::InvalidRegex | Self::InvalidRecursionDepth => {
                detail.to_owned()
            }
            _ => format!("{summary}: {detail}"),
        }
    }
}
