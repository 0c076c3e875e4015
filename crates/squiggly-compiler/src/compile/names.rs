//! Field name resolution.

use squiggly_core::Name;

use super::literal::{LiteralError, build_pattern, unquote, variable_name};
use crate::diagnostics::DiagnosticKind;
use crate::parser::cst::{SyntaxKind, SyntaxToken};

/// Resolves a field token to the name it matches.
pub(crate) fn resolve(token: &SyntaxToken) -> Result<Name, LiteralError> {
    let text = token.text();
    let name = match token.kind() {
        SyntaxKind::Str => Name::exact(unquote(text)),
        kind if kind.is_keyword() => Name::exact(text),
        SyntaxKind::Id | SyntaxKind::Underscore => Name::exact(text),
        SyntaxKind::WildcardField => Name::Wildcard(text.to_string()),
        SyntaxKind::Regex => Name::Regex(build_pattern(text)?),
        SyntaxKind::Star => Name::AnyShallow,
        SyntaxKind::Variable => Name::Variable(variable_name(text)),
        _ => {
            return Err(LiteralError::new(
                DiagnosticKind::ExpectedField,
                format!("unhandled field [{text}]"),
            ));
        }
    };
    Ok(name)
}
