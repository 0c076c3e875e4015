use crate::parser::cst::{FilterLang, SyntaxKind::*, TokenSet, token_sets};
use rowan::Language;

#[test]
fn test_token_set_contains() {
    let set = TokenSet::new(&[ParenOpen, ParenClose, Star]);
    assert!(set.contains(ParenOpen));
    assert!(set.contains(ParenClose));
    assert!(set.contains(Star));
    assert!(!set.contains(StarStar));
    assert!(!set.contains(Colon));
}

#[test]
fn test_token_set_union() {
    let a = TokenSet::new(&[ParenOpen, ParenClose]);
    let b = TokenSet::new(&[Star, Plus]);
    let c = a.union(b);
    assert!(c.contains(ParenOpen));
    assert!(c.contains(ParenClose));
    assert!(c.contains(Star));
    assert!(c.contains(Plus));
    assert!(!c.contains(Colon));
}

#[test]
fn test_token_set_single() {
    let set = TokenSet::single(Colon);
    assert!(set.contains(Colon));
    assert!(!set.contains(ParenOpen));
}

#[test]
fn test_token_set_ignores_node_kinds() {
    assert!(!TokenSet::EMPTY.contains(Root));
    assert!(!token_sets::EXPR_FIRST.contains(ExprList));
}

#[test]
fn test_is_trivia() {
    assert!(Whitespace.is_trivia());
    assert!(!ParenOpen.is_trivia());
    assert!(!Error.is_trivia());
}

#[test]
fn test_syntax_kind_count_under_128() {
    assert!(
        (Garbage as u16) < 128,
        "token kinds reach {}, exceeding TokenSet capacity of 128",
        Garbage as u16
    );
}

#[test]
fn test_is_error() {
    assert!(Error.is_error());
    assert!(Garbage.is_error());
    assert!(!ParenOpen.is_error());
    assert!(!Id.is_error());
    assert!(!Whitespace.is_error());
}

#[test]
fn test_keywords() {
    assert!(KwTrue.is_keyword());
    assert!(KwOr.is_keyword());
    assert!(KwMatch.is_keyword());
    assert!(!Id.is_keyword());
    assert!(!Whitespace.is_keyword());
}

#[test]
fn test_function_names() {
    assert!(Id.is_function_name());
    assert!(KwAdd.is_function_name());
    assert!(KwNot.is_function_name());
    assert!(!KwIf.is_function_name());
    assert!(!KwNull.is_function_name());
    assert!(!Str.is_function_name());
}

#[test]
fn test_field_first_accepts_keywords() {
    assert!(token_sets::FIELD_FIRST.contains(KwEnd));
    assert!(token_sets::FIELD_FIRST.contains(Regex));
    assert!(!token_sets::FIELD_FIRST.contains(StarStar));
}

#[test]
fn test_token_set_debug() {
    let set = TokenSet::new(&[ParenOpen, Star, Plus]);
    let debug_str = format!("{:?}", set);
    assert!(debug_str.contains("ParenOpen"));
    assert!(debug_str.contains("Star"));
    assert!(debug_str.contains("Plus"));
}

#[test]
fn test_filter_lang_kind_round_trip() {
    let raw = FilterLang::kind_to_raw(DottedFieldExpr);
    assert_eq!(FilterLang::kind_from_raw(raw), DottedFieldExpr);
}
