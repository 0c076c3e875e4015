use super::{cst_recovered, errors, first_message, property_errors};
use crate::parser::core::Parser;
use crate::parser::lexer::lex;
use crate::parser::{FilterMode, parse_with_parser};
use crate::Error;

#[test]
fn unclosed_brace() {
    insta::assert_snapshot!(errors("a{b"), @r"
    error: missing closing `}`; found end of input
      |
    1 | a{b
      |  -^^
      |  |
      |  `{` opened here
    ");
}

#[test]
fn unclosed_paren() {
    insta::assert_snapshot!(errors("a.f(1"), @r"
    error: missing closing `)`; found end of input
      |
    1 | a.f(1
      |    -^^
      |    |
      |    `(` opened here
    ");
}

#[test]
fn unclosed_bracket_reports_missing_bound() {
    assert_eq!(first_message("a["), "expected an integer or variable");
}

#[test]
fn doubled_comma() {
    insta::assert_snapshot!(errors("a,,b"), @r"
    error: unrecognized expression [,]
      |
    1 | a,,b
      |   ^
    ");
}

#[test]
fn trailing_comma_in_block() {
    insta::assert_snapshot!(errors("a{b,}"), @r"
    error: expected an expression
      |
    1 | a{b,}
      |     ^
    ");
}

#[test]
fn trailing_comma_in_call() {
    insta::assert_snapshot!(errors("a.f(1,)"), @r"
    error: expected an argument
      |
    1 | a.f(1,)
      |       ^
    ");
}

#[test]
fn dangling_pipe() {
    assert_eq!(first_message("a|"), "expected an expression: after `|`");
}

#[test]
fn pipe_in_property_filter() {
    insta::assert_snapshot!(property_errors("a|b"), @r"
    error: unexpected separator: `|` is only allowed between node filters
      |
    1 | a|b
      |  ^
    ");
}

#[test]
fn unrecognized_characters() {
    insta::assert_snapshot!(errors("a#b"), @r"
    error: unrecognized characters
      |
    1 | a#b
      |  ^
    ");
}

#[test]
fn garbage_wrapped_in_error_node() {
    insta::assert_snapshot!(cst_recovered("a#b"), @r##"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
      Error
        Garbage "#"
      ExprList
        DottedFieldExpr
          Field
            Id "b"
    "##);
}

#[test]
fn regex_flags_must_touch_the_closing_tilde() {
    assert_eq!(first_message("a.f(~a~ i)"), "missing closing `)`; found `i`");
}

#[test]
fn unknown_chain_link() {
    assert_eq!(first_message("a.b.c:x"), "unknown chain link [x]");
}

#[test]
fn missing_then() {
    assert_eq!(
        first_message("a.f(if x 1 end)"),
        "unexpected token: expected `then`"
    );
}

#[test]
fn stray_closer_after_list() {
    assert_eq!(first_message("a)"), "unexpected token: `)`");
}

#[test]
fn float_index_rejected() {
    assert_eq!(first_message("a[1.5]"), "expected an integer or variable: 1.5");
}

#[test]
fn recursion_limit_is_fatal() {
    let source = "a{".repeat(10);
    let parser = Parser::new(&source, lex(&source)).with_recursion_fuel(Some(4));
    assert_eq!(
        parse_with_parser(parser, FilterMode::Node).unwrap_err(),
        Error::RecursionLimitExceeded
    );
}

#[test]
fn exec_fuel_is_fatal() {
    let source = "a,".repeat(10);
    let parser = Parser::new(&source, lex(&source)).with_exec_fuel(Some(5));
    assert_eq!(
        parse_with_parser(parser, FilterMode::Node).unwrap_err(),
        Error::ExecFuelExhausted
    );
}
