use indoc::indoc;
use squiggly_core::{ArgumentKind, ArgumentValue, FunctionKind};

use crate::DiagnosticKind;
use crate::test_utils::{compile, compile_error, dump};

#[test]
fn literal_arguments() {
    insta::assert_snapshot!(dump("a.f(1, -2, 1.5, True, 'x', null, ~a~i)"), @r#"
    ROOT
      a
        value: f(INPUT, (self(1)), (self(-2)), (self(1.5)), (self(true)), (self("x")), null, (self(~a~i)))
    "#);
}

#[test]
fn property_arguments() {
    insta::assert_snapshot!(dump("a.f(x, $.y, $?.z, $['w'], $?[v])"), @r#"
    ROOT
      a
        value: f(INPUT, (property(INPUT, "x") [property]), (property(INPUT, "y") [property]), (property(INPUT, "z") [property, ignore-nulls]), (property(INPUT, "w") [property]), (property(INPUT, "v") [property, ignore-nulls]))
    "#);
}

#[test]
fn property_chain_links() {
    insta::assert_snapshot!(dump("a.f(x.y?.z, x[0], x[1:2], x?[y], x.g())"), @r#"
    ROOT
      a
        value: f(INPUT, (property(INPUT, "x") [property] | property(INPUT, "y") [property] | property(INPUT, "z") [property, ignore-nulls]), (property(INPUT, "x") [property] | property(INPUT, (get(INPUT, 0))) [property]), (property(INPUT, "x") [property] | property(INPUT, (slice(INPUT, 1:2))) [property]), (property(INPUT, "x") [property] | property(INPUT, "y") [property, ignore-nulls]), (property(INPUT, "x") [property] | g(INPUT)))
    "#);
}

#[test]
fn sort_markers() {
    insta::assert_snapshot!(dump("a.sort(-x, +y, -len(), -x.y)"), @r#"
    ROOT
      a
        value: sort(INPUT, (property(INPUT, "x") [property, descending]), (property(INPUT, "y") [property]), (len() [descending]), (property(INPUT, "x") [property, descending] | property(INPUT, "y") [property, descending]))
    "#);
}

#[test]
fn declarations_and_variables() {
    insta::assert_snapshot!(dump("a.f([1, x], {k: 1, 'q': $v}, [1:3], $v)"), @r#"
    ROOT
      a
        value: f(INPUT, (self([(self(1)), (property(INPUT, "x") [property])])), (self({"k": (self(1)), "q": (self($v))})), (self(1:3)), (self($v)))
    "#);
}

#[test]
fn groups() {
    insta::assert_snapshot!(dump("a.f((x), (1).abs())"), @r#"
    ROOT
      a
        value: f(INPUT, (property(INPUT, "x") [property]), (self((self(1))) | abs(INPUT)))
    "#);
}

#[test]
fn conditionals() {
    insta::assert_snapshot!(dump("a.f(if x then 1 elif y then 2 else 3 end, if x then 1 end)"), @r#"
    ROOT
      a
        value: f(INPUT, (self(if (property(INPUT, "x") [property]) then (self(1)) elif (property(INPUT, "y") [property]) then (self(2)) else (self(3)) end)), (self(if (property(INPUT, "x") [property]) then (self(1)) else null end)))
    "#);
}

#[test]
fn lambdas() {
    insta::assert_snapshot!(dump("a.map($v -> $v, (_, $w) -> 1, () -> 2)"), @r"
    ROOT
      a
        value: map(INPUT, ($v) -> self((self($v))), (_, $w) -> self((self(1))), () -> self((self(2))))
    ");
}

#[test]
fn spacing_inside_arguments() {
    let pairs = [
        ("a.map(($x,$y)->1)", "a.map(($x, $y) -> 1)"),
        ("a.map((_,$y)->$y)", "a.map( (_, $y) -> $y )"),
        ("a.map(($x)->$x)", "a.map(( $x ) -> $x)"),
        ("a.f(1,x)[1:3]", "a.f( 1 , x )[ 1 : 3 ]"),
        ("a.matches(~b~i)", "a.matches( ~b~i )"),
        ("a.f($.x,{k:[1]})", "a.f( $.x , { k : [ 1 ] } )"),
    ];
    for (tight, spaced) in pairs {
        assert_eq!(dump(spaced), dump(tight), "{spaced:?}");
    }
}

#[test]
fn operators() {
    insta::assert_snapshot!(dump("a.f(1 + 2 * 3, 1 - 2 - 3, !x, not x, x ?: 1, -(1))"), @r#"
    ROOT
      a
        value: f(INPUT, (add((self(1)), (multiply((self(2)), (self(3)))))), (subtract((subtract((self(1)), (self(2)))), (self(3)))), (not((property(INPUT, "x") [property]))), (not((property(INPUT, "x") [property]))), (default((property(INPUT, "x") [property]), (self(1)))), (subtract((self(1)))))
    "#);
}

#[test]
fn comparison_binds_tighter_than_logic() {
    let roots = compile("a.f(x > 1 and y == 2 or z)");
    let f = &roots[0].child("a").unwrap().value_functions()[0];
    let ArgumentValue::FunctionChain(chain) = f.arguments()[1].value() else {
        panic!("expected a function chain");
    };
    assert_eq!(chain[0].name(), "or");
    let ArgumentValue::FunctionChain(lhs) = chain[0].arguments()[0].value() else {
        panic!("expected a function chain");
    };
    assert_eq!(lhs[0].name(), "and");
}

#[test]
fn keyword_call_is_not_an_operator() {
    insta::assert_snapshot!(dump("a.f(add(1, 2))"), @r"
    ROOT
      a
        value: f(INPUT, (add((self(1)), (self(2)))))
    ");
}

#[test]
fn argument_kinds() {
    let roots = compile("a.f(null, [1:2], $x -> 1)");
    let f = &roots[0].child("a").unwrap().value_functions()[0];
    let kinds: Vec<ArgumentKind> = f.arguments().iter().map(|arg| arg.kind()).collect();
    assert_eq!(
        kinds,
        [
            ArgumentKind::Input,
            ArgumentKind::Null,
            ArgumentKind::FunctionChain,
            ArgumentKind::Lambda,
        ]
    );
}

#[test]
fn property_function_kind() {
    let roots = compile("a.f(x)");
    let f = &roots[0].child("a").unwrap().value_functions()[0];
    let ArgumentValue::FunctionChain(chain) = f.arguments()[1].value() else {
        panic!("expected a function chain");
    };
    assert_eq!(chain[0].kind(), FunctionKind::Property);
    assert_eq!(f.kind(), FunctionKind::Regular);
}

#[test]
fn multi_line_arguments() {
    let source = indoc! {"
        a.f(
          1,
          x
        )
    "};
    insta::assert_snapshot!(dump(source), @r#"
    ROOT
      a
        value: f(INPUT, (self(1)), (property(INPUT, "x") [property]))
    "#);
}

#[test]
fn unknown_chain_link() {
    let err = compile_error("a[0].x");
    assert_eq!(err.kind(), DiagnosticKind::UnknownChainLink);
    assert_eq!(err.message(), "unknown chain link [x]");
    assert_eq!(err.column(), 5);
}

#[test]
fn missing_operand() {
    let err = compile_error("a.f(1 +)");
    assert_eq!(err.kind(), DiagnosticKind::ExpectedArgument);
}

#[test]
fn invalid_regex_argument() {
    let err = compile_error("a.f(~(~)");
    assert_eq!(err.kind(), DiagnosticKind::InvalidRegex);
    assert!(err.message().starts_with("invalid regex (:"), "{}", err.message());
}
