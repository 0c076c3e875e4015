use super::cst::{CstArgs, run};

fn args() -> CstArgs {
    CstArgs {
        property: false,
        trivia: false,
        spans: false,
        color: false,
    }
}

#[test]
fn tree_for_valid_filter() {
    let output = run("a.b", &args()).unwrap();
    assert!(output.diagnostics.is_none());
    insta::assert_snapshot!(output.tree, @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          Dot "."
          Field
            Id "b"
    "#);
}

#[test]
fn trivia_and_spans() {
    let args = CstArgs {
        trivia: true,
        spans: true,
        ..args()
    };
    insta::assert_snapshot!(run("a, b", &args).unwrap().tree, @r#"
    Root [0..4]
      ExprList [0..4]
        DottedFieldExpr [0..1]
          Field [0..1]
            Id [0..1] "a"
        Comma [1..2] ","
        Whitespace [2..3] " "
        DottedFieldExpr [3..4]
          Field [3..4]
            Id [3..4] "b"
    "#);
}

#[test]
fn recovered_tree_comes_with_diagnostics() {
    let output = run("a#b", &args()).unwrap();
    assert!(output.tree.contains("Garbage \"#\""));
    let diagnostics = output.diagnostics.unwrap();
    assert!(diagnostics.starts_with("error: unrecognized characters"));
}
