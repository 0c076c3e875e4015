use super::dump::{DumpArgs, run};
use crate::error::CliError;

fn args() -> DumpArgs {
    DumpArgs {
        property: false,
        depths: false,
        json: false,
        color: false,
    }
}

#[test]
fn text_output_separates_roots() {
    insta::assert_snapshot!(run("a | b.c", &args()).unwrap(), @r"
    ROOT
      a
    ---
    ROOT [dot-pathed, squiggly]
      b [squiggly]
        c
    ");
}

#[test]
fn depths() {
    let args = DumpArgs {
        depths: true,
        ..args()
    };
    insta::assert_snapshot!(run("a{b}", &args).unwrap(), @r"
    ROOT @0
      a @1 [squiggly]
        b @2
    ");
}

#[test]
fn empty_filter_prints_nothing() {
    assert_eq!(run("   ", &args()).unwrap(), "");

    let property = DumpArgs {
        property: true,
        ..args()
    };
    assert_eq!(run("", &property).unwrap(), "");
}

#[test]
fn json_node_filter_is_array_of_roots() {
    let args = DumpArgs {
        json: true,
        ..args()
    };
    let out = run("a,b{}", &args).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    let roots = value.as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["name"]["kind"], "exact");
    assert_eq!(roots[0]["name"]["value"], "ROOT");
    assert_eq!(roots[0]["children"]["a"]["depth"], 1);
    assert_eq!(roots[0]["children"]["b"]["empty_nested"], true);
}

#[test]
fn json_property_filter_is_single_node() {
    let args = DumpArgs {
        property: true,
        json: true,
        ..args()
    };
    let value: serde_json::Value = serde_json::from_str(&run("a", &args).unwrap()).unwrap();
    assert!(value.is_object());
    assert!(value["children"]["a"].is_object());

    let empty: serde_json::Value = serde_json::from_str(&run("", &args).unwrap()).unwrap();
    assert!(empty.is_null());
}

#[test]
fn syntax_error_rendered_against_trimmed_source() {
    let Err(CliError::Diagnostics(rendered)) = run("  a{b  ", &args()) else {
        panic!("expected rendered diagnostics");
    };
    insta::assert_snapshot!(rendered, @r"
    error: missing closing `}`; found end of input
      |
    1 | a{b
      |  ^^
    ");
}

#[test]
fn semantic_error_rendered() {
    let Err(CliError::Diagnostics(rendered)) = run("~a~q", &args()) else {
        panic!("expected rendered diagnostics");
    };
    assert!(rendered.starts_with("error: unrecognized flag q for pattern a"));
}

#[test]
fn pipe_rejected_in_property_mode() {
    let args = DumpArgs {
        property: true,
        ..args()
    };
    let Err(CliError::Diagnostics(rendered)) = run("a|b", &args) else {
        panic!("expected rendered diagnostics");
    };
    assert!(rendered.contains("`|` is only allowed between node filters"));
}
