use crate::{ArgumentValue, FunctionNode, Name, ROOT, SelectionNode, TreePrinter};

fn sample() -> SelectionNode {
    let get = FunctionNode::builder("get")
        .argument(ArgumentValue::Input)
        .argument(ArgumentValue::Integer(2))
        .build();
    let b = SelectionNode::builder(Name::exact("b"))
        .depth(2)
        .value_functions(vec![get])
        .build();
    let a = SelectionNode::builder(Name::exact("a"))
        .depth(1)
        .dot_pathed(true)
        .squiggly(true)
        .child(b)
        .build();
    let deep = SelectionNode::builder(Name::AnyDeep)
        .depth(1)
        .recursive(Some(1), None)
        .build();
    SelectionNode::builder(Name::exact(ROOT))
        .squiggly(true)
        .child(a)
        .child(deep)
        .build()
}

#[test]
fn dump_tree() {
    insta::assert_snapshot!(TreePrinter::new(&sample()).dump(), @r"
    ROOT [squiggly]
      a [dot-pathed, squiggly]
        b
          value: get(INPUT, 2)
      ** [recursive(1:)]
    ");
}

#[test]
fn dump_tree_with_depths() {
    insta::assert_snapshot!(TreePrinter::new(&sample()).with_depths(true).dump(), @r"
    ROOT @0 [squiggly]
      a @1 [dot-pathed, squiggly]
        b @2
          value: get(INPUT, 2)
      ** @1 [recursive(1:)]
    ");
}

#[test]
fn dump_key_and_value_chains() {
    let upper = FunctionNode::builder("upper").argument(ArgumentValue::Input).build();
    let trim = FunctionNode::builder("trim").argument(ArgumentValue::Input).build();
    let node = SelectionNode::builder(Name::Wildcard("a*".into()))
        .negated(true)
        .key_functions(vec![upper])
        .value_functions(vec![trim.clone(), trim])
        .build();

    insta::assert_snapshot!(TreePrinter::new(&node).dump(), @r"
    a* [negated]
      key: upper(INPUT)
      value: trim(INPUT) | trim(INPUT)
    ");
}
