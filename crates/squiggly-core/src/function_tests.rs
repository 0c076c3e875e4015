use crate::{
    ArgumentKind, ArgumentNode, ArgumentValue, FunctionKind, FunctionNode, IfClause, IfNode,
    IntRangeNode, LambdaNode,
};

fn int(n: i64, index: usize) -> ArgumentNode {
    ArgumentNode::new(ArgumentValue::Integer(n), index)
}

#[test]
fn builder_indexes_arguments_in_order() {
    let f = FunctionNode::builder("get")
        .argument(ArgumentValue::Input)
        .argument(ArgumentValue::Integer(2))
        .build();

    assert_eq!(f.kind(), FunctionKind::Regular);
    assert!(f.ascending());
    assert!(!f.ignore_nulls());
    let indexes: Vec<_> = f.arguments().iter().map(ArgumentNode::index).collect();
    assert_eq!(indexes, [0, 1]);
    assert_eq!(f.to_string(), "get(INPUT, 2)");
}

#[test]
fn prepend_input_shifts_indexes() {
    let mut builder = FunctionNode::builder("upper").argument(ArgumentValue::String("x".into()));
    builder.prepend_input();
    let f = builder.build();

    assert_eq!(f.arguments()[0].kind(), ArgumentKind::Input);
    assert_eq!(f.arguments()[1].index(), 1);
    assert_eq!(f.to_string(), r#"upper(INPUT, "x")"#);
}

#[test]
fn display_tags() {
    let f = FunctionNode::builder("property")
        .kind(FunctionKind::Property)
        .ignore_nulls(true)
        .ascending(false)
        .argument(ArgumentValue::String("a".into()))
        .build();
    assert_eq!(
        f.to_string(),
        r#"property("a") [property, ignore-nulls, descending]"#
    );

    let f = FunctionNode::builder("assign")
        .kind(FunctionKind::SelfAssignment)
        .argument(ArgumentValue::Input)
        .argument(ArgumentValue::Null)
        .build();
    assert_eq!(f.to_string(), "assign(INPUT, null) [self-assignment]");
}

#[test]
fn compound_display() {
    let range = IntRangeNode::new(Some(int(1, 0)), Some(int(3, 0)), true);
    assert_eq!(range.to_string(), "1:3");
    let open = IntRangeNode::new(Some(int(0, 0)), None, false);
    assert_eq!(open.to_string(), "0..");

    let array = ArgumentValue::ArrayDeclaration(vec![int(1, 0), int(2, 1)]);
    assert_eq!(array.to_string(), "[1, 2]");

    let object = ArgumentValue::ObjectDeclaration(vec![(
        ArgumentNode::new(ArgumentValue::String("k".into()), 0),
        ArgumentNode::new(ArgumentValue::Float(1.5), 0),
    )]);
    assert_eq!(object.to_string(), r#"{"k": 1.5}"#);

    let cond = IfNode::new(
        vec![IfClause {
            condition: ArgumentNode::new(ArgumentValue::Boolean(true), 0),
            value: int(1, 1),
        }],
        ArgumentNode::new(ArgumentValue::Null, 0),
    );
    assert_eq!(cond.to_string(), "if true then 1 else null end");

    let body = FunctionNode::builder("self")
        .argument(ArgumentValue::Variable("x".into()))
        .build();
    let lambda = LambdaNode::new(vec!["x".into(), LambdaNode::IGNORED.into()], body);
    assert_eq!(lambda.to_string(), "($x, _) -> self($x)");
}

#[test]
fn chain_display() {
    let chain = ArgumentValue::FunctionChain(vec![
        FunctionNode::builder("self").argument(ArgumentValue::Integer(1)).build(),
        FunctionNode::builder("abs").argument(ArgumentValue::Input).build(),
    ]);
    assert_eq!(chain.to_string(), "(self(1) | abs(INPUT))");
    assert_eq!(chain.kind(), ArgumentKind::FunctionChain);
}

#[test]
fn argument_serializes_kind_and_index() {
    let arg = int(7, 2);
    let json = serde_json::to_string(&arg).unwrap();
    assert_eq!(json, r#"{"kind":"INTEGER","value":7,"index":2}"#);
}
