use crate::matcher::{ExpressionMatcher, MatchOutcome};
use crate::{Name, ROOT, SelectionNode};

/// Follows exact names only; `**` anywhere selects everything.
struct ExactPathMatcher;

impl ExpressionMatcher for ExactPathMatcher {
    fn match_path(&self, path: &[&str], _filter: &str, expression: &SelectionNode) -> MatchOutcome {
        let mut node = expression;
        for segment in path {
            if node.child("**").is_some() {
                return MatchOutcome::Always;
            }
            match node.child(segment) {
                Some(child) => node = child,
                None => return MatchOutcome::Never,
            }
        }
        MatchOutcome::Narrowed(node.clone())
    }
}

fn tree() -> SelectionNode {
    let b = SelectionNode::builder(Name::exact("b")).depth(2).build();
    let a = SelectionNode::builder(Name::exact("a")).depth(1).child(b).build();
    let deep = SelectionNode::builder(Name::AnyDeep).depth(2).build();
    let c = SelectionNode::builder(Name::exact("c")).depth(1).child(deep).build();
    SelectionNode::builder(Name::exact(ROOT)).child(a).child(c).build()
}

#[test]
fn outcomes() {
    let tree = tree();
    let matcher = ExactPathMatcher;

    let outcome = matcher.match_path(&["a"], "a.b,c.**", &tree);
    assert!(matches!(&outcome, MatchOutcome::Narrowed(n) if n.name().text() == "a"));

    assert_eq!(matcher.match_path(&["x"], "a.b,c.**", &tree), MatchOutcome::Never);
    assert_eq!(matcher.match_path(&["c", "y"], "a.b,c.**", &tree), MatchOutcome::Always);
}

#[test]
fn node_round_trip_through_sentinels() {
    assert_eq!(MatchOutcome::Always.into_node(), SelectionNode::always_match());
    assert_eq!(MatchOutcome::Never.into_node(), SelectionNode::never_match());
    assert_eq!(
        MatchOutcome::from_node(SelectionNode::always_match()),
        MatchOutcome::Always
    );
    assert_eq!(
        MatchOutcome::from_node(SelectionNode::never_match()),
        MatchOutcome::Never
    );

    let tree = tree();
    assert!(matches!(
        MatchOutcome::from_node(tree.clone()),
        MatchOutcome::Narrowed(n) if n == tree
    ));
}
