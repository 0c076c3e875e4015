use proptest::prelude::*;
use proptest::sample::subsequence;

use crate::test_utils::compile;

const EXPRESSIONS: &[&str] = &[
    "a",
    "a.b",
    "a.b.c",
    "a{}",
    "a{c,-x}",
    "-d",
    "-a.e",
    "b.c",
    "{b,f}",
    "g{-h}",
    "g.i",
    "*",
    "~j.*~i",
];

fn expression_sets() -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
    subsequence(EXPRESSIONS, 1..=EXPRESSIONS.len())
        .prop_flat_map(|picked| (Just(picked.clone()), Just(picked).prop_shuffle()))
}

proptest! {
    #[test]
    fn merge_is_order_independent((ordered, shuffled) in expression_sets()) {
        let expected = compile(&ordered.join(","));
        let actual = compile(&shuffled.join(","));
        prop_assert_eq!(expected, actual, "{} vs {}", ordered.join(","), shuffled.join(","));
    }

    #[test]
    fn repeating_an_expression_changes_nothing(index in 0..EXPRESSIONS.len()) {
        let once = compile(EXPRESSIONS[index]);
        let twice = compile(&[EXPRESSIONS[index], EXPRESSIONS[index]].join(","));
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn flags_merge_the_same_both_ways() {
    assert_eq!(compile("a{},a.b"), compile("a.b,a{}"));
    assert_eq!(compile("-a,a"), compile("a,-a"));
    assert_eq!(compile("a.b.c,a"), compile("a,a.b.c"));
}
