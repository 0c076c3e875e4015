use indoc::indoc;

use super::{cst, cst_with_spans, cst_with_trivia};

#[test]
fn dotted_path_with_nested_block() {
    insta::assert_snapshot!(cst("a.b{c}"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          Dot "."
          Field
            Id "b"
          Nested
            BraceOpen "{"
            ExprList
              DottedFieldExpr
                Field
                  Id "c"
            BraceClose "}"
    "#);
}

#[test]
fn key_value_and_subscript() {
    insta::assert_snapshot!(cst("a:upper(),b[1:2]"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          KeyValue
            Colon ":"
            FieldChain
              ChainLink
                Call
                  Id "upper"
                  ParenOpen "("
                  ParenClose ")"
        Comma ","
        DottedFieldExpr
          Field
            Id "b"
          KeyValue
            FieldChain
              ChainLink
                Subscript
                  BracketOpen "["
                  Range
                    Number
                      Integer "1"
                    Colon ":"
                    Number
                      Integer "2"
                  BracketClose "]"
    "#);
}

#[test]
fn recursive_with_range_and_args() {
    insta::assert_snapshot!(cst("**[1:]{a}"), @r#"
    Root
      ExprList
        RecursiveExpr
          StarStar "**"
          Subscript
            BracketOpen "["
            Range
              Number
                Integer "1"
              Colon ":"
            BracketClose "]"
          BraceOpen "{"
          DottedFieldExpr
            Field
              Id "a"
          BraceClose "}"
    "#);
}

#[test]
fn negated_and_sugar() {
    insta::assert_snapshot!(cst("-a.b,*=1"), @r#"
    Root
      ExprList
        NegatedExpr
          Minus "-"
          Field
            Id "a"
          Dot "."
          Field
            Id "b"
        Comma ","
        SugarExpr
          MultiplyAssign "*="
          ChainArg
            Literal
              Number
                Integer "1"
    "#);
}

#[test]
fn field_group() {
    insta::assert_snapshot!(cst("{a,'b'}{}"), @r#"
    Root
      ExprList
        FieldGroupExpr
          BraceOpen "{"
          Field
            Id "a"
          Comma ","
          Field
            Str "'b'"
          BraceClose "}"
          Nested
            BraceOpen "{"
            BraceClose "}"
    "#);
}

#[test]
fn binary_and_lambda_args() {
    insta::assert_snapshot!(cst("a.f(1 + x, $v -> 1)"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          KeyValue
            FieldChain
              ChainLink
                Dot "."
                Call
                  Id "f"
                  ParenOpen "("
                  BinaryArg
                    ChainArg
                      Literal
                        Number
                          Integer "1"
                    Plus "+"
                    ChainArg
                      PropertyHead
                        Id "x"
                  Comma ","
                  LambdaArg
                    LambdaParams
                      Variable "$v"
                    Arrow "->"
                    ChainArg
                      Literal
                        Number
                          Integer "1"
                  ParenClose ")"
    "#);
}

#[test]
fn parenthesized_lambda_params() {
    insta::assert_snapshot!(cst("a.f(($x, $y) -> 1)"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          KeyValue
            FieldChain
              ChainLink
                Dot "."
                Call
                  Id "f"
                  ParenOpen "("
                  LambdaArg
                    LambdaParams
                      ParenOpen "("
                      Variable "$x"
                      Comma ","
                      Variable "$y"
                      ParenClose ")"
                    Arrow "->"
                    ChainArg
                      Literal
                        Number
                          Integer "1"
                  ParenClose ")"
    "#);
}

#[test]
fn inner_whitespace_is_insignificant() {
    let pairs = [
        ("a.f(($x,$y)->1)", "a.f( ( $x , $y ) -> 1 )"),
        ("a.f((_,$y)->$y)", "a.f((_, $y) -> $y)"),
        ("a.f(($x)->$x)", "a.f(( $x ) -> $x)"),
        ("a.f(()->2)", "a.f(( ) -> 2)"),
        ("a.f(1,x)", "a.f( 1 , x )"),
        ("a[1:3]", "a[ 1 : 3 ]"),
        ("a.f($.x)", "a.f( $.x )"),
        ("a.f($.x)", "a.f($. x)"),
        ("a.matches(~^b~i,1)", "a.matches( ~^b~i , 1 )"),
        ("a.f({k:'v'},[1,2])", "a.f( { k : 'v' } , [ 1 , 2 ] )"),
        ("a.f(1+2,x<3)", "a.f( 1 + 2 , x < 3 )"),
    ];
    for (tight, spaced) in pairs {
        assert_eq!(cst(spaced), cst(tight), "{spaced:?}");
    }
}

#[test]
fn if_argument() {
    insta::assert_snapshot!(cst("a.f(if x then 1 else null end)"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          KeyValue
            FieldChain
              ChainLink
                Dot "."
                Call
                  Id "f"
                  ParenOpen "("
                  IfArg
                    IfClause
                      KwIf "if"
                      ChainArg
                        PropertyHead
                          Id "x"
                      KwThen "then"
                      ChainArg
                        Literal
                          Number
                            Integer "1"
                    ElseClause
                      KwElse "else"
                      NullArg
                        KwNull "null"
                    KwEnd "end"
                  ParenClose ")"
    "#);
}

#[test]
fn declarations() {
    insta::assert_snapshot!(cst("a.f([x], {k: 'v'})"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          KeyValue
            FieldChain
              ChainLink
                Dot "."
                Call
                  Id "f"
                  ParenOpen "("
                  ChainArg
                    ArrayDecl
                      BracketOpen "["
                      ChainArg
                        PropertyHead
                          Id "x"
                      BracketClose "]"
                  Comma ","
                  ChainArg
                    ObjectDecl
                      BraceOpen "{"
                      ObjectEntry
                        Id "k"
                        Colon ":"
                        ChainArg
                          Literal
                            Str "'v'"
                      BraceClose "}"
                  ParenClose ")"
    "#);
}

#[test]
fn top_level_links_after_pipe() {
    insta::assert_snapshot!(cst("a | **.trim()"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
      Pipe "|"
      TopLevelExpr
        StarStar "**"
        ArgLink
          Dot "."
          Call
            Id "trim"
            ParenOpen "("
            ParenClose ")"
    "#);
}

#[test]
fn top_level_assignment() {
    insta::assert_snapshot!(cst("**+=1"), @r#"
    Root
      TopLevelExpr
        StarStar "**"
        Assignment
          AddAssign "+="
          ChainArg
            Literal
              Number
                Integer "1"
    "#);
}

#[test]
fn trivia_attaches_before_next_node() {
    insta::assert_snapshot!(cst_with_trivia("a, b"), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
        Comma ","
        Whitespace " "
        DottedFieldExpr
          Field
            Id "b"
    "#);
}

#[test]
fn spans() {
    insta::assert_snapshot!(cst_with_spans("a.b"), @r#"
    Root [0..3]
      ExprList [0..3]
        DottedFieldExpr [0..3]
          Field [0..1]
            Id [0..1] "a"
          Dot [1..2] "."
          Field [2..3]
            Id [2..3] "b"
    "#);
}

#[test]
fn multi_line_filter() {
    let input = indoc! {"
        a{
          b,
          c
        }
    "};
    insta::assert_snapshot!(cst(input), @r#"
    Root
      ExprList
        DottedFieldExpr
          Field
            Id "a"
          Nested
            BraceOpen "{"
            ExprList
              DottedFieldExpr
                Field
                  Id "b"
              Comma ","
              DottedFieldExpr
                Field
                  Id "c"
            BraceClose "}"
    "#);
}
