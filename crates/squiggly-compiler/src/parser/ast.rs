//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind`; validation happens elsewhere.

use rowan::TextRange;

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(ExprList, ExprList);
ast_node!(TopLevelExpr, TopLevelExpr);
ast_node!(NegatedExpr, NegatedExpr);
ast_node!(SugarExpr, SugarExpr);
ast_node!(RecursiveExpr, RecursiveExpr);
ast_node!(FieldGroupExpr, FieldGroupExpr);
ast_node!(DottedFieldExpr, DottedFieldExpr);
ast_node!(Field, Field);
ast_node!(Nested, Nested);
ast_node!(KeyValue, KeyValue);
ast_node!(FieldChain, FieldChain);
ast_node!(ChainLink, ChainLink);
ast_node!(Call, Call);
ast_node!(Subscript, Subscript);
ast_node!(Range, Range);
ast_node!(Number, Number);
ast_node!(Assignment, Assignment);
ast_node!(BinaryArg, BinaryArg);
ast_node!(PrefixArg, PrefixArg);
ast_node!(NullArg, NullArg);
ast_node!(LambdaArg, LambdaArg);
ast_node!(GroupArg, GroupArg);
ast_node!(IfArg, IfArg);
ast_node!(IfClause, IfClause);
ast_node!(ElseClause, ElseClause);
ast_node!(ChainArg, ChainArg);
ast_node!(ArgLink, ArgLink);
ast_node!(PropertyHead, PropertyHead);
ast_node!(Literal, Literal);
ast_node!(ArrayDecl, ArrayDecl);
ast_node!(ObjectDecl, ObjectDecl);
ast_node!(ObjectEntry, ObjectEntry);

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn find_token(node: &SyntaxNode, pred: impl Fn(SyntaxKind) -> bool) -> Option<SyntaxToken> {
    tokens(node).find(|t| pred(t.kind()))
}

/// One `|`-separated section of a node filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeExprList {
    Exprs(ExprList),
    TopLevel(TopLevelExpr),
}

impl NodeExprList {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ExprList => ExprList::cast(node).map(NodeExprList::Exprs),
            SyntaxKind::TopLevelExpr => TopLevelExpr::cast(node).map(NodeExprList::TopLevel),
            _ => None,
        }
    }
}

/// Expression: one entry of an expression list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Negated(NegatedExpr),
    Sugar(SugarExpr),
    Recursive(RecursiveExpr),
    FieldGroup(FieldGroupExpr),
    DottedField(DottedFieldExpr),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NegatedExpr => NegatedExpr::cast(node).map(Expr::Negated),
            SyntaxKind::SugarExpr => SugarExpr::cast(node).map(Expr::Sugar),
            SyntaxKind::RecursiveExpr => RecursiveExpr::cast(node).map(Expr::Recursive),
            SyntaxKind::FieldGroupExpr => FieldGroupExpr::cast(node).map(Expr::FieldGroup),
            SyntaxKind::DottedFieldExpr => DottedFieldExpr::cast(node).map(Expr::DottedField),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Negated(n) => n.as_cst(),
            Expr::Sugar(n) => n.as_cst(),
            Expr::Recursive(n) => n.as_cst(),
            Expr::FieldGroup(n) => n.as_cst(),
            Expr::DottedField(n) => n.as_cst(),
        }
    }
}

/// Argument expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Binary(BinaryArg),
    Prefix(PrefixArg),
    Null(NullArg),
    Lambda(LambdaArg),
    Group(GroupArg),
    If(IfArg),
    Chain(ChainArg),
}

impl Arg {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BinaryArg => BinaryArg::cast(node).map(Arg::Binary),
            SyntaxKind::PrefixArg => PrefixArg::cast(node).map(Arg::Prefix),
            SyntaxKind::NullArg => NullArg::cast(node).map(Arg::Null),
            SyntaxKind::LambdaArg => LambdaArg::cast(node).map(Arg::Lambda),
            SyntaxKind::GroupArg => GroupArg::cast(node).map(Arg::Group),
            SyntaxKind::IfArg => IfArg::cast(node).map(Arg::If),
            SyntaxKind::ChainArg => ChainArg::cast(node).map(Arg::Chain),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Arg::Binary(n) => n.as_cst(),
            Arg::Prefix(n) => n.as_cst(),
            Arg::Null(n) => n.as_cst(),
            Arg::Lambda(n) => n.as_cst(),
            Arg::Group(n) => n.as_cst(),
            Arg::If(n) => n.as_cst(),
            Arg::Chain(n) => n.as_cst(),
        }
    }

    pub fn text_range(&self) -> TextRange {
        self.as_cst().text_range()
    }
}

impl Root {
    pub fn node_expr_lists(&self) -> impl Iterator<Item = NodeExprList> + '_ {
        self.0.children().filter_map(NodeExprList::cast)
    }

    pub fn expr_lists(&self) -> impl Iterator<Item = ExprList> + '_ {
        self.0.children().filter_map(ExprList::cast)
    }
}

impl ExprList {
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl TopLevelExpr {
    pub fn assignment(&self) -> Option<Assignment> {
        self.0.children().find_map(Assignment::cast)
    }

    pub fn links(&self) -> impl Iterator<Item = ArgLink> + '_ {
        self.0.children().filter_map(ArgLink::cast)
    }
}

impl NegatedExpr {
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.children().filter_map(Field::cast)
    }
}

impl SugarExpr {
    /// `**=` rather than `*=`.
    pub fn is_deep(&self) -> bool {
        find_token(&self.0, |k| k == SyntaxKind::StarStar).is_some()
    }

    pub fn value(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }
}

impl RecursiveExpr {
    pub fn depth(&self) -> Option<Subscript> {
        self.0.children().find_map(Subscript::cast)
    }

    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl FieldGroupExpr {
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.children().filter_map(Field::cast)
    }

    pub fn key_value(&self) -> Option<KeyValue> {
        self.0.children().find_map(KeyValue::cast)
    }

    pub fn nested(&self) -> Option<Nested> {
        self.0.children().find_map(Nested::cast)
    }
}

impl DottedFieldExpr {
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.children().filter_map(Field::cast)
    }

    pub fn key_value(&self) -> Option<KeyValue> {
        self.0.children().find_map(KeyValue::cast)
    }

    pub fn nested(&self) -> Option<Nested> {
        self.0.children().find_map(Nested::cast)
    }
}

impl Field {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }
}

impl Nested {
    /// `None` for an empty block `{}`.
    pub fn expr_list(&self) -> Option<ExprList> {
        self.0.children().find_map(ExprList::cast)
    }
}

/// One part of a key/value: a function chain or an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChainPart {
    Chain(FieldChain),
    Assignment(Assignment),
}

impl ChainPart {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FieldChain => FieldChain::cast(node).map(ChainPart::Chain),
            SyntaxKind::Assignment => Assignment::cast(node).map(ChainPart::Assignment),
            _ => None,
        }
    }
}

impl KeyValue {
    /// `:`-separated form, where parts are key then value.
    pub fn has_colon(&self) -> bool {
        find_token(&self.0, |k| k == SyntaxKind::Colon).is_some()
    }

    pub fn parts(&self) -> impl Iterator<Item = ChainPart> + '_ {
        self.0.children().filter_map(ChainPart::cast)
    }
}

impl FieldChain {
    pub fn links(&self) -> impl Iterator<Item = ChainLink> + '_ {
        self.0.children().filter_map(ChainLink::cast)
    }
}

impl ChainLink {
    pub fn access_op(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| matches!(k, SyntaxKind::Dot | SyntaxKind::SafeDot))
    }

    pub fn call(&self) -> Option<Call> {
        self.0.children().find_map(Call::cast)
    }

    pub fn subscript(&self) -> Option<Subscript> {
        self.0.children().find_map(Subscript::cast)
    }
}

impl Call {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn args(&self) -> impl Iterator<Item = Arg> + '_ {
        self.0.children().filter_map(Arg::cast)
    }
}

impl Subscript {
    /// Opened with `?[`.
    pub fn is_safe(&self) -> bool {
        find_token(&self.0, |k| k == SyntaxKind::SafeBracketOpen).is_some()
    }

    pub fn number(&self) -> Option<Number> {
        self.0.children().find_map(Number::cast)
    }

    pub fn range(&self) -> Option<Range> {
        self.0.children().find_map(Range::cast)
    }

    /// A property name written inside the brackets.
    pub fn name(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| {
            !matches!(
                k,
                SyntaxKind::BracketOpen | SyntaxKind::SafeBracketOpen | SyntaxKind::BracketClose
            )
        })
    }
}

/// A range bound: an integer literal or a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeBound {
    Number(Number),
    Variable(SyntaxToken),
}

impl RangeBound {
    pub fn text_range(&self) -> TextRange {
        match self {
            RangeBound::Number(n) => n.text_range(),
            RangeBound::Variable(t) => t.text_range(),
        }
    }
}

impl Range {
    pub fn separator(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| matches!(k, SyntaxKind::Colon | SyntaxKind::DotDot))
    }

    /// `:` excludes the end, `..` includes it.
    pub fn is_exclusive(&self) -> bool {
        self.separator()
            .is_none_or(|t| t.kind() == SyntaxKind::Colon)
    }

    pub fn start(&self) -> Option<RangeBound> {
        self.bounds().0
    }

    pub fn end(&self) -> Option<RangeBound> {
        self.bounds().1
    }

    fn bounds(&self) -> (Option<RangeBound>, Option<RangeBound>) {
        let mut start = None;
        let mut end = None;
        let mut seen_separator = false;
        for element in self.0.children_with_tokens() {
            let bound = match element {
                rowan::NodeOrToken::Node(node) => Number::cast(node).map(RangeBound::Number),
                rowan::NodeOrToken::Token(token) => match token.kind() {
                    SyntaxKind::Colon | SyntaxKind::DotDot => {
                        seen_separator = true;
                        None
                    }
                    SyntaxKind::Variable => Some(RangeBound::Variable(token)),
                    _ => None,
                },
            };
            match (bound, seen_separator) {
                (Some(b), false) => start = Some(b),
                (Some(b), true) => end = Some(b),
                (None, _) => {}
            }
        }
        (start, end)
    }
}

impl Number {
    pub fn is_negative(&self) -> bool {
        find_token(&self.0, |k| k == SyntaxKind::Minus).is_some()
    }

    pub fn value(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| matches!(k, SyntaxKind::Integer | SyntaxKind::Float))
    }

    pub fn is_float(&self) -> bool {
        self.value()
            .is_some_and(|t| t.kind() == SyntaxKind::Float)
    }

    /// Digits with the sign applied, e.g. `-12`.
    pub fn text(&self) -> String {
        let digits = self.value().map(|t| t.text().to_string()).unwrap_or_default();
        if self.is_negative() {
            format!("-{digits}")
        } else {
            digits
        }
    }
}

impl Assignment {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn value(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }
}

impl BinaryArg {
    pub fn lhs(&self) -> Option<Arg> {
        self.0.children().filter_map(Arg::cast).next()
    }

    pub fn rhs(&self) -> Option<Arg> {
        self.0.children().filter_map(Arg::cast).nth(1)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }
}

impl PrefixArg {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn operand(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }
}

impl LambdaArg {
    /// Variable and `_` parameter tokens, in order.
    pub fn params(&self) -> Vec<SyntaxToken> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::LambdaParams)
            .map(|params| {
                tokens(&params)
                    .filter(|t| matches!(t.kind(), SyntaxKind::Variable | SyntaxKind::Underscore))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }
}

impl GroupArg {
    pub fn inner(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }

    pub fn links(&self) -> impl Iterator<Item = ArgLink> + '_ {
        self.0.children().filter_map(ArgLink::cast)
    }
}

impl IfArg {
    pub fn clauses(&self) -> impl Iterator<Item = IfClause> + '_ {
        self.0.children().filter_map(IfClause::cast)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        self.0.children().find_map(ElseClause::cast)
    }
}

impl IfClause {
    pub fn condition(&self) -> Option<Arg> {
        self.0.children().filter_map(Arg::cast).next()
    }

    pub fn value(&self) -> Option<Arg> {
        self.0.children().filter_map(Arg::cast).nth(1)
    }
}

impl ElseClause {
    pub fn value(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }
}

/// The first element of an argument chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChainHead {
    Array(ArrayDecl),
    Object(ObjectDecl),
    Literal(Literal),
    Range(Subscript),
    Variable(SyntaxToken),
    Property(PropertyHead),
    Call(Call),
}

impl ChainArg {
    /// `-` or `+` sort marker.
    pub fn sort(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| matches!(k, SyntaxKind::Minus | SyntaxKind::Plus))
    }

    /// Ascending unless marked with `-`.
    pub fn is_ascending(&self) -> bool {
        self.sort().is_none_or(|t| t.kind() != SyntaxKind::Minus)
    }

    pub fn head(&self) -> Option<ChainHead> {
        for element in self.0.children_with_tokens() {
            let head = match element {
                rowan::NodeOrToken::Node(node) => match node.kind() {
                    SyntaxKind::ArrayDecl => ArrayDecl::cast(node).map(ChainHead::Array),
                    SyntaxKind::ObjectDecl => ObjectDecl::cast(node).map(ChainHead::Object),
                    SyntaxKind::Literal => Literal::cast(node).map(ChainHead::Literal),
                    SyntaxKind::Subscript => Subscript::cast(node).map(ChainHead::Range),
                    SyntaxKind::PropertyHead => PropertyHead::cast(node).map(ChainHead::Property),
                    SyntaxKind::Call => Call::cast(node).map(ChainHead::Call),
                    _ => None,
                },
                rowan::NodeOrToken::Token(token) if token.kind() == SyntaxKind::Variable => {
                    Some(ChainHead::Variable(token))
                }
                rowan::NodeOrToken::Token(_) => None,
            };
            if head.is_some() {
                return head;
            }
        }
        None
    }

    pub fn links(&self) -> impl Iterator<Item = ArgLink> + '_ {
        self.0.children().filter_map(ArgLink::cast)
    }
}

impl ArgLink {
    pub fn access_op(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| matches!(k, SyntaxKind::Dot | SyntaxKind::SafeDot))
    }

    pub fn call(&self) -> Option<Call> {
        self.0.children().find_map(Call::cast)
    }

    /// Property name after `.` or `?.`.
    pub fn name(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| !matches!(k, SyntaxKind::Dot | SyntaxKind::SafeDot))
    }

    pub fn subscript(&self) -> Option<Subscript> {
        self.0.children().find_map(Subscript::cast)
    }
}

impl PropertyHead {
    /// Starts with `$`.
    pub fn is_dollar(&self) -> bool {
        find_token(&self.0, |k| k == SyntaxKind::Dollar).is_some()
    }

    /// `?.` or `?[` after `$`.
    pub fn is_safe(&self) -> bool {
        find_token(&self.0, |k| {
            matches!(k, SyntaxKind::SafeDot | SyntaxKind::SafeBracketOpen)
        })
        .is_some()
    }

    /// The identifier, or the name accessed on `$`.
    pub fn name(&self) -> Option<SyntaxToken> {
        find_token(&self.0, |k| {
            !matches!(
                k,
                SyntaxKind::Dollar
                    | SyntaxKind::Dot
                    | SyntaxKind::SafeDot
                    | SyntaxKind::BracketOpen
                    | SyntaxKind::SafeBracketOpen
                    | SyntaxKind::BracketClose
            )
        })
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).next()
    }

    pub fn number(&self) -> Option<Number> {
        self.0.children().find_map(Number::cast)
    }
}

impl ArrayDecl {
    pub fn items(&self) -> impl Iterator<Item = Arg> + '_ {
        self.0.children().filter_map(Arg::cast)
    }
}

impl ObjectDecl {
    pub fn entries(&self) -> impl Iterator<Item = ObjectEntry> + '_ {
        self.0.children().filter_map(ObjectEntry::cast)
    }
}

/// Key of an object entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    /// Identifier, keyword or variable.
    Name(SyntaxToken),
    Literal(Literal),
}

impl ObjectEntry {
    pub fn key(&self) -> Option<ObjectKey> {
        if let Some(literal) = self.0.children().find_map(Literal::cast) {
            return Some(ObjectKey::Literal(literal));
        }
        tokens(&self.0)
            .next()
            .filter(|t| t.kind() != SyntaxKind::Colon)
            .map(ObjectKey::Name)
    }

    pub fn value(&self) -> Option<Arg> {
        self.0.children().find_map(Arg::cast)
    }
}
