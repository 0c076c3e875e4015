//! Syntax kinds for the filter language.
//!
//! `SyntaxKind` covers both token kinds (from the lexer) and node kinds (from
//! the parser). Logos derives token recognition; node kinds carry no
//! attributes. `FilterLang` implements Rowan's `Language` for tree building.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST`.
/// `#[repr(u16)]` enables the transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    /// `?[`: null-safe subscript
    #[token("?[")]
    SafeBracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    /// Separates node expression lists
    #[token("|")]
    Pipe,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    /// `?.`: null-safe access
    #[token("?.")]
    SafeDot,

    #[token("..")]
    DotDot,

    #[token("$")]
    Dollar,

    #[token("->")]
    Arrow,

    #[token("_", priority = 3)]
    Underscore,

    #[token("=")]
    Equals,

    #[token(".=")]
    SelfAssign,

    #[token("+=")]
    AddAssign,

    #[token("-=")]
    SubtractAssign,

    #[token("*=")]
    MultiplyAssign,

    #[token("/=")]
    DivideAssign,

    #[token("%=")]
    ModulusAssign,

    #[token("==")]
    EqualsEquals,

    #[token("!=")]
    NotEquals,

    /// SQL-style `<>`
    #[token("<>")]
    SqlNotEquals,

    #[token("<")]
    Lt,

    #[token("<=")]
    LtEq,

    #[token(">")]
    Gt,

    #[token(">=")]
    GtEq,

    #[token("=~")]
    MatchOp,

    #[token("!~")]
    NotMatchOp,

    #[token("!")]
    Bang,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("**")]
    StarStar,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    /// `?:` default operator
    #[token("?:")]
    Elvis,

    #[regex(r"[0-9]+")]
    Integer,

    /// Requires a digit after the dot so `1..3` lexes as a range.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    #[regex(r"'(?:[^'\\]|\\.)*'")]
    #[regex(r"`(?:[^`\\]|\\.)*`")]
    Str,

    /// `~pattern~flags`. Flags are validated when the pattern is built.
    #[regex(r"~(?:[^~\\]|\\.)*~[A-Za-z]*")]
    Regex,

    #[regex(r"\$[A-Za-z_][A-Za-z0-9_]*")]
    #[regex(r"\$\{[^}]*\}")]
    Variable,

    /// Defined after keywords so they take precedence.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Id,

    /// Identifier-like run containing `*`. Never a bare `*` or `**`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*\*[A-Za-z0-9_*]*")]
    #[regex(r"\*+[A-Za-z_][A-Za-z0-9_*]*")]
    WildcardField,

    #[regex(r"[tT][rR][uU][eE]")]
    KwTrue,

    #[regex(r"[fF][aA][lL][sS][eE]")]
    KwFalse,

    #[token("null")]
    KwNull,

    #[token("if")]
    KwIf,

    #[token("then")]
    KwThen,

    #[token("elif")]
    KwElif,

    #[token("else")]
    KwElse,

    #[token("end")]
    KwEnd,

    #[token("not")]
    KwNot,

    #[token("mul")]
    KwMul,

    #[token("div")]
    KwDiv,

    #[token("mod")]
    KwMod,

    #[token("add")]
    KwAdd,

    #[token("sub")]
    KwSub,

    #[token("eq")]
    KwEq,

    #[token("ne")]
    KwNe,

    #[token("lt")]
    KwLt,

    #[token("lte")]
    KwLte,

    #[token("gt")]
    KwGt,

    #[token("gte")]
    KwGte,

    #[token("match")]
    KwMatch,

    #[token("nmatch")]
    KwNmatch,

    #[token("and")]
    KwAnd,

    #[token("or")]
    KwOr,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Coalesced unrecognized characters
    Garbage,

    // --- Node kinds (non-terminals) ---
    Error,
    Root,
    ExprList,
    TopLevelExpr,
    NegatedExpr,
    SugarExpr,
    RecursiveExpr,
    FieldGroupExpr,
    DottedFieldExpr,
    Field,
    Nested,
    KeyValue,
    FieldChain,
    ChainLink,
    Call,
    Subscript,
    Range,
    Number,
    Assignment,
    BinaryArg,
    PrefixArg,
    NullArg,
    LambdaArg,
    LambdaParams,
    GroupArg,
    IfArg,
    IfClause,
    ElseClause,
    ChainArg,
    ArgLink,
    PropertyHead,
    Literal,
    ArrayDecl,
    ObjectDecl,
    ObjectEntry,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        self == Whitespace
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// Reserved words. Any of them can still name a field or a property.
    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= KwTrue && self <= KwOr
    }

    /// Keywords that may name a function when followed by `(`.
    #[inline]
    pub fn is_function_name(self) -> bool {
        self == Id || (self.is_keyword() && !token_sets::RESERVED_WORDS.contains(self))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterLang {}

impl Language for FilterLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<FilterLang>;
pub type SyntaxToken = rowan::SyntaxToken<FilterLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token kinds for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Keywords that keep their grammatical role even before `(`.
    pub const RESERVED_WORDS: TokenSet = TokenSet::new(&[
        KwTrue, KwFalse, KwNull, KwIf, KwThen, KwElif, KwElse, KwEnd,
    ]);

    /// Tokens that spell a field name.
    pub const FIELD_FIRST: TokenSet = TokenSet::new(&[
        Str,
        Id,
        Underscore,
        WildcardField,
        Regex,
        Star,
        Variable,
    ])
    .union(KEYWORDS);

    pub const KEYWORDS: TokenSet = TokenSet::new(&[
        KwTrue, KwFalse, KwNull, KwIf, KwThen, KwElif, KwElse, KwEnd, KwNot, KwMul, KwDiv, KwMod,
        KwAdd, KwSub, KwEq, KwNe, KwLt, KwLte, KwGt, KwGte, KwMatch, KwNmatch, KwAnd, KwOr,
    ]);

    /// Names accepted after `.` or inside `[...]` in an argument chain.
    pub const PROPERTY_NAME: TokenSet = TokenSet::new(&[Id, Str, Variable]).union(KEYWORDS);

    pub const ACCESS_OPS: TokenSet = TokenSet::new(&[Dot, SafeDot]);

    pub const SUBSCRIPT_OPEN: TokenSet = TokenSet::new(&[BracketOpen, SafeBracketOpen]);

    pub const RANGE_SEPARATORS: TokenSet = TokenSet::new(&[Colon, DotDot]);

    pub const ASSIGN_OPS: TokenSet = TokenSet::new(&[
        Equals,
        SelfAssign,
        AddAssign,
        SubtractAssign,
        MultiplyAssign,
        DivideAssign,
        ModulusAssign,
    ]);

    /// Assignments that start a top-level `**` expression. Plain `=` is sugar.
    pub const COMPOUND_ASSIGN_OPS: TokenSet = TokenSet::new(&[
        SelfAssign,
        AddAssign,
        SubtractAssign,
        MultiplyAssign,
        DivideAssign,
        ModulusAssign,
    ]);

    pub const PREFIX_OPS: TokenSet = TokenSet::new(&[Bang, KwNot, Minus, Plus]);

    pub const LITERALS: TokenSet =
        TokenSet::new(&[KwTrue, KwFalse, Float, Integer, Regex, Str]);

    pub const EXPR_FIRST: TokenSet = TokenSet::new(&[Minus, MultiplyAssign, StarStar, BraceOpen])
        .union(FIELD_FIRST);

    /// Where an expression list ends.
    pub const EXPR_LIST_END: TokenSet = TokenSet::new(&[BraceClose, Pipe]);

    /// Synchronization points inside argument lists.
    pub const ARG_RECOVERY: TokenSet = TokenSet::new(&[
        Comma,
        ParenClose,
        BracketClose,
        BraceClose,
        Pipe,
        KwThen,
        KwElif,
        KwElse,
        KwEnd,
    ]);

    /// Synchronization points between expressions.
    pub const EXPR_RECOVERY: TokenSet = TokenSet::new(&[Comma, BraceClose, Pipe]);
}
