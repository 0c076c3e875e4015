//! Function chains and their arguments.
//!
//! A chain is a `Vec<FunctionNode>`; each function takes the previous
//! function's output through an [`ArgumentValue::Input`] argument.

use std::fmt;

use serde::Serialize;

use crate::name::RegexName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionKind {
    Regular,
    /// Property access, always named `property`.
    Property,
    Assignment,
    /// `.=`: the assigned value is evaluated against the current value.
    SelfAssignment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionNode {
    name: String,
    kind: FunctionKind,
    arguments: Vec<ArgumentNode>,
    ignore_nulls: bool,
    ascending: bool,
}

impl FunctionNode {
    pub fn builder(name: impl Into<String>) -> FunctionNodeBuilder {
        FunctionNodeBuilder {
            node: FunctionNode {
                name: name.into(),
                kind: FunctionKind::Regular,
                arguments: Vec::new(),
                ignore_nulls: false,
                ascending: true,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn arguments(&self) -> &[ArgumentNode] {
        &self.arguments
    }

    pub fn ignore_nulls(&self) -> bool {
        self.ignore_nulls
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }
}

/// Arguments get their index from the order they are added.
#[derive(Debug, Clone)]
pub struct FunctionNodeBuilder {
    node: FunctionNode,
}

impl FunctionNodeBuilder {
    pub fn kind(mut self, kind: FunctionKind) -> Self {
        self.node.kind = kind;
        self
    }

    pub fn ignore_nulls(mut self, ignore_nulls: bool) -> Self {
        self.node.ignore_nulls = ignore_nulls;
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.node.ascending = ascending;
        self
    }

    pub fn argument(mut self, value: ArgumentValue) -> Self {
        self.push_argument(value);
        self
    }

    pub fn push_argument(&mut self, value: ArgumentValue) {
        let index = self.node.arguments.len();
        self.node.arguments.push(ArgumentNode::new(value, index));
    }

    /// Prepends `INPUT` and shifts the other arguments' indexes.
    pub fn prepend_input(&mut self) {
        self.node
            .arguments
            .insert(0, ArgumentNode::new(ArgumentValue::Input, 0));
        for (index, arg) in self.node.arguments.iter_mut().enumerate() {
            arg.index = index;
        }
    }

    pub fn argument_count(&self) -> usize {
        self.node.arguments.len()
    }

    pub fn build(self) -> FunctionNode {
        self.node
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArgumentKind {
    Input,
    String,
    Integer,
    Float,
    Boolean,
    Null,
    Regex,
    Variable,
    FunctionChain,
    ArrayDeclaration,
    ObjectDeclaration,
    IntRange,
    If,
    Lambda,
}

/// Argument payload. The variant decides the [`ArgumentKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArgumentValue {
    /// Output of the previous function in the chain.
    Input,
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    Regex(RegexName),
    Variable(String),
    FunctionChain(Vec<FunctionNode>),
    ArrayDeclaration(Vec<ArgumentNode>),
    ObjectDeclaration(Vec<(ArgumentNode, ArgumentNode)>),
    IntRange(IntRangeNode),
    If(IfNode),
    Lambda(LambdaNode),
}

impl ArgumentValue {
    pub fn kind(&self) -> ArgumentKind {
        match self {
            ArgumentValue::Input => ArgumentKind::Input,
            ArgumentValue::String(_) => ArgumentKind::String,
            ArgumentValue::Integer(_) => ArgumentKind::Integer,
            ArgumentValue::Float(_) => ArgumentKind::Float,
            ArgumentValue::Boolean(_) => ArgumentKind::Boolean,
            ArgumentValue::Null => ArgumentKind::Null,
            ArgumentValue::Regex(_) => ArgumentKind::Regex,
            ArgumentValue::Variable(_) => ArgumentKind::Variable,
            ArgumentValue::FunctionChain(_) => ArgumentKind::FunctionChain,
            ArgumentValue::ArrayDeclaration(_) => ArgumentKind::ArrayDeclaration,
            ArgumentValue::ObjectDeclaration(_) => ArgumentKind::ObjectDeclaration,
            ArgumentValue::IntRange(_) => ArgumentKind::IntRange,
            ArgumentValue::If(_) => ArgumentKind::If,
            ArgumentValue::Lambda(_) => ArgumentKind::Lambda,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentNode {
    #[serde(flatten)]
    value: ArgumentValue,
    index: usize,
}

impl ArgumentNode {
    pub fn new(value: ArgumentValue, index: usize) -> Self {
        Self { value, index }
    }

    pub fn kind(&self) -> ArgumentKind {
        self.value.kind()
    }

    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

/// `start:end` or `start..end`. A missing bound is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntRangeNode {
    start: Option<Box<ArgumentNode>>,
    end: Option<Box<ArgumentNode>>,
    exclusive_end: bool,
}

impl IntRangeNode {
    pub fn new(start: Option<ArgumentNode>, end: Option<ArgumentNode>, exclusive_end: bool) -> Self {
        Self {
            start: start.map(Box::new),
            end: end.map(Box::new),
            exclusive_end,
        }
    }

    pub fn start(&self) -> Option<&ArgumentNode> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&ArgumentNode> {
        self.end.as_deref()
    }

    pub fn exclusive_end(&self) -> bool {
        self.exclusive_end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfClause {
    pub condition: ArgumentNode,
    pub value: ArgumentNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfNode {
    clauses: Vec<IfClause>,
    else_clause: Box<ArgumentNode>,
}

impl IfNode {
    pub fn new(clauses: Vec<IfClause>, else_clause: ArgumentNode) -> Self {
        Self {
            clauses,
            else_clause: Box::new(else_clause),
        }
    }

    pub fn clauses(&self) -> &[IfClause] {
        &self.clauses
    }

    pub fn else_clause(&self) -> &ArgumentNode {
        &self.else_clause
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaNode {
    parameters: Vec<String>,
    body: FunctionNode,
}

impl LambdaNode {
    /// Anonymous parameter placeholder.
    pub const IGNORED: &'static str = "_";

    pub fn new(parameters: Vec<String>, body: FunctionNode) -> Self {
        Self { parameters, body }
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn body(&self) -> &FunctionNode {
        &self.body
    }
}

pub(crate) fn write_chain(f: &mut fmt::Formatter<'_>, chain: &[FunctionNode]) -> fmt::Result {
    for (i, function) in chain.iter().enumerate() {
        if i > 0 {
            f.write_str(" | ")?;
        }
        write!(f, "{function}")?;
    }
    Ok(())
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.arguments)?;
        f.write_str(")")?;

        let mut tags = Vec::new();
        match self.kind {
            FunctionKind::Regular => {}
            FunctionKind::Property => tags.push("property"),
            FunctionKind::Assignment => tags.push("assignment"),
            FunctionKind::SelfAssignment => tags.push("self-assignment"),
        }
        if self.ignore_nulls {
            tags.push("ignore-nulls");
        }
        if !self.ascending {
            tags.push("descending");
        }
        if !tags.is_empty() {
            write!(f, " [{}]", tags.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for ArgumentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Input => f.write_str("INPUT"),
            ArgumentValue::String(s) => write!(f, "{s:?}"),
            ArgumentValue::Integer(n) => write!(f, "{n}"),
            ArgumentValue::Float(n) => write!(f, "{n:?}"),
            ArgumentValue::Boolean(b) => write!(f, "{b}"),
            ArgumentValue::Null => f.write_str("null"),
            ArgumentValue::Regex(regex) => write!(f, "{regex}"),
            ArgumentValue::Variable(name) => write!(f, "${name}"),
            ArgumentValue::FunctionChain(chain) => {
                f.write_str("(")?;
                write_chain(f, chain)?;
                f.write_str(")")
            }
            ArgumentValue::ArrayDeclaration(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            ArgumentValue::ObjectDeclaration(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            ArgumentValue::IntRange(range) => write!(f, "{range}"),
            ArgumentValue::If(node) => write!(f, "{node}"),
            ArgumentValue::Lambda(node) => write!(f, "{node}"),
        }
    }
}

impl fmt::Display for IntRangeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        f.write_str(if self.exclusive_end { ":" } else { ".." })?;
        if let Some(end) = &self.end {
            write!(f, "{end}")?;
        }
        Ok(())
    }
}

impl fmt::Display for IfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { " elif" };
            write!(f, "{keyword} {} then {}", clause.condition, clause.value)?;
        }
        write!(f, " else {} end", self.else_clause)
    }
}

impl fmt::Display for LambdaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if param == Self::IGNORED {
                f.write_str(param)?;
            } else {
                write!(f, "${param}")?;
            }
        }
        write!(f, ") -> {}", self.body)
    }
}
