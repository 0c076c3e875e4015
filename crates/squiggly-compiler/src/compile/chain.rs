//! Function and argument chain construction.
//!
//! Field chains (`a.upper()[0]`), assignments (`a+=1`) and the argument
//! grammar inside calls all become `FunctionNode` sequences here.

use rowan::TextRange;
use squiggly_core::{
    ArgumentNode, ArgumentValue, FunctionKind, FunctionNode, FunctionNodeBuilder, IfClause,
    IfNode, IntRangeNode, LambdaNode,
};

use super::Context;
use super::literal::{
    build_pattern, parse_boolean, parse_float, parse_integer, unquote, variable_name,
};
use crate::ParseError;
use crate::diagnostics::DiagnosticKind;
use crate::parser::ast::{self, ChainHead, ChainPart, ObjectKey, RangeBound};
use crate::parser::cst::{SyntaxKind, SyntaxToken};
use crate::parser::operators;

type BuildResult<T> = Result<T, ParseError>;

const SELF: &str = "self";
const GET: &str = "get";
const SLICE: &str = "slice";
const PROPERTY: &str = "property";

/// Functions a key/value attaches to a node.
#[derive(Debug, Clone, Default)]
pub(crate) struct KeyValueFunctions {
    pub key: Vec<FunctionNode>,
    pub value: Vec<FunctionNode>,
}

pub(crate) struct ChainBuilder<'a, 'src> {
    cx: &'a Context<'src>,
}

impl<'a, 'src> ChainBuilder<'a, 'src> {
    pub fn new(cx: &'a Context<'src>) -> Self {
        Self { cx }
    }

    /// With `:` the parts are key then value; otherwise the chain is the value.
    pub fn key_value(&self, key_value: &ast::KeyValue) -> BuildResult<KeyValueFunctions> {
        let mut parts = key_value.parts();
        if key_value.has_colon() {
            let key = parts.next().map(|p| self.chain_part(&p)).transpose()?;
            let value = parts.next().map(|p| self.chain_part(&p)).transpose()?;
            return Ok(KeyValueFunctions {
                key: key.unwrap_or_default(),
                value: value.unwrap_or_default(),
            });
        }
        let value = parts.next().map(|p| self.chain_part(&p)).transpose()?;
        Ok(KeyValueFunctions {
            key: Vec::new(),
            value: value.unwrap_or_default(),
        })
    }

    fn chain_part(&self, part: &ChainPart) -> BuildResult<Vec<FunctionNode>> {
        match part {
            ChainPart::Chain(chain) => chain
                .links()
                .map(|link| self.field_link(&link))
                .collect(),
            ChainPart::Assignment(assignment) => Ok(vec![self.assignment(assignment)?]),
        }
    }

    /// Function links always take `INPUT`; subscripts become `get`/`slice`.
    fn field_link(&self, link: &ast::ChainLink) -> BuildResult<FunctionNode> {
        if let Some(call) = link.call() {
            let safe = is_safe_access(link.access_op());
            return Ok(self.call(&call, true)?.ignore_nulls(safe).build());
        }
        if let Some(subscript) = link.subscript() {
            return self.index_function(&subscript);
        }
        Err(self.cx.error(
            link.text_range(),
            DiagnosticKind::UnknownChainLink,
            link.as_cst().text().to_string(),
        ))
    }

    /// `[n]` → `get(INPUT, n)`, `[a:b]` → `slice(INPUT, a:b)`.
    fn index_function(&self, subscript: &ast::Subscript) -> BuildResult<FunctionNode> {
        if let Some(range) = subscript.range() {
            let range = self.int_range(&range)?;
            return Ok(FunctionNode::builder(SLICE)
                .argument(ArgumentValue::Input)
                .argument(ArgumentValue::IntRange(range))
                .build());
        }
        if let Some(number) = subscript.number() {
            let index = self.integer(&number)?;
            return Ok(FunctionNode::builder(GET)
                .argument(ArgumentValue::Input)
                .argument(ArgumentValue::Integer(index))
                .build());
        }
        Err(self.cx.error(
            subscript.text_range(),
            DiagnosticKind::ExpectedRangeBound,
            subscript.as_cst().text().to_string(),
        ))
    }

    fn call(&self, call: &ast::Call, input: bool) -> BuildResult<FunctionNodeBuilder> {
        let name = call.name().map(|t| t.text().to_string()).unwrap_or_default();
        let mut builder = FunctionNode::builder(name);
        if input {
            builder.push_argument(ArgumentValue::Input);
        }
        for arg in call.args() {
            builder.push_argument(self.arg(&arg)?);
        }
        Ok(builder)
    }

    /// `op(INPUT, value)`; `.=` is a self-assignment.
    pub fn assignment(&self, assignment: &ast::Assignment) -> BuildResult<FunctionNode> {
        let op = assignment.op().map(|t| t.kind());
        let Some(name) = op.and_then(operators::assignment) else {
            return Err(self.unknown_operator(assignment.text_range(), assignment.op()));
        };
        let kind = if op == Some(SyntaxKind::SelfAssign) {
            FunctionKind::SelfAssignment
        } else {
            FunctionKind::Assignment
        };
        let value = self.required_arg(assignment.value(), assignment.text_range())?;
        Ok(FunctionNode::builder(name)
            .kind(kind)
            .argument(ArgumentValue::Input)
            .argument(value)
            .build())
    }

    /// Links after `**` in a top-level expression. Each receives `INPUT`.
    pub fn top_level_links(
        &self,
        links: impl Iterator<Item = ast::ArgLink>,
    ) -> BuildResult<Vec<FunctionNode>> {
        links
            .map(|link| self.arg_link(&link).map(FunctionNodeBuilder::build))
            .collect()
    }

    pub fn arg(&self, arg: &ast::Arg) -> BuildResult<ArgumentValue> {
        match arg {
            ast::Arg::Null(_) => Ok(ArgumentValue::Null),
            ast::Arg::Chain(chain) => Ok(ArgumentValue::FunctionChain(self.arg_chain(chain)?)),
            ast::Arg::Lambda(lambda) => self.lambda(lambda),
            ast::Arg::Group(group) => self.group(group),
            ast::Arg::If(if_arg) => self.if_arg(if_arg),
            ast::Arg::Binary(binary) => {
                let op = binary.op();
                let Some(infix) = op.as_ref().and_then(|t| operators::infix(t.kind())) else {
                    return Err(self.unknown_operator(binary.text_range(), op));
                };
                let lhs = self.required_arg(binary.lhs(), binary.text_range())?;
                let rhs = self.required_arg(binary.rhs(), binary.text_range())?;
                Ok(operator_chain(infix.function, vec![lhs, rhs]))
            }
            ast::Arg::Prefix(prefix) => {
                let op = prefix.op();
                let Some(function) = op.as_ref().and_then(|t| operators::prefix(t.kind())) else {
                    return Err(self.unknown_operator(prefix.text_range(), op));
                };
                let operand = self.required_arg(prefix.operand(), prefix.text_range())?;
                Ok(operator_chain(function, vec![operand]))
            }
        }
    }

    fn required_arg(&self, arg: Option<ast::Arg>, owner: TextRange) -> BuildResult<ArgumentValue> {
        match arg {
            Some(arg) => self.arg(&arg),
            None => Err(self
                .cx
                .error_default(TextRange::empty(owner.end()), DiagnosticKind::ExpectedArgument)),
        }
    }

    fn unknown_operator(&self, range: TextRange, op: Option<SyntaxToken>) -> ParseError {
        let text = op.map(|t| t.text().to_string()).unwrap_or_default();
        self.cx.error(range, DiagnosticKind::UnknownOperator, text)
    }

    /// A group without links is its inner argument; with links it heads a chain.
    fn group(&self, group: &ast::GroupArg) -> BuildResult<ArgumentValue> {
        let inner = self.required_arg(group.inner(), group.text_range())?;
        let mut links = group.links().peekable();
        if links.peek().is_none() {
            return Ok(inner);
        }
        let mut functions = vec![self_function(inner)];
        for link in links {
            functions.push(self.arg_link(&link)?.build());
        }
        Ok(ArgumentValue::FunctionChain(functions))
    }

    fn if_arg(&self, if_arg: &ast::IfArg) -> BuildResult<ArgumentValue> {
        let mut clauses = Vec::new();
        for clause in if_arg.clauses() {
            let condition = self.required_arg(clause.condition(), clause.text_range())?;
            let value = self.required_arg(clause.value(), clause.text_range())?;
            clauses.push(IfClause {
                condition: ArgumentNode::new(condition, 0),
                value: ArgumentNode::new(value, 1),
            });
        }
        let else_value = match if_arg.else_clause() {
            Some(clause) => self.required_arg(clause.value(), clause.text_range())?,
            None => ArgumentValue::Null,
        };
        let node = IfNode::new(clauses, ArgumentNode::new(else_value, 0));
        Ok(ArgumentValue::FunctionChain(vec![self_function(
            ArgumentValue::If(node),
        )]))
    }

    fn lambda(&self, lambda: &ast::LambdaArg) -> BuildResult<ArgumentValue> {
        let parameters = lambda
            .params()
            .iter()
            .map(|t| match t.kind() {
                SyntaxKind::Variable => variable_name(t.text()),
                _ => LambdaNode::IGNORED.to_string(),
            })
            .collect();
        let body = self.required_arg(lambda.body(), lambda.text_range())?;
        Ok(ArgumentValue::Lambda(LambdaNode::new(
            parameters,
            self_function(body),
        )))
    }

    /// Head plus links. A `-` sort marker makes the head and links descending.
    fn arg_chain(&self, chain: &ast::ChainArg) -> BuildResult<Vec<FunctionNode>> {
        let ascending = chain.is_ascending();
        let Some(head) = chain.head() else {
            return Err(self.cx.error_default(chain.text_range(), DiagnosticKind::ExpectedArgument));
        };

        let head = match head {
            ChainHead::Array(array) => {
                let items = array
                    .items()
                    .enumerate()
                    .map(|(i, item)| Ok(ArgumentNode::new(self.arg(&item)?, i)))
                    .collect::<BuildResult<Vec<_>>>()?;
                self_function(ArgumentValue::ArrayDeclaration(items))
            }
            ChainHead::Object(object) => {
                let entries = object
                    .entries()
                    .map(|entry| self.object_entry(&entry))
                    .collect::<BuildResult<Vec<_>>>()?;
                self_function(ArgumentValue::ObjectDeclaration(entries))
            }
            ChainHead::Literal(literal) => self_function(self.literal(&literal)?),
            ChainHead::Range(subscript) => {
                let Some(range) = subscript.range() else {
                    return Err(self.cx.error_default(
                        subscript.text_range(),
                        DiagnosticKind::ExpectedRangeBound,
                    ));
                };
                self_function(ArgumentValue::IntRange(self.int_range(&range)?))
            }
            ChainHead::Variable(token) => {
                self_function(ArgumentValue::Variable(variable_name(token.text())))
            }
            ChainHead::Property(property) => {
                self.property_head(&property).ascending(ascending).build()
            }
            ChainHead::Call(call) => self.call(&call, false)?.ascending(ascending).build(),
        };

        let mut functions = vec![head];
        for link in chain.links() {
            functions.push(self.arg_link(&link)?.ascending(ascending).build());
        }
        Ok(functions)
    }

    fn object_entry(
        &self,
        entry: &ast::ObjectEntry,
    ) -> BuildResult<(ArgumentNode, ArgumentNode)> {
        let key = match entry.key() {
            Some(ObjectKey::Literal(literal)) => self.literal(&literal)?,
            Some(ObjectKey::Name(token)) if token.kind() == SyntaxKind::Variable => {
                ArgumentValue::Variable(variable_name(token.text()))
            }
            Some(ObjectKey::Name(token)) => ArgumentValue::String(token.text().to_string()),
            None => {
                return Err(self
                    .cx
                    .error_default(entry.text_range(), DiagnosticKind::ExpectedPropertyName));
            }
        };
        let value = self.required_arg(entry.value(), entry.text_range())?;
        Ok((ArgumentNode::new(key, 0), ArgumentNode::new(value, 0)))
    }

    /// `name`, `$`, `$.x`, `$?.x`, `$[x]` or `$?[x]`.
    fn property_head(&self, head: &ast::PropertyHead) -> FunctionNodeBuilder {
        if !head.is_dollar() {
            let name = head.name().map(|t| t.text().to_string()).unwrap_or_default();
            return property(ArgumentValue::String(name));
        }
        match head.name() {
            Some(name) => property(property_name(&name)).ignore_nulls(head.is_safe()),
            None => property(ArgumentValue::String("$".to_string())),
        }
    }

    /// A link after the head of an argument chain. Always receives `INPUT`.
    fn arg_link(&self, link: &ast::ArgLink) -> BuildResult<FunctionNodeBuilder> {
        if let Some(subscript) = link.subscript() {
            let value = if subscript.range().is_some() || subscript.number().is_some() {
                ArgumentValue::FunctionChain(vec![self.index_function(&subscript)?])
            } else if let Some(name) = subscript.name() {
                property_name(&name)
            } else {
                return Err(self.cx.error_default(
                    subscript.text_range(),
                    DiagnosticKind::ExpectedPropertyName,
                ));
            };
            return Ok(property(value).ignore_nulls(subscript.is_safe()));
        }

        let safe = is_safe_access(link.access_op());
        if let Some(call) = link.call() {
            return Ok(self.call(&call, true)?.ignore_nulls(safe));
        }
        if let Some(name) = link.name() {
            return Ok(property(property_name(&name)).ignore_nulls(safe));
        }
        Err(self.cx.error(
            link.text_range(),
            DiagnosticKind::UnknownChainLink,
            link.as_cst().text().to_string(),
        ))
    }

    fn literal(&self, literal: &ast::Literal) -> BuildResult<ArgumentValue> {
        if let Some(number) = literal.number() {
            return self.number(&number);
        }
        let Some(token) = literal.token() else {
            return Err(self.cx.error_default(literal.text_range(), DiagnosticKind::ExpectedArgument));
        };
        let range = token.text_range();
        match token.kind() {
            SyntaxKind::KwTrue | SyntaxKind::KwFalse => {
                Ok(ArgumentValue::Boolean(parse_boolean(token.text())))
            }
            SyntaxKind::Str => Ok(ArgumentValue::String(unquote(token.text()))),
            SyntaxKind::Regex => build_pattern(token.text())
                .map(ArgumentValue::Regex)
                .map_err(|err| self.cx.literal_error(range, err)),
            _ => Err(self.cx.error(
                range,
                DiagnosticKind::ExpectedArgument,
                token.text().to_string(),
            )),
        }
    }

    fn number(&self, number: &ast::Number) -> BuildResult<ArgumentValue> {
        let text = number.text();
        let value = if number.is_float() {
            parse_float(&text).map(ArgumentValue::Float)
        } else {
            parse_integer(&text).map(ArgumentValue::Integer)
        };
        value.map_err(|err| self.cx.literal_error(number.text_range(), err))
    }

    fn integer(&self, number: &ast::Number) -> BuildResult<i64> {
        if number.is_float() {
            return Err(self
                .cx
                .error(number.text_range(), DiagnosticKind::InvalidNumber, number.text()));
        }
        parse_integer(&number.text()).map_err(|err| self.cx.literal_error(number.text_range(), err))
    }

    /// Missing start defaults to `0`, missing end is unbounded.
    pub fn int_range(&self, range: &ast::Range) -> BuildResult<IntRangeNode> {
        let start = match range.start() {
            Some(bound) => self.range_bound(&bound)?,
            None => ArgumentValue::Integer(0),
        };
        let end = range
            .end()
            .map(|bound| self.range_bound(&bound))
            .transpose()?;
        Ok(IntRangeNode::new(
            Some(ArgumentNode::new(start, 0)),
            end.map(|value| ArgumentNode::new(value, 0)),
            range.is_exclusive(),
        ))
    }

    fn range_bound(&self, bound: &RangeBound) -> BuildResult<ArgumentValue> {
        match bound {
            RangeBound::Number(number) => Ok(ArgumentValue::Integer(self.integer(number)?)),
            RangeBound::Variable(token) => Ok(ArgumentValue::Variable(variable_name(token.text()))),
        }
    }
}

fn is_safe_access(op: Option<SyntaxToken>) -> bool {
    op.is_some_and(|t| t.kind() == SyntaxKind::SafeDot)
}

/// `property(INPUT, value)`.
fn property(value: ArgumentValue) -> FunctionNodeBuilder {
    FunctionNode::builder(PROPERTY)
        .kind(FunctionKind::Property)
        .argument(ArgumentValue::Input)
        .argument(value)
}

/// Identifier or keyword → STRING, string → unescaped STRING, variable → VARIABLE.
fn property_name(token: &SyntaxToken) -> ArgumentValue {
    match token.kind() {
        SyntaxKind::Str => ArgumentValue::String(unquote(token.text())),
        SyntaxKind::Variable => ArgumentValue::Variable(variable_name(token.text())),
        _ => ArgumentValue::String(token.text().to_string()),
    }
}

fn self_function(value: ArgumentValue) -> FunctionNode {
    FunctionNode::builder(SELF).argument(value).build()
}

/// `FUNCTION_CHAIN[op(operands...)]`.
fn operator_chain(function: &str, operands: Vec<ArgumentValue>) -> ArgumentValue {
    let mut builder = FunctionNode::builder(function);
    for operand in operands {
        builder.push_argument(operand);
    }
    ArgumentValue::FunctionChain(vec![builder.build()])
}
