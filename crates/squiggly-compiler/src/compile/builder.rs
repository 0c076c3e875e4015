//! Tree builder: walks expression lists into the selection arena.

use squiggly_core::{ArgumentValue, FunctionKind, FunctionNode, Name, SelectionNode};

use super::Context;
use super::chain::{ChainBuilder, KeyValueFunctions};
use super::names;
use super::negation;
use super::tree::{DepthRange, Detached, NodeId, SelectionTree};
use crate::ParseError;
use crate::diagnostics::DiagnosticKind;
use crate::parser::ast::{self, Expr, RangeBound};

type BuildResult<T> = Result<T, ParseError>;

pub(crate) struct TreeBuilder<'a, 'src> {
    cx: &'a Context<'src>,
    chains: ChainBuilder<'a, 'src>,
    tree: SelectionTree,
}

impl<'a, 'src> TreeBuilder<'a, 'src> {
    pub fn new(cx: &'a Context<'src>) -> Self {
        Self {
            cx,
            chains: ChainBuilder::new(cx),
            tree: SelectionTree::new(),
        }
    }

    pub fn build_expr_list(mut self, exprs: &ast::ExprList) -> BuildResult<SelectionNode> {
        let root = self.tree.root();
        self.expr_list(exprs, root)?;
        Ok(self.finish())
    }

    /// `**.fn()` or `** op= v`: the root becomes `**` and carries the chain.
    pub fn build_top_level(mut self, expr: &ast::TopLevelExpr) -> BuildResult<SelectionNode> {
        let root = self.tree.root();
        let functions = match expr.assignment() {
            Some(assignment) => vec![self.chains.assignment(&assignment)?],
            None => self.chains.top_level_links(expr.links())?,
        };
        self.tree.rename(root, Name::AnyDeep);
        self.tree.set_value_functions(root, functions);
        Ok(self.finish())
    }

    fn finish(mut self) -> SelectionNode {
        negation::analyze(&mut self.tree);
        self.tree.freeze(self.tree.root())
    }

    fn expr_list(&mut self, exprs: &ast::ExprList, parent: NodeId) -> BuildResult<()> {
        for expr in exprs.exprs() {
            self.expression(&expr, parent)?;
        }
        Ok(())
    }

    fn expression(&mut self, expr: &Expr, parent: NodeId) -> BuildResult<()> {
        match expr {
            Expr::Negated(negated) => self.negated(negated, parent),
            Expr::Sugar(sugar) => {
                let child = self.sugar(sugar)?;
                self.tree.add_child(parent, child);
                Ok(())
            }
            Expr::Recursive(recursive) => self.recursive(recursive, parent),
            Expr::FieldGroup(group) => {
                let fields: Vec<ast::Field> = group.fields().collect();
                for field in &fields {
                    let name = self.field_name(field)?;
                    self.field(parent, name, group.key_value(), group.nested())?;
                }
                Ok(())
            }
            Expr::DottedField(dotted) => self.dotted_field(dotted, parent),
        }
    }

    /// `a.b.c`: dot-pathed intermediates, then the leaf with key/value and nested block.
    fn dotted_field(&mut self, dotted: &ast::DottedFieldExpr, parent: NodeId) -> BuildResult<()> {
        let fields: Vec<ast::Field> = dotted.fields().collect();
        let Some((last, path)) = fields.split_last() else {
            return Err(self.cx.error(
                dotted.text_range(),
                DiagnosticKind::UnrecognizedExpression,
                dotted.as_cst().text().to_string(),
            ));
        };

        if !path.is_empty() {
            self.tree.mark_squiggly(parent);
        }

        let mut parent = parent;
        for field in path {
            let name = self.field_name(field)?;
            let intermediate = Detached::new(name).dot_pathed(true).squiggly(true);
            parent = self.tree.add_child(parent, intermediate);
        }

        let name = self.field_name(last)?;
        self.field(parent, name, dotted.key_value(), dotted.nested())
    }

    /// Inserts a leaf and recurses into its nested block.
    fn field(
        &mut self,
        parent: NodeId,
        name: Name,
        key_value: Option<ast::KeyValue>,
        nested: Option<ast::Nested>,
    ) -> BuildResult<()> {
        let mut child = self.with_key_value(Detached::new(name), key_value)?;
        let nested_list = nested.as_ref().map(ast::Nested::expr_list);
        match &nested_list {
            Some(None) => child = child.empty_nested(true),
            Some(Some(_)) => child = child.squiggly(true),
            None => {}
        }

        let id = self.tree.add_child(parent, child);
        if let Some(Some(list)) = nested_list {
            self.expr_list(&list, id)?;
        }
        Ok(())
    }

    fn with_key_value(
        &self,
        child: Detached,
        key_value: Option<ast::KeyValue>,
    ) -> BuildResult<Detached> {
        let Some(key_value) = key_value else {
            return Ok(child);
        };
        let KeyValueFunctions { key, value } = self.chains.key_value(&key_value)?;
        Ok(child.key_functions(key).value_functions(value))
    }

    /// `-a` negates a plain child; `-a.b` builds a dot-pathed path with a negated leaf.
    fn negated(&mut self, negated: &ast::NegatedExpr, parent: NodeId) -> BuildResult<()> {
        let fields: Vec<ast::Field> = negated.fields().collect();
        if let [field] = fields.as_slice() {
            let name = self.field_name(field)?;
            self.tree.add_child(parent, Detached::new(name).negated(true));
            return Ok(());
        }

        let mut parent = parent;
        let last = fields.len().saturating_sub(1);
        for (i, field) in fields.iter().enumerate() {
            let name = self.field_name(field)?;
            self.tree.mark_squiggly(parent);
            let node = Detached::new(name).dot_pathed(true).negated(i == last);
            parent = self.tree.add_child(parent, node);
        }
        Ok(())
    }

    /// `*=v` → `*` child, `**=v` → `**` child, valued `assign(INPUT, v)`.
    fn sugar(&self, sugar: &ast::SugarExpr) -> BuildResult<Detached> {
        let Some(value) = sugar.value() else {
            return Err(self
                .cx
                .error_default(sugar.text_range(), DiagnosticKind::ExpectedArgument));
        };
        let value = self.chains.arg(&value)?;
        let assign = FunctionNode::builder("assign")
            .kind(FunctionKind::Assignment)
            .argument(ArgumentValue::Input)
            .argument(value)
            .build();
        let name = if sugar.is_deep() {
            Name::AnyDeep
        } else {
            Name::AnyShallow
        };
        Ok(Detached::new(name).value_functions(vec![assign]))
    }

    /// `**`, `**[a:b]`, or `**{...}` with recursive args.
    fn recursive(&mut self, recursive: &ast::RecursiveExpr, parent: NodeId) -> BuildResult<()> {
        let range = match recursive.depth() {
            Some(subscript) => self.depth_range(&subscript, parent)?,
            None => DepthRange::default(),
        };

        let args: Vec<Expr> = recursive.args().collect();
        if args.is_empty() {
            let child = Detached::new(Name::AnyDeep).recursive(range);
            self.tree.add_child(parent, child);
            return Ok(());
        }

        for arg in &args {
            let child = match arg {
                Expr::Negated(negated) => {
                    let name = self.single_field_name(negated.fields(), negated.text_range())?;
                    Detached::new(name).negated(true)
                }
                Expr::Sugar(sugar) => self.sugar(sugar)?,
                Expr::DottedField(dotted) => {
                    let name = self.single_field_name(dotted.fields(), dotted.text_range())?;
                    self.with_key_value(Detached::new(name), dotted.key_value())?
                }
                Expr::Recursive(_) | Expr::FieldGroup(_) => {
                    return Err(self.cx.error(
                        arg.as_cst().text_range(),
                        DiagnosticKind::UnrecognizedExpression,
                        arg.as_cst().text().to_string(),
                    ));
                }
            };
            self.tree.add_child(parent, child.recursive(range));
        }
        Ok(())
    }

    /// Relative `[a:b]` / `[a..b]` to an absolute, end-exclusive window.
    fn depth_range(&self, subscript: &ast::Subscript, parent: NodeId) -> BuildResult<DepthRange> {
        let Some(range) = subscript.range() else {
            return Err(self
                .cx
                .error_default(subscript.text_range(), DiagnosticKind::InvalidRecursionDepth));
        };
        let base = i64::from(self.tree.depth(parent));

        let start = match range.start() {
            Some(bound) => self.depth_bound(&bound, "start")?,
            None => 0,
        };
        let end = range
            .end()
            .map(|bound| self.depth_bound(&bound, "end"))
            .transpose()?
            .map(|end| if range.is_exclusive() { end } else { end + 1 });

        let absolute = |value: i64| -> BuildResult<u32> {
            u32::try_from(value + base).map_err(|_| {
                self.cx.error(
                    subscript.text_range(),
                    DiagnosticKind::InvalidRecursionDepth,
                    format!("recursion depth {value} is out of range"),
                )
            })
        };

        Ok(DepthRange {
            start: Some(absolute(start)?),
            end: end.map(absolute).transpose()?,
        })
    }

    fn depth_bound(&self, bound: &RangeBound, which: &str) -> BuildResult<i64> {
        match bound {
            RangeBound::Number(number) if !number.is_float() => {
                super::literal::parse_integer(&number.text())
                    .map_err(|err| self.cx.literal_error(number.text_range(), err))
            }
            _ => Err(self.cx.error(
                bound.text_range(),
                DiagnosticKind::InvalidRecursionDepth,
                format!("only integers are supported for {which} depth"),
            )),
        }
    }

    fn single_field_name(
        &self,
        mut fields: impl Iterator<Item = ast::Field>,
        range: rowan::TextRange,
    ) -> BuildResult<Name> {
        match fields.next() {
            Some(field) => self.field_name(&field),
            None => Err(self.cx.error_default(range, DiagnosticKind::ExpectedField)),
        }
    }

    fn field_name(&self, field: &ast::Field) -> BuildResult<Name> {
        let Some(token) = field.token() else {
            return Err(self
                .cx
                .error_default(field.text_range(), DiagnosticKind::ExpectedField));
        };
        names::resolve(&token).map_err(|err| self.cx.literal_error(token.text_range(), err))
    }
}
