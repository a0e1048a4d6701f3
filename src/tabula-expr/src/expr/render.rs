//! Source-like rendering of recorded expressions.

use std::fmt;

use common_config::DisplayConfig;
use common_display::AstNode;

use super::{Expr, Invocation, Operator, Step};

impl Expr {
    /// Build the display tree of this expression.
    ///
    /// Attribute and item steps become chained accessors; operators with a
    /// symbol are written infix or prefix, with reflected operators putting
    /// the argument on the left; every other invocation is a named call.
    pub fn as_tree(&self) -> AstNode {
        self.steps()
            .iter()
            .fold(AstNode::root(self.subject().symbol()), |node, step| match step {
                Step::Attribute(name) => node.access(format!(".{name}")),
                Step::Item(key) => node.access(format!("[{key}]")),
                Step::Invoke(invocation) => invocation_node(node, invocation),
            })
    }

    /// Render on multiple lines, collapsing subtrees that fit `config.width`.
    pub fn pretty(&self, config: &DisplayConfig) -> String {
        self.as_tree()
            .collapse(0, config.indent, config.width)
            .to_string()
    }

    /// The single-line rendering, e.g. `DF["x"] < 3`.
    pub fn name(&self) -> String {
        self.as_tree().inline()
    }
}

fn invocation_node(base: AstNode, invocation: &Invocation) -> AstNode {
    if let Some((op, reflected)) = Operator::from_name(&invocation.name) {
        if let Some(symbol) = op.symbol() {
            if op.is_unary() && invocation.is_nullary() {
                return AstNode::prefix(symbol, base);
            }
            if let Some(arg) = invocation.single_arg() {
                return if reflected {
                    AstNode::infix(symbol, arg.as_tree(), base)
                } else {
                    AstNode::infix(symbol, base, arg.as_tree())
                };
            }
        }
    }

    let args = invocation.args.iter().map(|arg| arg.as_tree()).collect();
    let kwargs = invocation
        .kwargs
        .iter()
        .map(|(key, arg)| (key.clone(), arg.as_tree()))
        .collect();
    base.call(&invocation.name, args, kwargs)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty(&DisplayConfig::default()))
    }
}
