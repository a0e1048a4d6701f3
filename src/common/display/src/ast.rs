//! Source-like rendering of expression trees.
//!
//! An [`AstNode`] is built from a recorded expression and rendered either
//! fully expanded (one node per line, nested arguments indented) or with
//! subtrees collapsed onto a single line whenever they fit a width budget.

use std::fmt;

/// Lines of text, each with its own indentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndentedLines {
    lines: Vec<(usize, String)>,
}

impl IndentedLines {
    /// Create an empty set of lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line at the given indentation.
    pub fn push(&mut self, indent: usize, text: impl Into<String>) {
        self.lines.push((indent, text.into()));
    }

    /// Append text to the last line, or start a new line if there is none.
    pub fn append_to_last(&mut self, text: &str) {
        match self.lines.last_mut() {
            Some((_, last)) => last.push_str(text),
            None => self.lines.push((0, text.to_string())),
        }
    }

    /// Move all lines of `other` to the end of `self`.
    pub fn extend(&mut self, other: Self) {
        self.lines.extend(other.lines);
    }

    /// The lines as `(indent, text)` pairs.
    pub fn lines(&self) -> &[(usize, String)] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines stripped of indentation and joined by single spaces.
    pub fn joined(&self) -> String {
        self.lines
            .iter()
            .map(|(_, text)| text.trim())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for IndentedLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (indent, text)) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:indent$}{text}", "")?;
        }
        Ok(())
    }
}

/// A node of a renderable expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    /// The symbolic root object, e.g. `DF`.
    Root(String),
    /// Literal text such as a rendered argument value.
    Leaf(String),
    /// Attribute or item accessor chained onto `base`, e.g. `.x` or `["x"]`.
    Access {
        /// Object being accessed.
        base: Box<Self>,
        /// Accessor text including its leading `.` or `[`.
        accessor: String,
    },
    /// Named method call on `base`.
    Call {
        /// Object the method is called on.
        base: Box<Self>,
        /// Method name.
        name: String,
        /// Positional arguments.
        args: Vec<Self>,
        /// Keyword arguments.
        kwargs: Vec<(String, Self)>,
    },
    /// Binary operator written infix.
    Infix {
        /// Operator symbol.
        op: String,
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// Unary operator written prefix.
    Prefix {
        /// Operator symbol.
        op: String,
        /// Operand.
        operand: Box<Self>,
    },
}

impl AstNode {
    /// Create a root node.
    pub fn root(name: impl Into<String>) -> Self {
        Self::Root(name.into())
    }

    /// Create a leaf node.
    pub fn leaf(text: impl Into<String>) -> Self {
        Self::Leaf(text.into())
    }

    /// Chain an accessor onto this node.
    #[must_use]
    pub fn access(self, accessor: impl Into<String>) -> Self {
        Self::Access {
            base: Box::new(self),
            accessor: accessor.into(),
        }
    }

    /// Chain a method call onto this node.
    #[must_use]
    pub fn call(self, name: impl Into<String>, args: Vec<Self>, kwargs: Vec<(String, Self)>) -> Self {
        Self::Call {
            base: Box::new(self),
            name: name.into(),
            args,
            kwargs,
        }
    }

    /// Combine two nodes with an infix operator.
    pub fn infix(op: impl Into<String>, left: Self, right: Self) -> Self {
        Self::Infix {
            op: op.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Apply a prefix operator.
    pub fn prefix(op: impl Into<String>, operand: Self) -> Self {
        Self::Prefix {
            op: op.into(),
            operand: Box::new(operand),
        }
    }

    const fn is_operator(&self) -> bool {
        matches!(self, Self::Infix { .. } | Self::Prefix { .. })
    }

    fn inline_operand(&self) -> String {
        if self.is_operator() {
            format!("({})", self.inline())
        } else {
            self.inline()
        }
    }

    /// Render the whole subtree on a single line.
    pub fn inline(&self) -> String {
        match self {
            Self::Root(text) | Self::Leaf(text) => text.clone(),
            Self::Access { base, accessor } => format!("{}{accessor}", base.inline_operand()),
            Self::Call {
                base,
                name,
                args,
                kwargs,
            } => {
                let parts: Vec<String> = args
                    .iter()
                    .map(Self::inline)
                    .chain(kwargs.iter().map(|(k, v)| format!("{k}={}", v.inline())))
                    .collect();
                format!("{}.{name}({})", base.inline_operand(), parts.join(", "))
            }
            Self::Infix { op, left, right } => format!(
                "{} {op} {}",
                left.inline_operand(),
                right.inline_operand()
            ),
            Self::Prefix { op, operand } => format!("{op}{}", operand.inline_operand()),
        }
    }

    /// Render fully expanded, one structural element per line.
    pub fn pprint(&self, indent: usize, step: usize) -> IndentedLines {
        self.collapse(indent, step, 0)
    }

    /// Render with every subtree that fits into `width` columns (including
    /// its indentation) collapsed onto a single line. A `width` of zero never
    /// collapses.
    pub fn collapse(&self, indent: usize, step: usize, width: usize) -> IndentedLines {
        let mut lines = IndentedLines::new();
        self.render_into(&mut lines, indent, step, width);
        lines
    }

    fn render_into(&self, lines: &mut IndentedLines, indent: usize, step: usize, width: usize) {
        if width > 0 {
            let inline = self.inline();
            if indent + inline.chars().count() <= width {
                lines.push(indent, inline);
                return;
            }
        }

        match self {
            Self::Root(text) | Self::Leaf(text) => lines.push(indent, text.clone()),
            Self::Access { base, accessor } => {
                base.render_base(lines, indent, step, width);
                lines.append_to_last(accessor);
            }
            Self::Call {
                base,
                name,
                args,
                kwargs,
            } => {
                base.render_base(lines, indent, step, width);
                if args.is_empty() && kwargs.is_empty() {
                    lines.append_to_last(&format!(".{name}()"));
                    return;
                }
                lines.append_to_last(&format!(".{name}("));
                for arg in args {
                    arg.render_into(lines, indent + step, step, width);
                    lines.append_to_last(",");
                }
                for (key, arg) in kwargs {
                    let mut kw_lines = IndentedLines::new();
                    arg.render_into(&mut kw_lines, indent + step + key.len() + 1, step, width);
                    if let Some(first) = kw_lines.lines.first_mut() {
                        *first = (indent + step, format!("{key}={}", first.1));
                    }
                    kw_lines.append_to_last(",");
                    lines.extend(kw_lines);
                }
                lines.push(indent, ")");
            }
            Self::Infix { op, left, right } => {
                left.render_into(lines, indent + step, step, width);
                lines.push(indent, op.clone());
                right.render_into(lines, indent + step, step, width);
            }
            Self::Prefix { op, operand } => {
                lines.push(indent, op.clone());
                operand.render_into(lines, indent + step, step, width);
            }
        }
    }

    /// Render a node that something is chained onto; operator subtrees are
    /// bracketed so the chained accessor applies to the whole result.
    fn render_base(&self, lines: &mut IndentedLines, indent: usize, step: usize, width: usize) {
        if !self.is_operator() {
            self.render_into(lines, indent, step, width);
            return;
        }
        if width > 0 {
            let inline = self.inline_operand();
            if indent + inline.chars().count() <= width {
                lines.push(indent, inline);
                return;
            }
        }
        lines.push(indent, "(");
        self.render_into(lines, indent + step, step, width);
        lines.push(indent, ")");
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> AstNode {
        AstNode::root("DF").access(format!("[{name:?}]"))
    }

    #[test]
    fn test_inline_rendering() {
        let node = AstNode::infix("<", column("x"), AstNode::leaf("3"));
        assert_eq!(node.inline(), r#"DF["x"] < 3"#);

        let nested = AstNode::prefix("~", AstNode::infix("&", node.clone(), node));
        assert_eq!(
            nested.inline(),
            r#"~((DF["x"] < 3) & (DF["x"] < 3))"#
        );
    }

    #[test]
    fn test_pprint_binary() {
        let node = AstNode::infix("<", column("x"), AstNode::leaf("3"));
        let rendered = node.pprint(0, 2).to_string();
        assert_eq!(rendered, "  DF[\"x\"]\n<\n  3");
    }

    #[test]
    fn test_pprint_call_with_kwargs() {
        let node = AstNode::root("DF").access(".x").call(
            "clip",
            vec![AstNode::root("DF").access(".y").call("min", vec![], vec![])],
            vec![("upper".to_string(), AstNode::leaf("3"))],
        );

        let lines = node.pprint(0, 2);
        let texts: Vec<_> = lines.lines().iter().cloned().collect();
        assert_eq!(
            texts,
            vec![
                (0, "DF.x.clip(".to_string()),
                (2, "DF.y.min(),".to_string()),
                (2, "upper=3,".to_string()),
                (0, ")".to_string()),
            ]
        );
        assert_eq!(lines.joined(), "DF.x.clip( DF.y.min(), upper=3, )");
    }

    #[test]
    fn test_collapse_fits_width() {
        let node = AstNode::infix(
            "&",
            AstNode::infix("<", column("x"), AstNode::leaf("3")),
            AstNode::infix("==", column("name"), AstNode::leaf("\"abc\"")),
        );

        let wide = node.collapse(0, 2, 80);
        assert_eq!(wide.len(), 1);
        assert_eq!(wide.to_string(), r#"(DF["x"] < 3) & (DF["name"] == "abc")"#);

        let narrow = node.collapse(0, 2, 24);
        assert_eq!(
            narrow.to_string(),
            "  DF[\"x\"] < 3\n&\n  DF[\"name\"] == \"abc\""
        );
    }

    #[test]
    fn test_chained_call_on_operator_is_bracketed() {
        let node = AstNode::infix("+", column("x"), AstNode::leaf("1")).call("abs", vec![], vec![]);
        assert_eq!(node.inline(), r#"(DF["x"] + 1).abs()"#);

        let expanded = node.pprint(0, 2).to_string();
        assert_eq!(expanded, "(\n    DF[\"x\"]\n  +\n    1\n).abs()");
    }
}
