use crate::ast::{BinOp, Expr, Literal, UnaryOp};

/// Construction contract the parser builds trees through.
///
/// One method per node kind. Children are always fully built before they are
/// handed to their parent, so implementations never see a partial node.
/// Backends choose the node representation through [`AstFactory::Node`]:
/// a plain tree, self-rendering code nodes, or anything else.
pub trait AstFactory {
    type Node;

    fn empty(&self) -> Self::Node;

    fn literal(&self, value: Literal) -> Self::Node;

    fn identifier(&self, name: String) -> Self::Node;

    fn unary(&self, op: UnaryOp, operand: Self::Node) -> Self::Node;

    fn binary(&self, left: Self::Node, op: BinOp, right: Self::Node) -> Self::Node;

    fn getter(&self, receiver: Self::Node, name: String) -> Self::Node;

    /// `method: None` invokes the receiver itself.
    fn invoke(
        &self,
        receiver: Self::Node,
        method: Option<String>,
        arguments: Option<Vec<Self::Node>>,
    ) -> Self::Node;

    fn paren(&self, child: Self::Node) -> Self::Node;

    fn index(&self, receiver: Self::Node, argument: Self::Node) -> Self::Node;

    fn ternary(
        &self,
        condition: Self::Node,
        true_expr: Self::Node,
        false_expr: Self::Node,
    ) -> Self::Node;

    fn map(&self, entries: Vec<(String, Option<Self::Node>)>) -> Self::Node;

    fn list(&self, items: Vec<Option<Self::Node>>) -> Self::Node;
}

/// Builds plain [`Expr`] trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeAstFactory;

impl AstFactory for TreeAstFactory {
    type Node = Expr;

    fn empty(&self) -> Expr {
        Expr::Empty
    }

    fn literal(&self, value: Literal) -> Expr {
        Expr::Literal(value)
    }

    fn identifier(&self, name: String) -> Expr {
        Expr::Identifier(name)
    }

    fn unary(&self, op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    fn binary(&self, left: Expr, op: BinOp, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn getter(&self, receiver: Expr, name: String) -> Expr {
        Expr::Getter {
            receiver: Box::new(receiver),
            name,
        }
    }

    fn invoke(&self, receiver: Expr, method: Option<String>, arguments: Option<Vec<Expr>>) -> Expr {
        Expr::Invoke {
            receiver: Box::new(receiver),
            method,
            arguments,
        }
    }

    fn paren(&self, child: Expr) -> Expr {
        Expr::Paren(Box::new(child))
    }

    fn index(&self, receiver: Expr, argument: Expr) -> Expr {
        Expr::Index {
            receiver: Box::new(receiver),
            argument: Box::new(argument),
        }
    }

    fn ternary(&self, condition: Expr, true_expr: Expr, false_expr: Expr) -> Expr {
        Expr::Ternary {
            condition: Box::new(condition),
            true_expr: Box::new(true_expr),
            false_expr: Box::new(false_expr),
        }
    }

    fn map(&self, entries: Vec<(String, Option<Expr>)>) -> Expr {
        Expr::Map(entries)
    }

    fn list(&self, items: Vec<Option<Expr>>) -> Expr {
        Expr::List(items)
    }
}
