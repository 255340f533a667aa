//! Expression tree -> JSON conversion for `bindexpr ast`

use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};

use crate::ast::{Expr, Literal, Number};

/// Digit strings too long for a decimal stay strings, so no digit is lost.
fn number_to_json(n: &Number) -> Value {
    let Some(n) = n.as_decimal() else {
        return Value::String(n.to_string());
    };
    if n.scale() == 0
        && let Some(i) = n.to_i64()
    {
        return Value::Number(i.into());
    }
    n.to_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

fn literal_to_json(value: &Literal) -> Value {
    match value {
        Literal::String(s) => Value::String(s.clone()),
        Literal::Number(n) => number_to_json(n),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Null => Value::Null,
    }
}

fn hole_to_json(expr: Option<&Expr>) -> Value {
    expr.map(expr_to_json).unwrap_or(Value::Null)
}

/// Convert an expression tree to a JSON document, one object per node with a
/// `type` tag. Map entries become `{"key", "value"}` objects to keep their order.
pub fn expr_to_json(expr: &Expr) -> Value {
    match expr {
        Expr::Empty => json!({ "type": expr.kind() }),
        Expr::Literal(value) => json!({ "type": expr.kind(), "value": literal_to_json(value) }),
        Expr::Identifier(name) => json!({ "type": expr.kind(), "value": name }),
        Expr::Unary { op, operand } => json!({
            "type": expr.kind(),
            "operator": op.symbol(),
            "child": expr_to_json(operand),
        }),
        Expr::Binary { op, left, right } => json!({
            "type": expr.kind(),
            "operator": op.symbol(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        Expr::Getter { receiver, name } => json!({
            "type": expr.kind(),
            "receiver": expr_to_json(receiver),
            "name": name,
        }),
        Expr::Invoke {
            receiver,
            method,
            arguments,
        } => json!({
            "type": expr.kind(),
            "receiver": expr_to_json(receiver),
            "method": method,
            "arguments": arguments
                .as_ref()
                .map(|args| args.iter().map(expr_to_json).collect::<Vec<_>>()),
        }),
        Expr::Paren(child) => json!({ "type": expr.kind(), "child": expr_to_json(child) }),
        Expr::Index { receiver, argument } => json!({
            "type": expr.kind(),
            "receiver": expr_to_json(receiver),
            "argument": expr_to_json(argument),
        }),
        Expr::Ternary {
            condition,
            true_expr,
            false_expr,
        } => json!({
            "type": expr.kind(),
            "condition": expr_to_json(condition),
            "trueExpr": expr_to_json(true_expr),
            "falseExpr": expr_to_json(false_expr),
        }),
        Expr::Map(entries) => json!({
            "type": expr.kind(),
            "entries": entries
                .iter()
                .map(|(key, value)| json!({ "key": key, "value": hole_to_json(value.as_ref()) }))
                .collect::<Vec<_>>(),
        }),
        Expr::List(items) => json!({
            "type": expr.kind(),
            "items": items
                .iter()
                .map(|item| hole_to_json(item.as_ref()))
                .collect::<Vec<_>>(),
        }),
    }
}
