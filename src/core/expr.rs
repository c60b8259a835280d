//! Operands, operators and condition expressions.
//!
//! Expressions form a binary tree: leaves are variable names or integer
//! literals, internal nodes combine two sub-expressions with an operator.
//! The serialized form mirrors the parser's output: a leaf is a bare JSON
//! string or number, a node is `{ "left", "right", "operator" }`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A leaf value: either a named register/variable or an integer literal.
///
/// # Example
///
/// ```rust
/// use fsm_ir::core::Operand;
///
/// let counter = Operand::from("X");
/// let step = Operand::from(3);
///
/// assert!(counter.is_name());
/// assert!(step.is_literal());
/// assert_eq!(counter.to_string(), "X");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Literal(i64),
    Name(String),
}

impl Operand {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    pub fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// The name carried by this operand, if it is not a literal.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for Operand {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Operand {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Literal(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Literal(i64::from(value))
    }
}

/// Binary operator symbols.
///
/// Serialized as the bare symbol. The pass only interprets a few symbols
/// (comparisons are tagged, `*` is used for gating); any other symbol is
/// kept verbatim in [`Operator::Other`] and copied through to the output.
/// `==` is read as a synonym for `=` and is written back as `=`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    /// Any symbol the pass has no meaning for, e.g. `^`, `<<` or `XOR`.
    Other(String),
}

impl Operator {
    pub fn symbol(&self) -> &str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&",
            Self::Or => "|",
            Self::Other(symbol) => symbol,
        }
    }

    /// Comparisons produce a boolean-bearing register.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }
}

impl From<&str> for Operator {
    fn from(symbol: &str) -> Self {
        match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "=" | "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "&" => Self::And,
            "|" => Self::Or,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(symbol: String) -> Self {
        Self::from(symbol.as_str())
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Other(symbol) => symbol,
            known => known.symbol().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A condition or operand expression.
///
/// # Example
///
/// ```rust
/// use fsm_ir::core::{Expr, Operator};
///
/// // (X % 3) = 0
/// let cond = Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0);
///
/// assert!(!cond.is_leaf());
/// assert_eq!(cond.to_string(), "((X % 3) = 0)");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Leaf(Operand),
    Binary {
        left: Box<Expr>,
        right: Box<Expr>,
        operator: Operator,
    },
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Leaf(Operand::Name(name.into()))
    }

    pub fn lit(value: i64) -> Self {
        Self::Leaf(Operand::Literal(value))
    }

    pub fn binary(left: impl Into<Expr>, operator: Operator, right: impl Into<Expr>) -> Self {
        Self::Binary {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
            operator,
        }
    }

    /// Combine `self` with `right`, keeping `self` as the left operand.
    pub fn op(self, operator: Operator, right: impl Into<Expr>) -> Self {
        Self::binary(self, operator, right)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&Operand> {
        match self {
            Self::Leaf(operand) => Some(operand),
            Self::Binary { .. } => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(operand) => write!(f, "{operand}"),
            Self::Binary {
                left,
                right,
                operator,
            } => write!(f, "({left} {operator} {right})"),
        }
    }
}

impl From<Operand> for Expr {
    fn from(operand: Operand) -> Self {
        Self::Leaf(operand)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Self::var(name)
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Self::var(name)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::lit(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Self::lit(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operand_deserializes_from_bare_values() {
        let name: Operand = serde_json::from_value(json!("X")).unwrap();
        let literal: Operand = serde_json::from_value(json!(3)).unwrap();

        assert_eq!(name, Operand::from("X"));
        assert_eq!(literal, Operand::Literal(3));
    }

    #[test]
    fn operator_uses_symbols_on_the_wire() {
        assert_eq!(serde_json::to_value(&Operator::Rem).unwrap(), json!("%"));
        assert_eq!(serde_json::to_value(&Operator::Eq).unwrap(), json!("="));

        let eq: Operator = serde_json::from_value(json!("==")).unwrap();
        assert_eq!(eq, Operator::Eq);
    }

    #[test]
    fn unknown_symbols_are_carried_verbatim() {
        for symbol in ["^", "<<", ">>", "AND", "XOR"] {
            let operator: Operator = serde_json::from_value(json!(symbol)).unwrap();

            assert_eq!(operator, Operator::Other(symbol.to_string()));
            assert!(!operator.is_comparison());
            assert_eq!(serde_json::to_value(&operator).unwrap(), json!(symbol));
        }
    }

    #[test]
    fn only_relational_operators_are_comparisons() {
        assert!(Operator::Eq.is_comparison());
        assert!(Operator::Ge.is_comparison());
        assert!(!Operator::Rem.is_comparison());
        assert!(!Operator::Mul.is_comparison());
    }

    #[test]
    fn nested_expression_deserializes() {
        let expr: Expr = serde_json::from_value(json!({
            "left": { "left": "X", "right": 3, "operator": "%" },
            "right": 0,
            "operator": "="
        }))
        .unwrap();

        assert_eq!(expr, Expr::var("X").op(Operator::Rem, 3).op(Operator::Eq, 0));
    }

    #[test]
    fn expression_serializes_back_to_parser_shape() {
        let expr = Expr::binary("Y", Operator::Lt, 10);

        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({ "left": "Y", "right": 10, "operator": "<" })
        );
    }
}
