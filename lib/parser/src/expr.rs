use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use scanner::Token;

/// Expression tree.
///
/// The variant set is closed: every operation over expressions (evaluation,
/// printing, ...) is a `match` that has to cover all of them, so adding a
/// variant makes the compiler point at every place that needs updating.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Literal(LiteralValue<'a>),
    Grouping(Box<Expr<'a>>),
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Logical { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Variable(Token<'a>),
    Assign { name: Token<'a>, value: Box<Expr<'a>> },
    Call { callee: Box<Expr<'a>>, paren: Token<'a>, arguments: Vec<Expr<'a>> },
    Get { object: Box<Expr<'a>>, name: Token<'a> },
    Set { object: Box<Expr<'a>>, name: Token<'a>, value: Box<Expr<'a>> },
    This(Token<'a>),
    Super { keyword: Token<'a>, method: Token<'a> },
}

/// Prints the tree in prefix form, e.g. `(* (- 123) (group 45.67))`.
impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Grouping(expression) => write!(f, "(group {})", expression),
            Expr::Unary { operator, right } => write!(f, "({} {})", operator, right),
            Expr::Binary { left, operator, right } | Expr::Logical { left, operator, right } => {
                write!(f, "({} {} {})", operator, left, right)
            }
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Assign { name, value } => write!(f, "(= {} {})", name, value),
            Expr::Call { callee, arguments, .. } => {
                write!(
                    f,
                    "(call {})",
                    std::iter::once(callee.to_string())
                        .chain(arguments.iter().map(|a| a.to_string()))
                        .join(" ")
                )
            }
            Expr::Get { object, name } => write!(f, "(. {} {})", object, name),
            Expr::Set { object, name, value } => write!(f, "(= (. {} {}) {})", object, name, value),
            Expr::This(_) => write!(f, "this"),
            Expr::Super { method, .. } => write!(f, "(super {})", method),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
    Nil,
}

impl Display for LiteralValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Str(s) => write!(f, "{}", s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}
