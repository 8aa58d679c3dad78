use cursor::Line;
use parser::{Expr, LiteralValue, ParseError};
use scanner::{LexError, Token, TokenData};

mod value;
pub use value::Value;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RuntimeErrorType {
    #[error("operand must be a number.")]
    OperandMustBeNumber,
    #[error("operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,
    #[error("`{0}` is not a valid operator here.")]
    InvalidOperator(String),
    #[error("{0} expressions are not supported.")]
    Unsupported(&'static str),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] RuntimeError {error}")]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub line: Line,
}

impl RuntimeError {
    pub fn new(error: RuntimeErrorType, line: Line) -> Self {
        Self { error, line }
    }
}

impl RuntimeErrorType {
    fn at(self, token: &Token) -> RuntimeError {
        RuntimeError::new(self, token.line())
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Error from any of the three phases, see [`run_source`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InterpretError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Scans, parses and evaluates `source` as a single expression.
pub fn run_source(source: &str) -> std::result::Result<Value, InterpretError> {
    let tokens = scanner::scan(source)?;
    let expr = parser::parse(tokens)?;
    Ok(evaluate(&expr)?)
}

pub fn evaluate(expr: &Expr) -> Result<Value> {
    log::trace!("Evaluating {expr}");

    match expr {
        Expr::Literal(LiteralValue::Number(n)) => Ok((*n).into()),
        Expr::Literal(LiteralValue::Str(s)) => Ok((*s).into()),
        Expr::Literal(LiteralValue::Boolean(b)) => Ok((*b).into()),
        Expr::Literal(LiteralValue::Nil) => Ok(Value::Nil),

        Expr::Grouping(expr) => evaluate(expr),

        Expr::Unary { operator, right } => {
            let right = evaluate(right)?;
            match (&operator.data, right) {
                (TokenData::Minus, Value::Number(n)) => Ok((-n).into()),
                (TokenData::Minus, _) => Err(RuntimeErrorType::OperandMustBeNumber.at(operator)),
                (TokenData::Bang, v) => Ok((!v.is_truthy()).into()),
                _ => Err(RuntimeErrorType::InvalidOperator(operator.lexeme().to_string()).at(operator)),
            }
        }

        Expr::Binary { left, operator, right } => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            binary(operator, left, right)
        }

        Expr::Logical { operator, .. } => Err(RuntimeErrorType::Unsupported("logical").at(operator)),
        Expr::Variable(name) => Err(RuntimeErrorType::Unsupported("variable").at(name)),
        Expr::Assign { name, .. } => Err(RuntimeErrorType::Unsupported("assignment").at(name)),
        Expr::Call { paren, .. } => Err(RuntimeErrorType::Unsupported("call").at(paren)),
        Expr::Get { name, .. } => Err(RuntimeErrorType::Unsupported("property access").at(name)),
        Expr::Set { name, .. } => Err(RuntimeErrorType::Unsupported("property assignment").at(name)),
        Expr::This(keyword) => Err(RuntimeErrorType::Unsupported("this").at(keyword)),
        Expr::Super { keyword, .. } => Err(RuntimeErrorType::Unsupported("super").at(keyword)),
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> Result<Value> {
    use TokenData::*;

    let numeric: fn(f64, f64) -> Value = match operator.data {
        EqualEqual => return Ok(left.eq_in_lox(&right).into()),
        BangEqual => return Ok((!left.eq_in_lox(&right)).into()),

        Plus => {
            return match (left, right) {
                (Value::Number(l), Value::Number(r)) => Ok((l + r).into()),
                (Value::String(l), Value::String(r)) => Ok((l + &r).into()),
                _ => Err(RuntimeErrorType::OperandsMustBeNumbersOrStrings.at(operator)),
            }
        }

        // Division by zero yields inf or NaN, like any other f64 division.
        Minus => |l: f64, r: f64| Value::Number(l - r),
        Slash => |l: f64, r: f64| Value::Number(l / r),
        Star => |l: f64, r: f64| Value::Number(l * r),

        Greater => |l: f64, r: f64| Value::Boolean(l > r),
        GreaterEqual => |l: f64, r: f64| Value::Boolean(l >= r),
        Less => |l: f64, r: f64| Value::Boolean(l < r),
        LessEqual => |l: f64, r: f64| Value::Boolean(l <= r),

        _ => {
            return Err(RuntimeErrorType::InvalidOperator(operator.lexeme().to_string()).at(operator))
        }
    };

    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok(numeric(l, r)),
        _ => Err(RuntimeErrorType::OperandsMustBeNumbers.at(operator)),
    }
}
