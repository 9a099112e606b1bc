//! Unit expression parser.
//!
//! Turns strings such as `"N*m**2/kg**2"` into a `(scale, DimensionVector)`
//! pair. Parsing runs in three passes:
//!
//! 1. **Tokenize and resolve.** The input is split on whitespace, `;`, `*`,
//!    `**`, `/`, `(` and `)`. Digit runs become integer literals; every other
//!    run is resolved against the unit table, so an unknown symbol is reported
//!    before any grammar problem.
//! 2. **Build the operator tree.** A recursive-descent parser over
//!
//!    ```text
//!    expr     := term (('*' | '/') term)*
//!    term     := atom ('**' exponent)?
//!    atom     := UNIT | INT | '(' expr ')'
//!    exponent := ['-'] INT | '(' ['-'] INT ['/' INT] ')'
//!    ```
//!
//! 3. **Evaluate twice.** The same tree is folded once over prefix scales
//!    (plain `f64`) and once over dimension vectors, through the single
//!    generic [`evaluate`] so both results follow identical operator
//!    precedence.
//!
//! The dimension's coefficient is finally absorbed into the scale, so the
//! returned vector always has coefficient 1.
//!
//! Products and quotients are stored as flat chains, so the tree only grows
//! deeper with parentheses, which may nest at most [`MAX_NESTING`] levels.
//!
//! ```rust
//! use dimq_core::parser::parse;
//!
//! let (scale, dim) = parse("kg/m**3").unwrap();
//! assert_eq!(scale, 1000.0);
//! assert_eq!(dim.to_string(), "g/m**3");
//! ```

use crate::dimension::DimensionVector;
use crate::error::{UnitError, UnitResult};
use crate::exponent::Exponent;
use crate::table;

/// Deepest parenthesis nesting accepted in a unit expression.
pub const MAX_NESTING: usize = 64;

/// A resolved unit token.
#[derive(Clone, Copy, Debug)]
struct Leaf {
    scale: f64,
    dimension: DimensionVector,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    /// Index into the resolved leaves.
    Unit(usize),
    Int(i32),
    Star,
    Pow,
    Slash,
    Minus,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug)]
enum Op {
    Mul,
    Div,
}

#[derive(Debug)]
enum Expr {
    Unit(usize),
    Number(f64),
    /// `first (op operand)*`, folded left to right.
    Chain(Box<Expr>, Vec<(Op, Expr)>),
    Power(Box<Expr>, Exponent),
    Group(Box<Expr>),
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | '*' | '/' | '(' | ')')
}

fn tokenize(expression: &str) -> UnitResult<(Vec<Token>, Vec<Leaf>)> {
    let mut tokens = Vec::new();
    let mut leaves = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() || c == ';' => {
                chars.next();
            }
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '*'))) {
                    chars.next();
                    tokens.push(Token::Pow);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            _ => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if is_delimiter(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }
                let word = &expression[start..end];
                if word.bytes().all(|b| b.is_ascii_digit()) {
                    let value = word.parse::<i32>().map_err(|_| {
                        UnitError::invalid_expression(
                            expression,
                            format!("integer '{}' is too large", word),
                        )
                    })?;
                    tokens.push(Token::Int(value));
                } else {
                    let (scale, dimension) = table::lookup_prefixed(word)?;
                    tokens.push(Token::Unit(leaves.len()));
                    leaves.push(Leaf { scale, dimension });
                }
            }
        }
    }

    Ok((tokens, leaves))
}

struct TreeBuilder<'a> {
    expression: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, reason: impl Into<String>) -> UnitError {
        UnitError::invalid_expression(self.expression, reason)
    }

    fn expect(&mut self, expected: Token, what: &str) -> UnitResult<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(self.error(format!("expected {}, found {:?}", what, token))),
            None => Err(self.error(format!("expected {}, found end of input", what))),
        }
    }

    fn build(mut self) -> UnitResult<Expr> {
        if self.tokens.is_empty() {
            return Err(self.error("empty expression"));
        }
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(Token::RParen) => Err(self.error("unbalanced parentheses")),
            Some(token) => Err(self.error(format!("unexpected {:?} after operand", token))),
        }
    }

    fn expr(&mut self) -> UnitResult<Expr> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Star) => Op::Mul,
                Some(Token::Slash) => Op::Div,
                _ => break,
            };
            self.pos += 1;
            rest.push((op, self.term()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Chain(Box::new(first), rest))
        }
    }

    fn term(&mut self) -> UnitResult<Expr> {
        let base = self.atom()?;
        if self.peek() != Some(Token::Pow) {
            return Ok(base);
        }
        self.pos += 1;
        let exponent = self.exponent()?;
        if self.peek() == Some(Token::Pow) {
            return Err(self.error("chained '**' is ambiguous; use parentheses"));
        }
        Ok(Expr::Power(Box::new(base), exponent))
    }

    fn atom(&mut self) -> UnitResult<Expr> {
        match self.next() {
            Some(Token::Unit(index)) => Ok(Expr::Unit(index)),
            Some(Token::Int(n)) => Ok(Expr::Number(f64::from(n))),
            Some(Token::LParen) => {
                if self.depth == MAX_NESTING {
                    return Err(self.error(format!(
                        "parentheses nested deeper than {} levels",
                        MAX_NESTING
                    )));
                }
                self.depth += 1;
                let inner = self.expr()?;
                self.depth -= 1;
                self.expect(Token::RParen, "')'")
                    .map_err(|_| self.error("unbalanced parentheses"))?;
                Ok(Expr::Group(Box::new(inner)))
            }
            Some(token) => Err(self.error(format!("expected a unit, found {:?}", token))),
            None => Err(self.error("expected a unit, found end of input")),
        }
    }

    fn signed_int(&mut self) -> UnitResult<i32> {
        let negative = if self.peek() == Some(Token::Minus) {
            self.pos += 1;
            true
        } else {
            false
        };
        match self.next() {
            Some(Token::Int(n)) => Ok(if negative { -n } else { n }),
            _ => Err(self.error("exponent must be an integer")),
        }
    }

    fn exponent(&mut self) -> UnitResult<Exponent> {
        if self.peek() != Some(Token::LParen) {
            return Ok(Exponent::integer(self.signed_int()?));
        }
        self.pos += 1;
        let num = self.signed_int()?;
        let den = if self.peek() == Some(Token::Slash) {
            self.pos += 1;
            self.signed_int()?
        } else {
            1
        };
        self.expect(Token::RParen, "')' after exponent")?;
        if den == 0 {
            return Err(self.error("exponent denominator is zero"));
        }
        Exponent::new(num, den).ok_or_else(|| self.error("exponent out of range"))
    }
}

/// A value the operator tree can be evaluated over.
trait Operand: Sized {
    fn unit(leaf: &Leaf) -> Self;
    fn number(value: f64) -> Self;
    fn mul(self, rhs: Self) -> UnitResult<Self>;
    fn div(self, rhs: Self) -> UnitResult<Self>;
    fn pow(self, n: Exponent) -> UnitResult<Self>;
}

impl Operand for f64 {
    fn unit(leaf: &Leaf) -> Self {
        leaf.scale
    }

    fn number(value: f64) -> Self {
        value
    }

    fn mul(self, rhs: Self) -> UnitResult<Self> {
        Ok(self * rhs)
    }

    fn div(self, rhs: Self) -> UnitResult<Self> {
        Ok(self / rhs)
    }

    fn pow(self, n: Exponent) -> UnitResult<Self> {
        Ok(if n.is_integer() {
            self.powi(n.numer())
        } else {
            self.powf(n.to_f64())
        })
    }
}

impl Operand for DimensionVector {
    fn unit(leaf: &Leaf) -> Self {
        leaf.dimension
    }

    fn number(_value: f64) -> Self {
        DimensionVector::DIMENSIONLESS
    }

    fn mul(self, rhs: Self) -> UnitResult<Self> {
        self.multiply(&rhs)
    }

    fn div(self, rhs: Self) -> UnitResult<Self> {
        self.divide(&rhs)
    }

    fn pow(self, n: Exponent) -> UnitResult<Self> {
        self.power(n)
    }
}

fn evaluate<T: Operand>(expr: &Expr, leaves: &[Leaf]) -> UnitResult<T> {
    match expr {
        Expr::Unit(index) => Ok(T::unit(&leaves[*index])),
        Expr::Number(value) => Ok(T::number(*value)),
        Expr::Chain(first, rest) => {
            rest.iter().try_fold(evaluate::<T>(first, leaves)?, |acc, (op, operand)| {
                let rhs = evaluate(operand, leaves)?;
                match op {
                    Op::Mul => acc.mul(rhs),
                    Op::Div => acc.div(rhs),
                }
            })
        }
        Expr::Power(base, n) => evaluate::<T>(base, leaves)?.pow(*n),
        Expr::Group(inner) => evaluate(inner, leaves),
    }
}

/// Parses a unit expression into its scale and canonical dimension vector.
///
/// The scale converts one of the written unit into base units; the returned
/// vector has coefficient 1 and keeps the offset of a bare affine unit.
///
/// # Errors
///
/// - [`UnitError::UnknownUnit`] for a token the table cannot resolve.
/// - [`UnitError::InvalidUnitExpression`] for malformed grammar.
/// - [`UnitError::IncompatibleAffineUnit`] when an affine unit is combined,
///   exponentiated or parenthesized.
pub fn parse(expression: &str) -> UnitResult<(f64, DimensionVector)> {
    let (tokens, leaves) = tokenize(expression)?;
    let tree = TreeBuilder {
        expression,
        tokens,
        pos: 0,
        depth: 0,
    }
    .build()?;

    let scale: f64 = evaluate(&tree, &leaves)?;
    let dimension: DimensionVector = evaluate(&tree, &leaves)?;

    if dimension.is_affine() && !matches!(tree, Expr::Unit(_)) {
        return Err(UnitError::IncompatibleAffineUnit(expression.to_string()));
    }

    let scale = scale * dimension.coefficient();
    let dimension = dimension.normalized();
    log::debug!(
        "parsed unit expression '{}': scale={} dimension={} offset={}",
        expression,
        scale,
        dimension,
        dimension.offset()
    );
    Ok((scale, dimension))
}
