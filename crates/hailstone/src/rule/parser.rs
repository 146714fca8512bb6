//! Arithmetic rule expression parser using chumsky
//!
//! Parses user-supplied rule expressions into [`Expr`] trees. The grammar is
//! deliberately closed: integer literals, the single variable `n`, unary
//! minus, `+ - * / // % **`, and parentheses. There is no name resolution
//! beyond `n`, no calls, and no attribute access, so user input can never
//! reach arbitrary code.

use chumsky::prelude::*;

use crate::core::RuleError;

/// Longest rule expression accepted, in bytes
///
/// The grammar recurses on nested parentheses, so expression size must be
/// bounded before parsing or a pathological input can exhaust memory while
/// the parser is still working out that it is garbage. Real rules are a few
/// dozen characters.
pub const MAX_EXPRESSION_LEN: usize = 1024;

/// Deepest parenthesis nesting accepted
pub const MAX_NESTING_DEPTH: usize = 64;

/// Binary operators accepted by the rule grammar
///
/// `/` and `//` both parse to [`BinaryOp::FloorDiv`]: rules operate on
/// integers only, so true division would leave the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    FloorDiv,
    Mod,
    Pow,
}

/// Parsed rule expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal
    Literal(i64),
    /// The bound variable `n`
    Variable,
    /// An identifier other than `n`; syntactically valid, rejected when the
    /// rule is compiled
    Ident(String),
    /// Unary negation
    Neg(Box<Expr>),
    /// Binary operation
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Find the first identifier that is not the bound variable
    pub fn unknown_identifier(&self) -> Option<&str> {
        match self {
            Expr::Literal(_) | Expr::Variable => None,
            Expr::Ident(name) => Some(name),
            Expr::Neg(inner) => inner.unknown_identifier(),
            Expr::Binary(_, lhs, rhs) => {
                lhs.unknown_identifier().or_else(|| rhs.unknown_identifier())
            }
        }
    }
}

/// Chumsky-based rule expression parser
pub struct RuleParser;

impl RuleParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a complete rule expression
    ///
    /// Identifiers other than `n` pass the grammar but are rejected here,
    /// so "abs" or "__import__" fail with a name error rather than a
    /// character-level parse error. Oversized or deeply nested input is
    /// rejected before the parser ever runs.
    pub fn parse_expression(&self, input: &str) -> Result<Expr, RuleError> {
        Self::check_bounds(input)?;

        let parser = Self::expr_parser().then_ignore(end());

        let expr = parser.parse(input).into_result().map_err(|errors| {
            let message = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            RuleError::parse_error(message)
        })?;

        if let Some(name) = expr.unknown_identifier() {
            return Err(RuleError::unknown_variable(name));
        }

        Ok(expr)
    }

    /// Reject input too large or too nested to parse safely
    fn check_bounds(input: &str) -> Result<(), RuleError> {
        if input.len() > MAX_EXPRESSION_LEN {
            return Err(RuleError::parse_error(format!(
                "expression is {} bytes, limit is {}",
                input.len(),
                MAX_EXPRESSION_LEN
            )));
        }

        let mut depth = 0usize;
        for c in input.chars() {
            match c {
                '(' => {
                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(RuleError::parse_error(format!(
                            "parentheses nested deeper than {} levels",
                            MAX_NESTING_DEPTH
                        )));
                    }
                }
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Ok(())
    }

    /// Parse optional inline whitespace.
    ///
    /// Uses explicit character matching to avoid the "repeated combinator
    /// making no progress" issue with nested whitespace repetition.
    fn optional_whitespace<'src>(
    ) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
        one_of(" \t").repeated().ignored()
    }

    fn expr_parser<'src>(
    ) -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
        recursive(|expr| {
            let literal = text::int(10).try_map(|digits: &str, span| {
                digits
                    .parse::<i64>()
                    .map(Expr::Literal)
                    .map_err(|_| Rich::custom(span, "integer literal out of range"))
            });

            let variable = text::ident().map(|name: &str| {
                if name == "n" {
                    Expr::Variable
                } else {
                    Expr::Ident(name.to_string())
                }
            });

            let parenthesized = expr
                .delimited_by(
                    just('(').then(Self::optional_whitespace()),
                    Self::optional_whitespace().then(just(')')),
                )
                .labelled("parenthesized expression");

            let atom = literal
                .or(variable)
                .or(parenthesized)
                .padded_by(Self::optional_whitespace());

            // `**` is right-associative and binds tighter than unary minus
            // on its left operand, matching the original operator semantics.
            let unary = recursive(|unary| {
                let power = atom
                    .clone()
                    .then(
                        just("**")
                            .padded_by(Self::optional_whitespace())
                            .ignore_then(unary.clone())
                            .or_not(),
                    )
                    .map(|(base, exponent)| match exponent {
                        Some(exponent) => {
                            Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent))
                        }
                        None => base,
                    });

                just('-')
                    .padded_by(Self::optional_whitespace())
                    .ignore_then(unary)
                    .map(|inner| Expr::Neg(Box::new(inner)))
                    .or(power)
            });

            // `//` must be tried before `/` or it would parse as two divisions
            let product_op = just("//")
                .to(BinaryOp::FloorDiv)
                .or(just('*').to(BinaryOp::Mul))
                .or(just('/').to(BinaryOp::FloorDiv))
                .or(just('%').to(BinaryOp::Mod))
                .padded_by(Self::optional_whitespace());

            let product = unary.clone().foldl(
                product_op.then(unary).repeated(),
                |lhs, (op, rhs)| Expr::Binary(op, Box::new(lhs), Box::new(rhs)),
            );

            let sum_op = just('+')
                .to(BinaryOp::Add)
                .or(just('-').to(BinaryOp::Sub))
                .padded_by(Self::optional_whitespace());

            product.clone().foldl(sum_op.then(product).repeated(), |lhs, (op, rhs)| {
                Expr::Binary(op, Box::new(lhs), Box::new(rhs))
            })
        })
    }
}

impl Default for RuleParser {
    fn default() -> Self {
        Self::new()
    }
}
