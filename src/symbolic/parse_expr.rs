//! Recursive-descent parser from tokens to an expression tree.
//!
//! Grammar, loosest binding first:
//! ```text
//! Addition       := Multiplication ( ('+'|'-') Multiplication )*
//! Multiplication := Exponent        ( ('*'|'/') Exponent )*
//! Exponent       := Unary           ( '^' Exponent )?
//! Unary          := '-'* ( '(' Addition ')' | Function Unary | Variable | Number )
//! ```
//! `+ - * /` fold to the left, `^` nests to the right. Leading minus signs cancel in
//! pairs, so only an odd count produces a `Neg` node. A function takes exactly one
//! `Unary` as its argument, so `sin x + 1` is `sin(x) + 1`.
//!
//! Every operator in a chain, every `^` and every bracket or function application adds a
//! level to the tree under construction. Trees are walked recursively by `evaluate`,
//! `diff`, `simplify` and `Display`, so the parser refuses to go past [`MAX_DEPTH`] levels
//! and reports `ParseError::TooDeep` instead.
//
//                  reduction diagram for "3+4*2^2"
//                |        Addition                 |
//                |_________________________________|
//                |  Mult: 3    '+'   Mult: 4*2^2   |
//                |_________________________________|
//                |        Exp: 4  '*'  Exp: 2^2    |
//                |_________________________________|
//                |             Unary: 2 '^' Exp: 2 |
//                |_________________________________|
//                  Add(3, Mul(4, Pow(2, 2)))
use crate::symbolic::lexer::{FunctionName, Token, tokenize};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::ParseError;
use log::{debug, trace};

/// Deepest tree the parser builds
pub const MAX_DEPTH: usize = 256;

/// Parser state: the token slice, a single forward cursor into it and the depth of the
/// node being built.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses the whole token sequence into one expression.
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }
        let expr = self.parse_addition()?;
        if let Some(token) = self.peek() {
            return Err(ParseError::UnexpectedTrailingTokens {
                token: token.to_string(),
                position: self.pos,
            });
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Result<&'a Token, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or(ParseError::UnexpectedEndOfInput)?;
        self.pos += 1;
        Ok(token)
    }

    /// one level deeper; fails past `MAX_DEPTH`
    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { position: self.pos });
        }
        Ok(())
    }

    fn parse_addition(&mut self) -> Result<Expr, ParseError> {
        let start_depth = self.depth;
        let mut node = self.parse_multiplication()?;
        while let Some(op @ (Token::Add | Token::Subtract)) = self.peek() {
            self.pos += 1;
            // the left-folded chain grows one level per operator
            self.descend()?;
            let right = self.parse_multiplication()?;
            node = match op {
                Token::Add => node + right,
                _ => node - right,
            };
            trace!("reduced additive node {}", node);
        }
        self.depth = start_depth;
        Ok(node)
    }

    fn parse_multiplication(&mut self) -> Result<Expr, ParseError> {
        let start_depth = self.depth;
        let mut node = self.parse_exponent()?;
        while let Some(op @ (Token::Multiply | Token::Divide)) = self.peek() {
            self.pos += 1;
            self.descend()?;
            let right = self.parse_exponent()?;
            node = match op {
                Token::Multiply => node * right,
                _ => node / right,
            };
            trace!("reduced multiplicative node {}", node);
        }
        self.depth = start_depth;
        Ok(node)
    }

    fn parse_exponent(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if let Some(Token::Exponent) = self.peek() {
            self.pos += 1;
            self.descend()?;
            let exponent = self.parse_exponent()?;
            self.depth -= 1;
            let node = base.pow(exponent);
            trace!("reduced power node {}", node);
            return Ok(node);
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let mut negate = false;
        while let Some(Token::Subtract) = self.peek() {
            negate ^= true;
            self.pos += 1;
        }
        let position = self.pos;
        let start_depth = self.depth;
        if negate {
            self.descend()?;
        }
        let operand = match self.advance()? {
            Token::OpenParen => {
                self.descend()?;
                let inner = self.parse_addition()?;
                match self.peek() {
                    Some(Token::CloseParen) => self.pos += 1,
                    Some(_) => return Err(ParseError::ExpectedClosingParen { position: self.pos }),
                    None => return Err(ParseError::UnexpectedEndOfInput),
                }
                inner
            }
            Token::Function(func) => {
                self.descend()?;
                let arg = self.parse_unary()?.boxed();
                match func {
                    FunctionName::Sin => Expr::sin(arg),
                    FunctionName::Cos => Expr::cos(arg),
                    FunctionName::Exp => Expr::Exp(arg),
                    FunctionName::Log => Expr::Log(arg),
                }
            }
            Token::Variable(name) => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Expr::Var(symbol),
                    _ => {
                        return Err(ParseError::InvalidVariableName {
                            name: name.clone(),
                            position,
                        });
                    }
                }
            }
            Token::Number(val) => Expr::Const(*val),
            token => {
                return Err(ParseError::UnexpectedToken {
                    token: token.to_string(),
                    position,
                });
            }
        };
        self.depth = start_depth;
        Ok(if negate { -operand } else { operand })
    }
}

/// Parses an already tokenized expression.
pub fn parse_tokens(tokens: &[Token]) -> Result<Expr, ParseError> {
    let expr = Parser::new(tokens).parse()?;
    debug!("parsed expression tree {:?}", expr);
    Ok(expr)
}

impl Expr {
    /// Parses text into an expression tree: `parse_tokens(tokenize(input))`.
    ///
    /// # Examples
    /// ```
    /// use RustedCalc::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("(2+3)*4").unwrap();
    /// assert_eq!(expr.evaluate().unwrap(), 20);
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        let tokens = tokenize(input)?;
        parse_tokens(&tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        Expr::parse_expression(input).unwrap()
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse("42"), Expr::Const(42));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse("x"), Expr::Var('x'));
    }

    #[test]
    fn test_parse_precedence() {
        let expected = Expr::Add(
            Box::new(Expr::Const(3)),
            Box::new(Expr::Mul(Box::new(Expr::Const(4)), Box::new(Expr::Const(2)))),
        );
        assert_eq!(parse("3+4*2"), expected);
    }

    #[test]
    fn test_parse_subtraction_is_left_associative() {
        let expected = (Expr::num(1) - Expr::num(2)) - Expr::num(3);
        assert_eq!(parse("1-2-3"), expected);
    }

    #[test]
    fn test_parse_division_is_left_associative() {
        let expected = (Expr::num(8) / Expr::num(4)) / Expr::num(2);
        assert_eq!(parse("8/4/2"), expected);
    }

    #[test]
    fn test_parse_mixed_products() {
        let expected = (Expr::var('x') * Expr::num(2)) / Expr::var('y');
        assert_eq!(parse("x*2/y"), expected);
    }

    #[test]
    fn test_parse_power_is_right_associative() {
        let expected = Expr::num(2).pow(Expr::num(2).pow(Expr::num(3)));
        assert_eq!(parse("2^2^3"), expected);
    }

    #[test]
    fn test_parse_parenthesized_power_on_the_left() {
        let expected = Expr::num(2).pow(Expr::num(2)).pow(Expr::num(3));
        assert_eq!(parse("(2^2)^3"), expected);
    }

    #[test]
    fn test_parse_with_brackets() {
        let expected = (Expr::var('x') + Expr::var('y')) * Expr::var('z');
        assert_eq!(parse("(x + y) * z"), expected);
    }

    #[test]
    fn test_minus_signs_cancel_in_pairs() {
        assert_eq!(parse("--5"), Expr::Const(5));
        assert_eq!(parse("---5"), -Expr::num(5));
        assert_eq!(parse("----x"), Expr::Var('x'));
    }

    #[test]
    fn test_negation_binds_tighter_than_power() {
        let expected = (-Expr::var('x')).pow(Expr::num(2));
        assert_eq!(parse("-x^2"), expected);
    }

    #[test]
    fn test_binary_minus_followed_by_unary_minus() {
        let expected = Expr::var('x') - (-Expr::num(1));
        assert_eq!(parse("x--1"), expected);
    }

    #[test]
    fn test_function_binds_to_the_next_unary() {
        let expected = Expr::sin(Expr::var('x').boxed()) + Expr::num(1);
        assert_eq!(parse("sin x + 1"), expected);
        assert_eq!(parse("sin(x)+1"), expected);
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(parse("cos(x)"), Expr::cos(Expr::var('x').boxed()));
        assert_eq!(parse("exp(x)"), Expr::var('x').exp());
        assert_eq!(parse("log(x)"), Expr::var('x').log());
    }

    #[test]
    fn test_parse_nested_functions() {
        let expected = Expr::sin(Expr::cos(Expr::var('x').boxed()).boxed());
        assert_eq!(parse("sin(cos(x))"), expected);
        assert_eq!(parse("sin cos x"), expected);
    }

    #[test]
    fn test_function_argument_may_be_negated() {
        let expected = Expr::Exp((-Expr::var('x')).boxed());
        assert_eq!(parse("exp -x"), expected);
    }

    #[test]
    fn test_function_of_power_needs_brackets() {
        let without = Expr::sin(Expr::var('x').boxed()).pow(Expr::num(2));
        let with = Expr::sin(Expr::var('x').pow(Expr::num(2)).boxed());
        assert_eq!(parse("sin x^2"), without);
        assert_eq!(parse("sin(x^2)"), with);
    }

    #[test]
    fn test_parse_tokens_directly() {
        let tokens = vec![
            Token::Number(3),
            Token::Add,
            Token::Number(4),
            Token::Multiply,
            Token::Number(2),
        ];
        assert_eq!(parse_tokens(&tokens).unwrap().evaluate().unwrap(), 11);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(Expr::parse_expression(""), Err(ParseError::EmptyExpression));
        assert_eq!(Expr::parse_expression("  # "), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn test_trailing_operator() {
        assert_eq!(
            Expr::parse_expression("1+"),
            Err(ParseError::UnexpectedEndOfInput)
        );
        assert_eq!(
            Expr::parse_expression("sin"),
            Err(ParseError::UnexpectedEndOfInput)
        );
        assert_eq!(Expr::parse_expression("-"), Err(ParseError::UnexpectedEndOfInput));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(
            Expr::parse_expression("(x+y"),
            Err(ParseError::UnexpectedEndOfInput)
        );
        assert_eq!(
            Expr::parse_expression("(x+y 2"),
            Err(ParseError::ExpectedClosingParen { position: 4 })
        );
        assert_eq!(
            Expr::parse_expression("x+y)"),
            Err(ParseError::UnexpectedTrailingTokens {
                token: ")".to_string(),
                position: 3
            })
        );
    }

    #[test]
    fn test_operator_where_operand_expected() {
        assert_eq!(
            Expr::parse_expression("2*/3"),
            Err(ParseError::UnexpectedToken {
                token: "/".to_string(),
                position: 2
            })
        );
        assert_eq!(
            Expr::parse_expression("()"),
            Err(ParseError::UnexpectedToken {
                token: ")".to_string(),
                position: 1
            })
        );
    }

    #[test]
    fn test_juxtaposition_is_not_multiplication() {
        assert_eq!(
            Expr::parse_expression("2x"),
            Err(ParseError::UnexpectedTrailingTokens {
                token: "x".to_string(),
                position: 1
            })
        );
    }

    #[test]
    fn test_long_sum_is_too_deep() {
        let input = vec!["1"; 100_000].join("+");
        let err = Expr::parse_expression(&input).unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { .. }));
    }

    #[test]
    fn test_deep_brackets_are_too_deep() {
        let input = "(".repeat(100_000);
        assert!(matches!(
            Expr::parse_expression(&input),
            Err(ParseError::TooDeep { .. })
        ));
        let closed = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(matches!(
            Expr::parse_expression(&closed),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_deep_functions_and_powers_are_too_deep() {
        let functions = format!("{}x", "sin ".repeat(100_000));
        assert!(matches!(
            Expr::parse_expression(&functions),
            Err(ParseError::TooDeep { .. })
        ));
        let powers = vec!["2"; 100_000].join("^");
        assert!(matches!(
            Expr::parse_expression(&powers),
            Err(ParseError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_depth_is_released_after_brackets() {
        // each group nests a few levels, the chain adds one level per operator
        let groups = MAX_DEPTH / 2;
        let input = vec!["(1*(2+3))"; groups].join("-");
        let expr = Expr::parse_expression(&input).unwrap();
        assert_eq!(expr.evaluate().unwrap(), 5 - 5 * (groups as i64 - 1));

        let nested = format!("{}7{}", "(".repeat(MAX_DEPTH / 4), ")".repeat(MAX_DEPTH / 4));
        assert_eq!(Expr::parse_expression(&nested).unwrap(), Expr::Const(7));
    }

    #[test]
    fn test_sum_just_past_the_limit() {
        let input = vec!["1"; MAX_DEPTH + 2].join("+");
        assert_eq!(
            Expr::parse_expression(&input),
            Err(ParseError::TooDeep {
                position: 2 * MAX_DEPTH + 2
            })
        );
    }

    #[test]
    fn test_limit_sized_sum_is_usable() {
        let input = vec!["x"; MAX_DEPTH - 8].join("+");
        let expr = Expr::parse_expression(&input).unwrap();
        let value = expr.set_variable('x', 2).evaluate().unwrap();
        assert_eq!(value, 2 * (MAX_DEPTH as i64 - 8));
        let df = expr.diff('x').simplify();
        assert_eq!(df.evaluate().unwrap(), MAX_DEPTH as i64 - 8);
        assert_eq!(Expr::parse_expression(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn test_multi_letter_variable_is_rejected() {
        assert_eq!(
            Expr::parse_expression("1+xy"),
            Err(ParseError::InvalidVariableName {
                name: "xy".to_string(),
                position: 2
            })
        );
    }
}
