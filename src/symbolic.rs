#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// turns a line of text into a flat sequence of tokens
///
///# Example
/// ```
/// use RustedCalc::symbolic::lexer::{tokenize, Token, FunctionName};
/// let tokens = tokenize("sin(x) + 12").unwrap();
/// assert_eq!(tokens[0], Token::Function(FunctionName::Sin));
/// assert_eq!(tokens[5], Token::Number(12));
/// ```
pub mod lexer;
/// a module turns a token sequence (or a String) into a symbolic expression
///
///# Example
/// ```
/// use RustedCalc::symbolic::symbolic_engine::Expr;
/// let input = "3+4*2";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.evaluate().unwrap(), 11);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree
/// 2) evaluates it to an integer
/// 3) differentiates and simplifies it
/// 4) turns it back into a string for printing
///# Example#
/// ```
/// use RustedCalc::symbolic::symbolic_engine::Expr;
/// let input = "x^3 + log(x)";
///   // here you've got symbolic expression
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
///   // differentiate with respect to x
/// let df_dx = parsed_expression.diff('x');
/// println!("df_dx = {}", df_dx);
///   // and make it readable
/// let df_dx = df_dx.simplify();
/// assert_eq!(df_dx.to_string(), "3*x^2+1/x");
///   // evaluate with x bound to 2
/// let at_2 = df_dx.set_variable('x', 2).evaluate().unwrap();
/// assert_eq!(at_2, 12);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
/// error types of lexing, parsing and evaluation
pub mod symbolic_errors;
/// single-pass algebraic simplification
pub mod symbolic_simplify;
