//! # Lexer
//!
//! Turns one line of raw text into a flat sequence of [`Token`]s in a single left-to-right
//! pass without backtracking.
//!
//! - a maximal run of decimal digits becomes one `Number`
//! - a maximal run of letters becomes a `Function` when it is exactly one of the known
//!   function names (`sin`, `cos`, `exp`, `log`), otherwise a `Variable`
//! - `+ - * / ^ ( )` map one-to-one onto operator tokens
//! - whitespace and any other character are skipped silently
//!
//! The lexer is deliberately permissive: unknown characters vanish instead of failing,
//! the parser is the place where malformed input is reported.
use crate::symbolic::symbolic_errors::ParseError;
use log::trace;
use std::fmt;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// The closed set of functions the calculator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FunctionName {
    Sin,
    Cos,
    Exp,
    Log,
}

/// Smallest lexical unit of an expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(i64),
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponent,
    OpenParen,
    CloseParen,
    Variable(String),
    Function(FunctionName),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Add => write!(f, "+"),
            Token::Subtract => write!(f, "-"),
            Token::Multiply => write!(f, "*"),
            Token::Divide => write!(f, "/"),
            Token::Exponent => write!(f, "^"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Function(func) => write!(f, "{}", func),
        }
    }
}

/// Scans `expression` and returns its tokens in order.
///
/// The only failure is an integer literal that does not fit into `i64`.
///
/// # Examples
/// ```
/// use RustedCalc::symbolic::lexer::{tokenize, Token};
/// let tokens = tokenize("3+4*2").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Token::Number(3), Token::Add, Token::Number(4), Token::Multiply, Token::Number(2)]
/// );
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_ascii_digit() {
            let mut num: i64 = 0;
            while let Some(&(_, d)) = chars.peek() {
                let Some(digit) = d.to_digit(10) else { break };
                num = num
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(i64::from(digit)))
                    .ok_or(ParseError::LiteralTooLarge { offset })?;
                chars.next();
            }
            tokens.push(Token::Number(num));
        } else if c.is_alphabetic() {
            let mut name = String::new();
            while let Some(&(_, l)) = chars.peek() {
                if !l.is_alphabetic() {
                    break;
                }
                name.push(l);
                chars.next();
            }
            match FunctionName::from_str(&name) {
                Ok(func) => tokens.push(Token::Function(func)),
                Err(_) => tokens.push(Token::Variable(name)),
            }
        } else {
            match c {
                '+' => tokens.push(Token::Add),
                '-' => tokens.push(Token::Subtract),
                '*' => tokens.push(Token::Multiply),
                '/' => tokens.push(Token::Divide),
                '^' => tokens.push(Token::Exponent),
                '(' => tokens.push(Token::OpenParen),
                ')' => tokens.push(Token::CloseParen),
                // whitespace and unknown characters
                _ => {}
            }
            chars.next();
        }
    }
    trace!("tokenized '{}' into {:?}", expression, tokens);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tokenize_numbers_and_operators() {
        let tokens = tokenize("12+3-4*5/6^7").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(12),
                Token::Add,
                Token::Number(3),
                Token::Subtract,
                Token::Number(4),
                Token::Multiply,
                Token::Number(5),
                Token::Divide,
                Token::Number(6),
                Token::Exponent,
                Token::Number(7),
            ]
        );
    }

    #[test]
    fn test_tokenize_functions_and_variables() {
        let tokens = tokenize("sin(x)+cosy").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Function(FunctionName::Sin),
                Token::OpenParen,
                Token::Variable("x".to_string()),
                Token::CloseParen,
                Token::Add,
                Token::Variable("cosy".to_string()),
            ]
        );
    }

    #[test]
    fn test_every_function_name_is_recognized() {
        for func in FunctionName::iter() {
            let tokens = tokenize(func.as_ref()).unwrap();
            assert_eq!(tokens, vec![Token::Function(func)]);
        }
    }

    #[test]
    fn test_function_names_are_case_sensitive() {
        let tokens = tokenize("Sin").unwrap();
        assert_eq!(tokens, vec![Token::Variable("Sin".to_string())]);
    }

    #[test]
    fn test_whitespace_and_unknown_characters_are_skipped() {
        let tokens = tokenize(" 1 \t+ 2 # $ ,").unwrap();
        assert_eq!(tokens, vec![Token::Number(1), Token::Add, Token::Number(2)]);
    }

    #[test]
    fn test_digits_split_identifiers() {
        let tokens = tokenize("2x").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Number(2), Token::Variable("x".to_string())]
        );
    }

    #[test]
    fn test_empty_input_gives_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_literal_overflow() {
        assert_eq!(
            tokenize("1+99999999999999999999"),
            Err(ParseError::LiteralTooLarge { offset: 2 })
        );
        assert_eq!(
            tokenize("9223372036854775807").unwrap(),
            vec![Token::Number(i64::MAX)]
        );
    }

    #[test]
    fn test_token_display() {
        let printed: Vec<String> = tokenize("(x^2)/log 10")
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(printed, vec!["(", "x", "^", "2", ")", "/", "log", "10"]);
    }
}
