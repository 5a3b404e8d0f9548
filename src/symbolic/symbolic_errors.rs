//! Error types of the symbolic core.
//!
//! `ParseError` covers everything that can go wrong between raw text and a finished
//! expression tree (lexing and parsing), `EvalError` covers integer evaluation of a tree.
//! Differentiation, simplification and printing cannot fail.
use std::fmt;

/// Errors raised while turning text into an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input contained no tokens at all
    EmptyExpression,
    /// The grammar needed another token but the sequence was exhausted
    UnexpectedEndOfInput,
    /// A token that cannot appear at this point of the grammar
    UnexpectedToken {
        /// printed form of the token
        token: String,
        /// index of the token in the token sequence
        position: usize,
    },
    /// An opening parenthesis was never closed
    ExpectedClosingParen {
        /// index of the token found instead of `)`
        position: usize,
    },
    /// A complete expression was parsed but tokens are left over
    UnexpectedTrailingTokens {
        /// printed form of the first extra token
        token: String,
        /// index of the token in the token sequence
        position: usize,
    },
    /// Variables are single letters, longer identifiers are rejected
    InvalidVariableName {
        /// the identifier as written
        name: String,
        /// index of the token in the token sequence
        position: usize,
    },
    /// An integer literal does not fit into `i64`
    LiteralTooLarge {
        /// character offset where the literal starts
        offset: usize,
    },
    /// The expression would nest deeper than the parser allows
    TooDeep {
        /// index of the token where the limit was crossed
        position: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::EmptyExpression => write!(f, "Empty expression"),
            ParseError::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            ParseError::UnexpectedToken { token, position } => {
                write!(f, "Unexpected token '{}' at position {}", token, position)
            }
            ParseError::ExpectedClosingParen { position } => write!(
                f,
                "Expected closing parenthesis ')' at position {} but none found",
                position
            ),
            ParseError::UnexpectedTrailingTokens { token, position } => write!(
                f,
                "Extra tokens after expression, starting with '{}' at position {}",
                token, position
            ),
            ParseError::InvalidVariableName { name, position } => write!(
                f,
                "Invalid variable name '{}' at position {}: variables are single letters",
                name, position
            ),
            ParseError::LiteralTooLarge { offset } => {
                write!(f, "Integer literal starting at offset {} is too large", offset)
            }
            ParseError::TooDeep { position } => write!(
                f,
                "Expression nests too deeply at position {}, split it into smaller parts",
                position
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while evaluating an expression tree to an integer
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    DivisionByZero,
    Overflow,
    /// A real-valued function produced no finite result (e.g. `log(0)`)
    Undefined { function: String, argument: i64 },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Overflow => write!(f, "Integer overflow while computing result"),
            EvalError::Undefined { function, argument } => {
                write!(f, "{}({}) has no finite value", function, argument)
            }
        }
    }
}

impl std::error::Error for EvalError {}
