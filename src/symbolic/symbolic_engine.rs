//! # Symbolic Engine Module
//!
//! Core expression tree of the calculator. An expression is a closed set of node kinds,
//! each node exclusively owning its children through `Box<Expr>`; trees never share
//! subtrees and never contain cycles.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Leaves**: `Const(i64)` integer literal, `Var(char)` single-letter free variable
//! - **Unary**: `Neg` additive inverse, `sin`, `cos` (degrees), `Exp`, `Log` (natural)
//! - **Binary**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//!
//! ### Key Methods
//! - `parse_expression(text)` - text to tree (see `parse_expr`)
//! - `evaluate()` - integer evaluation (see `symbolic_engine_derivatives`)
//! - `diff(var)` - symbolic derivative (see `symbolic_engine_derivatives`)
//! - `simplify()` - one bottom-up pass of local identities (see `symbolic_simplify`)
//! - `Display` - infix printing with the minimal parentheses implied by precedence
//!
//! ## Interesting Code Features
//!
//! 1. **Precedence classes**: every variant has a fixed class (5 leaves, 4 unary forms,
//!    3 power, 2 multiplicative, 1 additive) used only by the printer; the parser encodes
//!    precedence structurally in its grammar levels.
//!
//! 2. **Operator Overloading**: `std::ops` traits build nodes, so derivative rules read
//!    like formulas: `a.diff(v) * b.clone() + a.clone() * b.diff(v)`.

#![allow(non_camel_case_types)]

use std::collections::HashMap;
use std::fmt;

/// Expression tree node.
///
/// # Examples
/// ```
/// use RustedCalc::symbolic::symbolic_engine::Expr;
/// let expr = Expr::Add(Expr::num(3).boxed(), Expr::Mul(Expr::num(4).boxed(), Expr::num(2).boxed()).boxed());
/// assert_eq!(expr.to_string(), "3+4*2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Integer literal
    Const(i64),
    /// Free variable, evaluates to 0 unless bound
    Var(char),
    /// Unary additive inverse: -operand
    Neg(Box<Expr>),
    /// Sine of an angle given in degrees
    sin(Box<Expr>),
    /// Cosine of an angle given in degrees
    cos(Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm
    Log(Box<Expr>),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Integer division: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
}

/// Precedence class of leaves, never parenthesized
pub const PREC_ATOM: u8 = 5;
/// Precedence class of negation and function application
pub const PREC_UNARY: u8 = 4;
pub const PREC_POWER: u8 = 3;
pub const PREC_PRODUCT: u8 = 2;
pub const PREC_SUM: u8 = 1;

impl Expr {
    /// Fixed precedence class of the node kind, used to decide parenthesization when printing.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Const(_) | Expr::Var(_) => PREC_ATOM,
            Expr::Neg(_) | Expr::sin(_) | Expr::cos(_) | Expr::Exp(_) | Expr::Log(_) => {
                PREC_UNARY
            }
            Expr::Pow(_, _) => PREC_POWER,
            Expr::Mul(_, _) | Expr::Div(_, _) => PREC_PRODUCT,
            Expr::Add(_, _) | Expr::Sub(_, _) => PREC_SUM,
        }
    }

    /// Left operand needs parentheses when it binds looser than the parent.
    /// A power on the left of a power is wrapped as well, because `^` parses right-associative.
    fn wraps_left(&self, lhs: &Expr) -> bool {
        match self {
            Expr::Pow(_, _) => lhs.precedence() <= self.precedence(),
            _ => lhs.precedence() < self.precedence(),
        }
    }

    /// Right operand needs parentheses when it binds looser than the parent, or equally
    /// loose unless both nodes are the same associative operator (`+` in `+`, `*` in `*`).
    fn wraps_right(&self, rhs: &Expr) -> bool {
        let (own, child) = (self.precedence(), rhs.precedence());
        if child != own {
            return child < own;
        }
        !matches!(
            (self, rhs),
            (Expr::Add(_, _), Expr::Add(_, _)) | (Expr::Mul(_, _), Expr::Mul(_, _))
        )
    }

    fn fmt_binary(&self, f: &mut fmt::Formatter, lhs: &Expr, op: &str, rhs: &Expr) -> fmt::Result {
        write_operand(f, lhs, self.wraps_left(lhs))?;
        write!(f, "{}", op)?;
        write_operand(f, rhs, self.wraps_right(rhs))
    }
}

fn write_operand(f: &mut fmt::Formatter, operand: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

/// Infix rendering without spaces; parentheses only where the precedence classes demand
/// them, function arguments are always parenthesized.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // the lexer reads only non-negative literals up to i64::MAX
            Expr::Const(i64::MIN) => write!(f, "({}-1)", i64::MIN + 1),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Neg(expr) => {
                write!(f, "-")?;
                write_operand(f, expr, expr.precedence() < PREC_UNARY)
            }
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Log(expr) => write!(f, "log({})", expr),
            Expr::Add(lhs, rhs) => self.fmt_binary(f, lhs, "+", rhs),
            Expr::Sub(lhs, rhs) => self.fmt_binary(f, lhs, "-", rhs),
            Expr::Mul(lhs, rhs) => self.fmt_binary(f, lhs, "*", rhs),
            Expr::Div(lhs, rhs) => self.fmt_binary(f, lhs, "/", rhs),
            Expr::Pow(base, exp) => self.fmt_binary(f, base, "^", exp),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.boxed())
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Integer literal node
    pub fn num(val: i64) -> Expr {
        Expr::Const(val)
    }

    /// Variable node
    pub fn var(symbol: char) -> Expr {
        Expr::Var(symbol)
    }

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Creates exponential function e^(self).
    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    /// Creates natural logarithm log(self).
    pub fn log(self) -> Expr {
        Expr::Log(self.boxed())
    }

    /// Substitutes a variable with an integer literal throughout the expression.
    ///
    /// # Arguments
    /// * `var` - Symbol of the variable to substitute
    /// * `value` - Literal to put in its place
    ///
    /// # Returns
    /// New expression with the variable substituted
    pub fn set_variable(&self, var: char, value: i64) -> Expr {
        let mut map = HashMap::new();
        map.insert(var, value);
        self.set_variable_from_map(&map)
    }

    /// Substitutes every variable present in `var_map` with its literal value.
    pub fn set_variable_from_map(&self, var_map: &HashMap<char, i64>) -> Expr {
        match self {
            Expr::Var(name) => match var_map.get(name) {
                Some(value) => Expr::Const(*value),
                None => self.clone(),
            },
            Expr::Const(_) => self.clone(),
            Expr::Neg(expr) => Expr::Neg(expr.set_variable_from_map(var_map).boxed()),
            Expr::sin(expr) => Expr::sin(expr.set_variable_from_map(var_map).boxed()),
            Expr::cos(expr) => Expr::cos(expr.set_variable_from_map(var_map).boxed()),
            Expr::Exp(expr) => Expr::Exp(expr.set_variable_from_map(var_map).boxed()),
            Expr::Log(expr) => Expr::Log(expr.set_variable_from_map(var_map).boxed()),
            Expr::Add(lhs, rhs) => {
                lhs.set_variable_from_map(var_map) + rhs.set_variable_from_map(var_map)
            }
            Expr::Sub(lhs, rhs) => {
                lhs.set_variable_from_map(var_map) - rhs.set_variable_from_map(var_map)
            }
            Expr::Mul(lhs, rhs) => {
                lhs.set_variable_from_map(var_map) * rhs.set_variable_from_map(var_map)
            }
            Expr::Div(lhs, rhs) => {
                lhs.set_variable_from_map(var_map) / rhs.set_variable_from_map(var_map)
            }
            Expr::Pow(base, exp) => base
                .set_variable_from_map(var_map)
                .pow(exp.set_variable_from_map(var_map)),
        }
    }

    /// check if the expression contains a variable
    pub fn contains_variable(&self, var_name: char) -> bool {
        match self {
            Expr::Var(name) => *name == var_name,
            Expr::Const(_) => false,
            Expr::Neg(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::Exp(expr)
            | Expr::Log(expr) => expr.contains_variable(var_name),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
        }
    }

    /// Returns all variables of the expression, sorted and deduplicated.
    pub fn extract_variables(&self) -> Vec<char> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<char>) {
        match self {
            Expr::Var(name) => vars.push(*name),
            Expr::Const(_) => {}
            Expr::Neg(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::Exp(expr)
            | Expr::Log(expr) => expr.collect_variables(vars),
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
        }
    }

    /// true when no variable occurs anywhere in the tree
    pub fn is_constant(&self) -> bool {
        self.extract_variables().is_empty()
    }
}
