//! # Symbolic Engine Derivatives Module
//!
//! Evaluation and differentiation of expression trees.
//!
//! ## Key Methods
//!
//! ### Evaluation
//! - `evaluate()` - integer value of the tree, free variables count as 0
//! - `evaluate_with(bindings)` - same, with values for some variables
//!
//! ### Differentiation
//! - `diff(var)` - analytical derivative with respect to one variable
//! - `n_th_derivative(var, n)` - repeated derivative, simplified after every step
//!
//! ## Interesting Code Features
//!
//! 1. **Integer-only evaluation**: every node produces an `i64`. Real-valued functions
//!    (`sin`, `cos` in degrees, `exp`, `log`) are computed in `f64` and truncated toward
//!    zero, so fractional parts are dropped on purpose. Overflow and division by zero are
//!    reported as `EvalError` instead of wrapping or panicking.
//!
//! 2. **Non-consuming rules**: `diff` borrows the tree and deep-copies any original
//!    subtree that reappears in the result (e.g. `a` in `sin(a)' = a' * cos(a)`).
//!
//! 3. **Power rule with fallback**: a constant exponent `k` uses `a' * (k * a^(k-1))`,
//!    any exponent that contains a variable uses `a^b * (b' * log(a) + b * a' / a)`.
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::EvalError;
use log::{debug, trace};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Truncates a real function value toward zero, rejecting values that are not finite or do
/// not fit into `i64`.
fn truncate_real(function: &str, argument: i64, value: f64) -> Result<i64, EvalError> {
    if !value.is_finite() {
        return Err(EvalError::Undefined {
            function: function.to_string(),
            argument,
        });
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(EvalError::Overflow);
    }
    Ok(truncated as i64)
}

/// Integer power; a negative exponent gives the real power truncated toward zero.
fn integer_pow(base: i64, exponent: i64) -> Result<i64, EvalError> {
    let odd = exponent % 2 != 0;
    if exponent < 0 {
        return match base {
            0 => Err(EvalError::DivisionByZero),
            1 => Ok(1),
            -1 => Ok(if odd { -1 } else { 1 }),
            _ => Ok(0),
        };
    }
    match u32::try_from(exponent) {
        Ok(e) => base.checked_pow(e).ok_or(EvalError::Overflow),
        Err(_) => match base {
            0 | 1 => Ok(base),
            -1 => Ok(if odd { -1 } else { 1 }),
            _ => Err(EvalError::Overflow),
        },
    }
}

impl Expr {
    /// EVALUATION

    /// Evaluates the expression to an integer, treating every variable as 0.
    ///
    /// # Examples
    /// ```
    /// use RustedCalc::symbolic::symbolic_engine::Expr;
    /// assert_eq!(Expr::parse_expression("2+3*4").unwrap().evaluate().unwrap(), 14);
    /// assert_eq!(Expr::parse_expression("7/2").unwrap().evaluate().unwrap(), 3);
    /// ```
    pub fn evaluate(&self) -> Result<i64, EvalError> {
        self.evaluate_with(&HashMap::new())
    }

    /// Evaluates the expression with the given variable values; unbound variables are 0.
    pub fn evaluate_with(&self, bindings: &HashMap<char, i64>) -> Result<i64, EvalError> {
        match self {
            Expr::Const(val) => Ok(*val),
            Expr::Var(name) => Ok(bindings.get(name).copied().unwrap_or(0)),
            Expr::Neg(expr) => expr
                .evaluate_with(bindings)?
                .checked_neg()
                .ok_or(EvalError::Overflow),
            Expr::sin(expr) => {
                let arg = expr.evaluate_with(bindings)?;
                truncate_real("sin", arg, (arg as f64 * PI / 180.0).sin())
            }
            Expr::cos(expr) => {
                let arg = expr.evaluate_with(bindings)?;
                truncate_real("cos", arg, (arg as f64 * PI / 180.0).cos())
            }
            Expr::Exp(expr) => {
                let arg = expr.evaluate_with(bindings)?;
                truncate_real("exp", arg, (arg as f64).exp())
            }
            Expr::Log(expr) => {
                let arg = expr.evaluate_with(bindings)?;
                truncate_real("log", arg, (arg as f64).ln())
            }
            Expr::Add(lhs, rhs) => lhs
                .evaluate_with(bindings)?
                .checked_add(rhs.evaluate_with(bindings)?)
                .ok_or(EvalError::Overflow),
            Expr::Sub(lhs, rhs) => lhs
                .evaluate_with(bindings)?
                .checked_sub(rhs.evaluate_with(bindings)?)
                .ok_or(EvalError::Overflow),
            Expr::Mul(lhs, rhs) => lhs
                .evaluate_with(bindings)?
                .checked_mul(rhs.evaluate_with(bindings)?)
                .ok_or(EvalError::Overflow),
            Expr::Div(lhs, rhs) => {
                let numerator = lhs.evaluate_with(bindings)?;
                let denominator = rhs.evaluate_with(bindings)?;
                if denominator == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                numerator
                    .checked_div(denominator)
                    .ok_or(EvalError::Overflow)
            }
            Expr::Pow(base, exp) => {
                integer_pow(base.evaluate_with(bindings)?, exp.evaluate_with(bindings)?)
            }
        }
    }

    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to `var`.
    ///
    /// Sum, product, quotient and chain rules are applied structurally; the result is not
    /// simplified (see `simplify`).
    ///
    /// # Arguments
    /// * `var` - Variable to differentiate with respect to
    ///
    /// # Returns
    /// New expression tree representing the derivative
    ///
    /// # Examples
    /// ```
    /// use RustedCalc::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("sin(x)").unwrap();
    /// assert_eq!(f.diff('x').to_string(), "1*cos(x)");
    /// ```
    pub fn diff(&self, var: char) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(0),
            Expr::Var(name) => {
                if *name == var {
                    Expr::Const(1)
                } else {
                    Expr::Const(0)
                }
            }
            Expr::Neg(expr) => -expr.diff(var),
            Expr::Add(lhs, rhs) => lhs.diff(var) + rhs.diff(var),
            Expr::Sub(lhs, rhs) => lhs.diff(var) - rhs.diff(var),
            Expr::Mul(lhs, rhs) => {
                lhs.diff(var) * rhs.as_ref().clone() + lhs.as_ref().clone() * rhs.diff(var)
            }
            Expr::Div(lhs, rhs) => {
                let numerator =
                    lhs.diff(var) * rhs.as_ref().clone() - rhs.diff(var) * lhs.as_ref().clone();
                numerator / rhs.as_ref().clone().pow(Expr::Const(2))
            }
            Expr::sin(expr) => expr.diff(var) * Expr::cos(expr.clone()),
            Expr::cos(expr) => -expr.diff(var) * Expr::sin(expr.clone()),
            Expr::Exp(expr) => expr.diff(var) * Expr::Exp(expr.clone()),
            Expr::Log(expr) => expr.diff(var) / expr.as_ref().clone(),
            Expr::Pow(base, exp) => {
                let constant_exponent = if exp.is_constant() {
                    exp.evaluate()
                        .ok()
                        .and_then(|k| k.checked_sub(1).map(|k_minus_1| (k, k_minus_1)))
                } else {
                    None
                };
                match constant_exponent {
                    Some((k, k_minus_1)) => {
                        base.diff(var)
                            * (Expr::Const(k) * base.as_ref().clone().pow(Expr::Const(k_minus_1)))
                    }
                    None => {
                        trace!("exponent {} is not a constant, using the general power rule", exp);
                        let base_ = base.as_ref().clone();
                        let exp_ = exp.as_ref().clone();
                        self.clone()
                            * (exp.diff(var) * base_.clone().log()
                                + (exp_ * base.diff(var)) / base_)
                    }
                }
            }
        }
    } // end of diff

    /// Computes the nth derivative, simplifying after every differentiation step.
    ///
    /// # Arguments
    /// * `var` - Variable to differentiate with respect to
    /// * `n` - Order of derivative (0 = the simplified expression itself)
    pub fn n_th_derivative(&self, var: char, n: usize) -> Expr {
        let mut expr = self.simplify();
        for i in 0..n {
            expr = expr.diff(var).simplify();
            debug!("derivative #{} with respect to {}: {}", i + 1, var, expr);
        }
        expr
    }
}
