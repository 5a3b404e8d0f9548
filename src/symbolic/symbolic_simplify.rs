//! # Symbolic Expression Simplification Module
//!
//! One bottom-up pass of local algebraic identities. Children are simplified first, then a
//! fixed rule table is tried once at the current node. The pass does not iterate to a fixed
//! point and does not reorder terms, so `x+1+1` stays as it is while `(x*1)*1` becomes `x`.
//!
//! ## Rules
//!
//! - **Constant Folding**: any operator on two literals, with the integer semantics of
//!   `evaluate` (`7/2 = 3`, `2^-1 = 0`); skipped when evaluation would fail, so `1/0`,
//!   `0^-1` and overflowing folds stay as they are. `-(literal)` as well
//! - **Additive Identities**: `x + 0 = x`, `0 + x = x`, `x - 0 = x`, `0 - x = -x`
//! - **Multiplicative Identities**: `x * 1 = x`, `x * 0 = 0`, `x * -1 = -x` (both sides),
//!   `x / 1 = x`, `x / -1 = -x`
//! - **Power Rules**: `x^0 = 1`, `x^1 = x`, `0^x = 0` (not for a negative literal `x`),
//!   `1^x = 1`
//! - **Functions**: `exp(0) = 1`, `log(1) = 0`
//! - **Negation**: `--x = x`
use crate::symbolic::symbolic_engine::Expr;
use log::trace;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Returns a new, simplified tree; `self` is left untouched.
    ///
    /// # Examples
    /// ```
    /// use RustedCalc::symbolic::symbolic_engine::Expr;
    /// let df = Expr::parse_expression("x^2").unwrap().diff('x');
    /// assert_eq!(df.simplify().to_string(), "2*x");
    /// ```
    pub fn simplify(&self) -> Expr {
        let simplified = match self {
            Expr::Const(_) | Expr::Var(_) => self.clone(),
            Expr::Neg(expr) => match expr.simplify() {
                Expr::Const(a) => match a.checked_neg() {
                    Some(n) => Expr::Const(n),
                    None => -Expr::Const(a),
                },
                Expr::Neg(inner) => *inner, // --x = x
                other => -other,
            },
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if a.checked_add(*b).is_some() => {
                        Expr::Const(a + b)
                    }
                    (Expr::Const(0), _) => rhs, // 0 + x = x
                    (_, Expr::Const(0)) => lhs, // x + 0 = x
                    _ => lhs + rhs,
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if a.checked_sub(*b).is_some() => {
                        Expr::Const(a - b)
                    }
                    (_, Expr::Const(0)) => lhs,  // x - 0 = x
                    (Expr::Const(0), _) => -rhs, // 0 - x = -x
                    _ => lhs - rhs,
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if a.checked_mul(*b).is_some() => {
                        Expr::Const(a * b)
                    }
                    (Expr::Const(0), _) | (_, Expr::Const(0)) => Expr::Const(0), // 0 * x = 0
                    (Expr::Const(1), _) => rhs,                                  // 1 * x = x
                    (_, Expr::Const(1)) => lhs,                                  // x * 1 = x
                    (Expr::Const(-1), _) => -rhs,                                // -1 * x = -x
                    (_, Expr::Const(-1)) => -lhs,                                // x * -1 = -x
                    _ => lhs * rhs,
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify();
                let rhs = rhs.simplify();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0 && a.checked_div(*b).is_some() => {
                        Expr::Const(a / b)
                    }
                    (_, Expr::Const(1)) => lhs,   // x / 1 = x
                    (_, Expr::Const(-1)) => -lhs, // x / -1 = -x
                    _ => lhs / rhs,
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify();
                let exp = exp.simplify();
                let folded = match (&base, &exp) {
                    (Expr::Const(_), Expr::Const(_)) => {
                        base.clone().pow(exp.clone()).evaluate().ok()
                    }
                    _ => None,
                };
                match (folded, &base, &exp) {
                    (Some(value), _, _) => Expr::Const(value),
                    (None, _, Expr::Const(0)) => Expr::Const(1), // x ^ 0 = 1
                    (None, _, Expr::Const(1)) => base,           // x ^ 1 = x
                    (None, Expr::Const(0), _) if matches!(exp, Expr::Const(k) if k < 0) => {
                        base.pow(exp)
                    }
                    (None, Expr::Const(0), _) => Expr::Const(0), // 0 ^ x = 0
                    (None, Expr::Const(1), _) => Expr::Const(1), // 1 ^ x = 1
                    _ => base.pow(exp),
                }
            }
            Expr::Exp(expr) => match expr.simplify() {
                Expr::Const(0) => Expr::Const(1),
                expr => expr.exp(),
            },
            Expr::Log(expr) => match expr.simplify() {
                Expr::Const(1) => Expr::Const(0),
                expr => expr.log(),
            },
            Expr::sin(expr) => Expr::sin(expr.simplify().boxed()),
            Expr::cos(expr) => Expr::cos(expr.simplify().boxed()),
        };
        trace!("simplify: {} -> {}", self, simplified);
        simplified
    }
}
