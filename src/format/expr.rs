use crate::expr::Expr;
use crate::number::show_rational;
use num_traits::{One, Signed};

/// Infix rendering with minimal parentheses: `(x^2 - 1)/(x - 1)`.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.clone(),
            Expr::Constant(r) => {
                let prec = if r.is_negative() || !r.is_integer() { 2 } else { 5 };
                bracket(ctx, prec, show_rational(r))
            }

            Expr::Add(a, b) => {
                let (neg_b, b_inner) = split_neg(b);
                let op = if neg_b { "-" } else { "+" };
                let rhs = if neg_b { pp(2, &b_inner) } else { pp(1, &b_inner) };
                bracket(ctx, 1, format!("{} {op} {rhs}", pp(1, a)))
            }

            Expr::Sub(a, b) => {
                let (neg_b, b_inner) = split_neg(b);
                let op = if neg_b { "+" } else { "-" };
                let rhs = if neg_b { pp(1, &b_inner) } else { pp(2, &b_inner) };
                bracket(ctx, 1, format!("{} {op} {rhs}", pp(1, a)))
            }

            Expr::Mul(a, b) => signed_product(ctx, a, b, "*", 3),
            Expr::Div(a, b) => signed_product(ctx, a, b, "/", 3),

            Expr::Pow(a, b) => bracket(ctx, 3, format!("{}^{}", pp(4, a), pp(3, b))),

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    pp(ctx, &inner)
                } else {
                    bracket(ctx, 2, format!("-{}", pp(2, &inner)))
                }
            }

            Expr::Sin(a) => format!("sin({})", pp(0, a)),
            Expr::Cos(a) => format!("cos({})", pp(0, a)),
            Expr::Tan(a) => format!("tan({})", pp(0, a)),
            Expr::Exp(a) => format!("exp({})", pp(0, a)),
            Expr::Log(a) => format!("log({})", pp(0, a)),
            Expr::Sqrt(a) => format!("sqrt({})", pp(0, a)),
            Expr::Abs(a) => format!("abs({})", pp(0, a)),
        }
    }

    // Signs are pulled to the front: `-(2*x)` prints as `-2*x`. A fractional
    // coefficient moves its denominator to the end: `3/2*x` prints as `3*x/2`.
    fn signed_product(ctx: u8, a: &Expr, b: &Expr, op: &str, rhs_ctx: u8) -> String {
        let (na, a_inner) = split_neg(a);
        let (nb, b_inner) = split_neg(b);
        let body = match &a_inner {
            Expr::Constant(r) if op == "*" && !r.is_integer() => {
                if r.numer().is_one() {
                    format!("{}/{}", pp(2, &b_inner), r.denom())
                } else {
                    format!("{}*{}/{}", r.numer(), pp(3, &b_inner), r.denom())
                }
            }
            _ => format!("{}{op}{}", pp(2, &a_inner), pp(rhs_ctx, &b_inner)),
        };
        if na ^ nb {
            bracket(ctx, 2, format!("-{body}"))
        } else {
            bracket(ctx, 2, body)
        }
    }

    pp(0, expr)
}

fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn round(text: &str) -> String {
        pretty(&parse_expr(text).unwrap())
    }

    #[test]
    fn sums_are_spaced_products_are_not() {
        assert_eq!(round("x**2-1"), "x^2 - 1");
        assert_eq!(round("3*x + -2"), "3*x - 2");
        assert_eq!(round("(x^2 - 1)/(x - 1)"), "(x^2 - 1)/(x - 1)");
    }

    #[test]
    fn parentheses_only_where_needed() {
        assert_eq!(round("x - (y + 1)"), "x - (y + 1)");
        assert_eq!(round("(x + 1) - y"), "x + 1 - y");
        assert_eq!(round("1/(2*x)"), "1/(2*x)");
        assert_eq!(round("(x^2)^3"), "(x^2)^3");
        assert_eq!(round("x^(1/3)"), "x^(1/3)");
    }

    #[test]
    fn negation_forms() {
        assert_eq!(round("-x^2"), "-x^2");
        assert_eq!(round("-(x + 1)"), "-(x + 1)");
        assert_eq!(round("x^-1"), "x^(-1)");
        assert_eq!(round("2*(-x)"), "-2*x");
    }

    #[test]
    fn functions_and_fractions() {
        assert_eq!(round("sqrt(x + 1)"), "sqrt(x + 1)");
        assert_eq!(round("ln(x)"), "log(x)");
        assert_eq!(round("0.5*x"), "x/2");
    }

    #[test]
    fn fractional_coefficients_divide_at_the_end() {
        assert_eq!(round("-1.5*x^2"), "-3*x^2/2");
        assert_eq!(round("2.5*(x + 1)"), "5*(x + 1)/2");
        assert_eq!(round("0.25*x*y"), "x/4*y");
        assert_eq!(round("1 - 0.5*x"), "1 - x/2");
    }
}
