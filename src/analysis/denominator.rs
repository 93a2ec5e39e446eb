use crate::expr::{one, Expr};
use crate::rational::{is_rational_function, numer_denom};

/// Denominator of `expr` as written, before any cancellation.
///
/// Anything that is not a rational function of `var` yields `1`.
pub fn extract_denominator(expr: &Expr, var: &str) -> Expr {
    if is_rational_function(expr, var) {
        numer_denom(expr).1
    } else {
        one()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{mul, sub};
    use crate::parser::parse_expr;

    fn den(text: &str) -> Expr {
        extract_denominator(&parse_expr(text).unwrap(), "x")
    }

    #[test]
    fn keeps_cancellable_factors() {
        assert_eq!(den("(x^2 - 1)/(x - 1)"), sub(Expr::var("x"), Expr::integer(1)));
        assert_eq!(
            den("(x - 2)/(x*(x - 2))"),
            mul(Expr::var("x"), sub(Expr::var("x"), Expr::integer(2)))
        );
    }

    #[test]
    fn polynomials_and_non_rational_input_give_one() {
        assert!(den("x^2 + 3*x").is_one());
        assert!(den("sqrt(x)/(x - 1)").is_one());
        assert!(den("log(x)").is_one());
    }

    #[test]
    fn constant_denominators_are_kept() {
        assert_eq!(den("x/2"), Expr::integer(2));
    }
}
