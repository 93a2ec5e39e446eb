use crate::error::{Error, Result};
use crate::expr::{Expr, Rational};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, not, opt, recognize};
use nom::error::{convert_error, VerboseError};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use nom::IResult;
use num_bigint::{BigInt, ParseBigIntError};
use num_traits::{Num, Zero};

type PResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parse a function of one variable. Powers may be written `^` or `**`.
pub fn parse_expr(input: &str) -> Result<Expr> {
    if input.trim().is_empty() {
        return Err(Error::Parse("the expression is empty".to_string()));
    }
    finish(input, all_consuming(ws(parse_add_sub))(input))
}

/// Parse a plain number such as `3`, `-2.5` or `1/3` into an exact rational.
pub fn parse_number(input: &str) -> Result<Rational> {
    let (sign, value, denom) = finish(
        input,
        all_consuming(ws(tuple((
            opt(ws(alt((char('-'), char('+'))))),
            parse_decimal,
            opt(preceded(ws(char('/')), parse_decimal)),
        ))))(input),
    )?;
    let value = match denom {
        Some(d) if d.is_zero() => {
            return Err(Error::Parse(format!("'{}' divides by zero", input.trim())))
        }
        Some(d) => value / d,
        None => value,
    };
    Ok(if sign == Some('-') { -value } else { value })
}

fn finish<'a, O>(input: &'a str, result: PResult<'a, O>) -> Result<O> {
    match result {
        Ok((_, out)) => Ok(out),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(Error::Parse(convert_error(input, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(Error::Parse("incomplete input".to_string())),
    }
}

fn parse_add_sub(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            _ => Expr::Sub(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> PResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(
            ws(alt((terminated(char('*'), not(char('*'))), char('/')))),
            parse_unary,
        ),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

// Unary minus binds looser than powers: `-x^2` is `-(x^2)`.
fn parse_unary(input: &str) -> PResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        Ok((rest, Expr::Neg(expr.boxed())))
    } else if let Ok((rest, expr)) = preceded(ws(char('+')), parse_unary)(input) {
        Ok((rest, expr))
    } else {
        parse_pow(input)
    }
}

fn parse_pow(input: &str) -> PResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(alt((tag("**"), tag("^")))), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> PResult<'_, Expr> {
    alt((parse_parens, parse_function, parse_number_expr, parse_identifier))(input)
}

fn parse_parens(input: &str) -> PResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number_expr(input: &str) -> PResult<'_, Expr> {
    map(parse_decimal, Expr::Constant)(input)
}

fn parse_identifier(input: &str) -> PResult<'_, Expr> {
    map(ws(recognize(pair(alpha1, alphanumeric0))), |s: &str| {
        Expr::Variable(s.to_string())
    })(input)
}

fn parse_function(input: &str) -> PResult<'_, Expr> {
    let (rest, (name, arg)) = pair(
        ws(parse_function_name),
        alt((
            delimited(ws(char('(')), parse_add_sub, ws(char(')'))),
            parse_primary,
        )),
    )(input)?;

    let expr = match name {
        "sin" => Expr::Sin(arg.boxed()),
        "cos" => Expr::Cos(arg.boxed()),
        "tan" => Expr::Tan(arg.boxed()),
        "exp" => Expr::Exp(arg.boxed()),
        "sqrt" => Expr::Sqrt(arg.boxed()),
        "abs" => Expr::Abs(arg.boxed()),
        _ => Expr::Log(arg.boxed()),
    };

    Ok((rest, expr))
}

fn parse_function_name(input: &str) -> PResult<'_, &str> {
    alt((
        tag("sqrt"),
        tag("sin"),
        tag("cos"),
        tag("tan"),
        tag("exp"),
        tag("log"),
        tag("ln"),
        tag("abs"),
    ))(input)
}

fn parse_decimal(input: &str) -> PResult<'_, Rational> {
    map_res(
        ws(recognize(pair(digit1, opt(pair(char('.'), digit1))))),
        decimal_to_rational,
    )(input)
}

fn decimal_to_rational(text: &str) -> std::result::Result<Rational, ParseBigIntError> {
    match text.split_once('.') {
        Some((int, frac)) => {
            let numer = BigInt::from_str_radix(&format!("{int}{frac}"), 10)?;
            let denom = num_traits::pow(BigInt::from(10), frac.len());
            Ok(Rational::new(numer, denom))
        }
        None => Ok(Rational::from_integer(BigInt::from_str_radix(text, 10)?)),
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> PResult<'a, O>
where
    F: FnMut(&'a str) -> PResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, mul, neg, pow, rational, sub};

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn decimal_literals_are_exact() {
        assert_eq!(decimal_to_rational("2.50").unwrap(), rational(5, 2));
        assert_eq!(decimal_to_rational("007").unwrap(), rational(7, 1));
    }

    #[test]
    fn both_power_spellings_agree() {
        assert_eq!(parse_expr("x**2").unwrap(), parse_expr("x^2").unwrap());
        assert_eq!(parse_expr("x**2").unwrap(), pow(x(), Expr::integer(2)));
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(
            parse_expr("-x**2").unwrap(),
            neg(pow(x(), Expr::integer(2)))
        );
        assert_eq!(
            parse_expr("x**-1").unwrap(),
            pow(x(), neg(Expr::integer(1)))
        );
    }

    #[test]
    fn products_and_sums_are_left_associative() {
        assert_eq!(
            parse_expr("2*x - 1 + x").unwrap(),
            add(sub(mul(Expr::integer(2), x()), Expr::integer(1)), x())
        );
    }

    #[test]
    fn function_application() {
        assert_eq!(
            parse_expr("sqrt(x + 1)").unwrap(),
            Expr::Sqrt(add(x(), Expr::integer(1)).boxed())
        );
        assert_eq!(parse_expr("ln(x)").unwrap(), Expr::Log(x().boxed()));
    }
}
