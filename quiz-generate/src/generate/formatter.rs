use ::std::fmt::Write;

use super::{
    factorspec::FactorizationSpec,
    fraction::Fraction,
    term::Term,
};

pub const LABEL_ADD: &'static str = "+";
pub const LABEL_SUBTRACT: &'static str = "-";
pub const LABEL_MULTIPLY: &'static str = r#"\times"#;
pub const LABEL_DIVIDE: &'static str = r#"\div"#;
pub const LABEL_MULTIPLY_RAW: &'static str = "×";
pub const LABEL_DIVIDE_RAW: &'static str = "÷";
pub const LABEL_SQUARED_RAW: &'static str = "²";
pub const LABEL_DX: &'static str = r#"\,dx"#;
pub const LABEL_CONSTANT_OF_INTEGRATION: &'static str = " + C";

pub fn math_mode<T: ::std::fmt::Display>(inner: T) -> String {
    format!(r#"\({}\)"#, inner)
}

/// `+3`, `-3`, `+0`.
pub fn format_signed_value(value: i64) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

pub fn format_parenthesized(value: i64) -> String {
    if value < 0 {
        format!("({value})")
    } else {
        value.to_string()
    }
}

pub fn format_i64_list_raw(values: &[i64]) -> String {
    let mut result = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            result.push_str(", ");
        }
        write!(&mut result, "{}", value).expect("format_i64_list_raw failed to write to string");
    }
    result
}

fn push_plain_term(result: &mut String, coefficient: i64, variable: &str) {
    if coefficient == 0 {
        return;
    }
    if coefficient > 0 && !result.is_empty() {
        result.push('+');
    }
    match coefficient {
        1 => (),
        -1 => result.push('-'),
        _ => write!(result, "{}", coefficient).expect("push_plain_term failed to write to string"),
    }
    result.push_str(variable);
}

/// Plain-text `ax²+bx+c` with zero terms dropped and unit coefficients
/// elided.
pub fn format_polynomial_raw(a: i64, b: i64, c: i64) -> String {
    let mut result = String::new();
    push_plain_term(&mut result, a, &format!("x{LABEL_SQUARED_RAW}"));
    push_plain_term(&mut result, b, "x");
    if c != 0 {
        if c > 0 && !result.is_empty() {
            result.push('+');
        }
        write!(&mut result, "{}", c).expect("format_polynomial_raw failed to write to string");
    }
    if result.is_empty() {
        return "0".to_owned();
    }
    result
}

pub fn format_quadratic(a: i64, b: i64, c: i64) -> String {
    format_polynomial_raw(a, b, c)
}

pub fn format_linear(a: i64, b: i64) -> String {
    format_polynomial_raw(0, a, b)
}

/// `2x+3`, `-x`, `x-4`.
pub fn format_linear_factor(coefficient: i64, constant: i64) -> String {
    format_polynomial_raw(0, coefficient, constant)
}

pub fn format_factor_pair(spec: &FactorizationSpec) -> String {
    spec.factors()
        .iter()
        .map(|(coefficient, constant)| format!("({})", format_linear_factor(*coefficient, *constant)))
        .collect()
}

pub fn format_exponent(exponent: Fraction) -> String {
    exponent.to_latex()
}

/// LaTeX body of a sum of monomials, e.g. `3x^{2} - \frac{1}{2}x + 4`.
pub fn format_monomial_sum(terms: &[Term]) -> String {
    let mut result = String::new();
    for term in terms.iter().filter(|term| !term.coefficient.is_zero()) {
        let negative = term.coefficient.is_negative();
        if result.is_empty() {
            if negative {
                result.push('-');
            }
        } else {
            result.push_str(if negative { " - " } else { " + " });
        }

        let magnitude = term.coefficient.abs();
        if term.is_constant() {
            result.push_str(&magnitude.to_latex());
            continue;
        }
        if magnitude != Fraction::ONE {
            result.push_str(&magnitude.to_latex());
        }
        result.push('x');
        if term.exponent != Fraction::ONE {
            write!(&mut result, "^{{{}}}", format_exponent(term.exponent)).expect("format_monomial_sum failed to write to string");
        }
    }
    if result.is_empty() {
        return "0".to_owned();
    }
    result
}

/// Wraps multi-term integrands in parentheses.
pub fn format_integrand(terms: &[Term]) -> String {
    let body = format_monomial_sum(terms);
    if terms.iter().filter(|term| !term.coefficient.is_zero()).count() > 1 {
        format!("({body})")
    } else {
        body
    }
}

pub fn format_antiderivative(terms: &[Term]) -> String {
    format!("{}{LABEL_CONSTANT_OF_INTEGRATION}", format_monomial_sum(terms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monomial_sum_sign_and_unit_rules() {
        let terms = [
            Term::power(3, 2),
            Term::power(-1, 1),
            Term::power(0, 5),
            Term::constant(-4),
        ];
        assert_eq!(format_monomial_sum(&terms), "3x^{2} - x - 4");
        assert_eq!(format_monomial_sum(&[Term::power(-1, 3)]), "-x^{3}");
        assert_eq!(format_monomial_sum(&[Term::constant(1)]), "1");
        assert_eq!(format_monomial_sum(&[]), "0");
    }

    #[test]
    fn monomial_sum_rational_parts() {
        let term = Term {
            coefficient: Fraction::new(-2, 3),
            exponent: Fraction::new(3, 2),
        };
        assert_eq!(format_monomial_sum(&[term]), r#"-\frac{2}{3}x^{\frac{3}{2}}"#);
        assert_eq!(format_monomial_sum(&[Term::power(2, -2)]), "2x^{-2}");
    }

    #[test]
    fn factor_pairs() {
        assert_eq!(format_factor_pair(&FactorizationSpec::Monic { p: 2, q: -3 }), "(x+2)(x-3)");
        let general = FactorizationSpec::General { a1: 2, m: -1, a2: 1, n: 3 };
        assert_eq!(format_factor_pair(&general), "(2x-1)(x+3)");
        assert_eq!(format_factor_pair(&general.negated()), "(-2x+1)(-x-3)");
    }

    #[test]
    fn plain_polynomials() {
        assert_eq!(format_quadratic(1, 5, 6), "x²+5x+6");
        assert_eq!(format_quadratic(2, -1, -3), "2x²-x-3");
        assert_eq!(format_quadratic(1, 0, -4), "x²-4");
        assert_eq!(format_linear(1, 0), "x");
        assert_eq!(format_linear(0, 0), "0");
    }
}
