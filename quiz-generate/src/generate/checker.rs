use num_integer::Integer;

pub fn is_zero(v: i64) -> bool {
    v == 0
}

pub fn is_valid_root(radicand: i64) -> bool {
    radicand >= 0
}

pub fn within_bound(value: i64, bound: i64) -> bool {
    value.abs() <= bound
}

/// No common scalar factor across all three coefficients.
pub fn is_primitive(a: i64, b: i64, c: i64) -> bool {
    a.gcd(&b).gcd(&c) == 1
}

pub fn is_reduced(numerator: i64, denominator: i64) -> bool {
    numerator.gcd(&denominator) == 1
}

/// `numerator / denominator` rounded half towards positive infinity.
/// `denominator` must be positive.
pub fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    Integer::div_floor(&(2 * numerator + denominator), &(2 * denominator))
}

/// The exact integer `index`-th root, if `radicand` is a perfect power. The
/// float estimate is only trusted after `root^index == radicand` is verified.
pub fn exact_root(radicand: i64, index: u32) -> Option<i64> {
    if !is_valid_root(radicand) || index == 0 {
        return None;
    }
    let estimate = (radicand as f64).powf(1.0 / index as f64).round() as i64;
    [estimate - 1, estimate, estimate + 1]
        .into_iter()
        .filter(|root| *root >= 0)
        .find(|root| root.checked_pow(index) == Some(radicand))
}

/// Largest `r` with `r^index <= radicand`.
pub fn floor_root(radicand: i64, index: u32) -> i64 {
    if !is_valid_root(radicand) || index == 0 {
        return 0;
    }
    let mut root = (radicand as f64).powf(1.0 / index as f64).floor() as i64;
    while root > 0 && root.checked_pow(index).map_or(true, |power| power > radicand) {
        root -= 1;
    }
    while (root + 1).checked_pow(index).map_or(false, |power| power <= radicand) {
        root += 1;
    }
    root
}

/// Integer roots of `ax² + bx + c` via the discriminant, smaller first.
pub fn integer_roots(a: i64, b: i64, c: i64) -> Option<(i64, i64)> {
    if is_zero(a) {
        return None;
    }
    let discriminant = b * b - 4 * a * c;
    let sqrt = exact_root(discriminant, 2)?;
    let (low, high) = (-b - sqrt, -b + sqrt);
    let denominator = 2 * a;
    if low % denominator != 0 || high % denominator != 0 {
        return None;
    }
    let (r1, r2) = (low / denominator, high / denominator);
    Some((r1.min(r2), r1.max(r2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_roots_are_verified() {
        assert_eq!(exact_root(729, 3), Some(9));
        assert_eq!(exact_root(625, 4), Some(5));
        assert_eq!(exact_root(50, 2), None);
        assert_eq!(exact_root(-8, 3), None);
        assert_eq!(floor_root(50, 2), 7);
        assert_eq!(floor_root(64, 3), 4);
    }

    #[test]
    fn discriminant_roots() {
        assert_eq!(integer_roots(1, 5, 6), Some((-3, -2)));
        assert_eq!(integer_roots(1, 1, 1), None);
        assert_eq!(integer_roots(2, 5, -3), None);
        assert!(is_primitive(2, 5, -3));
        assert!(!is_primitive(2, 4, 6));
        assert!(is_reduced(-3, 4));
        assert!(!is_reduced(6, -8));
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_half_up(3, 2), 2);
        assert_eq!(round_half_up(-3, 2), -1);
        assert_eq!(round_half_up(7, 3), 2);
    }
}
