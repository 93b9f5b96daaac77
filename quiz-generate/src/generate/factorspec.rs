use serde::{Deserialize, Serialize};

/// A factored quadratic, `(x+p)(x+q)` or `(a1·x+m)(a2·x+n)`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorizationSpec {
    Monic { p: i64, q: i64 },
    General { a1: i64, m: i64, a2: i64, n: i64 },
}

/// One linear factor `coefficient·x + constant`.
pub type LinearFactor = (i64, i64);

impl FactorizationSpec {
    pub fn from_factors(first: LinearFactor, second: LinearFactor) -> Self {
        match (first, second) {
            ((1, p), (1, q)) => Self::Monic { p, q },
            ((a1, m), (a2, n)) => Self::General { a1, m, a2, n },
        }
    }

    pub fn factors(&self) -> [LinearFactor; 2] {
        match *self {
            Self::Monic { p, q } => [(1, p), (1, q)],
            Self::General { a1, m, a2, n } => [(a1, m), (a2, n)],
        }
    }

    pub fn is_monic(&self) -> bool {
        self.factors().iter().all(|(coefficient, _)| *coefficient == 1)
    }

    /// The `(a, b, c)` of `ax² + bx + c`.
    pub fn expand(&self) -> (i64, i64, i64) {
        let [(a1, m), (a2, n)] = self.factors();
        (a1 * a2, a1 * n + a2 * m, m * n)
    }

    pub fn swapped(&self) -> Self {
        let [first, second] = self.factors();
        Self::from_factors(second, first)
    }

    /// Both factors negated, which leaves the product unchanged.
    pub fn negated(&self) -> Self {
        let [(a1, m), (a2, n)] = self.factors();
        Self::from_factors((-a1, -m), (-a2, -n))
    }

    pub fn map_constants(&self, f: impl Fn(i64, i64) -> (i64, i64)) -> Self {
        let [(a1, m), (a2, n)] = self.factors();
        let (m, n) = f(m, n);
        Self::from_factors((a1, m), (a2, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_both_forms() {
        assert_eq!(FactorizationSpec::Monic { p: 2, q: 3 }.expand(), (1, 5, 6));
        let general = FactorizationSpec::General { a1: 2, m: -1, a2: 1, n: 3 };
        assert_eq!(general.expand(), (2, 5, -3));
        assert_eq!(general.negated().expand(), general.expand());
        assert_eq!(general.swapped().expand(), general.expand());
    }
}
