/*
 *
 * DES: b^{cx+d} = n where n is an exact power of b. Hard allows negative exponents.
 * ASK: Solve for x
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use crate::generate::{
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{ensure, Generator, Rejection},
    formatter,
    fraction::Fraction,
    helper,
};

const MAX_RESULT: i64 = 1000;
const BASES: [i64; 9] = [2, 3, 4, 5, 6, 7, 8, 9, 10];

/// `base^{scale·x + offset}`, solved by `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialParams {
    pub base: i64,
    pub scale: i64,
    pub offset: i64,
    pub x: i64,
}

impl ExponentialParams {
    fn exponent(&self) -> i64 {
        self.scale * self.x + self.offset
    }

    fn result(&self) -> Option<Fraction> {
        Fraction::from_integer(self.base).pow(self.exponent())
    }
}

struct Shapes {
    offsets: &'static [i64],
    scales: &'static [i64],
    scaled_offsets: &'static [i64],
    x: (i64, i64),
    min_exponent: i64,
}

fn shapes(difficulty: Difficulty) -> Shapes {
    match difficulty {
        Difficulty::Easy => Shapes {
            offsets: &[1, 2, 3],
            scales: &[2, 3],
            scaled_offsets: &[1, 2],
            x: (0, 10),
            min_exponent: 1,
        },
        Difficulty::Medium => Shapes {
            offsets: &[1, 2, 3, 4],
            scales: &[2, 3],
            scaled_offsets: &[1, 2, 3],
            x: (0, 10),
            min_exponent: 1,
        },
        Difficulty::Hard => Shapes {
            offsets: &[1, 2, 3, 4, 5],
            scales: &[2, 3, 4],
            scaled_offsets: &[-2, -1, 1, 2, 3],
            x: (-6, 10),
            min_exponent: -3,
        },
    }
}

/// Every `(scale, offset)` pair the difficulty allows.
fn forms(shapes: &Shapes) -> Vec<(i64, i64)> {
    let mut forms = vec![(1, 0)];
    forms.extend(shapes.offsets.iter().map(|c| (1, *c)));
    forms.extend(shapes.offsets.iter().map(|c| (1, -c)));
    forms.extend(shapes.scales.iter().map(|c| (*c, 0)));
    for c in shapes.scales {
        forms.extend(shapes.scaled_offsets.iter().map(|d| (*c, *d)));
    }
    forms
}

fn validate(params: ExponentialParams, shapes: &Shapes) -> Result<ExponentialParams, Rejection> {
    ensure(params.x >= shapes.x.0 && params.x <= shapes.x.1, Rejection::OutOfBounds)?;
    ensure(params.exponent() >= shapes.min_exponent, Rejection::OutOfBounds)?;
    let result = params.result().ok_or(Rejection::OutOfBounds)?;
    ensure(
        result.numerator() <= MAX_RESULT && result.denominator() <= MAX_RESULT,
        Rejection::OutOfBounds,
    )?;
    Ok(params)
}

fn solutions(base: i64, (scale, offset): (i64, i64), shapes: &Shapes) -> Vec<ExponentialParams> {
    (shapes.x.0..=shapes.x.1)
        .map(|x| ExponentialParams { base, scale, offset, x })
        .filter_map(|params| validate(params, shapes).ok())
        .collect()
}

pub struct ExponentialEquation;

impl Generator for ExponentialEquation {
    type Params = ExponentialParams;
    const TOPIC: Topic = Topic::ExponentialEquation;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<ExponentialParams, Rejection> {
        let shapes = shapes(options.difficulty);
        let base = helper::pick(rng, &BASES);
        let form = helper::pick(rng, &forms(&shapes));
        let solutions = solutions(base, form, &shapes);
        ensure(!solutions.is_empty(), Rejection::OutOfBounds)?;
        Ok(helper::pick(rng, &solutions))
    }

    fn fallback(_options: &GenerationParameters) -> ExponentialParams {
        ExponentialParams { base: 2, scale: 1, offset: 0, x: 3 }
    }

    fn pool(options: &GenerationParameters) -> Vec<ExponentialParams> {
        let shapes = shapes(options.difficulty);
        let forms = forms(&shapes);
        BASES
            .iter()
            .flat_map(|base| forms.iter().flat_map(|form| solutions(*base, *form, &shapes)))
            .collect()
    }

    fn subtype(params: &ExponentialParams) -> &'static str {
        match (params.scale, params.offset) {
            (1, 0) => "simple",
            (1, c) if c > 0 => "x_plus_c",
            (1, _) => "x_minus_c",
            (_, 0) => "cx",
            _ => "cx_plus_d",
        }
    }

    fn expression(params: &ExponentialParams) -> String {
        let result = params.result().map(|result| result.to_latex()).unwrap_or_default();
        format!(
            "{}^{{{}}} = {}",
            params.base,
            formatter::format_linear(params.scale, params.offset),
            result
        )
    }

    fn answer(params: &ExponentialParams) -> Value {
        Value::Int(params.x)
    }

    fn templates(params: &ExponentialParams) -> Vec<Candidate> {
        let (scale, offset, x) = (params.scale, params.offset, params.x);
        let exponent = params.exponent();
        let mut templates = vec![Candidate::new(ErrorMode::WrongOperation, exponent)];
        if (exponent + offset) % scale == 0 {
            templates.push(Candidate::new(ErrorMode::SignFlip, (exponent + offset) / scale));
        }
        if scale > 1 {
            templates.push(Candidate::new(ErrorMode::ForgotDivision, exponent - offset));
        }
        templates.push(Candidate::new(ErrorMode::SignFlip, -x));
        templates.push(Candidate::new(ErrorMode::OffByOne, x + 1));
        templates.push(Candidate::new(ErrorMode::OffByOne, x - 1));
        templates
    }

    fn perturb(params: &ExponentialParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.x + k))
    }

    fn domain(params: &ExponentialParams) -> Domain {
        if params.x >= 0 && params.exponent() >= 1 {
            Domain::non_negative_integers()
        } else {
            Domain::integers()
        }
    }

    fn spread(_params: &ExponentialParams) -> i64 {
        4
    }
}
