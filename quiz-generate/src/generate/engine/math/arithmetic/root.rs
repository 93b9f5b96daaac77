/*
 *
 * DES: Square, cube and fourth roots of perfect powers.
 * ASK: Evaluate the n-th root of a perfect n-th power
 *
 */

use common_types::Generate::{Difficulty, GenerationParameters, Topic};
use rand::Rng;

use crate::generate::{
    checker,
    distractor::{Candidate, Domain, ErrorMode, Value},
    engine::{Generator, Rejection},
    helper,
};

const INDEXES: [u32; 3] = [2, 3, 4];

fn radicands(index: u32, difficulty: Difficulty) -> &'static [i64] {
    match (index, difficulty) {
        (2, Difficulty::Easy) => &[4, 9, 16, 25, 36, 49, 64, 81, 100],
        (2, Difficulty::Medium) => &[121, 144, 169, 196, 225, 256, 289, 324, 361, 400],
        (2, Difficulty::Hard) => &[441, 484, 529, 576, 625, 676, 729, 784, 841, 900, 961],
        (3, Difficulty::Easy) => &[8, 27, 64],
        (3, Difficulty::Medium) => &[125, 216],
        (3, Difficulty::Hard) => &[343, 512, 729, 1000],
        (_, Difficulty::Easy) => &[16, 81],
        (_, Difficulty::Medium) => &[256, 625],
        (_, Difficulty::Hard) => &[16, 81, 256, 625],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootParams {
    pub radicand: i64,
    pub index: u32,
    pub root: i64,
}

fn validate(radicand: i64, index: u32) -> Result<RootParams, Rejection> {
    let root = checker::exact_root(radicand, index).ok_or(Rejection::NotPerfectPower)?;
    Ok(RootParams { radicand, index, root })
}

pub struct Root;

impl Generator for Root {
    type Params = RootParams;
    const TOPIC: Topic = Topic::Root;

    fn draw<R: Rng + ?Sized>(rng: &mut R, options: &GenerationParameters) -> Result<RootParams, Rejection> {
        let index = helper::pick(rng, &INDEXES);
        let radicand = helper::pick(rng, radicands(index, options.difficulty));
        validate(radicand, index)
    }

    fn fallback(_options: &GenerationParameters) -> RootParams {
        RootParams { radicand: 49, index: 2, root: 7 }
    }

    fn pool(options: &GenerationParameters) -> Vec<RootParams> {
        INDEXES
            .iter()
            .flat_map(|index| radicands(*index, options.difficulty).iter().map(move |radicand| (*radicand, *index)))
            .filter_map(|(radicand, index)| validate(radicand, index).ok())
            .collect()
    }

    fn subtype(params: &RootParams) -> &'static str {
        match params.index {
            2 => "square",
            3 => "cube",
            _ => "fourth",
        }
    }

    fn expression(params: &RootParams) -> String {
        match params.index {
            2 => format!(r#"\sqrt{{{}}} = ?"#, params.radicand),
            index => format!(r#"\sqrt[{}]{{{}}} = ?"#, index, params.radicand),
        }
    }

    fn answer(params: &RootParams) -> Value {
        Value::Int(params.root)
    }

    fn templates(params: &RootParams) -> Vec<Candidate> {
        let root = params.root;
        let mut templates = vec![
            Candidate::new(ErrorMode::OffByOne, root + 1),
            Candidate::new(ErrorMode::OffByOne, root - 1),
        ];
        for index in INDEXES.iter().filter(|index| **index != params.index) {
            templates.push(Candidate::new(ErrorMode::WrongIndex, checker::floor_root(params.radicand, *index)));
        }
        let index = params.index as i64;
        if params.radicand % index == 0 {
            templates.push(Candidate::new(ErrorMode::WrongOperation, params.radicand / index));
        }
        templates.push(Candidate::new(ErrorMode::Doubled, root * 2));
        templates
    }

    fn perturb(params: &RootParams, k: i64) -> Option<Value> {
        Some(Value::Int(params.root + k))
    }

    fn domain(_params: &RootParams) -> Domain {
        Domain::positive_integers()
    }

    fn spread(_params: &RootParams) -> i64 {
        5
    }
}
