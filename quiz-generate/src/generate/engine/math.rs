use common_types::Generate::{GenerationParameters, Topic};
use rand::Rng;

use crate::generate::question::Question;
use super::{curate, generate};

use algebra::{
    equation::Equation,
    exponential::ExponentialEquation,
    factorization::Factorization,
    function::FunctionEvaluation,
};
use arithmetic::{
    fraction::FractionArithmetic,
    integer::IntegerArithmetic,
    power::Power,
    root::Root,
};
use calculus::{
    definite_integral::DefiniteIntegral,
    derivative::Derivative,
    integral::Integral,
};
use sequences::{
    arithmetic_sequence::ArithmeticSequence,
    arithmetic_series::ArithmeticSeries,
    geometric_sequence::GeometricSequence,
    geometric_series::GeometricSeries,
};

pub mod algebra;
pub mod arithmetic;
pub mod calculus;
pub mod sequences;

pub type GeneratorFn<R> = fn(&mut R, &GenerationParameters) -> Question;
pub type CuratorFn<R> = fn(&mut R, usize, &GenerationParameters) -> Vec<Question>;

pub fn get_generator_from_topic<R: Rng + ?Sized>(topic: Topic) -> GeneratorFn<R> {
    match topic {
        Topic::IntegerArithmetic => generate::<IntegerArithmetic, R>,
        Topic::FractionArithmetic => generate::<FractionArithmetic, R>,
        Topic::Power => generate::<Power, R>,
        Topic::Root => generate::<Root, R>,
        Topic::Factorization => generate::<Factorization, R>,
        Topic::Equation => generate::<Equation, R>,
        Topic::FunctionEvaluation => generate::<FunctionEvaluation, R>,
        Topic::ExponentialEquation => generate::<ExponentialEquation, R>,
        Topic::ArithmeticSequence => generate::<ArithmeticSequence, R>,
        Topic::GeometricSequence => generate::<GeometricSequence, R>,
        Topic::ArithmeticSeries => generate::<ArithmeticSeries, R>,
        Topic::GeometricSeries => generate::<GeometricSeries, R>,
        Topic::Derivative => generate::<Derivative, R>,
        Topic::Integral => generate::<Integral, R>,
        Topic::DefiniteIntegral => generate::<DefiniteIntegral, R>,
    }
}

pub fn get_curator_from_topic<R: Rng + ?Sized>(topic: Topic) -> CuratorFn<R> {
    match topic {
        Topic::IntegerArithmetic => curate::<IntegerArithmetic, R>,
        Topic::FractionArithmetic => curate::<FractionArithmetic, R>,
        Topic::Power => curate::<Power, R>,
        Topic::Root => curate::<Root, R>,
        Topic::Factorization => curate::<Factorization, R>,
        Topic::Equation => curate::<Equation, R>,
        Topic::FunctionEvaluation => curate::<FunctionEvaluation, R>,
        Topic::ExponentialEquation => curate::<ExponentialEquation, R>,
        Topic::ArithmeticSequence => curate::<ArithmeticSequence, R>,
        Topic::GeometricSequence => curate::<GeometricSequence, R>,
        Topic::ArithmeticSeries => curate::<ArithmeticSeries, R>,
        Topic::GeometricSeries => curate::<GeometricSeries, R>,
        Topic::Derivative => curate::<Derivative, R>,
        Topic::Integral => curate::<Integral, R>,
        Topic::DefiniteIntegral => curate::<DefiniteIntegral, R>,
    }
}
