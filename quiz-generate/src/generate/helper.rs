use rand::{
    Rng,
    distributions::{Distribution, Uniform},
    seq::SliceRandom,
};

struct Filter<Dist, Test> {
    dist: Dist,
    test: Test,
}
impl <T, Dist, Test> Distribution<T> for Filter<Dist, Test>
where
    Dist: Distribution<T>,
    Test: Fn(&T) -> bool,
{
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        loop {
            let x = self.dist.sample(rng);
            if (self.test)(&x) {
                return x;
            }
        }
    }
}

/// Inclusive on both ends.
pub fn gen_range_i64<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.gen_range(min..=max)
}

pub fn gen_range_i64_except<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64, except: i64) -> i64 {
    let dist = Filter {
        dist: Uniform::new_inclusive(min, max),
        test: |x: &i64| *x != except,
    };
    rng.sample(&dist)
}

/// `options` must not be empty.
pub fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability)
}

/// Negates `value` with the given probability.
pub fn maybe_negate<R: Rng + ?Sized>(rng: &mut R, value: i64, probability: f64) -> i64 {
    if chance(rng, probability) {
        -value
    } else {
        value
    }
}

pub fn shuffle<R: Rng + ?Sized, T>(rng: &mut R, items: &mut [T]) {
    items.shuffle(rng);
}
