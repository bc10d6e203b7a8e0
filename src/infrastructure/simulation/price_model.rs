use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Trait defining a synthetic price tick for tickers without a prediction.
pub trait PriceModel: Send {
    fn next_price(&mut self, current: Decimal) -> Decimal;
}

/// Uniform random move of at most `max_move` (fraction) per tick.
///
/// Prices are rounded to whole currency units and never drop below 1.
#[derive(Debug, Clone)]
pub struct RandomWalkPrice {
    max_move: f64,
    rng: StdRng,
}

impl RandomWalkPrice {
    pub const DEFAULT_MAX_MOVE: f64 = 0.01;

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            max_move: Self::DEFAULT_MAX_MOVE,
            rng,
        }
    }
}

impl PriceModel for RandomWalkPrice {
    fn next_price(&mut self, current: Decimal) -> Decimal {
        let change = self.rng.random_range(-self.max_move..=self.max_move);
        let factor = Decimal::from_f64(1.0 + change).unwrap_or(Decimal::ONE);
        current
            .checked_mul(factor)
            .unwrap_or(current)
            .round()
            .max(Decimal::ONE)
    }
}

/// Keeps prices unchanged.
pub struct FlatPrice;

impl PriceModel for FlatPrice {
    fn next_price(&mut self, current: Decimal) -> Decimal {
        current
    }
}
