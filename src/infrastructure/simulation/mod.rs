pub mod loss_model;
pub mod price_model;

pub use loss_model::{DeterministicDecayLoss, LossModel, NoisyDecayLoss};
pub use price_model::{FlatPrice, PriceModel, RandomWalkPrice};
