use crate::domain::ml::training::LOSS_FLOOR;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Trait defining a simulated training loss curve.
pub trait LossModel: Send {
    /// Loss reported after `epoch` of `epochs` (1-based).
    fn next_loss(&mut self, epoch: u32, epochs: u32) -> f64;
}

/// Linear decay toward [`LOSS_FLOOR`] with uniform noise in `[0, noise)`.
///
/// `loss = max(floor, 1 - epoch / epochs + U[0, noise))`
#[derive(Debug, Clone)]
pub struct NoisyDecayLoss {
    noise: f64,
    rng: StdRng,
}

impl NoisyDecayLoss {
    pub const DEFAULT_NOISE: f64 = 0.1;

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            noise: Self::DEFAULT_NOISE,
            rng,
        }
    }
}

impl LossModel for NoisyDecayLoss {
    fn next_loss(&mut self, epoch: u32, epochs: u32) -> f64 {
        let perturbation = if self.noise > 0.0 {
            self.rng.random_range(0.0..self.noise)
        } else {
            0.0
        };
        decay(epoch, epochs, perturbation)
    }
}

/// Noise-free curve for tests or pure logic verification.
pub struct DeterministicDecayLoss;

impl LossModel for DeterministicDecayLoss {
    fn next_loss(&mut self, epoch: u32, epochs: u32) -> f64 {
        decay(epoch, epochs, 0.0)
    }
}

fn decay(epoch: u32, epochs: u32, perturbation: f64) -> f64 {
    let ratio = if epochs == 0 {
        1.0
    } else {
        f64::from(epoch) / f64::from(epochs)
    };
    (1.0 - ratio + perturbation).max(LOSS_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noisy_loss_stays_within_band() {
        let mut model = NoisyDecayLoss::new(Some(7));
        let epochs = 25;
        for epoch in 1..=epochs {
            let loss = model.next_loss(epoch, epochs);
            let base = 1.0 - f64::from(epoch) / f64::from(epochs);
            assert!(loss >= LOSS_FLOOR, "loss {} below floor", loss);
            assert!(
                loss < (base + NoisyDecayLoss::DEFAULT_NOISE).max(LOSS_FLOOR) + 1e-12,
                "loss {} above band at epoch {}",
                loss,
                epoch
            );
        }
    }

    #[test]
    fn test_seeded_models_repeat() {
        let mut a = NoisyDecayLoss::new(Some(42));
        let mut b = NoisyDecayLoss::new(Some(42));
        for epoch in 1..=10 {
            assert_eq!(a.next_loss(epoch, 10), b.next_loss(epoch, 10));
        }
    }

    #[test]
    fn test_deterministic_curve_trends_to_floor() {
        let mut model = DeterministicDecayLoss;
        assert_eq!(model.next_loss(1, 5), 0.8);
        assert!((model.next_loss(4, 5) - 0.2).abs() < 1e-12);
        assert_eq!(model.next_loss(5, 5), LOSS_FLOOR);
    }
}
