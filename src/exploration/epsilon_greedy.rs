use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with a time-varying threshold
///
/// Here epsilon is the probability of taking the greedy action: a uniform draw in `[0,1)`
/// above epsilon explores, anything else exploits.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Threshold for the given episode
    pub fn epsilon(&self, episode: u32) -> f64 {
        self.epsilon.evaluate(episode as f64)
    }

    /// Invoke epsilon greedy policy for current episode
    pub fn choose<R: Rng + ?Sized>(&self, episode: u32, rng: &mut R) -> Choice {
        if rng.gen::<f64>() > self.epsilon(episode) {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::{Constant, Linear};

    #[test]
    fn always_exploit_at_one() {
        let policy = EpsilonGreedy::new(Constant::new(1.0));
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| policy.choose(0, &mut rng) == Choice::Exploit));
    }

    #[test]
    fn always_explore_below_zero() {
        let policy = EpsilonGreedy::new(Constant::new(-0.1));
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..1000).all(|_| policy.choose(0, &mut rng) == Choice::Explore));
    }

    #[test]
    fn exploit_rate_follows_epsilon() {
        let policy = EpsilonGreedy::new(Constant::new(0.9));
        let mut rng = StdRng::seed_from_u64(42);
        let exploits = (0..10_000)
            .filter(|_| policy.choose(0, &mut rng) == Choice::Exploit)
            .count();
        assert!((8_700..9_300).contains(&exploits), "{exploits} exploits");
    }

    #[test]
    fn threshold_follows_schedule() {
        let policy = EpsilonGreedy::new(Linear::new(0.1, 0.5, 0.9).unwrap());
        assert_eq!(policy.epsilon(0), 0.5);
        assert!((policy.epsilon(2) - 0.7).abs() < 1e-12);
        assert_eq!(policy.epsilon(100), 0.9);
    }
}
