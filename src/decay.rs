use crate::error::ConfigError;

/// An implementation of a time-varying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

fn validate(rate: f64, vi: f64, vf: f64) -> Result<(), ConfigError> {
    if !(rate.is_finite() && rate >= 0.0) {
        return Err(ConfigError::Schedule("rate must be finite and non-negative"));
    }
    if !(vi.is_finite() && vf.is_finite()) {
        return Err(ConfigError::Schedule("start and end values must be finite"));
    }
    Ok(())
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
///
/// Moves from v<sub>i</sub> toward v<sub>f</sub> in either direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Exponential {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self, ConfigError> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t).exp()
    }
}

/// v(t) = v<sub>i</sub> ± rt, stopping at v<sub>f</sub>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Linear {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self, ConfigError> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        if vi >= vf {
            (vi - rate * t).max(vf)
        } else {
            (vi + rate * t).min(vf)
        }
    }
}

/// One of the available schedules, chosen at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    Constant(Constant),
    Exponential(Exponential),
    Linear(Linear),
}

impl Default for Schedule {
    fn default() -> Self {
        Self::Constant(Constant::new(0.9))
    }
}

impl Decay for Schedule {
    fn evaluate(&self, t: f64) -> f64 {
        match self {
            Self::Constant(d) => d.evaluate(t),
            Self::Exponential(d) => d.evaluate(t),
            Self::Linear(d) => d.evaluate(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_functional() {
        assert!(validate(1.0, 1.0, 0.0).is_ok());
        assert!(validate(1.0, 0.0, 1.0).is_ok());
        assert!(validate(0.0, 0.5, 0.5).is_ok());
        assert!(validate(-1.0, 1.0, 0.0).is_err());
        assert!(validate(f64::INFINITY, 1.0, 0.0).is_err());
        assert!(validate(1.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn constant_decay() {
        let x = Constant::new(1.0);
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 1.0);
    }

    #[test]
    fn exponential_decay() {
        let x = Exponential::new(2.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 0.5 + 1.5 * f64::exp(-2.0));
    }

    #[test]
    fn exponential_growth_toward_end() {
        let x = Exponential::new(1.0, 0.5, 1.0).unwrap();
        assert_eq!(x.evaluate(0.0), 0.5);
        assert!(x.evaluate(1.0) > 0.5);
        assert!((x.evaluate(100.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(0.5, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.5);
        assert_eq!(x.evaluate(10.0), 0.5);
    }

    #[test]
    fn linear_growth() {
        let x = Linear::new(0.25, 0.5, 1.0).unwrap();
        assert_eq!(x.evaluate(1.0), 0.75);
        assert_eq!(x.evaluate(10.0), 1.0);
    }

    #[test]
    fn schedule_dispatch() {
        assert_eq!(Schedule::default().evaluate(1000.0), 0.9);
        let s = Schedule::Linear(Linear::new(0.5, 2.0, 0.5).unwrap());
        assert_eq!(s.evaluate(1.0), 1.5);
    }
}
