use std::ops::Index;

use crate::error::{Error, Result};

/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

fn validate(rate: f64, vi: f64, vf: f64) -> Result<()> {
    ((rate >= 0.0 && vi > vf) || (rate < 0.0 && vi < vf))
        .then_some(())
        .ok_or(Error::InvalidParameter {
            name: "rate",
            value: rate,
            reason: "`vi - vf` must have same sign as `rate`",
        })
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
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Exponential {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
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

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) / (1 + rt)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InverseTime {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl InverseTime {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for InverseTime {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) / (1.0 + rate * t)
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Linear {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        (vi - rate * t).max(vf)
    }
}

/// A hyperparameter value for every episode of a training run
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    values: Vec<f64>,
}

impl Schedule {
    /// The same `value` for each of `episodes` episodes
    pub fn constant(value: f64, episodes: usize) -> Self {
        Self {
            values: vec![value; episodes],
        }
    }

    /// `episodes` evenly spaced values from `start` to `end`, both included
    pub fn linspace(start: f64, end: f64, episodes: usize) -> Self {
        let step = match episodes {
            0 | 1 => 0.0,
            n => (end - start) / (n - 1) as f64,
        };
        let mut values: Vec<f64> = (0..episodes).map(|i| start + step * i as f64).collect();
        if let Some(last) = values.last_mut().filter(|_| episodes > 1) {
            *last = end;
        }
        Self { values }
    }

    /// Sample `decay` at each episode index
    pub fn from_decay(decay: &impl Decay, episodes: usize) -> Self {
        Self {
            values: (0..episodes).map(|i| decay.evaluate(i as f64)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, episode: usize) -> Option<f64> {
        self.values.get(episode).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Check that the schedule covers `episodes` episodes with every value in `[lo, hi]`
    pub(crate) fn validate(&self, name: &'static str, episodes: usize, lo: f64, hi: f64) -> Result<()> {
        if self.len() != episodes {
            return Err(Error::ScheduleLength {
                name,
                expected: episodes,
                found: self.len(),
            });
        }
        match self.values.iter().find(|v| !(lo..=hi).contains(*v)) {
            Some(&value) => Err(Error::InvalidParameter {
                name,
                value,
                reason: "schedule value out of range",
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<f64>> for Schedule {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Index<usize> for Schedule {
    type Output = f64;

    fn index(&self, episode: usize) -> &Self::Output {
        &self.values[episode]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_functional() {
        assert!(validate(1.0, 1.0, 0.0).is_ok());
        assert!(validate(1.0, -1.0, 0.0).is_err());
        assert!(validate(-1.0, 1.0, 0.0).is_err());
        assert!(validate(-1.0, -1.0, 0.0).is_ok());
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
    fn inverse_time_decay() {
        let x = InverseTime::new(2.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.0);
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(0.5, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.5);
        assert_eq!(x.evaluate(10.0), 0.5);
    }

    #[test]
    fn linspace_schedule() {
        let s = Schedule::linspace(0.8, 0.0, 5);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0], 0.8);
        assert!((s[2] - 0.4).abs() < 1e-15);
        assert_eq!(s[4], 0.0, "End point included");

        assert_eq!(Schedule::linspace(0.3, 0.0, 1).as_slice(), &[0.3]);
        assert!(Schedule::linspace(0.3, 0.0, 0).is_empty());
    }

    #[test]
    fn schedule_from_decay() {
        let s = Schedule::from_decay(&Linear::new(0.25, 1.0, 0.5).unwrap(), 4);
        assert_eq!(s.as_slice(), &[1.0, 0.75, 0.5, 0.5]);
        assert_eq!(Schedule::constant(0.8, 3), Schedule::from(vec![0.8; 3]));
    }

    #[test]
    fn schedule_validation() {
        let s = Schedule::from(vec![0.5, 1.2]);
        assert!(matches!(
            s.validate("alpha", 3, 0.0, 1.0),
            Err(Error::ScheduleLength { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            s.validate("alpha", 2, 0.0, 1.0),
            Err(Error::InvalidParameter { value, .. }) if value == 1.2
        ));
        assert!(s.validate("epsilon", 2, 0.0, f64::INFINITY).is_ok());
    }
}
