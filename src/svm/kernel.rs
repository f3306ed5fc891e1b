use crate::error::{CrackError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelFamily {
    Polynomial,
    Rbf,
}

impl KernelFamily {
    /// Short tag used in model identifiers.
    pub fn tag(self) -> &'static str {
        match self {
            KernelFamily::Polynomial => "POLY",
            KernelFamily::Rbf => "RBF",
        }
    }
}

impl fmt::Display for KernelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kernel family together with exactly the parameters it uses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Kernel {
    Polynomial { gamma: f64, degree: u32, coef0: f64 },
    Rbf { gamma: f64 },
}

impl Kernel {
    pub fn family(&self) -> KernelFamily {
        match self {
            Kernel::Polynomial { .. } => KernelFamily::Polynomial,
            Kernel::Rbf { .. } => KernelFamily::Rbf,
        }
    }

    pub fn gamma(&self) -> f64 {
        match *self {
            Kernel::Polynomial { gamma, .. } | Kernel::Rbf { gamma } => gamma,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let gamma = self.gamma();
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(CrackError::config(format!(
                "kernel gamma must be positive, got {gamma}"
            )));
        }
        if let Kernel::Polynomial { degree, coef0, .. } = *self {
            if degree == 0 {
                return Err(CrackError::config("polynomial degree must be at least 1"));
            }
            if !coef0.is_finite() {
                return Err(CrackError::config("polynomial coef0 must be finite"));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn eval(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        match *self {
            Kernel::Polynomial {
                gamma,
                degree,
                coef0,
            } => (gamma * a.0.dot(&b.0) + coef0).powi(degree as i32),
            Kernel::Rbf { gamma } => (-gamma * (a.0 - b.0).norm_squared()).exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_values() {
        let a = FeatureVector::new([1.0, 2.0, 0.0, 0.0, 0.0]);
        let b = FeatureVector::new([3.0, -1.0, 0.0, 0.0, 1.0]);
        let poly = Kernel::Polynomial {
            gamma: 0.5,
            degree: 2,
            coef0: 1.0,
        };
        // dot = 1 → (0.5 + 1)^2
        assert!((poly.eval(&a, &b) - 2.25).abs() < 1e-12);
        let rbf = Kernel::Rbf { gamma: 0.1 };
        // |a-b|^2 = 4 + 9 + 1 = 14
        assert!((rbf.eval(&a, &b) - (-1.4f64).exp()).abs() < 1e-12);
        assert_eq!(rbf.eval(&a, &a), 1.0);
    }

    #[test]
    fn invalid_parameters() {
        assert!(Kernel::Rbf { gamma: 0.0 }.validate().is_err());
        assert!(Kernel::Polynomial {
            gamma: 1.0,
            degree: 0,
            coef0: 0.0
        }
        .validate()
        .is_err());
        assert!(Kernel::Rbf { gamma: 0.5 }.validate().is_ok());
    }

    #[test]
    fn serde_tagging() {
        let k = Kernel::Polynomial {
            gamma: 2.0,
            degree: 3,
            coef0: 0.25,
        };
        let json = serde_json::to_string(&k).unwrap();
        assert!(json.contains("\"type\":\"polynomial\""));
        let back: Kernel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
    }
}
