use super::kernel::Kernel;
use super::solver::{self, SolverParams};
use crate::dataset::CrackClass;
use crate::error::{CrackError, Result};
use crate::features::FeatureVector;
use log::{debug, warn};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Fitted two-class SVM: `f(x) = Σ coefᵢ·K(svᵢ, x) − rho`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvmModel {
    pub kernel: Kernel,
    pub c: f64,
    pub support_vectors: Vec<FeatureVector>,
    /// `yᵢ·αᵢ` per support vector.
    pub dual_coef: Vec<f64>,
    pub rho: f64,
    #[serde(default)]
    pub iterations: usize,
    #[serde(default)]
    pub converged: bool,
}

#[inline]
fn signed_label(class: CrackClass) -> f64 {
    match class {
        CrackClass::Shrinkage => -1.0,
        CrackClass::Thermal => 1.0,
    }
}

impl SvmModel {
    /// Fit on `features` with matching `classes`.
    pub fn train(
        features: &[FeatureVector],
        classes: &[CrackClass],
        kernel: Kernel,
        c: f64,
        params: &SolverParams,
    ) -> Result<Self> {
        if features.is_empty() {
            return Err(CrackError::insufficient("cannot train on an empty set"));
        }
        if features.len() != classes.len() {
            return Err(CrackError::config(format!(
                "{} feature vectors but {} labels",
                features.len(),
                classes.len()
            )));
        }
        if !(c.is_finite() && c > 0.0) {
            return Err(CrackError::config(format!("cost must be positive, got {c}")));
        }
        kernel.validate()?;

        let n = features.len();
        let gram = DMatrix::from_fn(n, n, |i, j| kernel.eval(&features[i], &features[j]));
        let y: Vec<f64> = classes.iter().copied().map(signed_label).collect();
        let sol = solver::solve(&gram, &y, c, params);
        if !sol.converged {
            debug!(
                "smo stopped at iteration cap {} ({:?}, C={c})",
                sol.iterations, kernel
            );
        }

        let mut support_vectors = Vec::new();
        let mut dual_coef = Vec::new();
        for (t, &a) in sol.alpha.iter().enumerate() {
            if a > 0.0 {
                support_vectors.push(features[t]);
                dual_coef.push(a * y[t]);
            }
        }
        if !sol.rho.is_finite() {
            warn!("non-finite bias after training ({kernel:?}, C={c})");
        }
        Ok(Self {
            kernel,
            c,
            support_vectors,
            dual_coef,
            rho: sol.rho,
            iterations: sol.iterations,
            converged: sol.converged,
        })
    }

    pub fn decision(&self, x: &FeatureVector) -> f64 {
        self.support_vectors
            .iter()
            .zip(&self.dual_coef)
            .map(|(sv, coef)| coef * self.kernel.eval(sv, x))
            .sum::<f64>()
            - self.rho
    }

    /// Raw label: 1 (thermal) when the decision is positive, else 0.
    pub fn predict(&self, x: &FeatureVector) -> i32 {
        if self.decision(x) > 0.0 {
            1
        } else {
            0
        }
    }

    pub fn predict_class(&self, x: &FeatureVector) -> CrackClass {
        CrackClass::from_raw(self.predict(x))
    }

    /// Structural checks for a deserialised model.
    pub fn validate(&self) -> Result<()> {
        self.kernel.validate()?;
        if self.support_vectors.len() != self.dual_coef.len() {
            return Err(CrackError::config(format!(
                "{} support vectors but {} coefficients",
                self.support_vectors.len(),
                self.dual_coef.len()
            )));
        }
        let finite = self.rho.is_finite()
            && self.dual_coef.iter().all(|v| v.is_finite())
            && self.support_vectors.iter().all(FeatureVector::is_finite);
        if !finite {
            return Err(CrackError::config("model contains non-finite values"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(a: f64, b: f64) -> FeatureVector {
        FeatureVector::new([a, b, 0.0, 0.0, 0.0])
    }

    fn blobs() -> (Vec<FeatureVector>, Vec<CrackClass>) {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for i in 0..10 {
            let d = i as f64 * 0.1;
            xs.push(fv(-1.5 + d, -1.0 + 0.5 * d));
            ys.push(CrackClass::Shrinkage);
            xs.push(fv(1.5 - d, 1.0 - 0.5 * d));
            ys.push(CrackClass::Thermal);
        }
        (xs, ys)
    }

    #[test]
    fn rbf_separates_blobs() {
        let (xs, ys) = blobs();
        let m = SvmModel::train(
            &xs,
            &ys,
            Kernel::Rbf { gamma: 0.5 },
            1.0,
            &SolverParams::default(),
        )
        .unwrap();
        for (x, y) in xs.iter().zip(&ys) {
            assert_eq!(m.predict_class(x), *y);
        }
        assert!(!m.support_vectors.is_empty());
        m.validate().unwrap();
    }

    #[test]
    fn polynomial_separates_blobs() {
        let (xs, ys) = blobs();
        let kernel = Kernel::Polynomial {
            gamma: 1.0,
            degree: 1,
            coef0: 0.0,
        };
        let m = SvmModel::train(&xs, &ys, kernel, 0.5, &SolverParams::default()).unwrap();
        assert_eq!(m.predict(&fv(-2.0, -2.0)), 0);
        assert_eq!(m.predict(&fv(2.0, 2.0)), 1);
    }

    #[test]
    fn single_class_training_predicts_that_class() {
        let xs = vec![fv(0.0, 0.0), fv(1.0, 0.0)];
        let ys = vec![CrackClass::Shrinkage; 2];
        let m = SvmModel::train(&xs, &ys, Kernel::Rbf { gamma: 1.0 }, 1.0, &Default::default())
            .unwrap();
        assert_eq!(m.predict(&fv(5.0, 5.0)), 0);
        assert_eq!(m.predict(&fv(0.0, 0.0)), 0);
    }

    #[test]
    fn rejects_bad_input() {
        let k = Kernel::Rbf { gamma: 1.0 };
        let p = SolverParams::default();
        assert!(SvmModel::train(&[], &[], k, 1.0, &p)
            .unwrap_err()
            .is_insufficient_data());
        assert!(SvmModel::train(&[fv(0.0, 0.0)], &[], k, 1.0, &p).is_err());
        assert!(SvmModel::train(&[fv(0.0, 0.0)], &[CrackClass::Thermal], k, 0.0, &p).is_err());
    }

    #[test]
    fn json_round_trip_keeps_decisions() {
        let (xs, ys) = blobs();
        let m = SvmModel::train(&xs, &ys, Kernel::Rbf { gamma: 0.1 }, 0.75, &Default::default())
            .unwrap();
        let back: SvmModel = serde_json::from_str(&serde_json::to_string(&m).unwrap()).unwrap();
        for x in &xs {
            assert!((back.decision(x) - m.decision(x)).abs() < 1e-9);
        }
    }
}
