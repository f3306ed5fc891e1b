use crate::error::{CrackError, Result};
use crate::svm::{Kernel, KernelFamily};
use serde::{Deserialize, Serialize};

/// Cartesian hyperparameter grid.
///
/// Enumeration order is kernel family (as listed), cost, gamma, then degree
/// and coef0 for the polynomial family. Selection ties are broken by this
/// order, so it is part of the observable behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamGrid {
    pub kernels: Vec<KernelFamily>,
    pub cost: Vec<f64>,
    pub gamma: Vec<f64>,
    pub degree: Vec<u32>,
    pub coef0: Vec<f64>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            kernels: vec![KernelFamily::Polynomial, KernelFamily::Rbf],
            cost: vec![0.1, 0.25, 0.5, 0.75, 1.0],
            gamma: vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0],
            degree: vec![1, 2, 3, 4, 5],
            coef0: vec![0.0, 0.25, 0.4, 0.5],
        }
    }
}

/// One point of the grid: a kernel with its own parameters plus the cost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HyperparameterCandidate {
    pub kernel: Kernel,
    pub cost: f64,
}

impl HyperparameterCandidate {
    pub fn new(kernel: Kernel, cost: f64) -> Self {
        Self { kernel, cost }
    }

    /// Identifier naming the persisted model, e.g.
    /// `best_model_RBF_C0.500000_G0.100000`.
    pub fn model_id(&self) -> String {
        match self.kernel {
            Kernel::Polynomial {
                gamma,
                degree,
                coef0,
            } => format!(
                "best_model_POLY_C{:.6}_D{}_CO{:.6}_G{:.6}",
                self.cost, degree, coef0, gamma
            ),
            Kernel::Rbf { gamma } => format!("best_model_RBF_C{:.6}_G{:.6}", self.cost, gamma),
        }
    }
}

impl ParamGrid {
    /// Grid with a single candidate.
    pub fn single(candidate: HyperparameterCandidate) -> Self {
        let (kernel, gamma, degree, coef0) = match candidate.kernel {
            Kernel::Polynomial {
                gamma,
                degree,
                coef0,
            } => (KernelFamily::Polynomial, gamma, degree, coef0),
            Kernel::Rbf { gamma } => (KernelFamily::Rbf, gamma, 1, 0.0),
        };
        Self {
            kernels: vec![kernel],
            cost: vec![candidate.cost],
            gamma: vec![gamma],
            degree: vec![degree],
            coef0: vec![coef0],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kernels.is_empty() {
            return Err(CrackError::config("grid lists no kernel family"));
        }
        if self.cost.is_empty() || self.gamma.is_empty() {
            return Err(CrackError::config("grid needs at least one cost and one gamma"));
        }
        if self.kernels.contains(&KernelFamily::Polynomial)
            && (self.degree.is_empty() || self.coef0.is_empty())
        {
            return Err(CrackError::config(
                "polynomial grid needs at least one degree and one coef0",
            ));
        }
        if let Some(c) = self.cost.iter().find(|c| !(c.is_finite() && **c > 0.0)) {
            return Err(CrackError::config(format!("grid cost {c} is not positive")));
        }
        self.candidates()
            .iter()
            .try_for_each(|cand| cand.kernel.validate())
    }

    pub fn len(&self) -> usize {
        self.kernels
            .iter()
            .map(|family| {
                let per_gamma = match family {
                    KernelFamily::Polynomial => self.degree.len() * self.coef0.len(),
                    KernelFamily::Rbf => 1,
                };
                self.cost.len() * self.gamma.len() * per_gamma
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All candidates in selection order.
    pub fn candidates(&self) -> Vec<HyperparameterCandidate> {
        let mut out = Vec::with_capacity(self.len());
        for &family in &self.kernels {
            for &cost in &self.cost {
                for &gamma in &self.gamma {
                    match family {
                        KernelFamily::Polynomial => {
                            for &degree in &self.degree {
                                for &coef0 in &self.coef0 {
                                    out.push(HyperparameterCandidate::new(
                                        Kernel::Polynomial {
                                            gamma,
                                            degree,
                                            coef0,
                                        },
                                        cost,
                                    ));
                                }
                            }
                        }
                        KernelFamily::Rbf => {
                            out.push(HyperparameterCandidate::new(Kernel::Rbf { gamma }, cost));
                        }
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_size_and_order() {
        let grid = ParamGrid::default();
        let cands = grid.candidates();
        // 5 costs x 7 gammas x (5 degrees x 4 offsets + 1)
        assert_eq!(cands.len(), 5 * 7 * 20 + 5 * 7);
        assert_eq!(cands.len(), grid.len());
        assert_eq!(
            cands[0],
            HyperparameterCandidate::new(
                Kernel::Polynomial {
                    gamma: 0.001,
                    degree: 1,
                    coef0: 0.0
                },
                0.1
            )
        );
        // coef0 varies fastest, then degree
        assert_eq!(
            cands[1].kernel,
            Kernel::Polynomial {
                gamma: 0.001,
                degree: 1,
                coef0: 0.25
            }
        );
        assert_eq!(
            cands[4].kernel,
            Kernel::Polynomial {
                gamma: 0.001,
                degree: 2,
                coef0: 0.0
            }
        );
        let first_rbf = cands
            .iter()
            .position(|c| c.kernel.family() == KernelFamily::Rbf)
            .unwrap();
        assert_eq!(first_rbf, 700);
        assert_eq!(cands[701].kernel, Kernel::Rbf { gamma: 0.01 });
        grid.validate().unwrap();
    }

    #[test]
    fn model_ids_encode_parameters() {
        let poly = HyperparameterCandidate::new(
            Kernel::Polynomial {
                gamma: 0.5,
                degree: 3,
                coef0: 0.25,
            },
            0.75,
        );
        assert_eq!(
            poly.model_id(),
            "best_model_POLY_C0.750000_D3_CO0.250000_G0.500000"
        );
        let rbf = HyperparameterCandidate::new(Kernel::Rbf { gamma: 2.0 }, 1.0);
        assert_eq!(rbf.model_id(), "best_model_RBF_C1.000000_G2.000000");
    }

    #[test]
    fn invalid_grids_are_config_errors() {
        let mut grid = ParamGrid::default();
        grid.cost.clear();
        assert!(matches!(grid.validate(), Err(CrackError::Config { .. })));

        let mut grid = ParamGrid::default();
        grid.gamma.push(-1.0);
        assert!(grid.validate().is_err());

        let grid = ParamGrid {
            kernels: vec![KernelFamily::Rbf],
            degree: Vec::new(),
            ..ParamGrid::default()
        };
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn single_candidate_grid() {
        let cand = HyperparameterCandidate::new(Kernel::Rbf { gamma: 0.1 }, 0.5);
        let grid = ParamGrid::single(cand);
        assert_eq!(grid.candidates(), vec![cand]);
    }
}
