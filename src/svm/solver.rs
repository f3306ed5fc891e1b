//! Sequential minimal optimisation for the C-SVC dual
//!
//! ```text
//! min ½ αᵀQα − eᵀα   s.t.  yᵀα = 0,  0 ≤ αᵢ ≤ C,   Qᵢⱼ = yᵢyⱼK(xᵢ, xⱼ)
//! ```
//!
//! Working pairs are chosen by second-order selection: `i` maximises the
//! violation in the "up" set and `j` minimises the second-order decrease of
//! the objective. Iteration stops once the maximal KKT violation drops below
//! `eps` or after `max_iter` pair updates, whichever comes first.
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Floor for non-positive curvature along a working pair.
const TAU: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub max_iter: usize,
    pub eps: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            eps: 1e-6,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DualSolution {
    pub alpha: Vec<f64>,
    pub rho: f64,
    pub iterations: usize,
    pub converged: bool,
}

struct Smo<'a> {
    k: &'a DMatrix<f64>,
    y: &'a [f64],
    c: f64,
    alpha: Vec<f64>,
    grad: Vec<f64>,
}

impl<'a> Smo<'a> {
    #[inline]
    fn q(&self, i: usize, j: usize) -> f64 {
        self.y[i] * self.y[j] * self.k[(i, j)]
    }

    #[inline]
    fn in_up(&self, t: usize) -> bool {
        if self.y[t] > 0.0 {
            self.alpha[t] < self.c
        } else {
            self.alpha[t] > 0.0
        }
    }

    #[inline]
    fn in_low(&self, t: usize) -> bool {
        if self.y[t] > 0.0 {
            self.alpha[t] > 0.0
        } else {
            self.alpha[t] < self.c
        }
    }

    fn select_pair(&self, eps: f64) -> Option<(usize, usize)> {
        let n = self.y.len();
        let mut gmax = f64::NEG_INFINITY;
        let mut best_i = None;
        for t in 0..n {
            if self.in_up(t) {
                let v = -self.y[t] * self.grad[t];
                if v >= gmax {
                    gmax = v;
                    best_i = Some(t);
                }
            }
        }
        let i = best_i?;

        let mut gmax2 = f64::NEG_INFINITY;
        let mut obj_min = f64::INFINITY;
        let mut best_j = None;
        for t in 0..n {
            if !self.in_low(t) {
                continue;
            }
            let v = self.y[t] * self.grad[t];
            if v >= gmax2 {
                gmax2 = v;
            }
            let grad_diff = gmax + v;
            if grad_diff > 0.0 {
                let quad = self.k[(i, i)] + self.k[(t, t)] - 2.0 * self.k[(i, t)];
                let obj = -(grad_diff * grad_diff) / if quad > 0.0 { quad } else { TAU };
                if obj <= obj_min {
                    obj_min = obj;
                    best_j = Some(t);
                }
            }
        }

        if gmax + gmax2 < eps {
            return None;
        }
        best_j.map(|j| (i, j))
    }

    fn update_pair(&mut self, i: usize, j: usize) {
        let c = self.c;
        let (old_ai, old_aj) = (self.alpha[i], self.alpha[j]);
        let (mut ai, mut aj) = (old_ai, old_aj);
        let kii = self.k[(i, i)];
        let kjj = self.k[(j, j)];
        let qij = self.q(i, j);

        if self.y[i] != self.y[j] {
            let mut quad = kii + kjj + 2.0 * qij;
            if quad <= 0.0 {
                quad = TAU;
            }
            let delta = (-self.grad[i] - self.grad[j]) / quad;
            let diff = ai - aj;
            ai += delta;
            aj += delta;
            if diff > 0.0 {
                if aj < 0.0 {
                    aj = 0.0;
                    ai = diff;
                }
            } else if ai < 0.0 {
                ai = 0.0;
                aj = -diff;
            }
            if diff > 0.0 {
                if ai > c {
                    ai = c;
                    aj = c - diff;
                }
            } else if aj > c {
                aj = c;
                ai = c + diff;
            }
        } else {
            let mut quad = kii + kjj - 2.0 * qij;
            if quad <= 0.0 {
                quad = TAU;
            }
            let delta = (self.grad[i] - self.grad[j]) / quad;
            let sum = ai + aj;
            ai -= delta;
            aj += delta;
            if sum > c {
                if ai > c {
                    ai = c;
                    aj = sum - c;
                }
            } else if aj < 0.0 {
                aj = 0.0;
                ai = sum;
            }
            if sum > c {
                if aj > c {
                    aj = c;
                    ai = sum - c;
                }
            } else if ai < 0.0 {
                ai = 0.0;
                aj = sum;
            }
        }

        self.alpha[i] = ai;
        self.alpha[j] = aj;
        let d_ai = ai - old_ai;
        let d_aj = aj - old_aj;
        for t in 0..self.y.len() {
            self.grad[t] += self.q(i, t) * d_ai + self.q(j, t) * d_aj;
        }
    }

    /// Bias from free vectors, or the midpoint of the feasible interval.
    fn rho(&self) -> f64 {
        let mut ub = f64::INFINITY;
        let mut lb = f64::NEG_INFINITY;
        let mut free_sum = 0.0;
        let mut free_count = 0usize;
        for t in 0..self.y.len() {
            let yg = self.y[t] * self.grad[t];
            let at_upper = self.alpha[t] >= self.c;
            let at_lower = self.alpha[t] <= 0.0;
            if at_upper {
                if self.y[t] < 0.0 {
                    ub = ub.min(yg);
                } else {
                    lb = lb.max(yg);
                }
            } else if at_lower {
                if self.y[t] > 0.0 {
                    ub = ub.min(yg);
                } else {
                    lb = lb.max(yg);
                }
            } else {
                free_count += 1;
                free_sum += yg;
            }
        }
        if free_count > 0 {
            free_sum / free_count as f64
        } else if ub.is_finite() && lb.is_finite() {
            (ub + lb) / 2.0
        } else if ub.is_finite() {
            ub
        } else if lb.is_finite() {
            lb
        } else {
            0.0
        }
    }
}

/// Solve the dual for a precomputed kernel matrix `k` and labels `y ∈ {−1, +1}`.
pub(crate) fn solve(k: &DMatrix<f64>, y: &[f64], c: f64, params: &SolverParams) -> DualSolution {
    let n = y.len();
    let mut smo = Smo {
        k,
        y,
        c,
        alpha: vec![0.0; n],
        grad: vec![-1.0; n],
    };
    let mut iterations = 0;
    let mut converged = false;
    while iterations < params.max_iter {
        match smo.select_pair(params.eps) {
            Some((i, j)) => {
                smo.update_pair(i, j);
                iterations += 1;
            }
            None => {
                converged = true;
                break;
            }
        }
    }
    let rho = smo.rho();
    DualSolution {
        alpha: smo.alpha,
        rho,
        iterations,
        converged,
    }
}
