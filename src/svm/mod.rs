//! Two-class C-support-vector classifier.
//!
//! - [`kernel`]: polynomial `(γ·xᵀy + c₀)^d` and radial-basis
//!   `exp(-γ‖x − y‖²)` kernels as a tagged variant.
//! - [`solver`]: SMO on the dual with second-order working-set selection and
//!   a maximum-iteration / KKT-gap termination criterion.
//! - [`model`]: the fitted classifier (support vectors, dual coefficients,
//!   bias), its decision function and JSON persistence.
//!
//! Shrinkage samples are the negative class and thermal samples the positive
//! class; a decision value of exactly zero predicts shrinkage.

pub mod kernel;
pub mod model;
pub mod solver;

pub use kernel::{Kernel, KernelFamily};
pub use model::SvmModel;
pub use solver::SolverParams;
