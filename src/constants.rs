use std::f64::consts::PI;

pub const FOUR_PI: f64 = 4.0 * PI;
pub const SQRT_FOUR_PI: f64 = 3.5449077018110318;

// eigenvalue differences are never smaller than this value in the
// denominator of the Kubo-Greenwood expression
pub const EIG_DIFF_FLOOR: f64 = 1.0e-6;

// smallest point of the (square root of the) frequency grid
pub const OMEGA_0: f64 = 1.0e-5;

// additional Gauss-Legendre nodes on top of the polynomial degree of the
// angular integrands
pub const GAUSS_LEGENDRE_EXTRA_NODES: usize = 4;
pub const GAUSS_LEGENDRE_EPS: f64 = 1.0e-15;
pub const GAUSS_LEGENDRE_MAX_ITER: usize = 100;
