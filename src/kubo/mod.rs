pub mod angular;
mod conductivity;
mod matrix_elements;
mod occupations;
pub mod orthogonalization;
pub mod radial;
pub mod sum_rule;

pub use angular::{p_integral, p_mat_int, AngularKind};
pub use conductivity::{frequency_grid, lorentzian, sig_to_n, ConductivitySpectrum, KuboGreenwood};
pub use matrix_elements::calc_mel_sq_mat;
pub use occupations::{calc_eig_diff_mat, calc_occ_diff_mat};
pub use orthogonalization::{gs_ortho, orthonormalize};
pub use radial::{calc_r1_int_mat, calc_r2_int_mat};
pub use sum_rule::check_sum_rule;
