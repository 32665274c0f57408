use crate::constants::{EIG_DIFF_FLOOR, SQRT_FOUR_PI};
use crate::error::ConductivityError;
use crate::io::logging::print_sum_rule;
use crate::kubo::angular::{p_integral, AngularKind};
use crate::kubo::radial::{r1_integral, r2_integral};
use crate::types::{LogGrid, OrbitalSet, OrbitalSubset};
use log::{log_enabled, Level};
use ndarray::prelude::*;
use rayon::prelude::*;

/// Dipole matrix element <l1|grad|l2> for the magnetic quantum number m
/// without the 4 pi of the radial integrals. The orbitals are expected to be
/// scaled by sqrt(4 pi).
pub fn calc_mel_kgm(
    orb_1: ArrayView1<f64>,
    orb_2: ArrayView1<f64>,
    l1: usize,
    l2: usize,
    m: i64,
    xgrid: ArrayView1<f64>,
) -> f64 {
    let r1: f64 = r1_integral(orb_1, orb_2, xgrid);
    let r2: f64 = r2_integral(orb_1, orb_2, xgrid);
    r1 * p_integral(AngularKind::P2, l1, l2, m) + r2 * p_integral(AngularKind::P4, l1, l2, m)
}

/// Momentum sum rule of the orbital (l, n, m):
///
/// S = sum_(l1,n1) |<l n m|grad|l1 n1 m>|^2 / (e_l1n1 - e_ln)
///
/// over all other orbitals with |l1 - l| = 1, evaluated for every band with
/// the first spin channel. A complete set of orbitals gives S = 1/2.
pub fn check_sum_rule(
    orbitals: &OrbitalSet,
    grid: &LogGrid,
    all_orbs: &OrbitalSubset,
    l: usize,
    n: usize,
    m: i64,
) -> Result<Array1<f64>, ConductivityError> {
    if !all_orbs.contains(&(l, n)) {
        return Err(ConductivityError::InvalidOrbital { l, n });
    }
    let other_orbs: OrbitalSubset = all_orbs.difference(&OrbitalSubset::new(vec![(l, n)]));
    let eigfuncs: ArrayView5<f64> = orbitals.eigfuncs();
    let eigvals: ArrayView4<f64> = orbitals.eigvals();
    let xgrid: ArrayView1<f64> = grid.xgrid();

    let sum_mom: Vec<f64> = (0..orbitals.n_bands())
        .into_par_iter()
        .map(|k| {
            let orb_ln: Array1<f64> = &eigfuncs.slice(s![k, 0, l, n, ..]) * SQRT_FOUR_PI;
            let mut sum_k: f64 = 0.0;
            for &(l1, n1) in other_orbs.iter() {
                if (l1 as i64 - l as i64).abs() != 1 || m.abs() as usize > l1 {
                    continue;
                }
                let mut eig_diff: f64 = eigvals[[k, 0, l1, n1]] - eigvals[[k, 0, l, n]];
                if eig_diff.abs() < EIG_DIFF_FLOOR {
                    eig_diff = EIG_DIFF_FLOOR.copysign(eig_diff);
                }
                let orb_l1n1: Array1<f64> = &eigfuncs.slice(s![k, 0, l1, n1, ..]) * SQRT_FOUR_PI;
                let mel: f64 = calc_mel_kgm(orb_ln.view(), orb_l1n1.view(), l, l1, m, xgrid);
                let mel_cc: f64 = calc_mel_kgm(orb_l1n1.view(), orb_ln.view(), l1, l, m, xgrid);
                sum_k += (mel * mel_cc).abs() / eig_diff;
            }
            sum_k
        })
        .collect();
    let sum_mom: Array1<f64> = Array1::from(sum_mom);

    if log_enabled!(Level::Info) {
        print_sum_rule(l, n, m, sum_mom.view());
    }
    Ok(sum_mom)
}
