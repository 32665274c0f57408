use crate::constants::EIG_DIFF_FLOOR;
use crate::types::OrbitalSubset;
use ndarray::prelude::*;
use ndarray::Zip;

/// Occupation differences f(l2,n2) - f(l1,n1) of the first spin channel for
/// all dipole-allowed pairs of the two subsets. Negative differences are
/// set to zero, so that every transition is counted in one direction only.
pub fn calc_occ_diff_mat(
    occnums: ArrayView4<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Array5<f64> {
    let (n_bands, _, lmax, nmax) = occnums.dim();
    let mut occ_diff: Array5<f64> = Array5::zeros((n_bands, lmax, nmax, lmax, nmax));

    Zip::from(occ_diff.axis_iter_mut(Axis(0)))
        .and(occnums.axis_iter(Axis(0)))
        .for_each(|mut diff_k, occ_k| {
            for &(l1, n1) in orb_subset_1.iter() {
                for &(l2, n2) in orb_subset_2.iter() {
                    if (l1 as i64 - l2 as i64).abs() != 1 {
                        continue;
                    }
                    let diff: f64 = occ_k[[0, l2, n2]] - occ_k[[0, l1, n1]];
                    if diff >= 0.0 {
                        diff_k[[l1, n1, l2, n2]] = diff;
                    }
                }
            }
        });
    occ_diff
}

/// Eigenvalue differences e(l1,n1) - e(l2,n2) of the first spin channel.
/// Only positive differences of dipole-allowed pairs are kept, all other
/// elements hold a small positive floor so that they can always be used
/// as a denominator.
pub fn calc_eig_diff_mat(
    eigvals: ArrayView4<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Array5<f64> {
    let (n_bands, _, lmax, nmax) = eigvals.dim();
    let mut eig_diff: Array5<f64> =
        Array5::from_elem((n_bands, lmax, nmax, lmax, nmax), EIG_DIFF_FLOOR);

    Zip::from(eig_diff.axis_iter_mut(Axis(0)))
        .and(eigvals.axis_iter(Axis(0)))
        .for_each(|mut diff_k, eig_k| {
            for &(l1, n1) in orb_subset_1.iter() {
                for &(l2, n2) in orb_subset_2.iter() {
                    if (l1 as i64 - l2 as i64).abs() != 1 {
                        continue;
                    }
                    let diff: f64 = eig_k[[0, l1, n1]] - eig_k[[0, l2, n2]];
                    if diff > 0.0 {
                        diff_k[[l1, n1, l2, n2]] = diff;
                    }
                }
            }
        });
    eig_diff
}
