use ndarray::prelude::*;
use ndarray::Zip;

/// Squared dipole matrix elements
///
/// mel_sq[k, l1, n1, l2, n2] = sum_e |(R1[k,l1,n1,l2,n2] P2[l1,l2,e] + R2[k,l1,n1,l2,n2] P4[l1,l2,e])
///                                   * (R1[k,l2,n2,l1,n1] P2[l2,l1,e] + R2[k,l2,n2,l1,n1] P4[l2,l1,e])|
///
/// where e runs over the m offsets of the angular tensors. Only pairs with
/// |l1 - l2| = 1 can be nonzero, all other elements are skipped.
pub fn calc_mel_sq_mat(
    r1_mat: ArrayView5<f64>,
    r2_mat: ArrayView5<f64>,
    p2_mat: ArrayView3<f64>,
    p4_mat: ArrayView3<f64>,
) -> Array5<f64> {
    let (n_bands, lmax, nmax, _, _) = r1_mat.dim();
    let n_m: usize = p2_mat.dim().2;
    let mut mel_sq: Array5<f64> = Array5::zeros((n_bands, lmax, nmax, lmax, nmax));

    Zip::from(mel_sq.axis_iter_mut(Axis(0)))
        .and(r1_mat.axis_iter(Axis(0)))
        .and(r2_mat.axis_iter(Axis(0)))
        .par_for_each(|mut mel_k, r1_k, r2_k| {
            for l1 in 0..lmax {
                for l2 in 0..lmax {
                    if (l1 as i64 - l2 as i64).abs() != 1 {
                        continue;
                    }
                    for n1 in 0..nmax {
                        for n2 in 0..nmax {
                            let r1_fwd: f64 = r1_k[[l1, n1, l2, n2]];
                            let r2_fwd: f64 = r2_k[[l1, n1, l2, n2]];
                            let r1_bwd: f64 = r1_k[[l2, n2, l1, n1]];
                            let r2_bwd: f64 = r2_k[[l2, n2, l1, n1]];
                            let mut value: f64 = 0.0;
                            for e in 0..n_m {
                                let fwd: f64 =
                                    r1_fwd * p2_mat[[l1, l2, e]] + r2_fwd * p4_mat[[l1, l2, e]];
                                let bwd: f64 =
                                    r1_bwd * p2_mat[[l2, l1, e]] + r2_bwd * p4_mat[[l2, l1, e]];
                                value += (fwd * bwd).abs();
                            }
                            mel_k[[l1, n1, l2, n2]] = value;
                        }
                    }
                }
            }
        });
    mel_sq
}
