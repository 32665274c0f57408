use crate::constants::FOUR_PI;
use crate::error::ConductivityError;
use crate::types::OrbitalSubset;
use crate::utils::{gradient, trapz};
use ndarray::prelude::*;
use ndarray::Zip;

/// Radial derivative dR/dr of R(r) = X(x) exp(-x/2) expressed on the
/// logarithmic grid: dR/dr = exp(-1.5 x) (dX/dx - X/2).
pub fn radial_gradient(eigfunc: ArrayView1<f64>, xgrid: ArrayView1<f64>) -> Array1<f64> {
    let deriv: Array1<f64> = gradient(eigfunc, xgrid);
    let mut grad: Array1<f64> = &deriv - &(&eigfunc * 0.5);
    Zip::from(&mut grad)
        .and(&xgrid)
        .for_each(|g, &x| *g *= (-1.5 * x).exp());
    grad
}

/// int exp(3x) X_1(x) exp(-x/2) dR_2/dr dx, i.e. the radial part of <1|d/dr|2>
/// without the factor 4 pi.
pub fn r1_integral(orb_1: ArrayView1<f64>, orb_2: ArrayView1<f64>, xgrid: ArrayView1<f64>) -> f64 {
    let grad_orb_2: Array1<f64> = radial_gradient(orb_2, xgrid);
    r1_int_term(orb_1, grad_orb_2.view(), xgrid)
}

/// int exp(x) X_1(x) X_2(x) dx, the radial part of <1|1/r|2> without the factor 4 pi.
pub fn r2_integral(orb_1: ArrayView1<f64>, orb_2: ArrayView1<f64>, xgrid: ArrayView1<f64>) -> f64 {
    let integrand: Array1<f64> = Zip::from(&orb_1)
        .and(&orb_2)
        .and(&xgrid)
        .map_collect(|&o1, &o2, &x| x.exp() * o1 * o2);
    trapz(integrand.view(), xgrid)
}

fn r1_int_term(eigfunc: ArrayView1<f64>, grad_orb_2: ArrayView1<f64>, xgrid: ArrayView1<f64>) -> f64 {
    let integrand: Array1<f64> = Zip::from(&eigfunc)
        .and(&grad_orb_2)
        .and(&xgrid)
        .map_collect(|&o1, &g2, &x| (3.0 * x).exp() * o1 * (-x / 2.0).exp() * g2);
    trapz(integrand.view(), xgrid)
}

/// Radial derivatives of all orbitals of the first spin channel, [band, l, n, grid].
fn radial_gradients(eigfuncs: ArrayView5<f64>, xgrid: ArrayView1<f64>) -> Array4<f64> {
    let (n_bands, _, lmax, nmax, n_grid) = eigfuncs.dim();
    let mut grads: Array4<f64> = Array4::zeros((n_bands, lmax, nmax, n_grid));
    for k in 0..n_bands {
        for l in 0..lmax {
            for n in 0..nmax {
                grads
                    .slice_mut(s![k, l, n, ..])
                    .assign(&radial_gradient(eigfuncs.slice(s![k, 0, l, n, ..]), xgrid));
            }
        }
    }
    grads
}

fn check_input(
    eigfuncs: &ArrayView5<f64>,
    xgrid: &ArrayView1<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Result<(), ConductivityError> {
    let (_, _, lmax, nmax, n_grid) = eigfuncs.dim();
    if n_grid != xgrid.len() {
        return Err(ConductivityError::ShapeMismatch {
            name: "eigfuncs",
            expected: vec![xgrid.len()],
            found: vec![n_grid],
        });
    }
    orb_subset_1.check_bounds(lmax, nmax)?;
    orb_subset_2.check_bounds(lmax, nmax)
}

/// Gradient-type radial integrals R1[band, l1, n1, l2, n2] for all pairs of
/// the two subsets that are connected by a dipole transition (|l1 - l2| = 1).
/// If the two subsets differ, the transposed element is filled as well.
pub fn calc_r1_int_mat(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Result<Array5<f64>, ConductivityError> {
    check_input(&eigfuncs, &xgrid, orb_subset_1, orb_subset_2)?;
    Ok(r1_int_tensor(eigfuncs, xgrid, orb_subset_1, orb_subset_2))
}

/// Overlap-type radial integrals R2[band, l1, n1, l2, n2], same selection
/// rule and filling pattern as [calc_r1_int_mat].
pub fn calc_r2_int_mat(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Result<Array5<f64>, ConductivityError> {
    check_input(&eigfuncs, &xgrid, orb_subset_1, orb_subset_2)?;
    Ok(r2_int_tensor(eigfuncs, xgrid, orb_subset_1, orb_subset_2))
}

/// R1 without checks, the subsets have to lie inside of the orbital block.
pub(crate) fn r1_int_tensor(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Array5<f64> {
    let (n_bands, _, lmax, nmax, _) = eigfuncs.dim();
    let same_subsets: bool = orb_subset_1 == orb_subset_2;
    let grads: Array4<f64> = radial_gradients(eigfuncs, xgrid);
    let mut r1_mat: Array5<f64> = Array5::zeros((n_bands, lmax, nmax, lmax, nmax));

    Zip::from(r1_mat.axis_iter_mut(Axis(0)))
        .and(eigfuncs.axis_iter(Axis(0)))
        .and(grads.axis_iter(Axis(0)))
        .par_for_each(|mut r1_k, orbs_k, grads_k| {
            for &(l1, n1) in orb_subset_1.iter() {
                for &(l2, n2) in orb_subset_2.iter() {
                    if (l1 as i64 - l2 as i64).abs() != 1 {
                        continue;
                    }
                    r1_k[[l1, n1, l2, n2]] = FOUR_PI
                        * r1_int_term(
                            orbs_k.slice(s![0, l1, n1, ..]),
                            grads_k.slice(s![l2, n2, ..]),
                            xgrid,
                        );
                    if !same_subsets {
                        r1_k[[l2, n2, l1, n1]] = FOUR_PI
                            * r1_int_term(
                                orbs_k.slice(s![0, l2, n2, ..]),
                                grads_k.slice(s![l1, n1, ..]),
                                xgrid,
                            );
                    }
                }
            }
        });
    r1_mat
}

pub(crate) fn r2_int_tensor(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
    orb_subset_1: &OrbitalSubset,
    orb_subset_2: &OrbitalSubset,
) -> Array5<f64> {
    let (n_bands, _, lmax, nmax, _) = eigfuncs.dim();
    let same_subsets: bool = orb_subset_1 == orb_subset_2;
    let mut r2_mat: Array5<f64> = Array5::zeros((n_bands, lmax, nmax, lmax, nmax));

    Zip::from(r2_mat.axis_iter_mut(Axis(0)))
        .and(eigfuncs.axis_iter(Axis(0)))
        .par_for_each(|mut r2_k, orbs_k| {
            for &(l1, n1) in orb_subset_1.iter() {
                for &(l2, n2) in orb_subset_2.iter() {
                    if (l1 as i64 - l2 as i64).abs() != 1 {
                        continue;
                    }
                    let orb_1: ArrayView1<f64> = orbs_k.slice(s![0, l1, n1, ..]);
                    let orb_2: ArrayView1<f64> = orbs_k.slice(s![0, l2, n2, ..]);
                    r2_k[[l1, n1, l2, n2]] = FOUR_PI * r2_integral(orb_1, orb_2, xgrid);
                    if !same_subsets {
                        r2_k[[l2, n2, l1, n1]] = FOUR_PI * r2_integral(orb_2, orb_1, xgrid);
                    }
                }
            }
        });
    r2_mat
}
