use crate::constants::FOUR_PI;
use crate::error::ConductivityError;
use crate::utils::trapz;
use log::warn;
use ndarray::prelude::*;
use ndarray::Zip;

/// 4 pi int exp(3x) f(x) dx, the integral of f(r) over the sphere.
pub fn int_sphere(fx: ArrayView1<f64>, xgrid: ArrayView1<f64>) -> f64 {
    let integrand: Array1<f64> = Zip::from(&fx)
        .and(&xgrid)
        .map_collect(|&f, &x| (3.0 * x).exp() * f);
    FOUR_PI * trapz(integrand.view(), xgrid)
}

/// Inner product <phi_0|phi_1> = 4 pi int exp(2x) X_0(x) X_1(x) dx of two
/// radial functions on the logarithmic grid.
pub fn prod_eigfuncs(phi_0: ArrayView1<f64>, phi_1: ArrayView1<f64>, xgrid: ArrayView1<f64>) -> f64 {
    let integrand: Array1<f64> = Zip::from(&phi_0)
        .and(&phi_1)
        .and(&xgrid)
        .map_collect(|&p0, &p1, &x| (2.0 * x).exp() * p0 * p1);
    FOUR_PI * trapz(integrand.view(), xgrid)
}

/// Projection of phi_1 onto phi_0: <phi_0|phi_1> / <phi_0|phi_0> phi_0
pub fn proj_eigfuncs(
    phi_0: ArrayView1<f64>,
    phi_1: ArrayView1<f64>,
    xgrid: ArrayView1<f64>,
) -> Array1<f64> {
    let norm: f64 = prod_eigfuncs(phi_0, phi_0, xgrid);
    if norm == 0.0 {
        return Array1::zeros(phi_0.len());
    }
    &phi_0 * (prod_eigfuncs(phi_0, phi_1, xgrid) / norm)
}

fn check_grid(eigfuncs: &ArrayView5<f64>, xgrid: &ArrayView1<f64>) -> Result<(), ConductivityError> {
    if eigfuncs.dim().4 != xgrid.len() {
        return Err(ConductivityError::ShapeMismatch {
            name: "eigfuncs",
            expected: vec![xgrid.len()],
            found: vec![eigfuncs.dim().4],
        });
    }
    Ok(())
}

/// Scale every orbital of [band, spin, l, n, grid] to 4 pi int r^2 |R|^2 dr = 1.
pub fn normalize_orbs(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
) -> Result<Array5<f64>, ConductivityError> {
    check_grid(&eigfuncs, &xgrid)?;
    let exp_x: Array1<f64> = xgrid.mapv(|x| (-x).exp());
    let mut eigfuncs_norm: Array5<f64> = eigfuncs.to_owned();
    for mut orb in eigfuncs_norm.lanes_mut(Axis(4)) {
        let orb_sq: Array1<f64> = &orb * &orb * &exp_x;
        let norm: f64 = int_sphere(orb_sq.view(), xgrid);
        if norm > 0.0 {
            orb /= norm.sqrt();
        } else {
            warn!("orbital with vanishing norm is not normalized");
        }
    }
    Ok(eigfuncs_norm)
}

/// Gram-Schmidt orthonormalization of the orbitals of every (band, spin, l)
/// channel in the order of increasing n. The projections are taken from the
/// original orbitals, the input is not modified.
pub fn orthonormalize(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
) -> Result<Array5<f64>, ConductivityError> {
    check_grid(&eigfuncs, &xgrid)?;
    let (n_bands, n_spin, lmax, nmax, n_grid) = eigfuncs.dim();
    let mut eigfuncs_ortho: Array5<f64> = Array5::zeros((n_bands, n_spin, lmax, nmax, n_grid));

    Zip::from(eigfuncs_ortho.axis_iter_mut(Axis(0)))
        .and(eigfuncs.axis_iter(Axis(0)))
        .par_for_each(|mut ortho_k, orbs_k| {
            for sp in 0..n_spin {
                for l in 0..lmax {
                    for n1 in 0..nmax {
                        let phi: ArrayView1<f64> = orbs_k.slice(s![sp, l, n1, ..]);
                        let mut phi_ortho: Array1<f64> = phi.to_owned();
                        for n2 in 0..n1 {
                            phi_ortho -=
                                &proj_eigfuncs(ortho_k.slice(s![sp, l, n2, ..]), phi, xgrid);
                        }
                        let norm: f64 = prod_eigfuncs(phi_ortho.view(), phi_ortho.view(), xgrid);
                        if norm > 0.0 {
                            phi_ortho /= norm.sqrt();
                        } else {
                            warn!(
                                "orbital (l={}, n={}) is linearly dependent and set to zero",
                                l, n1
                            );
                            phi_ortho.fill(0.0);
                        }
                        ortho_k.slice_mut(s![sp, l, n1, ..]).assign(&phi_ortho);
                    }
                }
            }
        });
    Ok(eigfuncs_ortho)
}

/// Short name of [orthonormalize].
pub fn gs_ortho(
    eigfuncs: ArrayView5<f64>,
    xgrid: ArrayView1<f64>,
) -> Result<Array5<f64>, ConductivityError> {
    orthonormalize(eigfuncs, xgrid)
}
