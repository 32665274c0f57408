use kgcond::{LogGrid, OrbitalSet};
use ndarray::prelude::*;
use std::f64::consts::PI;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Logarithmic grid up to r = 30 Bohr.
pub fn log_grid(n_points: usize) -> LogGrid {
    LogGrid::new(Array1::linspace(-10.0, 30.0_f64.ln(), n_points)).unwrap()
}

/// One occupied s orbital R = exp(-r) / sqrt(pi) and one empty p orbital
/// R = r exp(-r) / sqrt(3 pi), both normalized to 4 pi int r^2 R^2 dr = 1.
/// The eigenvalue gap is 1.
pub fn s_p_system(grid: &LogGrid) -> OrbitalSet {
    let xgrid: ArrayView1<f64> = grid.xgrid();
    let mut eigfuncs: Array5<f64> = Array5::zeros((1, 1, 2, 1, xgrid.len()));
    for (i, &x) in xgrid.iter().enumerate() {
        let r: f64 = x.exp();
        eigfuncs[[0, 0, 0, 0, i]] = r.sqrt() * (-r).exp() / PI.sqrt();
        eigfuncs[[0, 0, 1, 0, i]] = r.sqrt() * r * (-r).exp() / (3.0 * PI).sqrt();
    }
    let eigvals: Array4<f64> = Array4::from_shape_vec((1, 1, 2, 1), vec![-0.5, 0.5]).unwrap();
    let occnums: Array4<f64> = Array4::from_shape_vec((1, 1, 2, 1), vec![2.0, 0.0]).unwrap();
    OrbitalSet::with_band_weights(eigfuncs, eigvals, occnums, array![1.0]).unwrap()
}

/// Two bands of Slater-type orbitals with lmax = 3 and nmax = 2. The n = 0
/// orbitals are lower in energy and more strongly occupied than all n = 1
/// orbitals.
pub fn slater_system(grid: &LogGrid) -> OrbitalSet {
    let xgrid: ArrayView1<f64> = grid.xgrid();
    let (n_bands, lmax, nmax): (usize, usize, usize) = (2, 3, 2);
    let eigfuncs: Array5<f64> =
        Array5::from_shape_fn((n_bands, 1, lmax, nmax, xgrid.len()), |(k, _, l, n, i)| {
            let r: f64 = xgrid[i].exp();
            let a: f64 = 1.0 + 0.5 * n as f64 + 0.1 * k as f64;
            r.sqrt() * r.powi(l as i32) * (-a * r).exp()
        });
    let eigvals: Array4<f64> = Array4::from_shape_fn((n_bands, 1, lmax, nmax), |(k, _, l, n)| {
        -3.0 + 2.0 * n as f64 + 0.3 * l as f64 + 0.05 * k as f64
    });
    let occnums: Array4<f64> = eigvals.mapv(|e| 2.0 / (1.0 + (2.0 * (e + 1.8)).exp()));
    OrbitalSet::with_band_weights(eigfuncs, eigvals, occnums, array![0.6, 0.4]).unwrap()
}
