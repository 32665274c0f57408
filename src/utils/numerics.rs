use crate::constants::{GAUSS_LEGENDRE_EPS, GAUSS_LEGENDRE_MAX_ITER};
use ndarray::prelude::*;
use std::f64::consts::PI;

/// Integrate the samples `y` over the (not necessarily uniform) grid `x` with
/// the trapezoidal rule.
pub fn trapz(y: ArrayView1<f64>, x: ArrayView1<f64>) -> f64 {
    assert_eq!(y.len(), x.len(), "trapz: y and x need the same length");
    let mut integral: f64 = 0.0;
    for i in 1..x.len() {
        integral += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    integral
}

/// First derivative dy/dx on the grid `x`. Central differences that are exact
/// to second order on non-uniform grids are used in the interior and
/// second-order one-sided differences at both ends. For two points the
/// derivative reduces to the simple difference quotient.
pub fn gradient(y: ArrayView1<f64>, x: ArrayView1<f64>) -> Array1<f64> {
    let n: usize = x.len();
    assert_eq!(y.len(), n, "gradient: y and x need the same length");
    assert!(n >= 2, "gradient: at least 2 points are needed");
    let mut dy: Array1<f64> = Array1::zeros(n);

    if n == 2 {
        let slope: f64 = (y[1] - y[0]) / (x[1] - x[0]);
        dy.fill(slope);
        return dy;
    }

    for i in 1..n - 1 {
        let hs: f64 = x[i] - x[i - 1];
        let hd: f64 = x[i + 1] - x[i];
        dy[i] = (hs.powi(2) * y[i + 1] + (hd.powi(2) - hs.powi(2)) * y[i] - hd.powi(2) * y[i - 1])
            / (hs * hd * (hd + hs));
    }

    // left boundary
    let dx1: f64 = x[1] - x[0];
    let dx2: f64 = x[2] - x[1];
    let a: f64 = -(2.0 * dx1 + dx2) / (dx1 * (dx1 + dx2));
    let b: f64 = (dx1 + dx2) / (dx1 * dx2);
    let c: f64 = -dx1 / (dx2 * (dx1 + dx2));
    dy[0] = a * y[0] + b * y[1] + c * y[2];

    // right boundary
    let dx1: f64 = x[n - 2] - x[n - 3];
    let dx2: f64 = x[n - 1] - x[n - 2];
    let a: f64 = dx2 / (dx1 * (dx1 + dx2));
    let b: f64 = -(dx2 + dx1) / (dx1 * dx2);
    let c: f64 = (2.0 * dx2 + dx1) / (dx2 * (dx1 + dx2));
    dy[n - 1] = a * y[n - 3] + b * y[n - 2] + c * y[n - 1];

    dy
}

/// Nodes and weights of the `n`-point Gauss-Legendre rule on [-1, 1].
/// The roots of P_n are found by Newton iterations starting from the
/// Chebyshev-like guess cos(pi (i + 3/4) / (n + 1/2)).
pub fn gauss_legendre(n: usize) -> (Array1<f64>, Array1<f64>) {
    assert!(n >= 1, "gauss_legendre: at least one node is needed");
    let mut nodes: Array1<f64> = Array1::zeros(n);
    let mut weights: Array1<f64> = Array1::zeros(n);
    let nn: f64 = n as f64;

    for i in 0..(n + 1) / 2 {
        let mut z: f64 = (PI * (i as f64 + 0.75) / (nn + 0.5)).cos();
        for _ in 0..GAUSS_LEGENDRE_MAX_ITER {
            let (p_n, p_nm1): (f64, f64) = legendre_pn(n, z);
            let dp: f64 = nn * (z * p_n - p_nm1) / (z * z - 1.0);
            let z_old: f64 = z;
            z = z_old - p_n / dp;
            if (z - z_old).abs() < GAUSS_LEGENDRE_EPS {
                break;
            }
        }
        // P_n'(z) at the converged root
        let (p_n, p_nm1): (f64, f64) = legendre_pn(n, z);
        let dp: f64 = nn * (z * p_n - p_nm1) / (z * z - 1.0);
        let w: f64 = 2.0 / ((1.0 - z * z) * dp * dp);
        nodes[i] = -z;
        nodes[n - 1 - i] = z;
        weights[i] = w;
        weights[n - 1 - i] = w;
    }
    (nodes, weights)
}

/// Returns (P_n(z), P_{n-1}(z)) from the three-term recurrence.
fn legendre_pn(n: usize, z: f64) -> (f64, f64) {
    let mut p1: f64 = 1.0;
    let mut p2: f64 = 0.0;
    for j in 1..=n {
        let p3: f64 = p2;
        p2 = p1;
        p1 = ((2.0 * j as f64 - 1.0) * z * p2 - (j as f64 - 1.0) * p3) / (j as f64);
    }
    (p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn trapz_is_exact_for_linear_functions() {
        let x: Array1<f64> = array![0.0, 0.5, 1.5, 3.0];
        let y: Array1<f64> = x.mapv(|v| 2.0 * v + 1.0);
        assert_relative_eq!(trapz(y.view(), x.view()), 12.0, max_relative = 1e-14);
    }

    #[test]
    fn gradient_is_exact_for_quadratics_on_nonuniform_grids() {
        let x: Array1<f64> = array![0.0, 0.3, 0.5, 1.1, 1.2, 2.0];
        let y: Array1<f64> = x.mapv(|v| 3.0 * v * v - v + 2.0);
        let dy_ref: Array1<f64> = x.mapv(|v| 6.0 * v - 1.0);
        let dy: Array1<f64> = gradient(y.view(), x.view());
        for (a, b) in dy.iter().zip(dy_ref.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn gradient_of_two_points() {
        let dy: Array1<f64> = gradient(array![1.0, 3.0].view(), array![0.0, 0.5].view());
        assert_eq!(dy, array![4.0, 4.0]);
    }

    #[test]
    fn gauss_legendre_integrates_polynomials_exactly() {
        let n: usize = 6;
        let (nodes, weights): (Array1<f64>, Array1<f64>) = gauss_legendre(n);
        assert_relative_eq!(weights.sum(), 2.0, max_relative = 1e-14);
        // x^(2n-2) integrates to 2/(2n-1)
        for power in 0..2 * n {
            let integral: f64 = nodes
                .iter()
                .zip(weights.iter())
                .map(|(x, w)| w * x.powi(power as i32))
                .sum();
            let reference: f64 = if power % 2 == 0 {
                2.0 / (power as f64 + 1.0)
            } else {
                0.0
            };
            assert_abs_diff_eq!(integral, reference, epsilon = 1e-13);
        }
    }

    #[test]
    fn gauss_legendre_with_odd_number_of_nodes() {
        let (nodes, weights): (Array1<f64>, Array1<f64>) = gauss_legendre(3);
        assert_abs_diff_eq!(nodes[1], 0.0, epsilon = 1e-15);
        assert_relative_eq!(nodes[2], (3.0_f64 / 5.0).sqrt(), max_relative = 1e-14);
        assert_relative_eq!(weights[1], 8.0 / 9.0, max_relative = 1e-14);
        assert_relative_eq!(weights[0], 5.0 / 9.0, max_relative = 1e-14);
    }
}
