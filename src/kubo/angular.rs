use crate::constants::GAUSS_LEGENDRE_EXTRA_NODES;
use crate::error::ConductivityError;
use crate::utils::gauss_legendre;
use ndarray::prelude::*;
use std::f64::consts::PI;

/// The two angular integrals that enter the dipole matrix elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngularKind {
    // int x P_l1^m P_l2^m dx
    P2,
    // int P_l1^m [(l2+m) P_(l2-1)^m - l2 x P_l2^m] dx
    P4,
}

impl AngularKind {
    pub fn from_index(index: usize) -> Result<Self, ConductivityError> {
        match index {
            2 => Ok(AngularKind::P2),
            4 => Ok(AngularKind::P4),
            _ => Err(ConductivityError::InvalidConfig(format!(
                "angular integral P{} does not exist, use P2 or P4",
                index
            ))),
        }
    }
}

/// (a)! / (b)! for a, b >= 0
fn factorial_ratio(a: usize, b: usize) -> f64 {
    if a >= b {
        ((b + 1)..=a).fold(1.0, |acc, i| acc * i as f64)
    } else {
        1.0 / ((a + 1)..=b).fold(1.0, |acc, i| acc * i as f64)
    }
}

/// Normalization of the spherical harmonics
/// c_lm = sqrt((2l+1) (l-m)! / (4 pi (l+m)!))
pub fn sph_ham_coeff(l: usize, m: i64) -> f64 {
    if m.abs() as usize > l {
        return 0.0;
    }
    let l_minus_m: usize = (l as i64 - m) as usize;
    let l_plus_m: usize = (l as i64 + m) as usize;
    ((2 * l + 1) as f64 * factorial_ratio(l_minus_m, l_plus_m) / (4.0 * PI)).sqrt()
}

/// Associated Legendre function P_l^m(x) including the Condon-Shortley phase.
/// Negative orders are obtained from P_l^-m = (-1)^m (l-m)!/(l+m)! P_l^m and
/// the function vanishes for |m| > l.
pub fn assoc_legendre(l: usize, m: i64, x: f64) -> f64 {
    let m_abs: usize = m.abs() as usize;
    if m_abs > l {
        return 0.0;
    }
    // P_m^m = (-1)^m (2m-1)!! (1-x^2)^(m/2)
    let mut pmm: f64 = 1.0;
    if m_abs > 0 {
        let somx2: f64 = ((1.0 - x) * (1.0 + x)).sqrt();
        let mut fact: f64 = 1.0;
        for _ in 0..m_abs {
            pmm *= -fact * somx2;
            fact += 2.0;
        }
    }
    let p_lm: f64 = if l == m_abs {
        pmm
    } else {
        let mut p_low: f64 = pmm;
        let mut p_high: f64 = x * (2 * m_abs + 1) as f64 * pmm;
        for ll in (m_abs + 2)..=l {
            let p_next: f64 = (x * (2 * ll - 1) as f64 * p_high - (ll + m_abs - 1) as f64 * p_low)
                / (ll - m_abs) as f64;
            p_low = p_high;
            p_high = p_next;
        }
        p_high
    };
    if m < 0 {
        let sign: f64 = if m_abs % 2 == 0 { 1.0 } else { -1.0 };
        sign * factorial_ratio(l - m_abs, l + m_abs) * p_lm
    } else {
        p_lm
    }
}

fn p2_func(x: f64, l1: usize, l2: usize, m: i64) -> f64 {
    x * assoc_legendre(l1, m, x) * assoc_legendre(l2, m, x)
}

fn p4_func(x: f64, l1: usize, l2: usize, m: i64) -> f64 {
    let factor: f64 = if l2 as i64 + m != 0 {
        let p_lower: f64 = if l2 == 0 {
            0.0
        } else {
            assoc_legendre(l2 - 1, m, x)
        };
        (l2 as i64 + m) as f64 * p_lower - l2 as f64 * x * assoc_legendre(l2, m, x)
    } else {
        -(l2 as f64) * x * assoc_legendre(l2, m, x)
    };
    assoc_legendre(l1, m, x) * factor
}

/// 2 pi c_(l1,m) c_(l2,m) int_-1^1 f(x) dx for the integrand of the given
/// kind. The integrands are polynomials of degree l1 + l2 + 1, the
/// Gauss-Legendre rule is exact for them.
pub fn p_integral(kind: AngularKind, l1: usize, l2: usize, m: i64) -> f64 {
    let n_nodes: usize = l1 + l2 + GAUSS_LEGENDRE_EXTRA_NODES;
    let (nodes, weights): (Array1<f64>, Array1<f64>) = gauss_legendre(n_nodes);
    let integrand: fn(f64, usize, usize, i64) -> f64 = match kind {
        AngularKind::P2 => p2_func,
        AngularKind::P4 => p4_func,
    };
    let integral: f64 = nodes
        .iter()
        .zip(weights.iter())
        .map(|(&x, &w)| w * integrand(x, l1, l2, m))
        .sum();
    2.0 * PI * sph_ham_coeff(l1, m) * sph_ham_coeff(l2, m) * integral
}

/// Angular integrals P[l1, l2, min(l1,l2) + m] for all l1, l2 < lmax with
/// |l1 - l2| = 1 and |m| <= min(l1, l2). All other elements are zero.
pub fn p_mat_int(kind: AngularKind, lmax: usize) -> Array3<f64> {
    let mut p_mat: Array3<f64> = Array3::zeros((lmax, lmax, 2 * lmax + 1));
    for l1 in 0..lmax {
        for l2 in 0..lmax {
            if (l1 as i64 - l2 as i64).abs() != 1 {
                continue;
            }
            let lsmall: i64 = l1.min(l2) as i64;
            for m in -lsmall..=lsmall {
                p_mat[[l1, l2, (lsmall + m) as usize]] = p_integral(kind, l1, l2, m);
            }
        }
    }
    p_mat
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn legendre_functions() {
        let x: f64 = 0.3;
        assert_relative_eq!(assoc_legendre(0, 0, x), 1.0);
        assert_relative_eq!(assoc_legendre(1, 0, x), x);
        assert_relative_eq!(assoc_legendre(2, 0, x), 0.5 * (3.0 * x * x - 1.0), max_relative = 1e-14);
        assert_relative_eq!(assoc_legendre(1, 1, x), -(1.0 - x * x).sqrt(), max_relative = 1e-14);
        assert_relative_eq!(
            assoc_legendre(2, 1, x),
            -3.0 * x * (1.0 - x * x).sqrt(),
            max_relative = 1e-14
        );
        assert_relative_eq!(assoc_legendre(2, 2, x), 3.0 * (1.0 - x * x), max_relative = 1e-14);
        assert_relative_eq!(
            assoc_legendre(3, 0, x),
            0.5 * (5.0 * x.powi(3) - 3.0 * x),
            max_relative = 1e-14
        );
        // P_1^-1 = -1/2 P_1^1
        assert_relative_eq!(assoc_legendre(1, -1, x), 0.5 * (1.0 - x * x).sqrt(), max_relative = 1e-14);
        assert_eq!(assoc_legendre(1, 2, x), 0.0);
    }

    #[test]
    fn spherical_harmonic_coefficients() {
        assert_relative_eq!(sph_ham_coeff(0, 0), (1.0 / (4.0 * PI)).sqrt(), max_relative = 1e-14);
        assert_relative_eq!(sph_ham_coeff(1, 0), (3.0 / (4.0 * PI)).sqrt(), max_relative = 1e-14);
        assert_relative_eq!(sph_ham_coeff(1, 1), (3.0 / (8.0 * PI)).sqrt(), max_relative = 1e-14);
        assert_relative_eq!(sph_ham_coeff(1, -1), (3.0 / (2.0 * PI)).sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn s_p_angular_integrals() {
        // 2 pi c_00 c_10 int x^2 dx = 1/sqrt(3)
        let inv_sqrt3: f64 = 1.0 / 3.0_f64.sqrt();
        assert_relative_eq!(p_integral(AngularKind::P2, 1, 0, 0), inv_sqrt3, max_relative = 1e-13);
        assert_relative_eq!(p_integral(AngularKind::P2, 0, 1, 0), inv_sqrt3, max_relative = 1e-13);
        // l2 + m = 0 with l2 = 0
        assert_eq!(p_integral(AngularKind::P4, 1, 0, 0), 0.0);
        // 2 pi c_00 c_10 int (1 - x^2) dx = 2/sqrt(3)
        assert_relative_eq!(
            p_integral(AngularKind::P4, 0, 1, 0),
            2.0 * inv_sqrt3,
            max_relative = 1e-13
        );
    }

    #[test]
    fn zero_outside_of_selection_rule() {
        for lmax in 1..6 {
            for kind in [AngularKind::P2, AngularKind::P4].iter() {
                let p_mat: Array3<f64> = p_mat_int(*kind, lmax);
                assert_eq!(p_mat.dim(), (lmax, lmax, 2 * lmax + 1));
                for ((l1, l2, e), value) in p_mat.indexed_iter() {
                    let lsmall: usize = l1.min(l2);
                    if (l1 as i64 - l2 as i64).abs() != 1 || e > 2 * lsmall {
                        assert_eq!(*value, 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn p2_is_symmetric_and_p4_antisymmetric_in_sum() {
        // integration by parts relates P4(l1,l2) + P4(l2,l1) to P2
        let p2: Array3<f64> = p_mat_int(AngularKind::P2, 4);
        let p4: Array3<f64> = p_mat_int(AngularKind::P4, 4);
        for l1 in 0..4 {
            for l2 in 0..4 {
                for e in 0..9 {
                    assert_abs_diff_eq!(p2[[l1, l2, e]], p2[[l2, l1, e]], epsilon = 1e-13);
                    assert_abs_diff_eq!(
                        p4[[l1, l2, e]] + p4[[l2, l1, e]],
                        2.0 * p2[[l1, l2, e]],
                        epsilon = 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn unknown_kind() {
        assert_eq!(AngularKind::from_index(4).unwrap(), AngularKind::P4);
        assert!(AngularKind::from_index(3).is_err());
    }
}
