use crate::error::ConductivityError;
use ndarray::prelude::*;

/// Orbitals of an average-atom calculation.
///
/// - `eigfuncs`: radial eigenfunctions X(x) = r^(1/2) R(r) with the shape [band, spin, l, n, grid]
/// - `eigvals`: eigenvalues [band, spin, l, n]
/// - `occnums`: occupation numbers [band, spin, l, n]
/// - `dos_weights`: density of states times k-point integration weight [band, spin, l, n]
#[derive(Debug, Clone)]
pub struct OrbitalSet {
    eigfuncs: Array5<f64>,
    eigvals: Array4<f64>,
    occnums: Array4<f64>,
    dos_weights: Array4<f64>,
}

impl OrbitalSet {
    pub fn new(
        eigfuncs: Array5<f64>,
        eigvals: Array4<f64>,
        occnums: Array4<f64>,
        dos_weights: Array4<f64>,
    ) -> Result<Self, ConductivityError> {
        let expected: Vec<usize> = eigvals.shape().to_vec();
        if eigfuncs.shape()[..4] != expected[..] {
            return Err(ConductivityError::ShapeMismatch {
                name: "eigfuncs",
                expected,
                found: eigfuncs.shape()[..4].to_vec(),
            });
        }
        if occnums.shape() != &expected[..] {
            return Err(ConductivityError::ShapeMismatch {
                name: "occnums",
                expected,
                found: occnums.shape().to_vec(),
            });
        }
        if dos_weights.shape() != &expected[..] {
            return Err(ConductivityError::ShapeMismatch {
                name: "dos_weights",
                expected,
                found: dos_weights.shape().to_vec(),
            });
        }
        Ok(Self {
            eigfuncs,
            eigvals,
            occnums,
            dos_weights,
        })
    }

    /// Same as [OrbitalSet::new], but with a single weight per band that is
    /// used for every spin channel and orbital of that band.
    pub fn with_band_weights(
        eigfuncs: Array5<f64>,
        eigvals: Array4<f64>,
        occnums: Array4<f64>,
        band_weights: Array1<f64>,
    ) -> Result<Self, ConductivityError> {
        let dim: (usize, usize, usize, usize) = eigvals.dim();
        if band_weights.len() != dim.0 {
            return Err(ConductivityError::ShapeMismatch {
                name: "band_weights",
                expected: vec![dim.0],
                found: vec![band_weights.len()],
            });
        }
        let dos_weights: Array4<f64> =
            Array4::from_shape_fn(dim, |(k, _, _, _)| band_weights[k]);
        Self::new(eigfuncs, eigvals, occnums, dos_weights)
    }

    pub fn eigfuncs(&self) -> ArrayView5<f64> {
        self.eigfuncs.view()
    }

    pub fn eigvals(&self) -> ArrayView4<f64> {
        self.eigvals.view()
    }

    pub fn occnums(&self) -> ArrayView4<f64> {
        self.occnums.view()
    }

    pub fn dos_weights(&self) -> ArrayView4<f64> {
        self.dos_weights.view()
    }

    pub fn n_bands(&self) -> usize {
        self.eigvals.dim().0
    }

    pub fn n_spin(&self) -> usize {
        self.eigvals.dim().1
    }

    pub fn lmax(&self) -> usize {
        self.eigvals.dim().2
    }

    pub fn nmax(&self) -> usize {
        self.eigvals.dim().3
    }

    pub fn n_grid(&self) -> usize {
        self.eigfuncs.dim().4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_shapes_are_accepted() {
        let orbitals: OrbitalSet = OrbitalSet::with_band_weights(
            Array5::zeros((2, 1, 3, 2, 10)),
            Array4::zeros((2, 1, 3, 2)),
            Array4::zeros((2, 1, 3, 2)),
            array![0.5, 1.5],
        )
        .unwrap();
        assert_eq!(orbitals.n_bands(), 2);
        assert_eq!(orbitals.n_spin(), 1);
        assert_eq!(orbitals.lmax(), 3);
        assert_eq!(orbitals.nmax(), 2);
        assert_eq!(orbitals.n_grid(), 10);
        assert_eq!(orbitals.dos_weights()[[1, 0, 2, 1]], 1.5);
    }

    #[test]
    fn mismatching_shapes_are_rejected() {
        let result = OrbitalSet::new(
            Array5::zeros((1, 1, 2, 2, 10)),
            Array4::zeros((1, 1, 2, 2)),
            Array4::zeros((1, 1, 2, 3)),
            Array4::zeros((1, 1, 2, 2)),
        );
        assert_eq!(
            result.unwrap_err(),
            ConductivityError::ShapeMismatch {
                name: "occnums",
                expected: vec![1, 1, 2, 2],
                found: vec![1, 1, 2, 3],
            }
        );
        let result = OrbitalSet::new(
            Array5::zeros((1, 1, 3, 2, 10)),
            Array4::zeros((1, 1, 2, 2)),
            Array4::zeros((1, 1, 2, 2)),
            Array4::zeros((1, 1, 2, 2)),
        );
        assert!(matches!(
            result,
            Err(ConductivityError::ShapeMismatch { name: "eigfuncs", .. })
        ));
        let result = OrbitalSet::with_band_weights(
            Array5::zeros((1, 1, 2, 2, 10)),
            Array4::zeros((1, 1, 2, 2)),
            Array4::zeros((1, 1, 2, 2)),
            array![1.0, 2.0],
        );
        assert!(result.is_err());
    }
}
