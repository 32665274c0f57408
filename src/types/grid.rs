use crate::error::ConductivityError;
use ndarray::prelude::*;
use std::f64::consts::PI;

/// Logarithmic radial grid, x = ln(r). The grid itself is built by the
/// electronic-structure code, here it is only checked and used.
#[derive(Debug, Clone, PartialEq)]
pub struct LogGrid {
    xgrid: Array1<f64>,
}

impl LogGrid {
    pub fn new(xgrid: Array1<f64>) -> Result<Self, ConductivityError> {
        if xgrid.len() < 2 {
            return Err(ConductivityError::InvalidGrid(format!(
                "at least 2 points are needed, got {}",
                xgrid.len()
            )));
        }
        if let Some(i) = (1..xgrid.len()).find(|&i| !(xgrid[i] > xgrid[i - 1])) {
            return Err(ConductivityError::InvalidGrid(format!(
                "grid is not strictly increasing at point {}",
                i
            )));
        }
        Ok(Self { xgrid })
    }

    pub fn xgrid(&self) -> ArrayView1<f64> {
        self.xgrid.view()
    }

    /// The real-space grid r = exp(x).
    pub fn rgrid(&self) -> Array1<f64> {
        self.xgrid.mapv(f64::exp)
    }

    pub fn len(&self) -> usize {
        self.xgrid.len()
    }

    pub fn r_max(&self) -> f64 {
        self.xgrid[self.xgrid.len() - 1].exp()
    }

    /// Volume of the sphere bounded by the last grid point.
    pub fn sphere_volume(&self) -> f64 {
        (4.0 / 3.0) * PI * self.r_max().powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn volume_of_unit_sphere() {
        let grid: LogGrid = LogGrid::new(Array1::linspace(-5.0, 0.0, 11)).unwrap();
        assert_relative_eq!(grid.r_max(), 1.0);
        assert_relative_eq!(grid.sphere_volume(), 4.0 / 3.0 * PI, max_relative = 1e-14);
        assert_relative_eq!(grid.rgrid()[0], (-5.0_f64).exp());
    }

    #[test]
    fn reject_bad_grids() {
        assert!(LogGrid::new(array![1.0]).is_err());
        assert!(LogGrid::new(array![0.0, 1.0, 1.0]).is_err());
        assert!(LogGrid::new(array![0.0, 2.0, 1.0]).is_err());
        assert!(LogGrid::new(array![0.0, 1.0]).is_ok());
    }
}
