use std::error;
use std::fmt;

/// Failures that are reported to the caller. Numerical degeneracies and
/// selection-rule exclusions are never errors, they are handled locally.
#[derive(Debug, Clone, PartialEq)]
pub enum ConductivityError {
    /// The requested component of the conductivity is not one of tt, cc, cv, vv.
    UnknownComponent(String),
    /// A configuration value is out of range or could not be parsed.
    InvalidConfig(String),
    /// Two of the orbital arrays (or the grid) do not fit together.
    ShapeMismatch {
        name: &'static str,
        expected: Vec<usize>,
        found: Vec<usize>,
    },
    /// The logarithmic grid is too short or not strictly increasing.
    InvalidGrid(String),
    /// An orbital index lies outside of the lmax x nmax block.
    InvalidOrbital { l: usize, n: usize },
}

impl fmt::Display for ConductivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConductivityError::UnknownComponent(component) => write!(
                f,
                "Component of conductivity not recognised: '{}' (expected one of tt, cc, cv, vv)",
                component
            ),
            ConductivityError::InvalidConfig(message) => {
                write!(f, "Invalid configuration: {}", message)
            }
            ConductivityError::ShapeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "Shape mismatch for {}: expected {:?}, found {:?}",
                name, expected, found
            ),
            ConductivityError::InvalidGrid(message) => {
                write!(f, "Invalid logarithmic grid: {}", message)
            }
            ConductivityError::InvalidOrbital { l, n } => write!(
                f,
                "Orbital (l={}, n={}) is outside of the available orbitals",
                l, n
            ),
        }
    }
}

impl error::Error for ConductivityError {}
