//! Kubo-Greenwood conductivity for average-atom orbitals on a logarithmic grid.
//!
//! The crate takes the orbitals of an average-atom calculation (eigenfunctions,
//! eigenvalues, occupations and density-of-states weights) and computes the
//! frequency integrated and the frequency resolved electrical conductivity,
//! split into total, conduction-conduction, conduction-valence and
//! valence-valence parts. A momentum sum-rule check and a Gram-Schmidt
//! orthonormalization of the radial functions are provided as diagnostics.
pub mod constants;
pub mod defaults;
mod error;
pub mod io;
pub mod kubo;
pub mod types;
mod utils;

pub use error::ConductivityError;
pub use io::KuboConfig;
pub use kubo::*;
pub use types::*;
pub use utils::{gradient, trapz, Timer};
