mod grid;
mod orbitals;
mod subsets;

pub use grid::LogGrid;
pub use orbitals::OrbitalSet;
pub use subsets::{Component, OrbitalIndex, OrbitalPartition, OrbitalSubset};
