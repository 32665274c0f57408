use crate::error::ConductivityError;
use itertools::Itertools;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

/// Angular momentum and principal index (l, n) of a radial orbital.
pub type OrbitalIndex = (usize, usize);

/// A set of orbitals. Membership and equality do not depend on the order,
/// the order of insertion is only kept to make the enumeration stable.
#[derive(Debug, Clone, Default)]
pub struct OrbitalSubset {
    orbs: Vec<OrbitalIndex>,
}

impl OrbitalSubset {
    pub fn new(orbs: Vec<OrbitalIndex>) -> Self {
        orbs.into_iter().collect()
    }

    /// All orbitals of the lmax x nmax block, l runs in the outer loop.
    pub fn all_orbs(lmax: usize, nmax: usize) -> Self {
        Self {
            orbs: (0..lmax).cartesian_product(0..nmax).collect(),
        }
    }

    /// Orbitals of `self` that are not contained in `other`. Both inputs are untouched.
    pub fn difference(&self, other: &Self) -> Self {
        Self {
            orbs: self
                .orbs
                .iter()
                .filter(|orb| !other.contains(orb))
                .copied()
                .collect(),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).copied().collect()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|orb| !other.contains(orb))
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|orb| other.contains(orb))
    }

    pub fn contains(&self, orb: &OrbitalIndex) -> bool {
        self.orbs.contains(orb)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrbitalIndex> {
        self.orbs.iter()
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn to_vec(&self) -> Vec<OrbitalIndex> {
        self.orbs.clone()
    }

    /// Fails with the first orbital that lies outside of the lmax x nmax block.
    pub fn check_bounds(&self, lmax: usize, nmax: usize) -> Result<(), ConductivityError> {
        match self.iter().find(|&&(l, n)| l >= lmax || n >= nmax) {
            Some(&(l, n)) => Err(ConductivityError::InvalidOrbital { l, n }),
            None => Ok(()),
        }
    }
}

impl PartialEq for OrbitalSubset {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for OrbitalSubset {}

impl FromIterator<OrbitalIndex> for OrbitalSubset {
    fn from_iter<I: IntoIterator<Item = OrbitalIndex>>(iter: I) -> Self {
        let mut orbs: Vec<OrbitalIndex> = Vec::new();
        for orb in iter {
            if !orbs.contains(&orb) {
                orbs.push(orb);
            }
        }
        Self { orbs }
    }
}

impl<'a> IntoIterator for &'a OrbitalSubset {
    type Item = &'a OrbitalIndex;
    type IntoIter = std::slice::Iter<'a, OrbitalIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.orbs.iter()
    }
}

/// The parts into which the conductivity can be split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    // all x all
    Total,
    // conduction x conduction
    ConductionConduction,
    // conduction x valence
    ConductionValence,
    // valence x valence
    ValenceValence,
}

impl Component {
    pub const ALL: [Component; 4] = [
        Component::Total,
        Component::ConductionConduction,
        Component::ConductionValence,
        Component::ValenceValence,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Component::Total => "tt",
            Component::ConductionConduction => "cc",
            Component::ConductionValence => "cv",
            Component::ValenceValence => "vv",
        }
    }
}

impl FromStr for Component {
    type Err = ConductivityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tt" => Ok(Component::Total),
            "cc" => Ok(Component::ConductionConduction),
            "cv" => Ok(Component::ConductionValence),
            "vv" => Ok(Component::ValenceValence),
            _ => Err(ConductivityError::UnknownComponent(String::from(s))),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Split of all orbitals into valence and conduction orbitals. The
/// conduction orbitals are always derived from the other two sets.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalPartition {
    pub all_orbs: OrbitalSubset,
    pub valence_orbs: OrbitalSubset,
    pub cond_orbs: OrbitalSubset,
}

impl OrbitalPartition {
    pub fn new(
        lmax: usize,
        nmax: usize,
        valence_orbs: &OrbitalSubset,
    ) -> Result<Self, ConductivityError> {
        valence_orbs.check_bounds(lmax, nmax)?;
        let all_orbs: OrbitalSubset = OrbitalSubset::all_orbs(lmax, nmax);
        let cond_orbs: OrbitalSubset = all_orbs.difference(valence_orbs);
        Ok(Self {
            all_orbs,
            valence_orbs: valence_orbs.clone(),
            cond_orbs,
        })
    }

    /// The two orbital sets that enter the double sum for a component.
    pub fn subsets(&self, component: Component) -> (&OrbitalSubset, &OrbitalSubset) {
        match component {
            Component::Total => (&self.all_orbs, &self.all_orbs),
            Component::ConductionConduction => (&self.cond_orbs, &self.cond_orbs),
            Component::ConductionValence => (&self.cond_orbs, &self.valence_orbs),
            Component::ValenceValence => (&self.valence_orbs, &self.valence_orbs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_orbs_is_cartesian_product() {
        let all: OrbitalSubset = OrbitalSubset::all_orbs(2, 3);
        assert_eq!(
            all.to_vec(),
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn equality_ignores_order() {
        let a: OrbitalSubset = OrbitalSubset::new(vec![(0, 0), (1, 0), (1, 0)]);
        let b: OrbitalSubset = OrbitalSubset::new(vec![(1, 0), (0, 0)]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_ne!(a, OrbitalSubset::new(vec![(0, 0)]));
    }

    #[test]
    fn partition_covers_all_orbitals() {
        let valence_sets: Vec<Vec<OrbitalIndex>> = vec![
            vec![],
            vec![(0, 0)],
            vec![(0, 0), (1, 0)],
            vec![(2, 1), (0, 1), (1, 2)],
            OrbitalSubset::all_orbs(3, 3).to_vec(),
        ];
        for valence in valence_sets.into_iter() {
            let valence: OrbitalSubset = OrbitalSubset::new(valence);
            let partition: OrbitalPartition = OrbitalPartition::new(3, 3, &valence).unwrap();
            assert!(partition.cond_orbs.is_disjoint(&partition.valence_orbs));
            assert_eq!(
                partition.cond_orbs.union(&partition.valence_orbs),
                partition.all_orbs
            );
        }
    }

    #[test]
    fn repeated_partitions_are_identical() {
        let valence: OrbitalSubset = OrbitalSubset::new(vec![(0, 0), (1, 0)]);
        let first: OrbitalPartition = OrbitalPartition::new(2, 2, &valence).unwrap();
        let second: OrbitalPartition = OrbitalPartition::new(2, 2, &valence).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.cond_orbs.to_vec(), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn valence_outside_of_grid_is_rejected() {
        let valence: OrbitalSubset = OrbitalSubset::new(vec![(3, 0)]);
        assert_eq!(
            OrbitalPartition::new(2, 2, &valence),
            Err(ConductivityError::InvalidOrbital { l: 3, n: 0 })
        );
    }

    #[test]
    fn bounds_of_the_orbital_block() {
        let orbs: OrbitalSubset = OrbitalSubset::new(vec![(0, 1), (2, 0)]);
        assert!(orbs.check_bounds(3, 2).is_ok());
        assert_eq!(
            orbs.check_bounds(2, 2),
            Err(ConductivityError::InvalidOrbital { l: 2, n: 0 })
        );
        assert_eq!(
            orbs.check_bounds(3, 1),
            Err(ConductivityError::InvalidOrbital { l: 0, n: 1 })
        );
        assert!(OrbitalSubset::default().check_bounds(0, 0).is_ok());
    }

    #[test]
    fn component_tags() {
        for component in Component::ALL.iter() {
            assert_eq!(Component::from_str(component.tag()).unwrap(), *component);
        }
        assert_eq!(
            Component::from_str("ct"),
            Err(ConductivityError::UnknownComponent(String::from("ct")))
        );
    }
}
